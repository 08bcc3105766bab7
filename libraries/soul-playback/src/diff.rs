//! Props diffing
//!
//! Computes what has to happen to move the live graph and transport from
//! one set of props to the next. Pure and independent of any runtime, so
//! every reconciliation rule can be tested on its own.

use crate::props::{PlayStatus, PlayerProps};
use crate::settings::PlayerSettings;

/// One step required to apply a props update
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileAction {
    /// Point the transport at a new URL
    LoadSource(String),

    /// Band layout changed: tear down and rebuild the filter chain
    RebuildChain,

    /// Same band layout, different gains or pre-amp: patch stage gains
    PatchGains,

    /// New linear gain for the volume stage
    SetVolume(f32),

    /// Seek the transport to a position in seconds
    Seek(f64),

    /// Run the transport state machine towards a status
    Transition(PlayStatus),

    /// New stereo pan
    SetPan(f32),

    /// Visualization handler attached: start sampling
    StartSampling,

    /// Visualization handler detached: stop sampling
    StopSampling,
}

/// Actions needed to go from `prev` to `next`, in application order
///
/// Identical props produce no actions.
pub fn diff(prev: &PlayerProps, next: &PlayerProps, settings: &PlayerSettings) -> Vec<ReconcileAction> {
    let mut actions = Vec::new();

    if prev.url != next.url {
        if let Some(url) = &next.url {
            actions.push(ReconcileAction::LoadSource(url.clone()));
        }
    }

    if prev.equalizer != next.equalizer || !same_value(prev.pre_amp, next.pre_amp) {
        if prev.equalizer.same_bands(&next.equalizer) {
            actions.push(ReconcileAction::PatchGains);
        } else {
            actions.push(ReconcileAction::RebuildChain);
        }
    }

    if prev.clamped_volume() != next.clamped_volume() {
        actions.push(ReconcileAction::SetVolume(next.volume_gain()));
    }

    if let Some(position) = next.position {
        if needs_seek(prev.position, position, settings.seek_threshold_secs) {
            actions.push(ReconcileAction::Seek(position.max(0.0)));
        }
    }

    if prev.play_status != next.play_status {
        actions.push(ReconcileAction::Transition(next.play_status));
    }

    if prev.clamped_pan() != next.clamped_pan() {
        actions.push(ReconcileAction::SetPan(next.clamped_pan()));
    }

    match (prev.visualization, next.visualization) {
        (false, true) if !next.equalizer.is_empty() => {
            actions.push(ReconcileAction::StartSampling);
        }
        (true, false) => actions.push(ReconcileAction::StopSampling),
        _ => {}
    }

    actions
}

/// Rewinds always seek; forward jumps seek only past the drift threshold
///
/// Small forward drift is the transport's own progress echoed back by the
/// host and must not feed back into a seek. A position supplied for the
/// first time (`prev` is `None`) always seeks, so a host that sets a start
/// position after construction is honoured.
fn needs_seek(prev: Option<f64>, next: f64, threshold: f64) -> bool {
    match prev {
        None => true,
        Some(prev) if prev == next => false,
        Some(prev) => next < prev || next - prev > threshold,
    }
}

/// Float equality where NaN matches NaN
fn same_value(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

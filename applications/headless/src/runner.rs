//! Session runner
//!
//! Drives one `PlaybackReconciler` from a single task. Four sources feed the
//! loop:
//! - scripted props updates, at their offsets
//! - transport clock ticks, which advance the simulated transport
//! - transport events, forwarded to the reconciler
//! - visualization sampling ticks from the `IntervalTimer`

use crate::config::HeadlessConfig;
use crate::error::Result;
use crate::session::Session;
use crate::transport::SimulatedTransport;
use soul_graph::MemoryGraph;
use soul_playback::{
    IntervalTimer, PlaybackReconciler, PlayerEvent, Transport, TransportEvent,
};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

type HeadlessReconciler = PlaybackReconciler<
    MemoryGraph,
    SimulatedTransport,
    IntervalTimer,
    mpsc::UnboundedSender<PlayerEvent>,
>;

/// What happened during a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Props updates applied after the initial build
    pub updates: usize,

    /// Reconcile actions those updates produced
    pub actions: usize,

    /// Sampling ticks handled
    pub sampling_ticks: usize,

    /// Whether the source played to its end
    pub finished: bool,

    /// Transport position when the session stopped
    pub final_position: f64,
}

/// Replay `session`, delivering player events to `events`
///
/// Runs until every step has been applied and then either the source ends
/// or `simulation.linger_ms` passes. The player is torn down on return.
pub async fn run_session(
    config: &HeadlessConfig,
    session: Session,
    events: mpsc::UnboundedSender<PlayerEvent>,
) -> Result<RunSummary> {
    let started = Instant::now();
    let end = started + session.span() + config.simulation.linger();
    let (initial, updates) = session.into_parts();

    let (transport, mut transport_events) =
        SimulatedTransport::new(config.simulation.track_duration_secs);
    let (timer, mut ticks) = IntervalTimer::new(config.player.sampling_interval());

    let mut player = PlaybackReconciler::build(
        MemoryGraph::new(),
        transport,
        timer,
        events,
        initial,
        config.player.clone(),
    )?;
    info!(
        "Session started: {} scheduled updates, {} equalizer stages",
        updates.len(),
        player.chain().len()
    );

    let mut clock = tokio::time::interval(config.simulation.time_update_interval());
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    clock.tick().await;
    let clock_step = config.simulation.time_update_interval().as_secs_f64();

    let mut summary = RunSummary::default();
    let mut pending = updates.into_iter().peekable();

    loop {
        let deadline = pending
            .peek()
            .map(|step| started + step.offset())
            .unwrap_or(end);

        tokio::select! {
            () = tokio::time::sleep_until(deadline) => {
                match pending.next() {
                    Some(step) => {
                        let applied = player.update(step.props);
                        debug!("Update at {}ms applied {:?}", step.at_ms, applied);
                        summary.updates += 1;
                        summary.actions += applied.len();
                    }
                    None => {
                        debug!("Linger elapsed");
                        break;
                    }
                }
            }
            _ = clock.tick() => {
                player.transport_mut().advance(clock_step);
            }
            Some(event) = transport_events.recv() => {
                let ended = event == TransportEvent::Ended;
                player.handle_transport_event(event);
                if ended {
                    summary.finished = true;
                    if pending.peek().is_none() {
                        break;
                    }
                }
            }
            Some(tick) = ticks.recv() => {
                // Ticks queued before a cancel/restart are dropped
                if player.timer().is_current(tick) {
                    sample(&mut player, started.elapsed().as_secs_f32());
                    summary.sampling_ticks += 1;
                }
            }
        }
    }

    summary.final_position = player.transport().current_time();
    player.teardown();
    info!(
        "Session finished: {} updates, {} actions, {} sampling ticks",
        summary.updates, summary.actions, summary.sampling_ticks
    );

    Ok(summary)
}

/// Feed the in-memory analyser a fresh frame, then sample it
fn sample(player: &mut HeadlessReconciler, elapsed: f32) {
    let bins = player.settings().frequency_bin_count();
    player
        .graph_mut()
        .set_spectrum(synthetic_spectrum(bins, elapsed));
    player.sample_tick();
}

/// Pink-ish spectrum with a slow shimmer, in analyser byte range
pub fn synthetic_spectrum(bins: usize, elapsed: f32) -> Vec<f32> {
    (0..bins)
        .map(|bin| {
            let falloff = 1.0 / (1.0 + bin as f32 / 64.0);
            let shimmer = 0.8 + 0.2 * (elapsed * 3.0 + bin as f32 * 0.01).sin();
            255.0 * falloff * shimmer
        })
        .collect()
}

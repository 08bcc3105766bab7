//! Common test utilities and fixtures
#![allow(dead_code)]

use soul_graph::{EqualizerSpec, MemoryGraph};
use soul_playback::{
    PlaybackReconciler, PlayerEvent, PlayerProps, PlayerSettings, SamplingTimer, Transport,
};

/// Command issued to the transport
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String),
    Play,
    Pause,
    SetTime(f64),
}

/// Transport that records every command
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub commands: Vec<Command>,
    pub time: f64,
    pub duration: Option<f64>,
}

impl RecordingTransport {
    /// Forget commands issued so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Transport for RecordingTransport {
    fn load(&mut self, url: &str) {
        self.commands.push(Command::Load(url.to_string()));
    }

    fn play(&mut self) {
        self.commands.push(Command::Play);
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
        self.commands.push(Command::SetTime(seconds));
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}

/// Timer that counts start/cancel calls
#[derive(Debug, Default)]
pub struct CountingTimer {
    pub starts: usize,
    pub cancels: usize,
}

impl CountingTimer {
    pub fn is_running(&self) -> bool {
        self.starts > self.cancels
    }
}

impl SamplingTimer for CountingTimer {
    fn start(&mut self) {
        self.starts += 1;
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

pub type TestReconciler =
    PlaybackReconciler<MemoryGraph, RecordingTransport, CountingTimer, Vec<PlayerEvent>>;

/// Build a reconciler over recording collaborators
pub fn build(props: PlayerProps) -> TestReconciler {
    PlaybackReconciler::build(
        MemoryGraph::new(),
        RecordingTransport::default(),
        CountingTimer::default(),
        Vec::new(),
        props,
        PlayerSettings::default(),
    )
    .expect("default settings are valid")
}

/// Build, then forget the commands issued during construction
pub fn build_quiet(props: PlayerProps) -> TestReconciler {
    let mut reconciler = build(props);
    reconciler.transport_mut().clear();
    reconciler
}

/// 60 / 310 / 3000 / 14000 Hz, flat
pub fn four_band() -> EqualizerSpec {
    EqualizerSpec::from_pairs([(60.0, 0.0), (310.0, 0.0), (3000.0, 0.0), (14000.0, 0.0)])
}

/// Monotonically increasing spectrum: bin k has energy k
pub fn ramp_spectrum(len: usize) -> Vec<f32> {
    (0..len).map(|i| i as f32).collect()
}

//! Common test utilities and fixtures
#![allow(dead_code)]

use soul_headless::{run_session, HeadlessConfig, RunSummary, Session};
use soul_playback::PlayerEvent;
use tokio::sync::mpsc;

/// Config with a short source and explicit linger
pub fn config(track_duration_secs: f64, linger_ms: u64) -> HeadlessConfig {
    let mut config = HeadlessConfig::default();
    config.simulation.track_duration_secs = track_duration_secs;
    config.simulation.linger_ms = linger_ms;
    config
}

/// Run a JSON session to completion and collect every event
pub async fn replay(config: &HeadlessConfig, script: &str) -> (RunSummary, Vec<PlayerEvent>) {
    let session = Session::from_json(script).expect("valid session script");
    let (tx, mut rx) = mpsc::unbounded_channel();

    let summary = run_session(config, session, tx)
        .await
        .expect("session runs");

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    (summary, events)
}

pub fn count(events: &[PlayerEvent], wanted: impl Fn(&PlayerEvent) -> bool) -> usize {
    events.iter().filter(|event| wanted(event)).count()
}

//! Scripted props sessions
//!
//! A session is a JSON list of steps, each holding the complete props the
//! host would pass at that moment:
//!
//! ```json
//! [
//!   { "at_ms": 0,    "props": { "url": "song.mp3", "play_status": "PAUSED" } },
//!   { "at_ms": 500,  "props": { "url": "song.mp3", "play_status": "PLAYING" } },
//!   { "at_ms": 2000, "props": { "url": "song.mp3", "play_status": "STOPPED" } }
//! ]
//! ```
//!
//! The first step builds the player; later steps are applied as updates.

use crate::error::{HeadlessError, Result};
use serde::{Deserialize, Serialize};
use soul_playback::{diff, PlayerProps, PlayerSettings, ReconcileAction};
use std::path::Path;
use std::time::Duration;

/// One scripted props update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStep {
    /// Offset from session start, in milliseconds
    #[serde(default)]
    pub at_ms: u64,

    /// Props in effect from this step on
    pub props: PlayerProps,
}

impl SessionStep {
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// Ordered list of session steps
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    steps: Vec<SessionStep>,
}

impl Session {
    /// Validate and wrap a list of steps
    ///
    /// Requires at least one step and non-decreasing offsets.
    pub fn new(steps: Vec<SessionStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(HeadlessError::Session(
                "session has no steps".to_string(),
            ));
        }

        if let Some(index) = steps.windows(2).position(|w| w[1].at_ms < w[0].at_ms) {
            return Err(HeadlessError::Session(format!(
                "step {} at {}ms comes before step {} at {}ms",
                index + 1,
                steps[index + 1].at_ms,
                index,
                steps[index].at_ms
            )));
        }

        Ok(Self { steps })
    }

    /// Parse a session from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let steps: Vec<SessionStep> = serde_json::from_str(text)?;
        Self::new(steps)
    }

    /// Read and parse a session file
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text)
    }

    pub fn steps(&self) -> &[SessionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Offset of the last step
    pub fn span(&self) -> Duration {
        self.steps
            .last()
            .map(SessionStep::offset)
            .unwrap_or_default()
    }

    /// Split into the initial props and the timed updates that follow
    pub fn into_parts(self) -> (PlayerProps, Vec<SessionStep>) {
        let mut steps = self.steps.into_iter();
        // `new` guarantees at least one step
        let initial = steps.next().map(|step| step.props).unwrap_or_default();
        (initial, steps.collect())
    }

    /// Actions each update would apply, without touching a graph
    ///
    /// Entry `i` holds the diff between step `i` and step `i + 1`.
    pub fn plan(&self, settings: &PlayerSettings) -> Vec<Vec<ReconcileAction>> {
        self.steps
            .windows(2)
            .map(|w| diff(&w[0].props, &w[1].props, settings))
            .collect()
    }
}

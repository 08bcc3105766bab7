//! Player events
//!
//! Outputs delivered to the host:
//! - Transport progress (`Playing`) on every time update
//! - End of media, load start, load complete
//! - One `VisualizationChange` per sampling tick while visualization runs

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted by the reconciler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Transport time update
    Playing {
        /// Current position in seconds
        position: f64,
        /// Media duration in seconds, if known
        duration: Option<f64>,
    },

    /// Playback reached the end of the media
    FinishedPlaying,

    /// Decoding started
    Loading,

    /// Decoding finished and playback can proceed
    Load,

    /// Aggregated spectrum, one value per equalizer band (may be shorter)
    VisualizationChange {
        /// Values in equalizer band order
        values: Vec<f32>,
    },
}

/// Receiver of player events
pub trait EventSink {
    /// Deliver one event
    fn emit(&mut self, event: PlayerEvent);
}

impl EventSink for Box<dyn FnMut(PlayerEvent)> {
    fn emit(&mut self, event: PlayerEvent) {
        self(event);
    }
}

impl EventSink for Vec<PlayerEvent> {
    fn emit(&mut self, event: PlayerEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::UnboundedSender<PlayerEvent> {
    fn emit(&mut self, event: PlayerEvent) {
        // Receiver gone means nobody is listening any more
        let _ = self.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_sink() {
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = seen.clone();
        let mut sink: Box<dyn FnMut(PlayerEvent)> =
            Box::new(move |_event| counter.set(counter.get() + 1));

        sink.emit(PlayerEvent::Loading);
        sink.emit(PlayerEvent::Load);
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn channel_sink_survives_closed_receiver() {
        let (mut tx, rx) = mpsc::unbounded_channel::<PlayerEvent>();
        drop(rx);
        tx.emit(PlayerEvent::FinishedPlaying);
    }

    #[test]
    fn event_serialization() {
        let event = PlayerEvent::Playing {
            position: 1.5,
            duration: Some(180.0),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Playing":{"position":1.5,"duration":180.0}}"#);
    }
}

//! Soul Player - Playback Reconciliation
//!
//! Declarative playback for Soul Player: the host describes what it wants
//! (url, play status, position, volume, equalizer, pre-amp, stereo pan) and
//! the reconciler works out the smallest set of graph and transport changes.
//!
//! This crate provides:
//! - Explicit props diffing (`diff`) producing ordered `ReconcileAction`s
//! - Transport state machine (Playing, Paused, Stopped)
//! - Seek suppression for small forward drift
//! - In-place equalizer gain patching vs. full chain rebuild
//! - Cancellable visualization sampling (`IntervalTimer`)
//!
//! # Architecture
//!
//! `soul-playback` never decodes audio or processes samples:
//! - The audio graph is an `AudioGraph` (from `soul-graph`)
//! - Decoding and output sit behind the `Transport` trait
//! - Timing sits behind the `SamplingTimer` trait
//!
//! Everything runs on one thread. Transport callbacks and sampling ticks
//! are routed back into the reconciler by the host's event loop.
//!
//! # Example: Reconciling Props
//!
//! ```rust
//! use soul_graph::{EqualizerSpec, MemoryGraph};
//! use soul_playback::{
//!     PlayStatus, PlaybackReconciler, PlayerEvent, PlayerProps, PlayerSettings,
//!     SamplingTimer, Transport, TransportEvent,
//! };
//!
//! # #[derive(Default)]
//! # struct Silent { time: f64 }
//! # impl Transport for Silent {
//! #     fn load(&mut self, _url: &str) {}
//! #     fn play(&mut self) {}
//! #     fn pause(&mut self) {}
//! #     fn current_time(&self) -> f64 { self.time }
//! #     fn set_current_time(&mut self, seconds: f64) { self.time = seconds; }
//! #     fn duration(&self) -> Option<f64> { Some(180.0) }
//! # }
//! # struct NoTimer;
//! # impl SamplingTimer for NoTimer {
//! #     fn start(&mut self) {}
//! #     fn cancel(&mut self) {}
//! # }
//! let props = PlayerProps {
//!     url: Some("https://example.com/song.mp3".to_string()),
//!     equalizer: EqualizerSpec::from_pairs([(60.0, 0.0), (1000.0, 0.0), (14000.0, 0.0)]),
//!     ..Default::default()
//! };
//!
//! let mut player = PlaybackReconciler::build(
//!     MemoryGraph::new(),
//!     Silent::default(),
//!     NoTimer,
//!     Vec::<PlayerEvent>::new(),
//!     props.clone(),
//!     PlayerSettings::default(),
//! )
//! .unwrap();
//!
//! // Gain-only change: stages are patched, not rebuilt
//! let mut louder = props.clone();
//! louder.equalizer = EqualizerSpec::from_pairs([(60.0, 4.0), (1000.0, 0.0), (14000.0, 2.0)]);
//! player.update(louder.clone());
//!
//! // Same props again: nothing to do
//! assert!(player.update(louder).is_empty());
//!
//! player.handle_transport_event(TransportEvent::TimeUpdate);
//! assert_eq!(player.state().status, PlayStatus::Playing);
//! ```

pub mod diff;
mod error;
pub mod events;
pub mod props;
mod reconciler;
pub mod sampling;
pub mod settings;
pub mod transport;

// Public exports
pub use diff::{diff, ReconcileAction};
pub use error::{PlaybackError, Result};
pub use events::{EventSink, PlayerEvent};
pub use props::{PlayStatus, PlayerProps, TransportState};
pub use reconciler::PlaybackReconciler;
pub use sampling::{IntervalTimer, SamplingTick, SamplingTimer};
pub use settings::PlayerSettings;
pub use transport::{Transport, TransportEvent};

//! Media transport abstraction
//!
//! The transport decodes a URL and exposes play/pause/seek. It is driven by
//! the reconciler and reports back through `TransportEvent`s that the host
//! forwards to `PlaybackReconciler::handle_transport_event`.

/// Platform media transport
///
/// Implementors wrap whatever actually decodes and outputs the media
/// (an HTML media element, a Symphonia-backed player, a simulation).
pub trait Transport {
    /// Point the transport at a new media URL
    fn load(&mut self, url: &str);

    /// Request playback start
    ///
    /// Asynchronous: the outcome arrives later as
    /// `TransportEvent::PlayStarted` or `TransportEvent::PlayRejected`.
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Move to a position in seconds
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds, if known
    fn duration(&self) -> Option<f64>;
}

/// Notifications from the transport
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Periodic position report while playing
    TimeUpdate,

    /// Media reached its end
    Ended,

    /// Decoding started
    LoadStart,

    /// Enough media is decoded to play through
    CanPlayThrough,

    /// A `play()` request succeeded
    PlayStarted,

    /// A `play()` request failed
    PlayRejected(String),
}

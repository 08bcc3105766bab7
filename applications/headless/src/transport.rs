//! Simulated media transport
//!
//! Stands in for a real decoder: keeps a clock, honours play/pause/seek and
//! reports back through `TransportEvent`s on a channel, the way a media
//! element would fire its callbacks.

use soul_playback::{Transport, TransportEvent};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Clock-only transport for headless sessions
#[derive(Debug)]
pub struct SimulatedTransport {
    events: mpsc::UnboundedSender<TransportEvent>,
    source: Option<String>,
    playing: bool,
    time: f64,
    track_duration: f64,
}

impl SimulatedTransport {
    /// Create a transport whose sources all last `track_duration` seconds
    pub fn new(track_duration: f64) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let transport = Self {
            events,
            source: None,
            playing: false,
            time: 0.0,
            track_duration,
        };
        (transport, rx)
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Move the clock forward while playing
    ///
    /// Fires `TimeUpdate`, or `Ended` once the end of the source is reached.
    pub fn advance(&mut self, elapsed_secs: f64) {
        if !self.playing {
            return;
        }

        self.time += elapsed_secs;
        if self.time >= self.track_duration {
            self.time = self.track_duration;
            self.playing = false;
            debug!("Simulated source ended");
            self.send(TransportEvent::Ended);
        } else {
            self.send(TransportEvent::TimeUpdate);
        }
    }

    fn send(&self, event: TransportEvent) {
        trace!("Transport event: {:?}", event);
        // Receiver gone means the session is shutting down
        let _ = self.events.send(event);
    }
}

impl Transport for SimulatedTransport {
    fn load(&mut self, url: &str) {
        debug!("Loading simulated source: {}", url);
        self.source = Some(url.to_string());
        self.playing = false;
        self.time = 0.0;
        self.send(TransportEvent::LoadStart);
        self.send(TransportEvent::CanPlayThrough);
    }

    fn play(&mut self) {
        if self.source.is_none() {
            self.send(TransportEvent::PlayRejected(
                "no source loaded".to_string(),
            ));
            return;
        }

        // Restarting at the end rewinds, like a media element does
        if self.time >= self.track_duration {
            self.time = 0.0;
        }

        self.playing = true;
        self.send(TransportEvent::PlayStarted);
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds.clamp(0.0, self.track_duration);
    }

    fn duration(&self) -> Option<f64> {
        self.source.as_ref().map(|_| self.track_duration)
    }
}

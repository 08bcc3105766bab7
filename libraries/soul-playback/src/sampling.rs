//! Visualization sampling timer
//!
//! A cancellable periodic timer. Each tick is delivered as a `SamplingTick`
//! message; the owner of the reconciler routes it to
//! `PlaybackReconciler::sample_tick` on its own thread, so the audio graph
//! is never touched from the timer task.
//!
//! Ticks still queued when the timer is cancelled and restarted belong to
//! an older run. `IntervalTimer::is_current` tells them apart.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One visualization sampling request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingTick {
    /// Run of the timer that produced this tick
    pub generation: u64,
}

/// Start/stop control over the periodic sampling tick
///
/// The reconciler calls `start` only when stopped and `cancel` only when
/// running, but implementations must still treat both as idempotent.
pub trait SamplingTimer {
    /// Begin issuing ticks
    fn start(&mut self);

    /// Stop issuing ticks
    fn cancel(&mut self);
}

/// `SamplingTimer` backed by a tokio interval task
///
/// Must be started from within a tokio runtime.
pub struct IntervalTimer {
    period: Duration,
    tx: mpsc::UnboundedSender<SamplingTick>,
    generation: u64,
    running: Option<(CancellationToken, JoinHandle<()>)>,
}

impl IntervalTimer {
    /// Create a timer and the receiver its ticks arrive on
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<SamplingTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = Self {
            period,
            tx,
            generation: 0,
            running: None,
        };
        (timer, rx)
    }

    /// Check if the tick task is live
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Check if `tick` came from the live run
    ///
    /// False for ticks queued before the last `cancel`.
    pub fn is_current(&self, tick: SamplingTick) -> bool {
        self.running.is_some() && tick.generation == self.generation
    }
}

impl SamplingTimer for IntervalTimer {
    fn start(&mut self) {
        if self.running.is_some() {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();
        let child = token.clone();
        let tx = self.tx.clone();
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    () = child.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(SamplingTick { generation }).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        debug!("Sampling timer started ({:?})", self.period);
        self.running = Some((token, handle));
    }

    fn cancel(&mut self) {
        if let Some((token, _handle)) = self.running.take() {
            token.cancel();
            debug!("Sampling timer cancelled");
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

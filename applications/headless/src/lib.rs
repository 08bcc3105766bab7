//! Soul Player - Headless
//!
//! Replays scripted props sessions against the playback reconciler, using
//! the in-memory audio graph and a simulated transport clock. Useful for
//! exercising reconciliation end to end without an audio device.

pub mod config;
pub mod error;
pub mod runner;
pub mod session;
pub mod transport;

pub use config::HeadlessConfig;
pub use error::{HeadlessError, Result};
pub use runner::{run_session, RunSummary};
pub use session::{Session, SessionStep};
pub use transport::SimulatedTransport;

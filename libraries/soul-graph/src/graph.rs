//! Audio-graph primitives
//!
//! The core never processes samples itself. It decides which nodes exist,
//! with what parameters, and how they are wired; an `AudioGraph`
//! implementation owns the actual signal path (Web Audio, cpal backend,
//! or the in-memory graph used for headless runs).

use crate::filter_chain::FilterStage;
use serde::{Deserialize, Serialize};

/// Opaque handle to a node owned by an `AudioGraph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Node primitives the filter chain and reconciler drive
///
/// # Contract
/// - `connect` appends an edge; a node may feed several successors
/// - `disconnect` removes every outgoing edge of `node`
/// - Parameter setters on a node of the wrong kind are ignored
pub trait AudioGraph {
    /// Media source node (decoded transport output)
    fn input(&self) -> NodeId;

    /// Final destination node
    fn output(&self) -> NodeId;

    /// Create a linear gain stage
    fn create_gain(&mut self, gain: f32) -> NodeId;

    /// Create a stereo panner (-1.0 left to 1.0 right)
    fn create_stereo_panner(&mut self, pan: f32) -> NodeId;

    /// Create a biquad filter configured from a stage descriptor
    fn create_filter(&mut self, stage: &FilterStage) -> NodeId;

    /// Create a spectrum analyser with the given transform size
    fn create_analyser(&mut self, fft_size: usize) -> NodeId;

    /// Route the output of `from` into `to`
    fn connect(&mut self, from: NodeId, to: NodeId);

    /// Remove all outgoing connections of `node`
    fn disconnect(&mut self, node: NodeId);

    /// Update a gain stage's linear gain
    fn set_gain(&mut self, node: NodeId, gain: f32);

    /// Update a panner's position
    fn set_pan(&mut self, node: NodeId, pan: f32);

    /// Update a filter's gain in dB (type, frequency and Q are untouched)
    fn set_filter_gain(&mut self, node: NodeId, gain_db: f32);

    /// Copy the analyser's current per-bin energy into `frame`
    ///
    /// `frame.len()` is normally `fft_size / 2`. Bins the analyser cannot fill are set to zero.
    fn frequency_data(&mut self, analyser: NodeId, frame: &mut [f32]);
}

//! In-memory audio graph
//!
//! Keeps node parameters and edges in plain collections. Used by the
//! headless runner and by tests to inspect exactly what the chain builder
//! and reconciler created.

use crate::filter_chain::FilterStage;
use crate::graph::{AudioGraph, NodeId};

/// A node held by `MemoryGraph`
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryNode {
    /// Media source
    Input,
    /// Destination
    Output,
    /// Linear gain stage
    Gain(f32),
    /// Stereo panner
    Panner(f32),
    /// Biquad filter
    Filter(FilterStage),
    /// Spectrum analyser
    Analyser {
        /// Transform size
        fft_size: usize,
    },
}

/// Audio graph backed by vectors
#[derive(Debug, Clone)]
pub struct MemoryGraph {
    nodes: Vec<MemoryNode>,
    edges: Vec<(NodeId, NodeId)>,
    spectrum: Vec<f32>,
}

impl MemoryGraph {
    /// Create a graph holding only the input and output nodes
    pub fn new() -> Self {
        Self {
            nodes: vec![MemoryNode::Input, MemoryNode::Output],
            edges: Vec::new(),
            spectrum: Vec::new(),
        }
    }

    /// Set the energy values every analyser reports
    pub fn set_spectrum(&mut self, spectrum: Vec<f32>) {
        self.spectrum = spectrum;
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Filter descriptor of a filter node
    pub fn filter(&self, id: NodeId) -> Option<&FilterStage> {
        match self.node(id) {
            Some(MemoryNode::Filter(stage)) => Some(stage),
            _ => None,
        }
    }

    /// Direct successors of `id`, in connection order
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|(from, _)| *from == id)
            .map(|(_, to)| *to)
            .collect()
    }

    /// Follow first successors from `start` until a node has none
    ///
    /// The returned path includes `start`. Stops if a node repeats.
    pub fn chain_from(&self, start: NodeId) -> Vec<NodeId> {
        let mut path = vec![start];
        let mut current = start;
        while let Some(next) = self.successors(current).first().copied() {
            if path.contains(&next) {
                break;
            }
            path.push(next);
            current = next;
        }
        path
    }

    /// Total nodes ever created, including input and output
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn push(&mut self, node: MemoryNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioGraph for MemoryGraph {
    fn input(&self) -> NodeId {
        NodeId(0)
    }

    fn output(&self) -> NodeId {
        NodeId(1)
    }

    fn create_gain(&mut self, gain: f32) -> NodeId {
        self.push(MemoryNode::Gain(gain))
    }

    fn create_stereo_panner(&mut self, pan: f32) -> NodeId {
        self.push(MemoryNode::Panner(pan))
    }

    fn create_filter(&mut self, stage: &FilterStage) -> NodeId {
        self.push(MemoryNode::Filter(*stage))
    }

    fn create_analyser(&mut self, fft_size: usize) -> NodeId {
        self.push(MemoryNode::Analyser { fft_size })
    }

    fn connect(&mut self, from: NodeId, to: NodeId) {
        self.edges.push((from, to));
    }

    fn disconnect(&mut self, node: NodeId) {
        self.edges.retain(|(from, _)| *from != node);
    }

    fn set_gain(&mut self, node: NodeId, gain: f32) {
        if let Some(MemoryNode::Gain(value)) = self.nodes.get_mut(node.0 as usize) {
            *value = gain;
        }
    }

    fn set_pan(&mut self, node: NodeId, pan: f32) {
        if let Some(MemoryNode::Panner(value)) = self.nodes.get_mut(node.0 as usize) {
            *value = pan;
        }
    }

    fn set_filter_gain(&mut self, node: NodeId, gain_db: f32) {
        if let Some(MemoryNode::Filter(stage)) = self.nodes.get_mut(node.0 as usize) {
            stage.gain_db = gain_db;
        }
    }

    fn frequency_data(&mut self, analyser: NodeId, frame: &mut [f32]) {
        if !matches!(self.node(analyser), Some(MemoryNode::Analyser { .. })) {
            return;
        }
        let n = frame.len().min(self.spectrum.len());
        frame[..n].copy_from_slice(&self.spectrum[..n]);
        frame[n..].fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_ignore_wrong_kind() {
        let mut graph = MemoryGraph::new();
        let pan = graph.create_stereo_panner(0.0);

        graph.set_gain(pan, 0.5);
        assert_eq!(graph.node(pan), Some(&MemoryNode::Panner(0.0)));

        graph.set_pan(pan, -0.25);
        assert_eq!(graph.node(pan), Some(&MemoryNode::Panner(-0.25)));
    }

    #[test]
    fn disconnect_removes_outgoing_only() {
        let mut graph = MemoryGraph::new();
        let gain = graph.create_gain(1.0);
        graph.connect(graph.input(), gain);
        graph.connect(gain, graph.output());

        graph.disconnect(gain);

        assert_eq!(graph.successors(graph.input()), vec![gain]);
        assert!(graph.successors(gain).is_empty());
    }

    #[test]
    fn analyser_copies_seeded_spectrum() {
        let mut graph = MemoryGraph::new();
        let analyser = graph.create_analyser(8);
        graph.set_spectrum(vec![1.0, 2.0, 3.0]);

        let mut frame = [9.0f32; 4];
        graph.frequency_data(analyser, &mut frame);
        assert_eq!(frame, [1.0, 2.0, 3.0, 0.0]);
    }
}

//! Equalizer filter chain
//!
//! Turns an `EqualizerSpec` into an ordered list of biquad stages and wires
//! them into a single linear chain. Stage type and Q are derived once from
//! the band layout; later gain-only updates patch each stage in place.

use crate::equalizer::EqualizerSpec;
use crate::error::{GraphError, Result};
use crate::graph::{AudioGraph, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filter type for equalizer stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterType {
    /// Low shelf - boosts/cuts below frequency
    LowShelf,
    /// Peaking - boosts/cuts around frequency with Q bandwidth
    Peaking,
    /// High shelf - boosts/cuts above frequency
    HighShelf,
}

/// Descriptor for one stage of the chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterStage {
    /// Shelf or peak, fixed at construction
    pub filter_type: FilterType,
    /// Center frequency in Hz, fixed at construction
    pub frequency: f32,
    /// Band gain plus pre-amp, in dB
    pub gain_db: f32,
    /// Bandwidth for peaking stages; `None` for shelves
    pub q: Option<f32>,
}

/// Derive stage descriptors for an equalizer
///
/// First entry is a low shelf, last a high shelf, everything between is a
/// peak with `Q = 2f / |f_next - f_prev|`. A single entry is a low shelf.
pub fn describe_stages(spec: &EqualizerSpec, pre_amp: f32) -> Vec<FilterStage> {
    let bands = spec.bands();
    let n = bands.len();

    bands
        .iter()
        .enumerate()
        .map(|(i, band)| {
            let (filter_type, q) = if i == 0 {
                (FilterType::LowShelf, None)
            } else if i == n - 1 {
                (FilterType::HighShelf, None)
            } else {
                let spread = (bands[i + 1].frequency - bands[i - 1].frequency).abs();
                (FilterType::Peaking, Some(2.0 * band.frequency / spread))
            };

            FilterStage {
                filter_type,
                frequency: band.frequency,
                gain_db: band.gain_db + pre_amp,
                q,
            }
        })
        .collect()
}

/// A built chain of filter stages and the nodes backing them
#[derive(Debug, Clone)]
pub struct FilterChain {
    head: NodeId,
    stages: Vec<FilterStage>,
    nodes: Vec<NodeId>,
}

impl FilterChain {
    /// Build and wire the chain after `head`
    ///
    /// With an empty equalizer no nodes are created and `tail()` is `head`.
    pub fn build<G: AudioGraph>(
        graph: &mut G,
        head: NodeId,
        spec: &EqualizerSpec,
        pre_amp: f32,
    ) -> Self {
        let stages = describe_stages(spec, pre_amp);
        let mut nodes = Vec::with_capacity(stages.len());

        let mut previous = head;
        for stage in &stages {
            let node = graph.create_filter(stage);
            graph.connect(previous, node);
            nodes.push(node);
            previous = node;
        }

        debug!("Built filter chain with {} stages", stages.len());

        Self {
            head,
            stages,
            nodes,
        }
    }

    /// Last node of the chain, for downstream wiring
    pub fn tail(&self) -> NodeId {
        self.nodes.last().copied().unwrap_or(self.head)
    }

    /// Node the chain was built after
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// Stage descriptors in chain order
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Filter nodes in chain order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the chain has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Check if `spec` has exactly this chain's frequencies, in order
    pub fn matches(&self, spec: &EqualizerSpec) -> bool {
        self.stages.len() == spec.len()
            && self
                .stages
                .iter()
                .zip(spec.iter())
                .all(|(stage, band)| stage.frequency == band.frequency)
    }

    /// Patch each stage's gain in place, by index
    ///
    /// Type, frequency, Q and connections are untouched. Fails without
    /// modifying anything if `spec` has a different band layout.
    pub fn patch_gains<G: AudioGraph>(
        &mut self,
        graph: &mut G,
        spec: &EqualizerSpec,
        pre_amp: f32,
    ) -> Result<()> {
        if !self.matches(spec) {
            return Err(GraphError::BandMismatch {
                built: self.stages.len(),
                requested: spec.len(),
            });
        }

        for ((stage, node), band) in self.stages.iter_mut().zip(&self.nodes).zip(spec.iter()) {
            stage.gain_db = band.gain_db + pre_amp;
            graph.set_filter_gain(*node, stage.gain_db);
        }

        debug!("Patched gains on {} stages", self.stages.len());
        Ok(())
    }

    /// Disconnect the head and every stage so the chain can be rebuilt
    pub fn detach<G: AudioGraph>(&self, graph: &mut G) {
        graph.disconnect(self.head);
        for node in &self.nodes {
            graph.disconnect(*node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;

    fn four_band() -> EqualizerSpec {
        EqualizerSpec::from_pairs([(60.0, 1.0), (310.0, -2.0), (3000.0, 0.5), (14000.0, 4.0)])
    }

    #[test]
    fn empty_spec_passes_through() {
        let mut graph = MemoryGraph::new();
        let head = graph.input();
        let chain = FilterChain::build(&mut graph, head, &EqualizerSpec::new(), 3.0);

        assert!(chain.is_empty());
        assert_eq!(chain.tail(), head);
        assert!(graph.successors(head).is_empty());
    }

    #[test]
    fn shelves_at_edges_peaks_inside() {
        let stages = describe_stages(&four_band(), 0.0);

        assert_eq!(stages.len(), 4);
        assert_eq!(stages[0].filter_type, FilterType::LowShelf);
        assert_eq!(stages[1].filter_type, FilterType::Peaking);
        assert_eq!(stages[2].filter_type, FilterType::Peaking);
        assert_eq!(stages[3].filter_type, FilterType::HighShelf);
        assert!(stages[0].q.is_none());
        assert!(stages[3].q.is_none());
    }

    #[test]
    fn peaking_q_from_neighbours() {
        let stages = describe_stages(&four_band(), 0.0);

        // 2 * 310 / (3000 - 60)
        let q1 = stages[1].q.unwrap();
        assert!((q1 - 620.0 / 2940.0).abs() < 1e-6);

        // 2 * 3000 / (14000 - 310)
        let q2 = stages[2].q.unwrap();
        assert!((q2 - 6000.0 / 13690.0).abs() < 1e-6);
    }

    #[test]
    fn single_band_is_low_shelf() {
        let spec = EqualizerSpec::from_pairs([(1000.0, 2.0)]);
        let stages = describe_stages(&spec, 0.0);

        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].filter_type, FilterType::LowShelf);
        assert!(stages[0].q.is_none());
    }

    #[test]
    fn pre_amp_added_to_every_stage() {
        let stages = describe_stages(&four_band(), -6.0);
        let gains: Vec<f32> = stages.iter().map(|s| s.gain_db).collect();
        assert_eq!(gains, vec![-5.0, -8.0, -5.5, -2.0]);
    }

    #[test]
    fn build_wires_linear_chain() {
        let mut graph = MemoryGraph::new();
        let head = graph.input();
        let chain = FilterChain::build(&mut graph, head, &four_band(), 0.0);

        let path = graph.chain_from(head);
        assert_eq!(&path[1..], chain.nodes());
        assert_eq!(chain.tail(), chain.nodes()[3]);
    }

    #[test]
    fn patch_updates_gain_only() {
        let mut graph = MemoryGraph::new();
        let head = graph.input();
        let mut chain = FilterChain::build(&mut graph, head, &four_band(), 0.0);
        let before = chain.stages().to_vec();
        let nodes_before = graph.node_count();

        let updated =
            EqualizerSpec::from_pairs([(60.0, 6.0), (310.0, 6.0), (3000.0, 6.0), (14000.0, 6.0)]);
        chain.patch_gains(&mut graph, &updated, 1.0).unwrap();

        assert_eq!(graph.node_count(), nodes_before);
        for (old, new) in before.iter().zip(chain.stages()) {
            assert_eq!(old.filter_type, new.filter_type);
            assert_eq!(old.frequency, new.frequency);
            assert_eq!(old.q, new.q);
            assert_eq!(new.gain_db, 7.0);
        }
        for node in chain.nodes() {
            assert_eq!(graph.filter(*node).unwrap().gain_db, 7.0);
        }
    }

    #[test]
    fn patch_rejects_different_layout() {
        let mut graph = MemoryGraph::new();
        let head = graph.input();
        let mut chain = FilterChain::build(&mut graph, head, &four_band(), 0.0);

        let other = EqualizerSpec::from_pairs([(60.0, 6.0), (14000.0, 6.0)]);
        let err = chain.patch_gains(&mut graph, &other, 0.0).unwrap_err();

        assert_eq!(
            err,
            GraphError::BandMismatch {
                built: 4,
                requested: 2
            }
        );
        assert_eq!(chain.stages()[0].gain_db, 1.0);
    }

    #[test]
    fn detach_clears_edges() {
        let mut graph = MemoryGraph::new();
        let head = graph.input();
        let chain = FilterChain::build(&mut graph, head, &four_band(), 0.0);

        chain.detach(&mut graph);

        assert!(graph.successors(head).is_empty());
        for node in chain.nodes() {
            assert!(graph.successors(*node).is_empty());
        }
    }
}

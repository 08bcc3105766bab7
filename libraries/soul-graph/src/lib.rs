//! Soul Player Graph
//!
//! Equalizer signal-graph construction and spectrum aggregation for Soul Player.
//!
//! This crate provides:
//! - `EqualizerSpec`: ordered frequency -> gain band layout
//! - `FilterChain`: shelf/peak stage derivation, linear wiring and in-place gain patching
//! - `SpectrumAggregator`: maps analyser bins back onto the equalizer bands
//! - `AudioGraph`: the node primitives a backend must provide, plus `MemoryGraph`
//!
//! No samples are processed here. The crate decides which nodes exist and
//! how they are configured; the `AudioGraph` implementation does the DSP.
//!
//! # Example: Building a Chain
//!
//! ```rust
//! use soul_graph::{AudioGraph, EqualizerSpec, FilterChain, FilterType, MemoryGraph};
//!
//! let mut graph = MemoryGraph::new();
//! let spec = EqualizerSpec::from_pairs([(60.0, 3.0), (1000.0, -2.0), (12000.0, 1.0)]);
//!
//! let head = graph.input();
//! let mut chain = FilterChain::build(&mut graph, head, &spec, 0.0);
//! graph.connect(chain.tail(), graph.output());
//!
//! assert_eq!(chain.stages()[1].filter_type, FilterType::Peaking);
//!
//! // Same bands, new gains: patched in place
//! let louder = EqualizerSpec::from_pairs([(60.0, 6.0), (1000.0, 0.0), (12000.0, 2.0)]);
//! chain.patch_gains(&mut graph, &louder, -1.0).unwrap();
//! assert_eq!(chain.stages()[0].gain_db, 5.0);
//! ```

pub mod equalizer;
mod error;
pub mod filter_chain;
pub mod graph;
pub mod memory;
pub mod spectrum;

pub use equalizer::{EqualizerBand, EqualizerSpec};
pub use error::{GraphError, Result};
pub use filter_chain::{describe_stages, FilterChain, FilterStage, FilterType};
pub use graph::{AudioGraph, NodeId};
pub use memory::{MemoryGraph, MemoryNode};
pub use spectrum::{SpectrumAggregator, ANALYSER_FFT_SIZE, FREQUENCY_BIN_COUNT, SAMPLING_STEP_HZ};

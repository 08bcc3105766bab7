//! Playback reconciler - core orchestration
//!
//! Owns the audio graph, transport and sampling timer for one player and
//! turns props updates into the minimal set of graph and transport changes.
//!
//! Graph layout:
//!
//! ```text
//! input -> gain(volume) -> [filter stages] -> analyser -> panner -> output
//! ```

use crate::{
    diff::{diff, ReconcileAction},
    error::{PlaybackError, Result},
    events::{EventSink, PlayerEvent},
    props::{PlayStatus, PlayerProps, TransportState},
    sampling::SamplingTimer,
    settings::PlayerSettings,
    transport::{Transport, TransportEvent},
};
use soul_graph::{AudioGraph, FilterChain, NodeId, SpectrumAggregator};
use tracing::{debug, trace, warn};

/// Fixed nodes around the filter chain
#[derive(Debug, Clone, Copy)]
struct FixedNodes {
    gain: NodeId,
    analyser: NodeId,
    panner: NodeId,
}

/// Declarative player: reconciles props against a live graph and transport
pub struct PlaybackReconciler<G, T, S, E>
where
    G: AudioGraph,
    T: Transport,
    S: SamplingTimer,
    E: EventSink,
{
    graph: G,
    transport: T,
    timer: S,
    sink: E,
    settings: PlayerSettings,
    nodes: FixedNodes,
    chain: FilterChain,
    aggregator: SpectrumAggregator,
    frame: Vec<f32>,
    props: PlayerProps,
    state: TransportState,
    sampling: bool,
    torn_down: bool,
}

impl<G, T, S, E> PlaybackReconciler<G, T, S, E>
where
    G: AudioGraph,
    T: Transport,
    S: SamplingTimer,
    E: EventSink,
{
    /// Build the graph and apply the initial props
    ///
    /// Creates every node, points the transport at the initial URL and
    /// position, and runs the state machine for the initial play status.
    pub fn build(
        mut graph: G,
        mut transport: T,
        timer: S,
        sink: E,
        props: PlayerProps,
        settings: PlayerSettings,
    ) -> Result<Self> {
        settings.validate()?;

        let gain = graph.create_gain(props.volume_gain());
        let analyser = graph.create_analyser(settings.analyser_fft_size);
        let panner = graph.create_stereo_panner(props.clamped_pan());

        graph.connect(graph.input(), gain);
        let chain = FilterChain::build(&mut graph, gain, &props.equalizer, props.pre_amp);
        graph.connect(chain.tail(), analyser);
        graph.connect(analyser, panner);
        graph.connect(panner, graph.output());

        if let Some(url) = &props.url {
            transport.load(url);
        }
        if let Some(position) = props.position {
            transport.set_current_time(position.max(0.0));
        }

        let aggregator =
            SpectrumAggregator::with_step(settings.sampling_step_hz, props.equalizer.frequencies());

        debug!(
            "Built playback graph: {} equalizer stages, fft size {}",
            chain.len(),
            settings.analyser_fft_size
        );

        let mut reconciler = Self {
            graph,
            transport,
            timer,
            sink,
            frame: vec![0.0; settings.frequency_bin_count()],
            settings,
            nodes: FixedNodes {
                gain,
                analyser,
                panner,
            },
            chain,
            aggregator,
            state: TransportState::from_props(&props),
            props,
            sampling: false,
            torn_down: false,
        };

        let status = reconciler.props.play_status;
        reconciler.transition(status);

        Ok(reconciler)
    }

    /// Apply a new set of props
    ///
    /// Returns the actions that were applied. Applying the same props twice
    /// applies nothing the second time. Ignored after `teardown`.
    pub fn update(&mut self, next: PlayerProps) -> Vec<ReconcileAction> {
        if self.torn_down {
            return Vec::new();
        }

        let actions = diff(&self.props, &next, &self.settings);
        self.props = next;

        for action in &actions {
            self.apply(action);
        }

        if !actions.is_empty() {
            trace!("Applied {} actions", actions.len());
        }
        actions
    }

    fn apply(&mut self, action: &ReconcileAction) {
        match action {
            ReconcileAction::LoadSource(url) => {
                debug!("Loading source {}", url);
                self.transport.load(url);
            }
            ReconcileAction::RebuildChain => self.rebuild_chain(),
            ReconcileAction::PatchGains => self.patch_gains(),
            ReconcileAction::SetVolume(gain) => {
                self.graph.set_gain(self.nodes.gain, *gain);
                self.state.volume = self.props.clamped_volume();
            }
            ReconcileAction::Seek(position) => {
                debug!("Seeking to {:.3}s", position);
                self.transport.set_current_time(*position);
                self.state.position = *position;
            }
            ReconcileAction::Transition(status) => self.transition(*status),
            ReconcileAction::SetPan(pan) => {
                self.graph.set_pan(self.nodes.panner, *pan);
                self.state.stereo_pan = *pan;
            }
            ReconcileAction::StartSampling => self.start_sampling(),
            ReconcileAction::StopSampling => self.stop_sampling(),
        }
    }

    /// Transport state machine
    fn transition(&mut self, status: PlayStatus) {
        self.state.status = status;

        match status {
            PlayStatus::Playing => {
                // Sampling starts once the transport confirms with PlayStarted
                self.transport.play();
            }
            PlayStatus::Paused => {
                self.transport.pause();
                self.stop_sampling();
            }
            PlayStatus::Stopped => {
                self.transport.pause();
                self.transport.set_current_time(0.0);
                self.state.position = 0.0;
                self.stop_sampling();
            }
        }
    }

    fn rebuild_chain(&mut self) {
        self.chain.detach(&mut self.graph);
        self.chain = FilterChain::build(
            &mut self.graph,
            self.nodes.gain,
            &self.props.equalizer,
            self.props.pre_amp,
        );
        self.graph.connect(self.chain.tail(), self.nodes.analyser);
        self.aggregator = SpectrumAggregator::with_step(
            self.settings.sampling_step_hz,
            self.props.equalizer.frequencies(),
        );

        debug!("Rebuilt filter chain with {} stages", self.chain.len());

        if self.props.equalizer.is_empty() {
            self.stop_sampling();
        } else if self.state.status == PlayStatus::Playing {
            self.start_sampling();
        }
    }

    fn patch_gains(&mut self) {
        if let Err(e) =
            self.chain
                .patch_gains(&mut self.graph, &self.props.equalizer, self.props.pre_amp)
        {
            warn!("Gain patch failed ({}), rebuilding chain", e);
            self.rebuild_chain();
        }
    }

    fn start_sampling(&mut self) {
        if self.sampling || !self.props.wants_visualization() {
            return;
        }

        if let Err(e) = self.aggregator.check_frame_len(self.frame.len()) {
            warn!("Visualization will drop bands: {}", e);
        }

        self.timer.start();
        self.sampling = true;
        debug!("Visualization sampling started");
    }

    fn stop_sampling(&mut self) {
        if !self.sampling {
            return;
        }

        self.timer.cancel();
        self.sampling = false;
        debug!("Visualization sampling stopped");
    }

    /// Handle one sampling tick: read the analyser, aggregate, emit
    ///
    /// Ticks that arrive while sampling is stopped are dropped.
    pub fn sample_tick(&mut self) {
        if !self.sampling {
            trace!("Dropping stale sampling tick");
            return;
        }

        // Each tick reads a fresh frame; nothing carries over from the last one
        self.frame.fill(0.0);
        self.graph
            .frequency_data(self.nodes.analyser, &mut self.frame);
        let values = self.aggregator.aggregate(&self.frame);
        self.sink.emit(PlayerEvent::VisualizationChange { values });
    }

    /// Handle a notification from the transport
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        if self.torn_down {
            return;
        }

        match event {
            TransportEvent::TimeUpdate => {
                let position = self.transport.current_time();
                self.state.position = position;
                self.sink.emit(PlayerEvent::Playing {
                    position,
                    duration: self.transport.duration(),
                });
            }
            TransportEvent::Ended => self.sink.emit(PlayerEvent::FinishedPlaying),
            TransportEvent::LoadStart => self.sink.emit(PlayerEvent::Loading),
            TransportEvent::CanPlayThrough => self.sink.emit(PlayerEvent::Load),
            TransportEvent::PlayStarted => {
                if self.state.status == PlayStatus::Playing {
                    self.start_sampling();
                }
            }
            TransportEvent::PlayRejected(reason) => {
                // No retry; playback simply does not begin
                let error = PlaybackError::TransportStart(reason);
                warn!("{}", error);
            }
        }
    }

    /// Stop sampling, pause the transport and detach every node
    ///
    /// Idempotent. Later updates and transport events are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }

        self.stop_sampling();
        self.transport.pause();

        self.chain.detach(&mut self.graph);
        self.graph.disconnect(self.graph.input());
        self.graph.disconnect(self.nodes.analyser);
        self.graph.disconnect(self.nodes.panner);

        self.torn_down = true;
        debug!("Playback graph torn down");
    }

    /// Props currently applied
    pub fn props(&self) -> &PlayerProps {
        &self.props
    }

    /// Transport state as last set by the reconciler
    pub fn state(&self) -> &TransportState {
        &self.state
    }

    /// Check if the sampling timer is running
    pub fn is_sampling(&self) -> bool {
        self.sampling
    }

    /// Check if `teardown` has run
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Current filter chain
    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    /// Settings in use
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Gain stage node
    pub fn gain_node(&self) -> NodeId {
        self.nodes.gain
    }

    /// Analyser node
    pub fn analyser_node(&self) -> NodeId {
        self.nodes.analyser
    }

    /// Stereo panner node
    pub fn panner_node(&self) -> NodeId {
        self.nodes.panner
    }

    /// Audio graph
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable audio graph
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// Transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Sampling timer
    pub fn timer(&self) -> &S {
        &self.timer
    }

    /// Event sink
    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Mutable event sink
    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }
}

impl<G, T, S, E> Drop for PlaybackReconciler<G, T, S, E>
where
    G: AudioGraph,
    T: Transport,
    S: SamplingTimer,
    E: EventSink,
{
    fn drop(&mut self) {
        self.stop_sampling();
    }
}

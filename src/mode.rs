use crate::capture::Capture;
use crate::constants::{ANALYSER_SIZE, DELAY_FEEDBACK, REVERB_DECAY_SECS, REVERB_WET};
use crate::error::InstrumentError;
use crate::graph::{
    Analyser, AudioGraph, DelayParams, NodeId, Note, NoteDuration, ReverbParams, Sink,
};

/// Which source feeds the effect chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Synth,
    Microphone,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Synth => Mode::Microphone,
            Mode::Microphone => Mode::Synth,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Synth => "SYNTH",
            Mode::Microphone => "MIC",
        }
    }
}

/// How the active source reaches the speakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectSelection {
    #[default]
    Crisp,
    Echo,
    Reverb,
}

impl EffectSelection {
    pub const ALL: [EffectSelection; 3] = [
        EffectSelection::Crisp,
        EffectSelection::Echo,
        EffectSelection::Reverb,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EffectSelection::Crisp => "CRISP",
            EffectSelection::Echo => "ECHO",
            EffectSelection::Reverb => "REVERB",
        }
    }
}

/// Outcome of a mode request that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Switched(Mode),
    /// Waiting for the microphone; see [`ModeController::on_microphone_ready`].
    Pending,
    Unchanged,
}

/// Owns the current mode and effect, and every graph node built for them.
///
/// Disconnecting a node drops all of its outgoing connections, so every
/// rewire of the source is followed by [`ModeController::retap`] to restore
/// the analyser and recorder taps.
#[derive(Debug, Default)]
pub struct ModeController {
    started: bool,
    mode: Mode,
    effect: EffectSelection,
    mic_pending: bool,
    synth: Option<NodeId>,
    mic: Option<NodeId>,
    delay: Option<NodeId>,
    reverb: Option<NodeId>,
    analyser: Option<Analyser>,
    recorder_tap: Option<NodeId>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn effect(&self) -> EffectSelection {
        self.effect
    }

    pub fn is_pending(&self) -> bool {
        self.mic_pending
    }

    pub fn analyser(&self) -> Option<&Analyser> {
        self.analyser.as_ref()
    }

    pub fn synth_node(&self) -> Option<NodeId> {
        self.synth
    }

    pub fn mic_node(&self) -> Option<NodeId> {
        self.mic
    }

    /// The one-time "start audio" action. Later calls do nothing.
    pub fn start_audio(&mut self, graph: &mut dyn AudioGraph, capture: &mut dyn Capture) {
        if self.started {
            return;
        }
        self.started = true;

        let tap = graph.create_recorder_tap();
        capture.bind(tap);
        self.recorder_tap = Some(tap);

        self.setup_synth(graph);
        self.retap(graph);
        tracing::info!(effect = self.effect.label(), "audio started");
    }

    /// Switch sources. Going to the microphone only asks for the device; the
    /// switch itself happens when the answer arrives.
    pub fn set_mode(
        &mut self,
        target: Mode,
        graph: &mut dyn AudioGraph,
        capture: &mut dyn Capture,
    ) -> Result<ModeChange, InstrumentError> {
        if !self.started {
            return Err(InstrumentError::NotStarted);
        }
        if target == self.mode || self.mic_pending {
            return Ok(ModeChange::Unchanged);
        }

        match target {
            Mode::Microphone => {
                self.mic_pending = true;
                capture.open_microphone();
                Ok(ModeChange::Pending)
            }
            Mode::Synth => {
                capture.close_microphone();
                if let Some(mic) = self.mic.take() {
                    graph.dispose(mic);
                }
                self.mode = Mode::Synth;
                self.setup_synth(graph);
                self.retap(graph);
                tracing::info!("switched to synth");
                Ok(ModeChange::Switched(Mode::Synth))
            }
        }
    }

    /// Microphone granted. Returns false when nothing was waiting for it, in
    /// which case the caller should release the device again.
    pub fn on_microphone_ready(&mut self, mic: NodeId, graph: &mut dyn AudioGraph) -> bool {
        if !self.mic_pending {
            return false;
        }
        self.mic_pending = false;
        self.mic = Some(mic);
        self.mode = Mode::Microphone;

        self.disconnect_synth(graph);
        self.apply_effect(graph);
        self.retap(graph);
        tracing::info!("switched to microphone");
        true
    }

    /// Microphone refused. Mode stays as it was.
    pub fn on_microphone_denied(&mut self, reason: String) -> InstrumentError {
        self.mic_pending = false;
        InstrumentError::PermissionDenied(reason)
    }

    /// Drop a pending switch to the microphone. Mode stays as it was.
    pub fn cancel_microphone(&mut self) {
        self.mic_pending = false;
    }

    pub fn set_effect(&mut self, effect: EffectSelection, graph: &mut dyn AudioGraph) {
        self.effect = effect;
        if !self.started {
            return;
        }
        self.apply_effect(graph);
        self.retap(graph);
        tracing::debug!(effect = effect.label(), "effect applied");
    }

    /// Play `note` on the synth. Only in synth mode.
    pub fn trigger_note(&self, note: Note, graph: &mut dyn AudioGraph) -> bool {
        match (self.mode, self.synth) {
            (Mode::Synth, Some(synth)) => {
                let duration = NoteDuration::Eighth;
                graph.trigger_note(synth, note, duration);
                tracing::debug!(%note, duration = duration.token(), "note");
                true
            }
            _ => false,
        }
    }

    fn source(&self) -> Option<NodeId> {
        match self.mode {
            Mode::Synth => self.synth,
            Mode::Microphone => self.mic,
        }
    }

    fn disconnect_synth(&mut self, graph: &mut dyn AudioGraph) {
        for node in [self.synth, self.delay, self.reverb].into_iter().flatten() {
            graph.disconnect(node);
        }
    }

    /// Fresh tone generator and effect nodes.
    fn setup_synth(&mut self, graph: &mut dyn AudioGraph) {
        self.disconnect_synth(graph);
        if let Some(old) = self.synth.take() {
            graph.dispose(old);
        }
        self.synth = Some(graph.create_tone_generator());
        self.apply_effect(graph);
    }

    /// Rebuild delay and reverb and route the active source through the
    /// selected one.
    fn apply_effect(&mut self, graph: &mut dyn AudioGraph) {
        for node in [self.delay.take(), self.reverb.take()].into_iter().flatten() {
            graph.dispose(node);
        }
        if let Some(synth) = self.synth {
            graph.disconnect(synth);
        }
        if let Some(mic) = self.mic {
            graph.disconnect(mic);
        }

        let delay = graph.create_delay(DelayParams {
            time: NoteDuration::Eighth,
            feedback: DELAY_FEEDBACK,
        });
        let reverb = graph.create_reverb(ReverbParams {
            decay_secs: REVERB_DECAY_SECS,
            wet: REVERB_WET,
        });
        self.delay = Some(delay);
        self.reverb = Some(reverb);

        let Some(source) = self.source() else {
            return;
        };
        match self.effect {
            EffectSelection::Crisp => graph.connect(source, Sink::Destination),
            EffectSelection::Echo => {
                graph.connect(source, Sink::Node(delay));
                graph.connect(delay, Sink::Destination);
            }
            EffectSelection::Reverb => {
                graph.connect(source, Sink::Node(reverb));
                graph.connect(reverb, Sink::Destination);
            }
        }
    }

    /// New analyser on the active source, and the recorder tap reattached.
    /// The tap node itself survives so a running recording keeps going.
    fn retap(&mut self, graph: &mut dyn AudioGraph) {
        if let Some(old) = self.analyser.take() {
            graph.dispose(old.node);
        }
        let Some(source) = self.source() else {
            return;
        };
        let analyser = graph.create_analyser(ANALYSER_SIZE);
        graph.connect(source, Sink::Node(analyser.node));
        self.analyser = Some(analyser);

        if let Some(tap) = self.recorder_tap {
            graph.connect(source, Sink::Node(tap));
        }
    }
}

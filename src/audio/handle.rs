use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::capture::{Clip, PlaybackSink};
use crate::graph::{
    Analyser, AudioGraph, DelayParams, NodeId, Note, NoteDuration, ReverbParams, Sink,
};
use crate::messages::{AudioCmd, NodeSpec};

/// Node id allocator shared by everything that creates nodes on the UI side.
#[derive(Debug, Clone, Default)]
pub struct NodeIds(Arc<AtomicU32>);

impl NodeIds {
    pub fn next(&self) -> NodeId {
        NodeId(self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// UI-thread view of the engine's node graph. Every call becomes an
/// [`AudioCmd`]; when the engine is not running the commands are dropped.
pub struct EngineGraph {
    cmd_tx: Sender<AudioCmd>,
    ids: NodeIds,
}

impl EngineGraph {
    pub fn new(cmd_tx: Sender<AudioCmd>, ids: NodeIds) -> Self {
        Self { cmd_tx, ids }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.cmd_tx.try_send(cmd) {
            tracing::trace!("audio command dropped: {:?}", e.into_inner());
        }
    }

    fn create(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.ids.next();
        self.send(AudioCmd::CreateNode(id, spec));
        id
    }
}

impl AudioGraph for EngineGraph {
    fn create_tone_generator(&mut self) -> NodeId {
        self.create(NodeSpec::Tone)
    }

    fn create_delay(&mut self, params: DelayParams) -> NodeId {
        self.create(NodeSpec::Delay(params))
    }

    fn create_reverb(&mut self, params: ReverbParams) -> NodeId {
        self.create(NodeSpec::Reverb(params))
    }

    fn create_analyser(&mut self, size: usize) -> Analyser {
        let id = self.ids.next();
        let analyser = Analyser::new(id, size);
        self.send(AudioCmd::CreateNode(id, NodeSpec::Analyser(analyser.frame())));
        analyser
    }

    fn create_recorder_tap(&mut self) -> NodeId {
        self.create(NodeSpec::RecorderTap)
    }

    fn connect(&mut self, source: NodeId, sink: Sink) {
        self.send(AudioCmd::Connect(source, sink));
    }

    fn disconnect(&mut self, node: NodeId) {
        self.send(AudioCmd::Disconnect(node));
    }

    fn dispose(&mut self, node: NodeId) {
        self.send(AudioCmd::Dispose(node));
    }

    fn trigger_note(&mut self, node: NodeId, note: Note, duration: NoteDuration) {
        self.send(AudioCmd::TriggerNote(node, note.frequency(), duration.seconds()));
    }
}

/// Plays clips through the engine's output mix.
pub struct ClipPlayer {
    cmd_tx: Sender<AudioCmd>,
}

impl ClipPlayer {
    pub fn new(cmd_tx: Sender<AudioCmd>) -> Self {
        Self { cmd_tx }
    }
}

impl PlaybackSink for ClipPlayer {
    fn play(&mut self, clip: &Clip) {
        if clip.is_empty() {
            return;
        }
        let _ = self.cmd_tx.try_send(AudioCmd::PlayClip(clip.shared()));
    }
}

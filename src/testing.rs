//! Recording fakes for the graph, capture and playback seams.

use std::collections::BTreeMap;

use crate::capture::{Capture, Clip, PlaybackSink};
use crate::graph::{
    Analyser, AudioGraph, DelayParams, NodeId, Note, NoteDuration, ReverbParams, Sink,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FakeNode {
    Tone,
    Delay(DelayParams),
    Reverb(ReverbParams),
    Analyser,
    RecorderTap,
    Microphone,
}

#[derive(Debug, Default)]
pub struct FakeGraph {
    next_id: u32,
    pub nodes: BTreeMap<NodeId, FakeNode>,
    pub edges: Vec<(NodeId, Sink)>,
    pub notes: Vec<(NodeId, Note, NoteDuration)>,
}

impl FakeGraph {
    fn add(&mut self, kind: FakeNode) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(id, kind);
        id
    }

    /// Stand-in for the node a capture backend creates for the input device.
    pub fn add_microphone(&mut self) -> NodeId {
        self.add(FakeNode::Microphone)
    }

    pub fn live(&self, kind: fn(&FakeNode) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, k)| kind(k))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of distinct routes from `source` to the destination.
    pub fn paths_to_destination(&self, source: NodeId) -> usize {
        self.edges
            .iter()
            .filter(|(from, _)| *from == source)
            .map(|(_, sink)| match sink {
                Sink::Destination => 1,
                Sink::Node(next) => self.paths_to_destination(*next),
            })
            .sum()
    }

    pub fn is_connected(&self, source: NodeId, sink: Sink) -> bool {
        self.edges.contains(&(source, sink))
    }
}

impl AudioGraph for FakeGraph {
    fn create_tone_generator(&mut self) -> NodeId {
        self.add(FakeNode::Tone)
    }

    fn create_delay(&mut self, params: DelayParams) -> NodeId {
        self.add(FakeNode::Delay(params))
    }

    fn create_reverb(&mut self, params: ReverbParams) -> NodeId {
        self.add(FakeNode::Reverb(params))
    }

    fn create_analyser(&mut self, size: usize) -> Analyser {
        let id = self.add(FakeNode::Analyser);
        Analyser::new(id, size)
    }

    fn create_recorder_tap(&mut self) -> NodeId {
        self.add(FakeNode::RecorderTap)
    }

    fn connect(&mut self, source: NodeId, sink: Sink) {
        assert!(self.nodes.contains_key(&source), "connect from disposed {source:?}");
        if let Sink::Node(target) = sink {
            assert!(self.nodes.contains_key(&target), "connect to disposed {target:?}");
        }
        if !self.edges.contains(&(source, sink)) {
            self.edges.push((source, sink));
        }
    }

    fn disconnect(&mut self, node: NodeId) {
        self.edges.retain(|(from, _)| *from != node);
    }

    fn dispose(&mut self, node: NodeId) {
        self.nodes.remove(&node);
        self.edges
            .retain(|(from, to)| *from != node && *to != Sink::Node(node));
    }

    fn trigger_note(&mut self, node: NodeId, note: Note, duration: NoteDuration) {
        self.notes.push((node, note, duration));
    }
}

#[derive(Debug, Default)]
pub struct FakeCapture {
    pub open_requests: usize,
    pub closes: usize,
    pub bound: Option<NodeId>,
    pub starts: usize,
    pub stops: usize,
}

impl Capture for FakeCapture {
    fn open_microphone(&mut self) {
        self.open_requests += 1;
    }

    fn close_microphone(&mut self) {
        self.closes += 1;
    }

    fn bind(&mut self, tap: NodeId) {
        self.bound = Some(tap);
    }

    fn start(&mut self) {
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakePlayback {
    pub played: Vec<Clip>,
}

impl PlaybackSink for FakePlayback {
    fn play(&mut self, clip: &Clip) {
        self.played.push(clip.clone());
    }
}

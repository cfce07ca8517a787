use std::collections::BTreeMap;

use crate::effects::delay::Delay;
use crate::effects::reverb::Reverb;
use crate::effects::Effect;
use crate::graph::{NodeId, Sink, WaveformFrame};
use crate::messages::NodeSpec;
use crate::synth::tone::ToneGenerator;

enum Processor {
    Tone(ToneGenerator),
    Microphone,
    Effect(Box<dyn Effect>),
    Analyser {
        frame: WaveformFrame,
        history: Vec<f32>,
        write_pos: usize,
    },
    RecorderTap,
}

impl Processor {
    /// Processing order: sources, then effects, then taps. Connections only
    /// ever point to a later rank, so one pass per sample is enough.
    fn rank(&self) -> u8 {
        match self {
            Processor::Tone(_) | Processor::Microphone => 0,
            Processor::Effect(_) => 1,
            Processor::Analyser { .. } | Processor::RecorderTap => 2,
        }
    }
}

struct Node {
    processor: Processor,
    outputs: Vec<Sink>,
    input: f32,
}

/// One rendered sample: what goes to the speakers and what the bound
/// recorder tap received.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rendered {
    pub output: f32,
    pub recorded: f32,
}

/// The node graph as run inside the output callback.
pub struct NodeGraph {
    nodes: BTreeMap<NodeId, Node>,
    recorder: Option<NodeId>,
    sends: Vec<(Sink, f32)>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            recorder: None,
            sends: Vec::with_capacity(32),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn create(&mut self, id: NodeId, spec: NodeSpec) {
        let processor = match spec {
            NodeSpec::Tone => Processor::Tone(ToneGenerator::new()),
            NodeSpec::Microphone => Processor::Microphone,
            NodeSpec::Delay(params) => {
                Processor::Effect(Box::new(Delay::new(params.time.seconds(), params.feedback)))
            }
            NodeSpec::Reverb(params) => {
                Processor::Effect(Box::new(Reverb::new(params.decay_secs, params.wet)))
            }
            NodeSpec::Analyser(frame) => {
                let size = frame.lock().map(|f| f.len()).unwrap_or(0).max(1);
                Processor::Analyser {
                    frame,
                    history: vec![0.0; size],
                    write_pos: 0,
                }
            }
            NodeSpec::RecorderTap => Processor::RecorderTap,
        };
        self.nodes.insert(
            id,
            Node {
                processor,
                outputs: Vec::new(),
                input: 0.0,
            },
        );
    }

    pub fn connect(&mut self, source: NodeId, sink: Sink) {
        if let Sink::Node(target) = sink {
            if !self.nodes.contains_key(&target) {
                return;
            }
        }
        if let Some(node) = self.nodes.get_mut(&source) {
            if !node.outputs.contains(&sink) {
                node.outputs.push(sink);
            }
        }
    }

    pub fn disconnect(&mut self, node: NodeId) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.outputs.clear();
        }
    }

    pub fn dispose(&mut self, id: NodeId) {
        self.nodes.remove(&id);
        for node in self.nodes.values_mut() {
            node.outputs.retain(|sink| *sink != Sink::Node(id));
        }
        if self.recorder == Some(id) {
            self.recorder = None;
        }
    }

    pub fn bind_recorder(&mut self, tap: NodeId) {
        self.recorder = Some(tap);
    }

    pub fn trigger(&mut self, id: NodeId, freq: f64, gate_secs: f32) {
        if let Some(Node {
            processor: Processor::Tone(tone),
            ..
        }) = self.nodes.get_mut(&id)
        {
            tone.trigger(freq, gate_secs);
        }
    }

    /// Advance every node by one sample. `mic` is the current input-device
    /// sample fed to microphone nodes.
    pub fn render(&mut self, mic: f32) -> Rendered {
        let mut rendered = Rendered::default();
        let Self {
            nodes,
            recorder,
            sends,
        } = self;

        for rank in 0..=2u8 {
            for (id, node) in nodes.iter_mut() {
                if node.processor.rank() != rank {
                    continue;
                }
                let input = std::mem::take(&mut node.input);
                let value = match &mut node.processor {
                    Processor::Tone(tone) => tone.next_sample() + input,
                    Processor::Microphone => mic + input,
                    Processor::Effect(effect) => {
                        let mut buf = [input];
                        effect.process(&mut buf);
                        buf[0]
                    }
                    Processor::Analyser {
                        history, write_pos, ..
                    } => {
                        history[*write_pos] = input;
                        *write_pos = (*write_pos + 1) % history.len();
                        input
                    }
                    Processor::RecorderTap => {
                        if *recorder == Some(*id) {
                            rendered.recorded += input;
                        }
                        input
                    }
                };
                for sink in &node.outputs {
                    sends.push((*sink, value));
                }
            }

            for (sink, value) in sends.drain(..) {
                match sink {
                    Sink::Destination => rendered.output += value,
                    Sink::Node(target) => {
                        if let Some(node) = nodes.get_mut(&target) {
                            node.input += value;
                        }
                    }
                }
            }
        }

        rendered
    }

    /// Copy analyser histories into their shared frames, oldest sample
    /// first. Skips any frame the UI is currently reading.
    pub fn publish_analysers(&self) {
        for node in self.nodes.values() {
            if let Processor::Analyser {
                frame,
                history,
                write_pos,
            } = &node.processor
            {
                if let Ok(mut frame) = frame.try_lock() {
                    frame.clear();
                    frame.extend_from_slice(&history[*write_pos..]);
                    frame.extend_from_slice(&history[..*write_pos]);
                }
            }
        }
    }
}

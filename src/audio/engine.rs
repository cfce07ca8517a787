use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, StreamConfig};
use crossbeam_channel::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::audio::capture::MicRing;
use crate::audio::nodes::NodeGraph;
use crate::audio::recorder::Recorder;
use crate::capture::CaptureEvent;
use crate::constants::{MIC_RING_CAPACITY, SAMPLE_RATE};
use crate::messages::AudioCmd;

/// A clip being played back into the output mix.
struct ClipVoice {
    samples: Arc<[f32]>,
    pos: usize,
}

impl ClipVoice {
    fn next_sample(&mut self) -> f32 {
        let s = self.samples.get(self.pos).copied().unwrap_or(0.0);
        self.pos += 1;
        s
    }

    fn is_done(&self) -> bool {
        self.pos >= self.samples.len()
    }
}

/// Everything the output callback owns. Kept apart from the stream so the
/// mixing can be driven without a device.
pub struct EngineState {
    graph: NodeGraph,
    recorder: Recorder,
    voices: Vec<ClipVoice>,
    mic_ring: MicRing,
}

impl EngineState {
    pub fn new(events: Sender<CaptureEvent>, mic_ring: MicRing) -> Self {
        Self {
            graph: NodeGraph::new(),
            recorder: Recorder::new(events),
            voices: Vec::new(),
            mic_ring,
        }
    }

    pub fn apply(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::CreateNode(id, spec) => self.graph.create(id, spec),
            AudioCmd::Connect(source, sink) => self.graph.connect(source, sink),
            AudioCmd::Disconnect(node) => self.graph.disconnect(node),
            AudioCmd::Dispose(node) => self.graph.dispose(node),
            AudioCmd::TriggerNote(node, freq, secs) => self.graph.trigger(node, freq, secs),
            AudioCmd::PlayClip(samples) => self.voices.push(ClipVoice { samples, pos: 0 }),
            AudioCmd::BindRecorder(tap) => self.graph.bind_recorder(tap),
            AudioCmd::StartCapture => self.recorder.start(),
            AudioCmd::StopCapture => self.recorder.stop(),
        }
    }

    /// Fill an interleaved stereo buffer.
    pub fn render(&mut self, data: &mut [f32]) {
        // Never block in the realtime callback; a contended ring just means
        // silence from the mic for this chunk. Take one buffer's worth and
        // leave the rest for the next callback.
        let frames = data.len() / 2;
        let mut mic_samples: Vec<f32> = Vec::new();
        if let Ok(mut ring) = self.mic_ring.try_lock() {
            let n = frames.min(ring.len());
            mic_samples.extend(ring.drain(..n));
        }
        let mut mic_read_pos = 0;

        for frame in data.chunks_mut(2) {
            let mic = mic_samples.get(mic_read_pos).copied().unwrap_or(0.0);
            mic_read_pos += 1;

            let rendered = self.graph.render(mic);
            self.recorder.push(rendered.recorded);

            let mut out = rendered.output;
            for voice in &mut self.voices {
                out += voice.next_sample();
            }

            let out = out.clamp(-1.0, 1.0);
            for ch in frame.iter_mut() {
                *ch = out;
            }
        }

        self.voices.retain(|v| !v.is_done());
        self.recorder.retry_stopped();
        self.graph.publish_analysers();
    }
}

pub struct AudioEngine {
    pub mic_ring: MicRing,
}

impl AudioEngine {
    pub fn new() -> Self {
        Self {
            mic_ring: Arc::new(Mutex::new(Vec::with_capacity(MIC_RING_CAPACITY))),
        }
    }

    pub fn start(
        &self,
        cmd_rx: Receiver<AudioCmd>,
        events: Sender<CaptureEvent>,
    ) -> Result<cpal::Stream, Box<dyn std::error::Error>> {
        let host = cpal::default_host();

        let output_device = host
            .default_output_device()
            .ok_or("No output device available")?;

        let output_config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        // --- All audio state lives inside the output callback closure ---
        let mut state = EngineState::new(events, Arc::clone(&self.mic_ring));

        let output_stream = output_device.build_output_stream(
            &output_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                while let Ok(cmd) = cmd_rx.try_recv() {
                    state.apply(cmd);
                }
                state.render(data);
            },
            |err| {
                tracing::error!("Audio output error: {}", err);
            },
            None,
        )?;

        output_stream.play()?;
        tracing::info!(sample_rate = SAMPLE_RATE, "audio output running");

        Ok(output_stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeId, Sink};
    use crate::messages::NodeSpec;
    use crossbeam_channel::unbounded;

    fn state() -> (EngineState, MicRing, Receiver<CaptureEvent>) {
        let (tx, rx) = unbounded();
        let ring: MicRing = Arc::new(Mutex::new(Vec::new()));
        (EngineState::new(tx, Arc::clone(&ring)), ring, rx)
    }

    #[test]
    fn clips_mix_in_and_finish() {
        let (mut engine, _, _) = state();
        engine.apply(AudioCmd::PlayClip(Arc::from(vec![0.5f32, 0.25])));
        let mut data = [0.0f32; 8];
        engine.render(&mut data);
        assert_eq!(&data[..4], &[0.5, 0.5, 0.25, 0.25]);
        assert!(data[4..].iter().all(|&s| s == 0.0));
        assert!(engine.voices.is_empty());
    }

    #[test]
    fn output_is_clamped() {
        let (mut engine, _, _) = state();
        engine.apply(AudioCmd::PlayClip(Arc::from(vec![0.8f32])));
        engine.apply(AudioCmd::PlayClip(Arc::from(vec![0.8f32])));
        let mut data = [0.0f32; 2];
        engine.render(&mut data);
        assert_eq!(data, [1.0, 1.0]);
    }

    #[test]
    fn mic_backlog_carries_over_to_the_next_buffer() {
        let (mut engine, ring, _) = state();
        engine.apply(AudioCmd::CreateNode(NodeId(1), NodeSpec::Microphone));
        engine.apply(AudioCmd::Connect(NodeId(1), Sink::Destination));

        ring.lock().unwrap().extend_from_slice(&[0.1, 0.2, 0.3, 0.4]);
        let mut data = [0.0f32; 4];
        engine.render(&mut data);
        assert_eq!(data, [0.1, 0.1, 0.2, 0.2]);
        assert_eq!(*ring.lock().unwrap(), vec![0.3, 0.4]);

        engine.render(&mut data);
        assert_eq!(data, [0.3, 0.3, 0.4, 0.4]);
        assert!(ring.lock().unwrap().is_empty());
    }

    #[test]
    fn mic_reaches_recorder_through_the_tap() {
        let (mut engine, ring, events) = state();
        engine.apply(AudioCmd::CreateNode(NodeId(1), NodeSpec::Microphone));
        engine.apply(AudioCmd::CreateNode(NodeId(2), NodeSpec::RecorderTap));
        engine.apply(AudioCmd::Connect(NodeId(1), Sink::Node(NodeId(2))));
        engine.apply(AudioCmd::Connect(NodeId(1), Sink::Destination));
        engine.apply(AudioCmd::BindRecorder(NodeId(2)));
        engine.apply(AudioCmd::StartCapture);

        ring.lock().unwrap().extend_from_slice(&[0.1, 0.2, 0.3]);
        let mut data = [0.0f32; 6];
        engine.render(&mut data);
        assert_eq!(data, [0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
        assert!(ring.lock().unwrap().is_empty());

        engine.apply(AudioCmd::StopCapture);
        let got: Vec<CaptureEvent> = events.try_iter().collect();
        assert_eq!(
            got,
            vec![CaptureEvent::Data(vec![0.1, 0.2, 0.3]), CaptureEvent::Stopped]
        );
    }
}

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, StreamConfig};
use crossbeam_channel::Sender;

use crate::audio::handle::NodeIds;
use crate::capture::{Capture, CaptureEvent};
use crate::constants::{MIC_RING_CAPACITY, SAMPLE_RATE};
use crate::graph::NodeId;
use crate::messages::{AudioCmd, NodeSpec};

/// Mic samples handed from the input callback to the output callback
pub type MicRing = Arc<Mutex<Vec<f32>>>;

/// Microphone and recorder control backed by `cpal`.
///
/// Opening the input stream happens right away, but the outcome is posted
/// as a [`CaptureEvent`] and picked up on the next UI tick like any other
/// completion.
pub struct CpalCapture {
    cmd_tx: Sender<AudioCmd>,
    events: Sender<CaptureEvent>,
    ids: NodeIds,
    mic_ring: MicRing,
    stream: Option<cpal::Stream>,
    mic_node: Option<NodeId>,
}

impl CpalCapture {
    pub fn new(
        cmd_tx: Sender<AudioCmd>,
        events: Sender<CaptureEvent>,
        ids: NodeIds,
        mic_ring: MicRing,
    ) -> Self {
        Self {
            cmd_tx,
            events,
            ids,
            mic_ring,
            stream: None,
            mic_node: None,
        }
    }

    fn post(&self, event: CaptureEvent) {
        if self.events.try_send(event).is_err() {
            tracing::warn!("capture event queue full");
        }
    }

    fn build_input_stream(&self) -> Result<cpal::Stream, String> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| "No input device found".to_string())?;

        let config = StreamConfig {
            channels: 1,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let ring = Arc::clone(&self.mic_ring);
        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut ring) = ring.try_lock() {
                        ring.extend_from_slice(data);
                        if ring.len() > MIC_RING_CAPACITY {
                            let drain = ring.len() - MIC_RING_CAPACITY;
                            ring.drain(..drain);
                        }
                    }
                },
                |err| {
                    tracing::error!("Audio input error: {}", err);
                },
                None,
            )
            .map_err(|e| e.to_string())?;
        stream.play().map_err(|e| e.to_string())?;
        Ok(stream)
    }
}

impl Capture for CpalCapture {
    fn open_microphone(&mut self) {
        if let Some(node) = self.mic_node {
            self.post(CaptureEvent::MicrophoneReady(node));
            return;
        }
        match self.build_input_stream() {
            Ok(stream) => {
                let node = self.ids.next();
                let _ = self
                    .cmd_tx
                    .try_send(AudioCmd::CreateNode(node, NodeSpec::Microphone));
                self.stream = Some(stream);
                self.mic_node = Some(node);
                tracing::info!(?node, "microphone open");
                self.post(CaptureEvent::MicrophoneReady(node));
            }
            Err(reason) => {
                tracing::warn!("Could not open mic input: {}", reason);
                self.post(CaptureEvent::MicrophoneDenied(reason));
            }
        }
    }

    fn close_microphone(&mut self) {
        if self.stream.take().is_some() {
            tracing::info!("microphone closed");
        }
        self.mic_node = None;
        if let Ok(mut ring) = self.mic_ring.lock() {
            ring.clear();
        }
    }

    fn bind(&mut self, tap: NodeId) {
        let _ = self.cmd_tx.try_send(AudioCmd::BindRecorder(tap));
    }

    fn start(&mut self) {
        let _ = self.cmd_tx.try_send(AudioCmd::StartCapture);
    }

    fn stop(&mut self) {
        // Without a running engine nobody else will ever finish the take.
        if self.cmd_tx.try_send(AudioCmd::StopCapture).is_err() {
            self.post(CaptureEvent::Stopped);
        }
    }
}

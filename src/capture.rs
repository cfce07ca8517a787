//! Microphone acquisition, the recorder and clip playback.

use std::sync::Arc;

use crate::constants::SAMPLE_RATE;
use crate::graph::NodeId;

/// Asynchronous completions reported by a [`Capture`] implementation.
///
/// Per recording session the order is zero or more `Data` fragments followed
/// by exactly one `Stopped`.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    MicrophoneReady(NodeId),
    MicrophoneDenied(String),
    Data(Vec<f32>),
    Stopped,
}

pub trait Capture {
    /// Ask for the input device. Answered later with `MicrophoneReady` or
    /// `MicrophoneDenied`.
    fn open_microphone(&mut self);
    fn close_microphone(&mut self);
    /// Record from this tap node from now on.
    fn bind(&mut self, tap: NodeId);
    fn start(&mut self);
    /// Finalize the session. Completion is the `Stopped` event.
    fn stop(&mut self);
}

/// An immutable recorded clip (mono PCM at [`SAMPLE_RATE`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    samples: Arc<[f32]>,
}

impl Clip {
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    /// Join recorder fragments in arrival order.
    pub fn from_chunks(chunks: &[Vec<f32>]) -> Self {
        let len = chunks.iter().map(Vec::len).sum();
        let mut samples = Vec::with_capacity(len);
        for chunk in chunks {
            samples.extend_from_slice(chunk);
        }
        Self::new(samples)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn shared(&self) -> Arc<[f32]> {
        Arc::clone(&self.samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / SAMPLE_RATE as f32
    }
}

/// Fire-and-forget clip playback.
pub trait PlaybackSink {
    fn play(&mut self, clip: &Clip);
}

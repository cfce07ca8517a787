use crossbeam_channel::Sender;

use crate::capture::CaptureEvent;
use crate::constants::CAPTURE_CHUNK;

/// Audio-thread half of the recorder: collects tap samples and ships them to
/// the UI thread in fragments.
pub struct Recorder {
    active: bool,
    chunk: Vec<f32>,
    chunk_len: usize,
    events: Sender<CaptureEvent>,
    /// A `Stopped` is owed to the UI
    dropped_stop: bool,
}

impl Recorder {
    pub fn new(events: Sender<CaptureEvent>) -> Self {
        Self::with_chunk_len(events, CAPTURE_CHUNK)
    }

    pub fn with_chunk_len(events: Sender<CaptureEvent>, chunk_len: usize) -> Self {
        Self {
            active: false,
            chunk: Vec::with_capacity(chunk_len),
            chunk_len: chunk_len.max(1),
            events,
            dropped_stop: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
        self.chunk.clear();
    }

    pub fn push(&mut self, sample: f32) {
        if !self.active {
            return;
        }
        self.chunk.push(sample);
        if self.chunk.len() >= self.chunk_len {
            self.flush();
        }
    }

    /// Deliver what is left, then `Stopped`. A stop without a running
    /// session still answers with `Stopped`.
    pub fn stop(&mut self) {
        if self.active {
            self.flush();
        }
        self.active = false;
        if self.events.try_send(CaptureEvent::Stopped).is_err() {
            self.dropped_stop = true;
            tracing::warn!("capture event queue full, Stopped deferred");
        }
    }

    /// Retry a `Stopped` that did not fit in the queue. Called once per
    /// output buffer.
    pub fn retry_stopped(&mut self) {
        if self.dropped_stop && self.events.try_send(CaptureEvent::Stopped).is_ok() {
            self.dropped_stop = false;
        }
    }

    fn flush(&mut self) {
        if self.chunk.is_empty() {
            return;
        }
        let data = std::mem::replace(&mut self.chunk, Vec::with_capacity(self.chunk_len));
        if self.events.try_send(CaptureEvent::Data(data)).is_err() {
            tracing::warn!("capture event queue full, recorded fragment dropped");
        }
    }
}

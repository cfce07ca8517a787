//! The audio graph seam.
//!
//! The orchestration code builds and rewires a small node graph through
//! [`AudioGraph`]. The real implementation forwards every call to the audio
//! thread (see `audio::handle`); tests use the recording fake in `testing`.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::constants::TEMPO_BPM;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Where a connection ends: another node's input or the speakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sink {
    Node(NodeId),
    Destination,
}

/// A pitch as a MIDI note number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note(pub u8);

const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl Note {
    /// Parse scientific pitch notation such as `G4` or `F#5`.
    pub fn parse(name: &str) -> Option<Self> {
        let split = name.find(|c: char| c.is_ascii_digit() || c == '-')?;
        let (pitch, octave) = name.split_at(split);
        let class = PITCH_NAMES
            .iter()
            .position(|p| p.eq_ignore_ascii_case(pitch))?;
        let octave: i32 = octave.parse().ok()?;
        let midi = (octave + 1) * 12 + class as i32;
        u8::try_from(midi).ok().filter(|m| *m <= 127).map(Note)
    }

    pub fn frequency(self) -> f64 {
        440.0 * 2.0f64.powf((self.0 as f64 - 69.0) / 12.0)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let octave = self.0 as i32 / 12 - 1;
        write!(f, "{}{}", PITCH_NAMES[self.0 as usize % 12], octave)
    }
}

/// Musical note lengths, resolved against [`TEMPO_BPM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteDuration {
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteDuration {
    pub fn seconds(self) -> f32 {
        let beat = 60.0 / TEMPO_BPM;
        match self {
            NoteDuration::Quarter => beat,
            NoteDuration::Eighth => beat / 2.0,
            NoteDuration::Sixteenth => beat / 4.0,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            NoteDuration::Quarter => "4n",
            NoteDuration::Eighth => "8n",
            NoteDuration::Sixteenth => "16n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayParams {
    pub time: NoteDuration,
    pub feedback: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    pub decay_secs: f32,
    pub wet: f32,
}

/// Latest waveform snapshot written by an analyser node.
pub type WaveformFrame = Arc<Mutex<Vec<f32>>>;

/// Handle to an analyser node plus the snapshot it keeps up to date.
#[derive(Debug, Clone)]
pub struct Analyser {
    pub node: NodeId,
    frame: WaveformFrame,
}

impl Analyser {
    pub fn new(node: NodeId, size: usize) -> Self {
        Self {
            node,
            frame: Arc::new(Mutex::new(vec![0.0; size])),
        }
    }

    /// Shared buffer the producer side writes into.
    pub fn frame(&self) -> WaveformFrame {
        Arc::clone(&self.frame)
    }

    /// Copy of the current amplitudes, oldest first. Empty when the buffer is
    /// momentarily held by the audio thread.
    pub fn sample(&self) -> Vec<f32> {
        match self.frame.try_lock() {
            Ok(frame) => frame.clone(),
            Err(_) => Vec::new(),
        }
    }
}

pub trait AudioGraph {
    fn create_tone_generator(&mut self) -> NodeId;
    fn create_delay(&mut self, params: DelayParams) -> NodeId;
    fn create_reverb(&mut self, params: ReverbParams) -> NodeId;
    /// Waveform analyser keeping the last `size` samples of its input.
    fn create_analyser(&mut self, size: usize) -> Analyser;
    /// Node whose input feeds the recorder.
    fn create_recorder_tap(&mut self) -> NodeId;
    fn connect(&mut self, source: NodeId, sink: Sink);
    /// Drop every outgoing connection of `node`.
    fn disconnect(&mut self, node: NodeId);
    /// Remove `node` and every connection into or out of it.
    fn dispose(&mut self, node: NodeId);
    fn trigger_note(&mut self, node: NodeId, note: Note, duration: NoteDuration);
}

use std::sync::Arc;

use crate::graph::{DelayParams, NodeId, ReverbParams, Sink, WaveformFrame};
use crate::mode::EffectSelection;

/// Messages from the input handler → dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// One-time audio start
    StartAudio,
    ToggleMode,
    SelectEffect(EffectSelection),
    /// A plain character key, resolved through the key table
    KeyDown(char),
    /// Play back a recording slot
    PlaySlot(usize),
    /// Write stored recordings to disk
    Export,
    Quit,
}

/// Node kinds the audio thread knows how to run
#[derive(Debug, Clone)]
pub enum NodeSpec {
    Tone,
    Delay(DelayParams),
    Reverb(ReverbParams),
    Analyser(WaveformFrame),
    RecorderTap,
    Microphone,
}

/// Messages from UI thread → Audio thread
#[derive(Debug, Clone)]
pub enum AudioCmd {
    CreateNode(NodeId, NodeSpec),
    Connect(NodeId, Sink),
    Disconnect(NodeId),
    Dispose(NodeId),
    /// (node, frequency in Hz, gate length in seconds)
    TriggerNote(NodeId, f64, f32),
    PlayClip(Arc<[f32]>),
    BindRecorder(NodeId),
    StartCapture,
    StopCapture,
}

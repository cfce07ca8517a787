use std::time::Instant;

use crate::app::{AppState, NoticeKind};
use crate::capture::{Capture, CaptureEvent, PlaybackSink};
use crate::error::InstrumentError;
use crate::graph::AudioGraph;
use crate::input::{self, Binding};
use crate::messages::UiEvent;
use crate::mode::{Mode, ModeChange};
use crate::project;

/// The application state plus the collaborators it drives.
///
/// Everything runs on the UI thread: key events and capture events are fed
/// in one at a time and every failure ends up as a notice.
pub struct Instrument<G, C, P> {
    pub state: AppState,
    pub graph: G,
    pub capture: C,
    pub playback: P,
}

impl<G: AudioGraph, C: Capture, P: PlaybackSink> Instrument<G, C, P> {
    pub fn new(state: AppState, graph: G, capture: C, playback: P) -> Self {
        Self {
            state,
            graph,
            capture,
            playback,
        }
    }

    pub fn handle(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::Quit => self.state.should_quit = true,
            UiEvent::StartAudio => {
                let was_started = self.state.controller.is_started();
                self.state
                    .controller
                    .start_audio(&mut self.graph, &mut self.capture);
                if !was_started {
                    self.state.notify(NoticeKind::Info, "Audio started", now);
                }
            }
            UiEvent::ToggleMode => {
                let target = self.state.controller.mode().toggled();
                if let Err(err) = self.set_mode(target) {
                    self.report(err, now);
                }
            }
            UiEvent::SelectEffect(effect) => {
                self.state.controller.set_effect(effect, &mut self.graph);
            }
            UiEvent::KeyDown(key) => self.on_key_down(key, now),
            UiEvent::PlaySlot(slot) => {
                if let Err(err) = self.play_recording(slot) {
                    self.report(err, now);
                }
            }
            UiEvent::Export => self.export(now),
        }
    }

    /// Mode switches are refused while a take is in flight.
    pub fn set_mode(&mut self, target: Mode) -> Result<ModeChange, InstrumentError> {
        if self.state.bank.is_recording() {
            return Err(InstrumentError::Busy);
        }
        self.state
            .controller
            .set_mode(target, &mut self.graph, &mut self.capture)
    }

    pub fn on_key_down(&mut self, key: char, now: Instant) {
        // Nothing is bound until there is something to play.
        if !self.state.controller.is_started() {
            return;
        }
        let Some(binding) = input::binding_for(key, self.state.bank.capacity()) else {
            return;
        };

        match binding {
            Binding::Note(note) => {
                if self.state.controller.trigger_note(note, &mut self.graph) {
                    self.state.flash(key, now);
                }
            }
            Binding::Clip(index) => {
                self.state.flash(key, now);
                self.state.clips.play(index, &mut self.playback);
            }
            Binding::Slot(slot) => {
                let result = match self.state.bank.active_slot() {
                    None => self.state.bank.start_recording(slot, &mut self.capture),
                    Some(active) if active == slot => {
                        self.state.bank.stop_recording(slot, &mut self.capture)
                    }
                    Some(_) => Ok(()),
                };
                if let Err(err) = result {
                    self.report(err, now);
                }
            }
        }
    }

    pub fn play_recording(&mut self, slot: usize) -> Result<(), InstrumentError> {
        let clip = self.state.bank.play_recording(slot, &mut self.playback)?;
        self.state.clips.assign(slot, clip);
        Ok(())
    }

    pub fn on_capture_event(&mut self, event: CaptureEvent, now: Instant) {
        match event {
            CaptureEvent::MicrophoneReady(mic) => {
                // A take started while the device was being opened: the
                // switch is refused like any other switch during recording.
                if self.state.controller.is_pending() && self.state.bank.is_recording() {
                    self.state.controller.cancel_microphone();
                    self.graph.dispose(mic);
                    self.capture.close_microphone();
                    self.report(InstrumentError::Busy, now);
                } else if !self.state.controller.on_microphone_ready(mic, &mut self.graph) {
                    self.graph.dispose(mic);
                    self.capture.close_microphone();
                }
            }
            CaptureEvent::MicrophoneDenied(reason) => {
                let err = self.state.controller.on_microphone_denied(reason);
                self.report(err, now);
            }
            CaptureEvent::Data(chunk) => self.state.bank.on_data(chunk),
            CaptureEvent::Stopped => {
                if let Some(slot) = self.state.bank.on_stopped() {
                    let key = input::slot_key(slot);
                    self.state
                        .notify(NoticeKind::Info, format!("Saved take to slot {key}"), now);
                }
            }
        }
    }

    /// Per-frame housekeeping.
    pub fn tick(&mut self, now: Instant) {
        self.state.expire(now);
    }

    fn export(&mut self, now: Instant) {
        let dir = self.state.export_dir.clone();
        match project::save::export_session(&dir, &self.state.bank) {
            Ok(meta) => {
                tracing::info!(dir = %dir.display(), slots = meta.slots.len(), "session exported");
                self.state.notify(
                    NoticeKind::Info,
                    format!("Exported {} slot(s) to {}", meta.slots.len(), dir.display()),
                    now,
                );
            }
            Err(e) => {
                tracing::error!("Export error: {}", e);
                self.state
                    .notify(NoticeKind::Error, format!("Export failed: {e}"), now);
            }
        }
    }

    fn report(&mut self, err: InstrumentError, now: Instant) {
        tracing::warn!("{}", err);
        self.state.notify(NoticeKind::Error, err.to_string(), now);
    }
}

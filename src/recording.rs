use crate::capture::{Capture, Clip, PlaybackSink};
use crate::constants::CLIP_COUNT;
use crate::error::InstrumentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Idle,
    /// Start accepted, no audio received yet
    Armed,
    Recording,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSlot {
    pub clip: Option<Clip>,
    pub state: SlotState,
}

/// The single recording in flight, if any.
///
/// `active_slot` stays set from `start` until the recorder confirms with
/// `Stopped`, so a new start is refused while the old take is finalizing.
#[derive(Debug, Default)]
struct RecorderSession {
    active_slot: Option<usize>,
    pending_chunks: Vec<Vec<f32>>,
}

pub struct RecordingBank {
    slots: Vec<RecordingSlot>,
    session: RecorderSession,
}

impl RecordingBank {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![RecordingSlot::default(); capacity],
            session: RecorderSession::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[RecordingSlot] {
        &self.slots
    }

    pub fn active_slot(&self) -> Option<usize> {
        self.session.active_slot
    }

    pub fn is_recording(&self) -> bool {
        self.session.active_slot.is_some()
    }

    pub fn clip(&self, slot: usize) -> Option<&Clip> {
        self.slots.get(slot).and_then(|s| s.clip.as_ref())
    }

    pub fn start_recording(
        &mut self,
        slot: usize,
        capture: &mut dyn Capture,
    ) -> Result<(), InstrumentError> {
        if slot >= self.slots.len() {
            return Err(InstrumentError::NoSuchSlot(slot));
        }
        if self.session.active_slot.is_some() {
            return Err(InstrumentError::Busy);
        }
        self.session.pending_chunks.clear();
        self.session.active_slot = Some(slot);
        self.slots[slot].state = SlotState::Armed;
        capture.start();
        tracing::info!(slot = slot + 1, "recording started");
        Ok(())
    }

    /// Ask the recorder to finish. The clip lands in the slot on `on_stopped`.
    pub fn stop_recording(
        &mut self,
        slot: usize,
        capture: &mut dyn Capture,
    ) -> Result<(), InstrumentError> {
        if self.session.active_slot != Some(slot) {
            return Err(InstrumentError::NotActive(slot));
        }
        // Already stopping: the slot went back to idle on the first stop.
        if self.slots[slot].state == SlotState::Idle {
            return Ok(());
        }
        self.slots[slot].state = SlotState::Idle;
        capture.stop();
        tracing::info!(slot = slot + 1, "recording stopped");
        Ok(())
    }

    pub fn on_data(&mut self, chunk: Vec<f32>) {
        let Some(slot) = self.session.active_slot else {
            return;
        };
        if chunk.is_empty() {
            return;
        }
        if self.slots[slot].state == SlotState::Armed {
            self.slots[slot].state = SlotState::Recording;
        }
        self.session.pending_chunks.push(chunk);
    }

    /// Finalize: join the buffered chunks and store them, replacing any
    /// previous clip in the slot. Returns the slot that received the clip.
    pub fn on_stopped(&mut self) -> Option<usize> {
        let slot = self.session.active_slot.take()?;
        let chunks = std::mem::take(&mut self.session.pending_chunks);
        let clip = Clip::from_chunks(&chunks);
        tracing::debug!(
            slot = slot + 1,
            samples = clip.len(),
            "recording stored"
        );
        self.slots[slot].state = SlotState::Idle;
        self.slots[slot].clip = Some(clip);
        Some(slot)
    }

    /// Play a stored clip. Hands back the clip so the caller can also put it
    /// on a clip key.
    pub fn play_recording(
        &self,
        slot: usize,
        sink: &mut dyn PlaybackSink,
    ) -> Result<Clip, InstrumentError> {
        let clip = self.clip(slot).ok_or(InstrumentError::Empty(slot))?;
        sink.play(clip);
        Ok(clip.clone())
    }
}

/// Clips bound to the z..m keys.
#[derive(Debug, Clone, Default)]
pub struct ClipBank {
    clips: [Option<Clip>; CLIP_COUNT],
}

impl ClipBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, index: usize, clip: Clip) {
        if let Some(entry) = self.clips.get_mut(index % CLIP_COUNT) {
            *entry = Some(clip);
        }
    }

    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index).and_then(Option::as_ref)
    }

    /// Play clip `index` if one is loaded. Empty keys do nothing.
    pub fn play(&self, index: usize, sink: &mut dyn PlaybackSink) -> bool {
        match self.get(index) {
            Some(clip) => {
                sink.play(clip);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCapture, FakePlayback};

    fn record(bank: &mut RecordingBank, capture: &mut FakeCapture, slot: usize, data: &[f32]) {
        bank.start_recording(slot, capture).unwrap();
        bank.on_data(data.to_vec());
        bank.stop_recording(slot, capture).unwrap();
        assert_eq!(bank.on_stopped(), Some(slot));
    }

    #[test]
    fn play_requires_a_completed_recording() {
        let mut bank = RecordingBank::new(10);
        let mut capture = FakeCapture::default();
        let mut sink = FakePlayback::default();

        for slot in 0..10 {
            assert_eq!(
                bank.play_recording(slot, &mut sink),
                Err(InstrumentError::Empty(slot))
            );
        }

        // Stop requested but not yet finalized: still empty.
        bank.start_recording(4, &mut capture).unwrap();
        bank.on_data(vec![0.25; 3]);
        bank.stop_recording(4, &mut capture).unwrap();
        assert!(bank.play_recording(4, &mut sink).is_err());

        bank.on_stopped();
        let clip = bank.play_recording(4, &mut sink).unwrap();
        assert_eq!(clip.samples(), &[0.25; 3]);
        assert_eq!(sink.played.len(), 1);
        assert!(bank.play_recording(5, &mut sink).is_err());
    }

    #[test]
    fn second_start_is_busy_and_keeps_active_slot() {
        let mut bank = RecordingBank::new(10);
        let mut capture = FakeCapture::default();
        bank.start_recording(2, &mut capture).unwrap();

        for slot in [2, 6] {
            assert_eq!(
                bank.start_recording(slot, &mut capture),
                Err(InstrumentError::Busy)
            );
        }
        assert_eq!(bank.active_slot(), Some(2));
        assert_eq!(bank.slots()[6].state, SlotState::Idle);
        assert_eq!(capture.starts, 1);
    }

    #[test]
    fn stop_on_other_slot_is_not_active() {
        let mut bank = RecordingBank::new(10);
        let mut capture = FakeCapture::default();
        assert_eq!(
            bank.stop_recording(0, &mut capture),
            Err(InstrumentError::NotActive(0))
        );

        bank.start_recording(1, &mut capture).unwrap();
        assert_eq!(
            bank.stop_recording(3, &mut capture),
            Err(InstrumentError::NotActive(3))
        );
        assert_eq!(bank.active_slot(), Some(1));
        assert_eq!(capture.stops, 0);
    }

    #[test]
    fn slot_goes_armed_then_recording() {
        let mut bank = RecordingBank::new(3);
        let mut capture = FakeCapture::default();
        bank.start_recording(0, &mut capture).unwrap();
        assert_eq!(bank.slots()[0].state, SlotState::Armed);
        bank.on_data(vec![]);
        assert_eq!(bank.slots()[0].state, SlotState::Armed);
        bank.on_data(vec![0.1]);
        assert_eq!(bank.slots()[0].state, SlotState::Recording);
    }

    #[test]
    fn rerecording_overwrites_the_clip() {
        let mut bank = RecordingBank::new(10);
        let mut capture = FakeCapture::default();
        record(&mut bank, &mut capture, 2, &[0.1, 0.2]);
        record(&mut bank, &mut capture, 2, &[0.9]);
        assert_eq!(bank.clip(2).unwrap().samples(), &[0.9]);
    }

    #[test]
    fn chunks_do_not_leak_between_sessions() {
        let mut bank = RecordingBank::new(10);
        let mut capture = FakeCapture::default();
        record(&mut bank, &mut capture, 0, &[0.5, 0.5]);
        record(&mut bank, &mut capture, 1, &[0.7]);
        assert_eq!(bank.clip(0).unwrap().samples(), &[0.5, 0.5]);
        assert_eq!(bank.clip(1).unwrap().samples(), &[0.7]);
    }

    #[test]
    fn start_is_refused_until_finalized() {
        let mut bank = RecordingBank::new(10);
        let mut capture = FakeCapture::default();
        bank.start_recording(0, &mut capture).unwrap();
        bank.stop_recording(0, &mut capture).unwrap();
        assert_eq!(
            bank.start_recording(1, &mut capture),
            Err(InstrumentError::Busy)
        );
        // A repeated stop does not ask the recorder twice.
        bank.stop_recording(0, &mut capture).unwrap();
        assert_eq!(capture.stops, 1);

        bank.on_stopped();
        assert!(bank.start_recording(1, &mut capture).is_ok());
    }

    #[test]
    fn stray_events_are_ignored() {
        let mut bank = RecordingBank::new(2);
        bank.on_data(vec![1.0]);
        assert_eq!(bank.on_stopped(), None);
        assert!(bank.clip(0).is_none());
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut bank = RecordingBank::new(9);
        let mut capture = FakeCapture::default();
        assert_eq!(
            bank.start_recording(9, &mut capture),
            Err(InstrumentError::NoSuchSlot(9))
        );
        assert!(!bank.is_recording());
    }

    #[test]
    fn clip_bank_wraps_and_skips_empty_keys() {
        let mut clips = ClipBank::new();
        let mut sink = FakePlayback::default();
        assert!(!clips.play(0, &mut sink));

        clips.assign(9, Clip::new(vec![0.3]));
        assert!(clips.play(2, &mut sink));
        assert_eq!(sink.played[0].samples(), &[0.3]);
    }
}

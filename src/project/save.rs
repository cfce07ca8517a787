use std::path::Path;

use crate::capture::Clip;
use crate::constants::SAMPLE_RATE;
use crate::error::ProjectError;
use crate::input::slot_key;
use crate::project::metadata::{SessionMeta, SlotMeta};
use crate::recording::RecordingBank;

/// Write every stored slot as a WAV file plus `session.json`. Empty slots
/// are skipped. Returns the written metadata.
pub fn export_session(dir: &Path, bank: &RecordingBank) -> Result<SessionMeta, ProjectError> {
    std::fs::create_dir_all(dir)?;

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "session".to_string());
    let mut meta = SessionMeta::new(&name);

    for (index, slot) in bank.slots().iter().enumerate() {
        let Some(clip) = &slot.clip else {
            continue;
        };
        let key = slot_key(index);
        let filename = format!("slot_{}.wav", key);
        write_wav(&dir.join(&filename), clip)?;
        meta.slots.push(SlotMeta {
            index,
            key,
            filename,
            duration_secs: clip.duration_secs(),
        });
    }

    let json = serde_json::to_string_pretty(&meta)?;
    std::fs::write(dir.join("session.json"), json)?;

    Ok(meta)
}

fn write_wav(path: &Path, clip: &Clip) -> Result<(), ProjectError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in clip.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::load::read_wav_mono_f32;
    use crate::testing::FakeCapture;

    #[test]
    fn exports_only_stored_slots() {
        let dir = tempfile::tempdir().unwrap();
        let mut bank = RecordingBank::new(10);
        let mut capture = FakeCapture::default();
        bank.start_recording(9, &mut capture).unwrap();
        bank.on_data(vec![0.5, -0.5, 0.25]);
        bank.stop_recording(9, &mut capture).unwrap();
        bank.on_stopped();

        let meta = export_session(dir.path(), &bank).unwrap();
        assert_eq!(meta.slots.len(), 1);
        assert_eq!(meta.slots[0].key, '0');
        assert_eq!(meta.slots[0].filename, "slot_0.wav");

        let samples = read_wav_mono_f32(&dir.path().join("slot_0.wav")).unwrap();
        assert_eq!(samples, vec![0.5, -0.5, 0.25]);

        let json = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
        let parsed: SessionMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meta);
    }
}

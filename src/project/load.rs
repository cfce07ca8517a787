use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};

use crate::capture::Clip;
use crate::constants::CLIP_COUNT;
use crate::error::ProjectError;

/// Load the first [`CLIP_COUNT`] `.wav` files in `dir` (by file name) as
/// pre-assigned clips.
pub fn load_clip_dir(dir: &Path) -> Result<Vec<(PathBuf, Clip)>, ProjectError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        })
        .collect();
    paths.sort();

    paths
        .into_iter()
        .take(CLIP_COUNT)
        .map(|path| {
            let samples = read_wav_mono_f32(&path)?;
            Ok((path, Clip::new(samples)))
        })
        .collect()
}

pub fn read_wav_mono_f32(path: &Path) -> Result<Vec<f32>, ProjectError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f32 / i8::MAX as f32))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 24 | 32) => {
            let denom = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / denom))
                .collect::<Result<Vec<_>, _>>()?
        }
        _ => {
            return Err(ProjectError::UnsupportedFormat {
                path: path.display().to_string(),
                bits: spec.bits_per_sample,
                format: spec.sample_format,
            })
        }
    };

    if spec.channels == 1 {
        return Ok(samples);
    }

    // Downmix interleaved multichannel audio to mono.
    let ch = spec.channels as usize;
    let mut mono = Vec::with_capacity(samples.len() / ch);
    for frame in samples.chunks_exact(ch) {
        mono.push(frame.iter().copied().sum::<f32>() / ch as f32);
    }
    Ok(mono)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_i16_stereo(path: &Path, frames: &[(i16, i16)]) {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for (l, r) in frames {
            writer.write_sample(*l).unwrap();
            writer.write_sample(*r).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn stereo_is_downmixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kick.wav");
        write_i16_stereo(&path, &[(i16::MAX, 0), (0, 0)]);
        let mono = read_wav_mono_f32(&path).unwrap();
        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 0.5).abs() < 1e-4);
        assert_eq!(mono[1], 0.0);
    }

    #[test]
    fn clip_dir_takes_sorted_wavs_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.wav", "a.WAV", "c.wav", "d.wav", "e.wav", "f.wav", "g.wav", "h.wav"] {
            write_i16_stereo(&dir.path().join(name), &[(100, 100)]);
        }
        std::fs::write(dir.path().join("notes.txt"), "not audio").unwrap();

        let clips = load_clip_dir(dir.path()).unwrap();
        assert_eq!(clips.len(), CLIP_COUNT);
        assert!(clips[0].0.ends_with("a.WAV"));
        assert!(clips.iter().all(|(p, _)| !p.ends_with("h.wav")));
    }
}

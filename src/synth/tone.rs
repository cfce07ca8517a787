use crate::constants::SAMPLE_RATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Monophonic triangle-wave voice with an ADSR envelope. A new note cuts off
/// the previous one.
pub struct ToneGenerator {
    phase: f64,
    freq: f64,
    stage: Stage,
    envelope: f32,
    /// Samples left before the gate closes and release begins
    gate_remaining: usize,
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
}

impl ToneGenerator {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            freq: 0.0,
            stage: Stage::Idle,
            envelope: 0.0,
            gate_remaining: 0,
            attack: 0.005,
            decay: 0.1,
            sustain: 0.3,
            release: 1.0,
        }
    }

    /// Start `freq` and hold it for `gate_secs` before releasing.
    pub fn trigger(&mut self, freq: f64, gate_secs: f32) {
        self.freq = freq;
        self.stage = Stage::Attack;
        self.gate_remaining = (gate_secs.max(0.0) * SAMPLE_RATE as f32) as usize;
    }

    pub fn is_active(&self) -> bool {
        self.stage != Stage::Idle
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.stage == Stage::Idle {
            return 0.0;
        }
        let sr = SAMPLE_RATE as f32;

        if self.gate_remaining > 0 {
            self.gate_remaining -= 1;
        } else if self.stage != Stage::Release {
            self.stage = Stage::Release;
        }

        match self.stage {
            Stage::Attack => {
                self.envelope += 1.0 / (self.attack * sr).max(1.0);
                if self.envelope >= 1.0 {
                    self.envelope = 1.0;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                self.envelope -= (1.0 - self.sustain) / (self.decay * sr).max(1.0);
                if self.envelope <= self.sustain {
                    self.envelope = self.sustain;
                    self.stage = Stage::Sustain;
                }
            }
            Stage::Sustain => {}
            Stage::Release => {
                self.envelope -= self.sustain.max(0.01) / (self.release * sr).max(1.0);
                if self.envelope <= 0.0 {
                    self.envelope = 0.0;
                    self.stage = Stage::Idle;
                    return 0.0;
                }
            }
            Stage::Idle => {}
        }

        // Triangle from the phase ramp
        let tri = (4.0 * (self.phase - (self.phase + 0.5).floor()).abs() - 1.0) as f32;
        self.phase += self.freq / SAMPLE_RATE as f64;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        -tri * self.envelope * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_triggered() {
        let mut tone = ToneGenerator::new();
        assert!((0..64).all(|_| tone.next_sample() == 0.0));
        assert!(!tone.is_active());
    }

    #[test]
    fn note_sounds_then_releases_to_silence() {
        let mut tone = ToneGenerator::new();
        tone.trigger(440.0, 0.25);

        let gate = (0.25 * SAMPLE_RATE as f32) as usize;
        let held: Vec<f32> = (0..gate).map(|_| tone.next_sample()).collect();
        assert!(held.iter().any(|s| s.abs() > 0.1));
        assert!(held.iter().all(|s| s.abs() <= 0.5));

        // Release is one second; give it a little more.
        for _ in 0..(SAMPLE_RATE as usize + SAMPLE_RATE as usize / 10) {
            tone.next_sample();
        }
        assert!(!tone.is_active());
        assert_eq!(tone.next_sample(), 0.0);
    }

    #[test]
    fn retrigger_restarts_the_gate() {
        let mut tone = ToneGenerator::new();
        tone.trigger(220.0, 0.0);
        tone.next_sample();
        tone.trigger(330.0, 0.1);
        assert!(tone.is_active());
        assert_eq!(tone.gate_remaining, (0.1 * SAMPLE_RATE as f32) as usize);
    }
}

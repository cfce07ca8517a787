use crate::constants::SAMPLE_RATE;
use crate::effects::Effect;

const LINE_LENGTHS: [usize; 4] = [1557, 1617, 1491, 1422];

/// Four parallel feedback delay lines with prime-ish lengths.
pub struct Reverb {
    delay_lines: [Vec<f32>; 4],
    write_positions: [usize; 4],
    feedback: [f32; 4],
    mix: f32,
}

impl Reverb {
    /// `decay_secs` is the time for the tail to fall by 60 dB.
    pub fn new(decay_secs: f32, wet: f32) -> Self {
        let decay_samples = decay_secs.max(0.01) * SAMPLE_RATE as f32;
        let feedback = LINE_LENGTHS.map(|len| 10f32.powf(-3.0 * len as f32 / decay_samples));
        Self {
            delay_lines: LINE_LENGTHS.map(|len| vec![0.0; len]),
            write_positions: [0; 4],
            feedback,
            mix: wet.clamp(0.0, 1.0),
        }
    }
}

impl Effect for Reverb {
    fn process(&mut self, input: &mut [f32]) {
        for sample in input.iter_mut() {
            let dry = *sample;
            let mut wet = 0.0f32;

            for i in 0..4 {
                let len = self.delay_lines[i].len();
                let read_pos = (self.write_positions[i] + 1) % len;
                let delayed = self.delay_lines[i][read_pos];
                wet += delayed * 0.25;

                self.delay_lines[i][self.write_positions[i]] = dry + delayed * self.feedback[i];
                self.write_positions[i] = (self.write_positions[i] + 1) % len;
            }

            *sample = dry * (1.0 - self.mix) + wet * self.mix;
        }
    }
}

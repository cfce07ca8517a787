use crate::constants::SAMPLE_RATE;
use crate::effects::Effect;

/// Feedback delay. Fully wet by default, so the dry signal is not repeated.
pub struct Delay {
    buffer: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
    feedback: f32,
    mix: f32,
}

impl Delay {
    pub fn new(time_secs: f32, feedback: f32) -> Self {
        let max_samples = SAMPLE_RATE as usize * 2; // 2 sec max delay
        let delay_samples =
            ((time_secs.max(0.0) * SAMPLE_RATE as f32).round() as usize).clamp(1, max_samples - 1);
        Self {
            buffer: vec![0.0; max_samples],
            write_pos: 0,
            delay_samples,
            feedback: feedback.clamp(0.0, 0.9),
            mix: 1.0,
        }
    }
}

impl Effect for Delay {
    fn process(&mut self, input: &mut [f32]) {
        let len = self.buffer.len();
        for sample in input.iter_mut() {
            let read_pos = (self.write_pos + len - self.delay_samples) % len;
            let delayed = self.buffer[read_pos];

            self.buffer[self.write_pos] = *sample + delayed * self.feedback;
            self.write_pos = (self.write_pos + 1) % len;

            *sample = *sample * (1.0 - self.mix) + delayed * self.mix;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_repeats_with_feedback() {
        let mut delay = Delay::new(4.0 / SAMPLE_RATE as f32, 0.5);
        assert_eq!(delay.delay_samples, 4);

        let mut buf = [0.0f32; 13];
        buf[0] = 1.0;
        delay.process(&mut buf);

        assert_eq!(buf[0], 0.0);
        assert!((buf[4] - 1.0).abs() < 1e-6);
        assert!((buf[8] - 0.5).abs() < 1e-6);
        assert!((buf[12] - 0.25).abs() < 1e-6);
        assert_eq!(buf[5], 0.0);
    }

    #[test]
    fn feedback_is_clamped_below_one() {
        let delay = Delay::new(0.25, 3.0);
        assert!(delay.feedback < 1.0);
    }
}

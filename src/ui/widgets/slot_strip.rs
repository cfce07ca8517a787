use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::input::slot_key;
use crate::recording::{RecordingSlot, SlotState};
use crate::ui::theme;

/// One cell per recording slot: its key, state marker and clip length.
pub struct SlotStripWidget<'a> {
    pub slots: &'a [RecordingSlot],
    pub active: Option<usize>,
}

impl Widget for SlotStripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let y = area.y;
        let mut x = area.x + 1;
        let cell = 7u16;

        for (i, slot) in self.slots.iter().enumerate() {
            if x + cell > area.x + area.width {
                break;
            }
            let is_active = self.active == Some(i);

            // Slot key
            let key_style = if is_active {
                Style::default().fg(theme::RECORD_RED)
            } else {
                Style::default().fg(theme::FG)
            };
            buf.set_string(x, y, slot_key(i).to_string(), key_style);

            // State marker
            let (marker, color) = match slot.state {
                SlotState::Recording => ("●", theme::RECORD_RED),
                SlotState::Armed => ("○", theme::ARMED_AMBER),
                SlotState::Idle if slot.clip.is_some() => ("■", theme::STORED_BLUE),
                SlotState::Idle => ("·", theme::DIM),
            };
            buf.set_string(x + 1, y, marker, Style::default().fg(color));

            // Stored length
            if area.height > 1 {
                if let Some(clip) = &slot.clip {
                    buf.set_string(
                        x,
                        y + 1,
                        format!("{:.1}s", clip.duration_secs()),
                        Style::default().fg(theme::DIM),
                    );
                }
            }
            x += cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::Clip;
    use crate::constants::SAMPLE_RATE;

    #[test]
    fn markers_follow_slot_state() {
        let slots = vec![
            RecordingSlot::default(),
            RecordingSlot {
                clip: Some(Clip::new(vec![0.0; SAMPLE_RATE as usize])),
                state: SlotState::Idle,
            },
            RecordingSlot {
                clip: None,
                state: SlotState::Recording,
            },
        ];
        let area = Rect::new(0, 0, 40, 2);
        let mut buf = Buffer::empty(area);
        SlotStripWidget {
            slots: &slots,
            active: Some(2),
        }
        .render(area, &mut buf);

        assert_eq!(buf[(1, 0)].symbol(), "1");
        assert_eq!(buf[(2, 0)].symbol(), "·");
        assert_eq!(buf[(9, 0)].symbol(), "■");
        assert_eq!(buf[(8, 1)].symbol(), "1");
        assert_eq!(buf[(15, 0)].symbol(), "3");
        assert_eq!(buf[(15, 0)].fg, theme::RECORD_RED);
        assert_eq!(buf[(16, 0)].symbol(), "●");
    }
}

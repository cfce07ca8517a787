use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::mode::{EffectSelection, Mode};
use crate::ui::theme;

/// Header line: active source, then the effect buttons.
pub struct ModeIndicatorWidget {
    pub started: bool,
    pub mode: Mode,
    pub effect: EffectSelection,
    /// A switch to the microphone is waiting on the device
    pub pending: bool,
}

impl Widget for ModeIndicatorWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 30 || area.height < 1 {
            return;
        }
        buf.set_style(area, Style::default().bg(theme::HEADER_BG));

        if !self.started {
            buf.set_string(
                area.x + 1,
                area.y,
                "Press Enter to start audio",
                Style::default().fg(theme::ARMED_AMBER).bg(theme::HEADER_BG),
            );
            return;
        }

        let mut x = area.x + 1;
        for mode in [Mode::Synth, Mode::Microphone] {
            let is_current = mode == self.mode;
            let color = match mode {
                Mode::Synth => theme::ACCENT,
                Mode::Microphone => theme::MIC_ORANGE,
            };
            let label = if mode == Mode::Microphone && self.pending {
                format!(" {}… ", mode.label())
            } else {
                format!(" {} ", mode.label())
            };

            let style = if is_current {
                Style::default().fg(theme::BG).bg(color)
            } else if mode == Mode::Microphone && self.pending {
                Style::default().fg(color).bg(theme::HEADER_BG)
            } else {
                Style::default().fg(theme::DIM).bg(theme::HEADER_BG)
            };

            buf.set_string(x, area.y, &label, style);
            x += label.chars().count() as u16 + 1;
        }

        x += 2;
        for effect in EffectSelection::ALL {
            let label = format!(" {} ", effect.label());
            let style = if effect == self.effect {
                Style::default().fg(theme::BG).bg(theme::FG)
            } else {
                Style::default().fg(theme::DIM).bg(theme::HEADER_BG)
            };
            if x + label.len() as u16 > area.x + area.width {
                break;
            }
            buf.set_string(x, area.y, &label, style);
            x += label.len() as u16 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(widget: ModeIndicatorWidget) -> String {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn asks_for_start_first() {
        let text = line(ModeIndicatorWidget {
            started: false,
            mode: Mode::Synth,
            effect: EffectSelection::Crisp,
            pending: false,
        });
        assert!(text.contains("Press Enter"));
    }

    #[test]
    fn shows_pending_microphone() {
        let text = line(ModeIndicatorWidget {
            started: true,
            mode: Mode::Synth,
            effect: EffectSelection::Echo,
            pending: true,
        });
        assert!(text.contains('…'));
        assert!(text.contains(EffectSelection::Echo.label()));
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme;

/// Key hints, wrapped onto as many rows as the area has.
pub struct KeyboardHintWidget {
    pub hints: Vec<(&'static str, &'static str)>,
}

impl Widget for KeyboardHintWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let right = area.x + area.width;
        let mut x = area.x + 1;
        let mut y = area.y;

        for (key, desc) in &self.hints {
            let needed = (key.len() + desc.len() + 3) as u16;
            if x + needed > right {
                y += 1;
                x = area.x + 1;
                if y >= area.y + area.height || x + needed > right {
                    break;
                }
            }
            buf.set_string(x, y, key, Style::default().fg(theme::ACCENT));
            x += key.len() as u16;
            buf.set_string(x, y, ":", Style::default().fg(theme::DIM));
            x += 1;
            buf.set_string(x, y, desc, Style::default().fg(theme::FG));
            x += desc.len() as u16 + 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_wraps_to_next_row() {
        let area = Rect::new(0, 0, 18, 2);
        let mut buf = Buffer::empty(area);
        KeyboardHintWidget {
            hints: vec![("Tab", "Mode"), ("Esc", "Quit"), ("F1", "Fx")],
        }
        .render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..18u16)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect()
        };
        assert_eq!(row(0).trim_end(), " Tab:Mode");
        assert_eq!(row(1).trim_end(), " Esc:Quit  F1:Fx");
    }
}

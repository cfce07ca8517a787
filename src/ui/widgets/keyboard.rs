use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::ui::theme;

/// Note keys on the first row, clip keys on the second. A flashing key is
/// drawn inverted.
pub struct KeyboardWidget {
    /// (key, note name, flashing)
    pub notes: Vec<(char, String, bool)>,
    /// (key, has a clip, flashing)
    pub clips: Vec<(char, bool, bool)>,
}

const CAP_WIDTH: u16 = 6;

fn cap_style(lit: bool, color: ratatui::style::Color) -> Style {
    if lit {
        Style::default()
            .fg(theme::BG)
            .bg(theme::KEY_FLASH)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color).bg(theme::SELECTED_BG)
    }
}

impl Widget for KeyboardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CAP_WIDTH || area.height < 2 {
            return;
        }
        let right = area.x + area.width;

        let mut x = area.x + 1;
        for (key, name, lit) in &self.notes {
            if x + CAP_WIDTH > right {
                break;
            }
            let style = cap_style(*lit, theme::FG);
            let name_color = if *lit { theme::BG } else { theme::ACCENT };
            buf.set_string(x, area.y, format!("{:^5}", key.to_ascii_uppercase()), style);
            buf.set_string(x, area.y + 1, format!("{name:^5}"), style.fg(name_color));
            x += CAP_WIDTH;
        }

        if area.height < 4 {
            return;
        }
        let y = area.y + 3;
        let mut x = area.x + 1;
        for (key, loaded, lit) in &self.clips {
            if x + CAP_WIDTH > right {
                break;
            }
            let color = if *loaded { theme::STORED_BLUE } else { theme::DIM };
            let label = format!("{:^5}", key.to_ascii_uppercase());
            buf.set_string(x, y, label, cap_style(*lit, color));
            x += CAP_WIDTH;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashing_key_is_highlighted() {
        let area = Rect::new(0, 0, 60, 4);
        let mut buf = Buffer::empty(area);
        KeyboardWidget {
            notes: vec![('a', "G4".into(), true), ('s', "A4".into(), false)],
            clips: vec![('z', false, false)],
        }
        .render(area, &mut buf);

        // Centre of the first cap holds the key letter
        assert_eq!(buf[(3, 0)].symbol(), "A");
        assert_eq!(buf[(3, 0)].bg, theme::KEY_FLASH);
        assert_eq!(buf[(9, 0)].symbol(), "S");
        assert_eq!(buf[(9, 0)].bg, theme::SELECTED_BG);
        assert_eq!(buf[(3, 3)].symbol(), "Z");
    }
}

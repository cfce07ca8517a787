use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::app::{Notice, NoticeKind};
use crate::ui::theme;

pub struct StatusBarWidget<'a> {
    pub notice: Option<&'a Notice>,
    /// Key of the slot being recorded
    pub recording: Option<char>,
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let y = area.y;
        let mut x = area.x + 1;

        if let Some(key) = self.recording {
            let rec = format!("● REC {key}");
            buf.set_string(x, y, &rec, Style::default().fg(theme::RECORD_RED));
            x += rec.chars().count() as u16 + 2;
        }

        if let Some(notice) = self.notice {
            let color = match notice.kind {
                NoticeKind::Info => theme::FG,
                NoticeKind::Error => theme::RECORD_RED,
            };
            let room = (area.x + area.width).saturating_sub(x) as usize;
            let text: String = notice.text.chars().take(room).collect();
            buf.set_string(x, y, text, Style::default().fg(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn error_notice_is_red_and_clipped() {
        let notice = Notice {
            text: "Already recording! Stop first.".into(),
            kind: NoticeKind::Error,
            shown_at: Instant::now(),
        };
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget {
            notice: Some(&notice),
            recording: None,
        }
        .render(area, &mut buf);

        let text: String = (0..12u16).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(text, " Already rec");
        assert_eq!(buf[(1, 0)].fg, theme::RECORD_RED);
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::ui::theme;

/// Map samples in [-1, 1] onto a `width` x `height` surface with the origin
/// at the top left: +1 lands on the top edge, -1 on the bottom edge. Each
/// sample gets an equal horizontal slice.
pub fn waveform_points(data: &[f32], width: f64, height: f64) -> Vec<(f64, f64)> {
    if data.is_empty() {
        return Vec::new();
    }
    let slice = width / data.len() as f64;
    data.iter()
        .enumerate()
        .map(|(i, &v)| {
            let y = (1.0 - (v as f64 + 1.0) / 2.0) * height;
            (i as f64 * slice, y)
        })
        .collect()
}

/// Live scope trace, one connected line across the area.
pub struct WaveformWidget {
    pub data: Vec<f32>,
    pub color: Color,
}

impl Widget for WaveformWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }

        let width = area.width as usize;
        let rows = area.height as usize;
        let mid_y = area.y + (area.height / 2);

        if self.data.is_empty() {
            // Draw empty line
            for x in area.x..area.x + area.width {
                buf.set_string(x, mid_y, "─", Style::default().fg(theme::DIM));
            }
            return;
        }

        // Row span covered in each column; a column joins its own points and
        // the last point of the column before it so the trace stays connected.
        let mut spans: Vec<Option<(usize, usize)>> = vec![None; width];
        let mut prev_row: Option<usize> = None;
        for (x, y) in waveform_points(&self.data, width as f64, rows as f64) {
            let col = (x as usize).min(width - 1);
            let row = (y.max(0.0) as usize).min(rows - 1);
            let from = prev_row.unwrap_or(row);
            let (lo, hi) = (from.min(row), from.max(row));
            spans[col] = Some(match spans[col] {
                Some((a, b)) => (a.min(lo), b.max(hi)),
                None => (lo, hi),
            });
            prev_row = Some(row);
        }

        let style = Style::default().fg(self.color);
        for (col, span) in spans.iter().enumerate() {
            let Some((lo, hi)) = *span else { continue };
            let x = area.x + col as u16;
            for row in lo..=hi {
                let symbol = if lo == hi { "─" } else { "│" };
                buf.set_string(x, area.y + row as u16, symbol, style);
            }
        }
    }
}

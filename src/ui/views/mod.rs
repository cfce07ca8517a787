pub mod instrument_view;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::AppState;

pub trait View {
    fn render(&self, state: &AppState, frame: &mut Frame, area: Rect);
}

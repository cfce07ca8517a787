pub mod layout;
pub mod theme;
pub mod views;
pub mod widgets;

use ratatui::Frame;

use crate::app::AppState;
use crate::input;
use crate::ui::layout::ScreenLayout;
use crate::ui::views::instrument_view::InstrumentView;
use crate::ui::views::View;
use crate::ui::widgets::keyboard_hint::KeyboardHintWidget;
use crate::ui::widgets::mode_indicator::ModeIndicatorWidget;
use crate::ui::widgets::status_bar::StatusBarWidget;

/// Draw one frame of the whole screen.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let layout = ScreenLayout::new(frame.area());

    // Header: mode + effect
    frame.render_widget(
        ModeIndicatorWidget {
            started: state.controller.is_started(),
            mode: state.controller.mode(),
            effect: state.controller.effect(),
            pending: state.controller.is_pending(),
        },
        layout.header,
    );

    InstrumentView.render(state, frame, layout.main);

    frame.render_widget(
        StatusBarWidget {
            notice: state.notice.as_ref(),
            recording: state.bank.active_slot().map(input::slot_key),
        },
        layout.status,
    );

    // Footer: keyboard hints
    let hints = input::key_hints(state.bank.capacity());
    frame.render_widget(KeyboardHintWidget { hints }, layout.footer);
}

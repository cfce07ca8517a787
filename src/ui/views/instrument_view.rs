use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::AppState;
use crate::input::{CLIP_KEYS, NOTE_KEYS};
use crate::mode::Mode;
use crate::ui::layout::InstrumentLayout;
use crate::ui::theme;
use crate::ui::views::View;
use crate::ui::widgets::keyboard::KeyboardWidget;
use crate::ui::widgets::slot_strip::SlotStripWidget;
use crate::ui::widgets::waveform::WaveformWidget;

pub struct InstrumentView;

impl View for InstrumentView {
    fn render(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let layout = InstrumentLayout::new(area);

        frame.render_widget(
            KeyboardWidget {
                notes: NOTE_KEYS
                    .iter()
                    .map(|(key, note)| (*key, note.to_string(), state.is_flashing(*key)))
                    .collect(),
                clips: CLIP_KEYS
                    .iter()
                    .enumerate()
                    .map(|(i, key)| (*key, state.clips.get(i).is_some(), state.is_flashing(*key)))
                    .collect(),
            },
            layout.keys,
        );

        // Nothing to draw until audio has started and a tap exists
        let data = state
            .controller
            .analyser()
            .map(|a| a.sample())
            .unwrap_or_default();
        let color = match state.controller.mode() {
            Mode::Synth => theme::ACCENT,
            Mode::Microphone => theme::MIC_ORANGE,
        };
        frame.render_widget(WaveformWidget { data, color }, layout.scope);

        frame.render_widget(
            SlotStripWidget {
                slots: state.bank.slots(),
                active: state.bank.active_slot(),
            },
            layout.slots,
        );
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout regions
pub struct ScreenLayout {
    pub header: Rect,
    pub main: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Mode + effect
                Constraint::Min(8),    // Keys, scope, slots
                Constraint::Length(1), // Notice line
                Constraint::Length(2), // Key hints
            ])
            .split(area);

        Self {
            header: chunks[0],
            main: chunks[1],
            status: chunks[2],
            footer: chunks[3],
        }
    }
}

/// Instrument view: keyboard on top, scope in the middle, slots below
pub struct InstrumentLayout {
    pub keys: Rect,
    pub scope: Rect,
    pub slots: Rect,
}

impl InstrumentLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Note row + clip row
                Constraint::Min(4),    // Waveform
                Constraint::Length(3), // Recorder bank
            ])
            .split(area);

        Self {
            keys: chunks[0],
            scope: chunks[1],
            slots: chunks[2],
        }
    }
}

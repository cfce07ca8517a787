use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::graph::Note;
use crate::messages::UiEvent;
use crate::mode::EffectSelection;

/// G major from G4, one note per home-row key.
pub const NOTE_KEYS: [(char, Note); 9] = [
    ('a', Note(67)), // G4
    ('s', Note(69)), // A4
    ('d', Note(71)), // B4
    ('f', Note(72)), // C5
    ('g', Note(74)), // D5
    ('h', Note(76)), // E5
    ('j', Note(78)), // F#5
    ('k', Note(79)), // G5
    ('l', Note(81)), // A5
];

pub const CLIP_KEYS: [char; 7] = ['z', 'x', 'c', 'v', 'b', 'n', 'm'];

/// Slot 0 is "1", slot 9 is "0".
pub const SLOT_KEYS: [char; 10] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Note(Note),
    Clip(usize),
    Slot(usize),
}

/// Case-insensitive lookup in the key table. Slot keys past `slot_count`
/// are unbound.
pub fn binding_for(key: char, slot_count: usize) -> Option<Binding> {
    let key = key.to_ascii_lowercase();
    if let Some((_, note)) = NOTE_KEYS.iter().find(|(k, _)| *k == key) {
        return Some(Binding::Note(*note));
    }
    if let Some(idx) = CLIP_KEYS.iter().position(|k| *k == key) {
        return Some(Binding::Clip(idx));
    }
    SLOT_KEYS
        .iter()
        .take(slot_count)
        .position(|k| *k == key)
        .map(Binding::Slot)
}

pub fn slot_key(slot: usize) -> char {
    SLOT_KEYS.get(slot).copied().unwrap_or('?')
}

/// Map a terminal key press to a UI event. Alt+digit only reaches slots
/// below `slot_count`.
pub fn handle_key(key: KeyEvent, slot_count: usize) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Enter => Some(UiEvent::StartAudio),
        KeyCode::Tab => Some(UiEvent::ToggleMode),
        KeyCode::F(1) => Some(UiEvent::SelectEffect(EffectSelection::Crisp)),
        KeyCode::F(2) => Some(UiEvent::SelectEffect(EffectSelection::Echo)),
        KeyCode::F(3) => Some(UiEvent::SelectEffect(EffectSelection::Reverb)),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
            's' => Some(UiEvent::Export),
            'c' => Some(UiEvent::Quit),
            _ => None,
        },
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => SLOT_KEYS
            .iter()
            .take(slot_count)
            .position(|k| *k == c)
            .map(UiEvent::PlaySlot),
        KeyCode::Char(c) => Some(UiEvent::KeyDown(c)),
        _ => None,
    }
}

/// Key labels for the hint bar
pub fn key_hints(slot_count: usize) -> Vec<(&'static str, &'static str)> {
    let slots = if slot_count >= SLOT_KEYS.len() {
        "1-0"
    } else {
        "1-9"
    };
    vec![
        ("Enter", "Start"),
        ("A-L", "Notes"),
        ("Z-M", "Clips"),
        (slots, "Rec/Stop"),
        ("Alt+1-0", "Play"),
        ("Tab", "Mode"),
        ("F1-F3", "Effect"),
        ("Ctrl+S", "Export"),
        ("Esc", "Quit"),
    ]
}

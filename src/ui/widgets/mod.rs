pub mod keyboard;
pub mod keyboard_hint;
pub mod mode_indicator;
pub mod slot_strip;
pub mod status_bar;
pub mod waveform;

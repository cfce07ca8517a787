use ratatui::style::Color;

/// Dark panel palette with one accent per sound source
pub const BG: Color = Color::Rgb(20, 20, 25);
pub const FG: Color = Color::Rgb(200, 200, 210);
pub const DIM: Color = Color::Rgb(80, 80, 90);
pub const ACCENT: Color = Color::Rgb(0, 200, 150); // Synth teal
pub const MIC_ORANGE: Color = Color::Rgb(255, 150, 60);
pub const RECORD_RED: Color = Color::Rgb(220, 50, 50);
pub const ARMED_AMBER: Color = Color::Rgb(220, 200, 50);
pub const STORED_BLUE: Color = Color::Rgb(100, 200, 255);
pub const KEY_FLASH: Color = Color::Rgb(255, 255, 255);
pub const HEADER_BG: Color = Color::Rgb(35, 35, 45);
pub const SELECTED_BG: Color = Color::Rgb(40, 45, 55);

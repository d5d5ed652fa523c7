//! Spaceduck theme colors for the TUI chrome
//!
//! Based on https://github.com/pineapplegiant/spaceduck

use ratatui::style::Color;

// Spaceduck palette
pub const FG: Color = Color::Rgb(236, 240, 193); // #ecf0c1
pub const PURPLE: Color = Color::Rgb(242, 206, 0); // #f2ce00 (ANSI magenta)
pub const GREEN: Color = Color::Rgb(92, 204, 150); // #5ccc96
pub const ORANGE: Color = Color::Rgb(227, 52, 0); // #e33400 (ANSI red)
pub const BLUE: Color = Color::Rgb(0, 163, 204); // #00a3cc
pub const CYAN: Color = Color::Rgb(122, 92, 204); // #7a5ccc

// Semantic colors
pub const SELECTED_BG: Color = Color::Rgb(30, 34, 54); // Slightly lighter bg
pub const MUTED: Color = Color::Rgb(100, 100, 120);

// Slider colors
pub const SLIDER_FILL: Color = BLUE;
pub const SLIDER_TRACK: Color = SELECTED_BG;

// Tab colors
pub const TAB_ACTIVE: Color = BLUE;
pub const TAB_INACTIVE: Color = MUTED;

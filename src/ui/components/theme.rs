//! Shared UI color constants.

use ratatui::style::Color;

pub const BG_BASE: Color = Color::Rgb(16, 18, 22);
pub const BG_PANEL: Color = Color::Rgb(22, 24, 30);
pub const SELECTED_BG: Color = Color::Rgb(40, 60, 80);
pub const SELECTED_BG_DIM: Color = Color::Rgb(30, 34, 40);

pub const TITLE_BAR_BG: Color = Color::Rgb(12, 14, 18);
pub const MENU_BAR_BG: Color = Color::Rgb(20, 22, 27);
pub const TOOL_BAR_BG: Color = Color::Rgb(26, 28, 34);
pub const TAB_BAR_BG: Color = Color::Rgb(20, 20, 20);
pub const STATUS_BAR_BG: Color = Color::Rgb(0, 90, 140);

pub const BORDER_DEFAULT: Color = Color::Rgb(60, 64, 72);
pub const BORDER_FOCUSED: Color = Color::Rgb(0, 150, 200);

pub const TEXT_BRIGHT: Color = Color::White;
pub const TEXT_PRIMARY: Color = Color::Rgb(210, 214, 220);
pub const TEXT_MUTED: Color = Color::Rgb(140, 146, 156);
pub const TEXT_FAINT: Color = Color::Rgb(90, 94, 102);

pub const ACCENT_PRIMARY: Color = Color::Cyan;
pub const ACCENT_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const ACCENT_WARNING: Color = Color::Rgb(230, 180, 60);
pub const ACCENT_ERROR: Color = Color::Rgb(230, 90, 90);

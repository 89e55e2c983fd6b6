use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00f7d44b);
pub const SECONDARY: Color = Color::from_u32(0x009D8400);
pub const NEUTRAL: Color = Color::from_u32(0x00808080);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);
pub const FAVORITE: Color = Color::from_u32(0x00ff6b9d);
pub const ERROR: Color = Color::from_u32(0x00ff5555);

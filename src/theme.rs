use ratatui::style::Color;

use crate::media::ConnectionQuality;

// Centralized theme colors. Keep these as small helpers so renderers never
// hard-code palette values.

pub const ACCENT_RGB: (u8, u8, u8) = (118, 185, 71);
pub const DANGER_RGB: (u8, u8, u8) = (239, 68, 68);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

pub fn danger() -> Color {
    rgb_to_color(DANGER_RGB)
}

// Overlay chrome
pub fn overlay_bg() -> Color {
    Color::Black
}
pub fn overlay_fg() -> Color {
    Color::White
}
pub fn overlay_border() -> Color {
    accent()
}
pub fn overlay_border_dragging() -> Color {
    Color::White
}
pub fn header_bg() -> Color {
    Color::DarkGray
}
pub fn header_fg() -> Color {
    Color::White
}
pub fn muted_fg() -> Color {
    Color::Gray
}

// Controls
pub fn control_bg() -> Color {
    Color::DarkGray
}
pub fn control_active_bg() -> Color {
    danger()
}

// Presence
pub fn online() -> Color {
    Color::Green
}

// Host screen status bar
pub fn status_bg() -> Color {
    Color::DarkGray
}
pub fn status_fg() -> Color {
    Color::White
}

pub fn quality(quality: ConnectionQuality) -> Color {
    match quality {
        ConnectionQuality::Excellent => Color::Green,
        ConnectionQuality::Good => Color::Blue,
        ConnectionQuality::Fair => Color::Yellow,
        ConnectionQuality::Poor => Color::Red,
    }
}

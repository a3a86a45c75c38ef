use ratatui::style::Color;

// Centralized theme colors for the demo surface.

// Trigger regions
pub fn region_border() -> Color {
    Color::DarkGray
}
pub fn region_active_border() -> Color {
    Color::Rgb(255, 165, 0)
}
pub fn region_disabled_fg() -> Color {
    Color::DarkGray
}

// Menu panel
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Gray
}
pub fn menu_selected_fg() -> Color {
    Color::Black
}

// Status bar
pub fn status_bg() -> Color {
    Color::Blue
}
pub fn status_fg() -> Color {
    Color::White
}

//! Inkwell theme implementation

use ratatui::style::Color;

use super::Theme;

/// Inkwell color palette: warm dark tones for long reading sessions
pub const INKWELL: Theme = Theme {
    name: String::new(), // Will be set properly with const fn when stabilized

    // Background colors
    bg_primary: Color::Rgb(24, 21, 18),   // #181512
    bg_secondary: Color::Rgb(34, 30, 25), // #221e19
    bg_tertiary: Color::Rgb(58, 51, 43),  // #3a332b

    // Foreground colors
    fg_primary: Color::Rgb(216, 205, 184),   // #d8cdb8
    fg_secondary: Color::Rgb(232, 224, 208), // #e8e0d0
    fg_muted: Color::Rgb(125, 114, 99),      // #7d7263

    // Accent colors
    accent_primary: Color::Rgb(201, 162, 39),    // #c9a227
    accent_secondary: Color::Rgb(143, 180, 199), // #8fb4c7

    // Semantic colors
    success: Color::Rgb(155, 177, 103), // #9bb167
    warning: Color::Rgb(217, 164, 91),  // #d9a45b
    error: Color::Rgb(199, 95, 95),     // #c75f5f
    info: Color::Rgb(143, 180, 199),    // #8fb4c7

    // UI elements
    border: Color::Rgb(58, 51, 43),           // #3a332b
    border_focused: Color::Rgb(201, 162, 39), // #c9a227
    selection: Color::Rgb(61, 52, 35),        // #3d3423
    cursor: Color::Rgb(232, 224, 208),        // #e8e0d0
};

// Workaround for const String
impl Theme {
    pub fn inkwell() -> Self {
        Theme { name: "Inkwell".to_string(), ..INKWELL }
    }
}

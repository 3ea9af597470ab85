use crate::ops::tasks::Importance;
use ratatui::style::Color;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub panel: Color,
    pub input: Color,
    pub text: Color,
    pub border: Color,
    pub muted: Color,
    pub accent: Color,
    pub success: Color,
}

pub const DARK: Palette = Palette {
    background: Color::Rgb(26, 26, 26), // #1a1a1a
    panel: Color::Rgb(45, 45, 45),      // #2d2d2d
    input: Color::Rgb(61, 61, 61),      // #3d3d3d
    text: Color::White,
    border: Color::Rgb(77, 77, 77), // #4d4d4d
    muted: Color::Rgb(156, 163, 175),
    accent: Color::Rgb(77, 77, 77),
    success: Color::Rgb(34, 197, 94),
};

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(240, 240, 240), // #f0f0f0
    panel: Color::White,
    input: Color::White,
    text: Color::Black,
    border: Color::Rgb(156, 163, 175),
    muted: Color::Rgb(107, 114, 128),
    accent: Color::Rgb(59, 130, 246),
    success: Color::Rgb(34, 197, 94),
};

/// Gray used for completed tasks in both themes
pub const COMPLETED: Color = Color::Rgb(107, 114, 128);

pub fn palette(dark_mode: bool) -> Palette {
    if dark_mode { DARK } else { LIGHT }
}

pub fn importance_color(importance: Importance) -> Color {
    match importance {
        Importance::Low => Color::Rgb(34, 197, 94),     // green
        Importance::Medium => Color::Rgb(249, 115, 22), // orange
        Importance::High => Color::Rgb(239, 68, 68),    // red
    }
}

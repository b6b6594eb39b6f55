// Colors and styles shared by every view.

use ratatui::style::{Color, Modifier, Style};

/// App background
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Selected row background
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Primary text - off-white for readability
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

/// Secondary/muted text
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Hints and placeholders
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

/// Focus, titles, author names
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);

/// Liked/boosted markers
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);

/// Input fields
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);

pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

pub fn title() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn error() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

pub fn selected() -> Style {
    Style::default()
        .bg(BG_SELECTED)
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

//! Palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ─────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(102, 217, 239); // #66d9ef
pub const HIGHLIGHT: Color = Color::Rgb(174, 129, 255); // #ae81ff
pub const ONLINE: Color = Color::Rgb(166, 226, 46); // #a6e22e
pub const OFFLINE: Color = Color::Rgb(249, 38, 114); // #f92672
pub const WARNING: Color = Color::Rgb(230, 219, 116); // #e6db74
pub const TEXT: Color = Color::Rgb(208, 208, 200); // #d0d0c8
pub const MUTED: Color = Color::Rgb(117, 113, 94); // #75715e
pub const SELECTION_BG: Color = Color::Rgb(52, 53, 46); // #34352e

// ── Semantic styles ─────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border() -> Style {
    Style::default().fg(MUTED)
}

pub fn border_selected() -> Style {
    Style::default().fg(HIGHLIGHT)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn row_selected() -> Style {
    Style::default()
        .fg(HIGHLIGHT)
        .bg(SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

/// Open name input.
pub fn editing() -> Style {
    Style::default().fg(WARNING).add_modifier(Modifier::UNDERLINED)
}

/// Admin service link.
pub fn admin_link() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn link() -> Style {
    Style::default().fg(ACCENT)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn alert() -> Style {
    Style::default().fg(OFFLINE).add_modifier(Modifier::BOLD)
}

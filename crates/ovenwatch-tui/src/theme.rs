//! Palette and semantic styles for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use ovenwatch_core::Ingredient;

// ── Core Palette ──────────────────────────────────────────────────────

pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Connection Dot ────────────────────────────────────────────────────

pub const CONNECTED: Color = Color::Rgb(166, 227, 161); // #a6e3a1
pub const DISCONNECTED: Color = Color::Rgb(242, 184, 181); // #f2b8b5

// ── Ingredients ───────────────────────────────────────────────────────

pub const TOMATO: Color = Color::Rgb(255, 85, 85); // #ff5555
pub const CHEESE: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const BASIL: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const BLUEBERRY: Color = Color::Rgb(139, 233, 253); // #8be9fd

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const FADED: Color = Color::Rgb(110, 112, 124); // #6e707c

pub fn ingredient_color(ingredient: Ingredient) -> Color {
    match ingredient {
        Ingredient::Red => TOMATO,
        Ingredient::Yellow => CHEESE,
        Ingredient::Green => BASIL,
        Ingredient::Blue => BLUEBERRY,
    }
}

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Large counter values (`nb-accepted`, `nb-refused`).
pub fn counter_value() -> Style {
    Style::default().fg(DIM_WHITE).add_modifier(Modifier::BOLD)
}

/// Bar fill for a station at or above capacity.
pub fn bar_full() -> Style {
    Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)
}

/// Bar fill for a station with spare capacity.
pub fn bar_normal() -> Style {
    Style::default().fg(CONNECTED)
}

pub fn bar_empty() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn badge() -> Style {
    Style::default().fg(BG_DARK).bg(DIM_WHITE)
}

pub fn badge_warning() -> Style {
    Style::default().fg(BG_DARK).bg(ELECTRIC_YELLOW)
}

pub fn badge_error() -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(DISCONNECTED)
        .add_modifier(Modifier::BOLD)
}

/// Overlay for an out-of-service station row. Terminals have no alpha, so
/// reduced opacity is rendered as a faded, dimmed foreground.
pub fn dimmed(base: Style) -> Style {
    base.fg(FADED).add_modifier(Modifier::DIM)
}

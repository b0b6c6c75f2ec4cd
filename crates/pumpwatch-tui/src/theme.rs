//! Color palette and semantic styling for the alert dashboard.

use ratatui::style::{Color, Modifier, Style};

use pumpwatch_core::{AlertLevel, AlertStatus, Urgency};

use crate::action::NotificationLevel;

// ── Core Palette ──────────────────────────────────────────────────────

pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const ORANGE: Color = Color::Rgb(255, 184, 108); // #ffb86c
pub const PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(PURPLE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Dim hint text in the status bar.
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key name within a hint.
pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN)
}

// ── Domain Colors ─────────────────────────────────────────────────────

pub fn level_color(level: AlertLevel) -> Color {
    match level {
        AlertLevel::Level1 => RED,
        AlertLevel::Level2 => ORANGE,
        AlertLevel::Level3 => YELLOW,
        AlertLevel::Level4 => DIM_WHITE,
    }
}

pub fn urgency_color(urgency: Urgency) -> Color {
    match urgency {
        Urgency::Critical => RED,
        Urgency::Important => ORANGE,
        Urgency::Normal => GREEN,
    }
}

pub fn status_color(status: AlertStatus) -> Color {
    match status {
        AlertStatus::Unhandled => RED,
        AlertStatus::Processing => YELLOW,
        AlertStatus::Handled => GREEN,
    }
}

pub fn notification_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => CYAN,
        NotificationLevel::Success => GREEN,
        NotificationLevel::Warning => YELLOW,
        NotificationLevel::Error => RED,
    }
}

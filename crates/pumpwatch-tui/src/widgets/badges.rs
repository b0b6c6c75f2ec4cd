//! Styled badge spans for alert attributes — ●/○/◐ dots and level tags.

use ratatui::style::Style;
use ratatui::text::Span;

use pumpwatch_core::{AlertLevel, AlertStatus, Urgency};

use crate::theme;

/// Status dot with color mapping.
pub fn status_span(status: AlertStatus) -> Span<'static> {
    let symbol = match status {
        AlertStatus::Unhandled => "●",
        AlertStatus::Processing => "◐",
        AlertStatus::Handled => "○",
    };
    Span::styled(symbol, Style::default().fg(theme::status_color(status)))
}

/// Compact level tag, e.g. "L1" in the level's color.
pub fn level_span(level: AlertLevel) -> Span<'static> {
    Span::styled(
        format!("L{}", level.rank()),
        Style::default().fg(theme::level_color(level)),
    )
}

/// Urgency label in its color.
pub fn urgency_span(urgency: Urgency) -> Span<'static> {
    Span::styled(
        urgency.to_string(),
        Style::default().fg(theme::urgency_color(urgency)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_tags_use_rank() {
        assert_eq!(level_span(AlertLevel::Level3).content, "L3");
    }

    #[test]
    fn status_dots_are_distinct() {
        let dots = [
            status_span(AlertStatus::Unhandled).content,
            status_span(AlertStatus::Processing).content,
            status_span(AlertStatus::Handled).content,
        ];
        assert_eq!(dots.len(), 3);
        assert_ne!(dots[0], dots[1]);
        assert_ne!(dots[1], dots[2]);
    }
}

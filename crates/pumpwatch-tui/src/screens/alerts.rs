//! Alert list screen — the table of visible records.
//!
//! The list itself is owned by the controller; this component only
//! caches the most recent render push and handles row navigation.

use color_eyre::eyre::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use pumpwatch_core::AlertRecord;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{badges, time_fmt};

pub struct AlertsScreen {
    focused: bool,
    records: Vec<AlertRecord>,
    selected: usize,
}

impl AlertsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            records: Vec::new(),
            selected: 0,
        }
    }

    fn selected_id(&self) -> Option<u32> {
        self.records.get(self.selected).map(|r| r.id)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
    }
}

impl Component for AlertsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.records.len() {
                    self.selected += 1;
                }
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                Ok(None)
            }
            KeyCode::Char('G') => {
                self.selected = self.records.len().saturating_sub(1);
                Ok(None)
            }
            KeyCode::Enter => Ok(self.selected_id().map(Action::ViewAlert)),
            KeyCode::Char('d') => Ok(self.selected_id().map(Action::HandleAlert)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ListUpdated(records) = action {
            self.records = records.clone();
            self.clamp_selection();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Alerts ({}) ", self.records.len());
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.records.is_empty() {
            frame.render_widget(
                Paragraph::new("  No alerts match the current filters")
                    .style(theme::key_hint()),
                inner,
            );
            return;
        }

        let layout = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let header = Row::new(vec![
            Cell::from(" ").style(theme::table_header()),
            Cell::from("ID").style(theme::table_header()),
            Cell::from("Lvl").style(theme::table_header()),
            Cell::from("Urgency").style(theme::table_header()),
            Cell::from("Title").style(theme::table_header()),
            Cell::from("Station").style(theme::table_header()),
            Cell::from("When").style(theme::table_header()),
            Cell::from("Occ").style(theme::table_header()),
        ]);

        let now = Local::now().naive_local();
        let rows: Vec<Row> = self
            .records
            .iter()
            .map(|record| {
                Row::new(vec![
                    Cell::from(badges::status_span(record.status)),
                    Cell::from(record.id.to_string()).style(theme::table_row()),
                    Cell::from(badges::level_span(record.level)),
                    Cell::from(badges::urgency_span(record.urgency)),
                    Cell::from(record.title.clone()).style(theme::table_row()),
                    Cell::from(record.station.clone()).style(theme::table_row()),
                    Cell::from(time_fmt::fmt_ago(record.created_at, now))
                        .style(theme::table_row()),
                    Cell::from(record.occurrence.to_string()).style(theme::table_row()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Min(24),
            Constraint::Length(20),
            Constraint::Length(14),
            Constraint::Length(9),
        ];

        let mut state = TableState::default().with_selected(Some(self.selected));
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, layout[0], &mut state);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("details  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("dispatch  ", theme::key_hint()),
            Span::styled("f/s/a ", theme::key_hint_key()),
            Span::styled("filter/sort/area", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;
    use pumpwatch_core::AlertStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn screen_with_records() -> AlertsScreen {
        let mut screen = AlertsScreen::new();
        screen
            .update(&Action::ListUpdated(AlertStore::with_mock_data().get_all()))
            .unwrap();
        screen
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut screen = screen_with_records();
        for _ in 0..20 {
            screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        }
        assert_eq!(screen.selected, 5);

        screen.handle_key_event(key(KeyCode::Char('g'))).unwrap();
        assert_eq!(screen.selected, 0);
        screen.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn enter_views_the_selected_alert() {
        let mut screen = screen_with_records();
        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::ViewAlert(2))));
    }

    #[test]
    fn shrinking_list_clamps_the_selection() {
        let mut screen = screen_with_records();
        screen.handle_key_event(key(KeyCode::Char('G'))).unwrap();
        let two = AlertStore::with_mock_data().get_all()[..2].to_vec();
        screen.update(&Action::ListUpdated(two)).unwrap();
        assert_eq!(screen.selected, 1);
    }

    #[test]
    fn empty_list_produces_no_per_row_actions() {
        let mut screen = AlertsScreen::new();
        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(action.is_none());
    }
}

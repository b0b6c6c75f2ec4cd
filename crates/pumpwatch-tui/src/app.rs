//! Application core — event loop, key handling, action dispatch.
//!
//! The [`AlertListController`] owns all list semantics; the app maps
//! terminal events onto controller calls and draws whatever the
//! controller pushed back through the bridge renderer.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{debug, info};

use pumpwatch_core::{
    AlertLevel, AlertListController, AlertStore, AlertTab, FilterPatch, FilterSortEngine,
    NARROW_BREAKPOINT, Panel, SortDirection, SortField, StatusCounts, Urgency,
};

use crate::action::{Action, Notification, NotificationLevel};
use crate::bridge::ActionRenderer;
use crate::component::Component;
use crate::debounce::Debouncer;
use crate::event::{Event, EventReader};
use crate::screens::AlertsScreen;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    controller: AlertListController,
    screen: AlertsScreen,
    running: bool,
    counts: StatusCounts,
    search_active: bool,
    search_buffer: String,
    debouncer: Debouncer,
    /// Cursor within the open panel's option list.
    panel_cursor: usize,
    notification: Option<(Notification, Instant)>,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Wire the controller to the action loop via the bridge renderer.
    pub fn new(debounce_window: Duration) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let controller = AlertListController::builder()
            .store(AlertStore::with_mock_data())
            .engine(FilterSortEngine::new())
            .renderer(Box::new(ActionRenderer::new(action_tx.clone())))
            .build()?;

        Ok(Self {
            controller,
            screen: AlertsScreen::new(),
            running: true,
            counts: StatusCounts::default(),
            search_active: false,
            search_buffer: String::new(),
            debouncer: Debouncer::new(action_tx.clone(), debounce_window),
            panel_cursor: 0,
            notification: None,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
        })
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.screen.init(self.action_tx.clone())?;
        self.screen.set_focused(true);

        // Initial list push before the first frame.
        self.controller.refresh();

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input mapping ─────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_active {
            return Ok(self.handle_search_key(key));
        }
        if self.controller.open_panel().is_some() {
            return Ok(self.handle_panel_key(key));
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),

            // Status tabs via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                let idx = (c as u8 - b'1') as usize;
                if let Some(tab) = AlertTab::iter().nth(idx) {
                    return Ok(Some(Action::SwitchTab(tab.to_string())));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => return Ok(Some(Action::CycleTab)),

            (KeyModifiers::NONE, KeyCode::Char('f')) => {
                return Ok(Some(Action::TogglePanel(Panel::Filter)));
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                return Ok(Some(Action::TogglePanel(Panel::Sort)));
            }
            (KeyModifiers::NONE, KeyCode::Char('a')) => {
                return Ok(Some(Action::TogglePanel(Panel::Area)));
            }

            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::ResetFilters)),

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::ClosePanel)),

            _ => {}
        }

        self.screen.handle_key_event(key)
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CloseSearch),
            KeyCode::Enter => Some(Action::SearchCommitted(self.search_buffer.clone())),
            KeyCode::Backspace => {
                self.search_buffer.pop();
                Some(Action::SearchInput(self.search_buffer.clone()))
            }
            KeyCode::Char(c) => {
                self.search_buffer.push(c);
                Some(Action::SearchInput(self.search_buffer.clone()))
            }
            _ => None,
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent) -> Option<Action> {
        let panel = self.controller.open_panel()?;
        match key.code {
            KeyCode::Esc => return Some(Action::ClosePanel),
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.panel_option_count(panel);
                if self.panel_cursor + 1 < len {
                    self.panel_cursor += 1;
                }
                return None;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.panel_cursor = self.panel_cursor.saturating_sub(1);
                return None;
            }
            _ => {}
        }

        match panel {
            Panel::Sort => match key.code {
                KeyCode::Enter => sort_options()
                    .get(self.panel_cursor)
                    .cloned()
                    .map(Action::ApplySortOption),
                _ => None,
            },
            Panel::Area => match key.code {
                KeyCode::Enter => self
                    .controller
                    .area_options()
                    .get(self.panel_cursor)
                    .map(|node| Action::SelectArea(node.code.to_owned())),
                KeyCode::Backspace => Some(Action::AreaBack),
                _ => None,
            },
            Panel::Filter => match key.code {
                KeyCode::Left => {
                    let (min, max) = self.controller.engine().filter().occurrence_range;
                    (max > min).then(|| Action::SetOccurrenceMax(max - 1))
                }
                KeyCode::Right => {
                    let (_, max) = self.controller.engine().filter().occurrence_range;
                    (max < pumpwatch_core::OCCURRENCE_MAX)
                        .then(|| Action::SetOccurrenceMax(max + 1))
                }
                KeyCode::Char('t') => {
                    let today = chrono::Local::now().date_naive();
                    Some(Action::SetDateRange(Some((today, today))))
                }
                KeyCode::Char('c') => Some(Action::SetDateRange(None)),
                KeyCode::Char('l') => Some(Action::CycleLevelFilter),
                KeyCode::Char('u') => Some(Action::CycleUrgencyFilter),
                KeyCode::Char('r') => Some(Action::ResetFilters),
                _ => None,
            },
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if matches!(mouse.kind, MouseEventKind::Down(_)) && self.controller.overlay_visible() {
            // Any click while the overlay is up counts as outside the panel.
            return Ok(Some(Action::OutsideClick));
        }
        self.screen.handle_mouse_event(mouse)
    }

    fn panel_option_count(&self, panel: Panel) -> usize {
        match panel {
            Panel::Sort => sort_options().len(),
            Panel::Area => self.controller.area_options().len(),
            Panel::Filter => 0,
        }
    }

    // ── Action processing ─────────────────────────────────────────

    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
                self.controller.handle_resize(*w);
            }

            Action::SwitchTab(name) => {
                self.controller.switch_tab(name);
            }
            Action::CycleTab => {
                let tabs: Vec<AlertTab> = AlertTab::iter().collect();
                let current = tabs
                    .iter()
                    .position(|t| *t == self.controller.active_tab())
                    .unwrap_or(0);
                let next = tabs[(current + 1) % tabs.len()];
                self.controller.switch_tab(&next.to_string());
            }

            Action::TogglePanel(panel) => {
                if self.terminal_size.0 < NARROW_BREAKPOINT {
                    self.notify(Notification::new(
                        NotificationLevel::Warning,
                        "Terminal too narrow for panels",
                    ));
                } else {
                    self.controller.toggle_panel(*panel);
                    self.panel_cursor = 0;
                }
            }
            Action::ClosePanel => {
                self.controller.handle_escape();
            }
            Action::OutsideClick => {
                self.controller.handle_outside_click();
            }

            Action::OpenSearch => {
                self.search_active = true;
            }
            Action::CloseSearch => {
                self.search_active = false;
                self.debouncer.cancel();
            }
            Action::SearchInput(text) => {
                self.debouncer.debounce(text.clone());
            }
            Action::SearchCommitted(text) => {
                debug!(term = %text, "search committed");
                self.debouncer.cancel();
                self.controller.search(text);
            }

            Action::ApplySortOption(option) => {
                self.controller.apply_sort_option(option);
                self.controller.handle_escape();
            }
            Action::SelectArea(code) => {
                self.controller.select_area(code);
                self.panel_cursor = 0;
            }
            Action::AreaBack => {
                self.controller.area_back();
                self.panel_cursor = 0;
            }
            Action::SetOccurrenceMax(max) => {
                self.controller.set_occurrence_max(*max);
            }
            Action::SetDateRange(range) => {
                self.controller.set_date_range(*range);
            }
            Action::CycleLevelFilter => {
                let levels: Vec<AlertLevel> = AlertLevel::iter().collect();
                let next = cycle_choice(&levels, self.controller.engine().filter().level);
                self.controller.apply_filter(FilterPatch {
                    level: Some(next),
                    ..FilterPatch::default()
                });
            }
            Action::CycleUrgencyFilter => {
                let urgencies: Vec<Urgency> = Urgency::iter().collect();
                let next = cycle_choice(&urgencies, self.controller.engine().filter().urgency);
                self.controller.apply_filter(FilterPatch {
                    urgency: Some(next),
                    ..FilterPatch::default()
                });
            }
            Action::ResetFilters => {
                self.controller.reset_filters();
            }

            Action::ViewAlert(id) => {
                self.controller.view_alert(*id);
            }
            Action::HandleAlert(id) => {
                self.controller.handle_alert(*id);
            }

            Action::CountsUpdated(counts) => {
                self.counts = *counts;
            }

            Action::Notify(notification) => {
                self.notify(notification.clone());
            }
            Action::DismissNotification => {
                self.notification = None;
            }

            Action::Tick => {
                if let Some((_, shown_at)) = &self.notification {
                    if shown_at.elapsed() >= TOAST_DURATION {
                        self.notification = None;
                    }
                }
            }

            // Render is handled in the main loop, not here
            Action::Render => {}

            // Everything else belongs to the list screen
            other => {
                if let Some(follow_up) = self.screen.update(other)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(1), // tab bar
            Constraint::Length(1), // filter summary / search input
            Constraint::Min(1),    // alert list
            Constraint::Length(1), // status bar
        ])
        .split(area);

        self.render_tab_bar(frame, layout[0]);
        if self.search_active {
            self.render_search_line(frame, layout[1]);
        } else {
            self.render_summary_line(frame, layout[1]);
        }
        self.screen.render(frame, layout[2]);
        render_status_bar(frame, layout[3]);

        if let Some(panel) = self.controller.open_panel() {
            self.render_panel(frame, area, panel);
        }

        if let Some((notification, _)) = &self.notification {
            render_toast(frame, area, notification);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let counts = self.counts;
        let spans: Vec<Span> = AlertTab::iter()
            .flat_map(|tab| {
                let count = match tab {
                    AlertTab::All => counts.all,
                    AlertTab::Unhandled => counts.unhandled,
                    AlertTab::Processing => counts.processing,
                    AlertTab::Handled => counts.handled,
                };
                let style = if tab == self.controller.active_tab() {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                vec![Span::styled(format!(" {tab} ({count}) "), style)]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_search_line(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" /", theme::key_hint_key()),
            Span::styled(self.search_buffer.clone(), theme::title_style()),
            Span::styled("▌", theme::title_style()),
            Span::styled("  (Enter apply · Esc close)", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_summary_line(&self, frame: &mut Frame, area: Rect) {
        let filter = self.controller.engine().filter();
        let sort = self.controller.engine().sort();

        let mut parts = vec![format!("sort {}", sort.option_string())];
        if !filter.search_text.is_empty() {
            parts.push(format!("search \"{}\"", filter.search_text));
        }
        if filter.area != pumpwatch_core::AREA_ALL {
            parts.push(format!("area {}", filter.area));
        }
        if let Some(level) = filter.level {
            parts.push(format!("level {level}"));
        }
        if let Some(urgency) = filter.urgency {
            parts.push(format!("urgency {urgency}"));
        }
        if let Some((start, end)) = filter.date_range {
            parts.push(format!("dates {start}..{end}"));
        }
        let (min, max) = filter.occurrence_range;
        if (min, max) != (pumpwatch_core::OCCURRENCE_MIN, pumpwatch_core::OCCURRENCE_MAX) {
            parts.push(format!("occurrence {min}-{max}"));
        }

        let line = Line::from(Span::styled(
            format!(" {}", parts.join("  ·  ")),
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, panel: Panel) {
        let width = 44u16.min(area.width.saturating_sub(4));
        let height = 14u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let panel_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, panel_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            panel_area,
        );

        let title = match panel {
            Panel::Filter => " Filter ",
            Panel::Sort => " Sort ",
            Panel::Area => " Area ",
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(panel_area);
        frame.render_widget(block, panel_area);

        let lines = match panel {
            Panel::Sort => self.sort_panel_lines(),
            Panel::Area => self.area_panel_lines(),
            Panel::Filter => self.filter_panel_lines(),
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn sort_panel_lines(&self) -> Vec<Line<'static>> {
        let current = self.controller.engine().sort().option_string();
        let mut lines = vec![Line::from("")];
        for (idx, option) in sort_options().into_iter().enumerate() {
            let marker = if option == current { "● " } else { "  " };
            let style = if idx == self.panel_cursor {
                theme::table_selected()
            } else {
                theme::table_row()
            };
            lines.push(Line::from(Span::styled(
                format!("  {marker}{option}"),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Enter apply · Esc close",
            theme::key_hint(),
        )));
        lines
    }

    fn area_panel_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];
        for (idx, node) in self.controller.area_options().iter().enumerate() {
            let style = if idx == self.panel_cursor {
                theme::table_selected()
            } else {
                theme::table_row()
            };
            lines.push(Line::from(Span::styled(
                format!("  {} ({})", node.name, node.code),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Enter drill in / select · Backspace up · Esc close",
            theme::key_hint(),
        )));
        lines
    }

    fn filter_panel_lines(&self) -> Vec<Line<'static>> {
        let filter = self.controller.engine().filter();
        let (min, max) = filter.occurrence_range;
        let dates = filter
            .date_range
            .map_or_else(|| "any".to_owned(), |(s, e)| format!("{s} .. {e}"));
        let level = filter
            .level
            .map_or_else(|| "all".to_owned(), |l| l.to_string());
        let urgency = filter
            .urgency
            .map_or_else(|| "all".to_owned(), |u| u.to_string());

        vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  Level: {level}"),
                theme::table_row(),
            )),
            Line::from(Span::styled(
                format!("  Urgency: {urgency}"),
                theme::table_row(),
            )),
            Line::from(Span::styled(
                format!("  Occurrence weight: {min} .. {max}"),
                theme::table_row(),
            )),
            Line::from(Span::styled(
                format!("  Created: {dates}"),
                theme::table_row(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  l/u cycle level/urgency",
                theme::key_hint(),
            )),
            Line::from(Span::styled(
                "  ←/→ adjust max occurrence",
                theme::key_hint(),
            )),
            Line::from(Span::styled(
                "  t today only · c clear dates",
                theme::key_hint(),
            )),
            Line::from(Span::styled(
                "  r reset all · Esc close",
                theme::key_hint(),
            )),
        ]
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" 1-4 ", theme::key_hint_key()),
        Span::styled("tabs", theme::key_hint()),
        Span::styled("  / ", theme::key_hint_key()),
        Span::styled("search", theme::key_hint()),
        Span::styled("  f/s/a ", theme::key_hint_key()),
        Span::styled("panels", theme::key_hint()),
        Span::styled("  r ", theme::key_hint_key()),
        Span::styled("reset", theme::key_hint()),
        Span::styled("  q ", theme::key_hint_key()),
        Span::styled("quit", theme::key_hint()),
    ]);
    frame.render_widget(Paragraph::new(hints), area);
}

/// Step through `options` one notch per call, wrapping back to "no
/// restriction" after the last entry.
fn cycle_choice<T: Copy + PartialEq>(options: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => options.first().copied(),
        Some(value) => options
            .iter()
            .position(|o| *o == value)
            .and_then(|idx| options.get(idx + 1))
            .copied(),
    }
}

/// Every `field-direction` combination offered by the sort panel.
fn sort_options() -> Vec<String> {
    SortField::iter()
        .flat_map(|field| {
            [SortDirection::Desc, SortDirection::Asc]
                .into_iter()
                .map(move |direction| format!("{field}-{direction}"))
        })
        .collect()
}

/// Toast in the top-right corner, colored by level.
fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification) {
    let width = (notification.message.len() as u16 + 4)
        .min(area.width.saturating_sub(2))
        .max(10);
    let toast_area = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1,
        width,
        3,
    );

    frame.render_widget(Clear, toast_area);
    let color = theme::notification_color(notification.level);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", notification.message),
            Style::default().fg(color),
        )),
        inner,
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(Duration::from_millis(300)).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn number_keys_map_to_tabs() {
        let mut app = app();
        let action = app.handle_key_event(key(KeyCode::Char('2'))).unwrap();
        match action {
            Some(Action::SwitchTab(name)) => assert_eq!(name, "unhandled"),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn narrow_terminal_refuses_panels() {
        let mut app = app();
        app.terminal_size = (NARROW_BREAKPOINT - 1, 24);
        app.process_action(&Action::TogglePanel(Panel::Filter))
            .unwrap();
        assert!(app.controller.open_panel().is_none());
        assert!(app.notification.is_some());
    }

    #[tokio::test]
    async fn resize_below_breakpoint_closes_open_panel() {
        let mut app = app();
        app.terminal_size = (120, 40);
        app.process_action(&Action::TogglePanel(Panel::Sort)).unwrap();
        assert_eq!(app.controller.open_panel(), Some(Panel::Sort));

        app.process_action(&Action::Resize(NARROW_BREAKPOINT - 1, 40))
            .unwrap();
        assert!(app.controller.open_panel().is_none());
    }

    #[tokio::test]
    async fn search_keystrokes_go_through_the_debouncer() {
        let mut app = app();
        app.process_action(&Action::OpenSearch).unwrap();
        let action = app.handle_key_event(key(KeyCode::Char('p'))).unwrap();
        assert!(matches!(action, Some(Action::SearchInput(ref s)) if s == "p"));

        // Enter commits the buffer immediately.
        let action = app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::SearchCommitted(ref s)) if s == "p"));
    }

    #[tokio::test]
    async fn cycle_tab_wraps_around() {
        let mut app = app();
        for _ in 0..4 {
            app.process_action(&Action::CycleTab).unwrap();
        }
        assert_eq!(app.controller.active_tab(), AlertTab::All);
    }

    #[tokio::test]
    async fn stale_toast_expires_on_tick() {
        let mut app = app();
        app.notification = Some((
            Notification::new(NotificationLevel::Info, "hi"),
            Instant::now() - TOAST_DURATION,
        ));
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_none());
    }

    #[tokio::test]
    async fn filter_panel_cycles_level_and_urgency() {
        let mut app = app();
        app.terminal_size = (120, 40);
        app.process_action(&Action::TogglePanel(Panel::Filter))
            .unwrap();

        let action = app.handle_key_event(key(KeyCode::Char('l'))).unwrap();
        assert!(matches!(action, Some(Action::CycleLevelFilter)));

        app.process_action(&Action::CycleLevelFilter).unwrap();
        assert_eq!(
            app.controller.engine().filter().level,
            Some(AlertLevel::Level1)
        );

        // Cycling past the last level clears the restriction.
        for _ in 0..4 {
            app.process_action(&Action::CycleLevelFilter).unwrap();
        }
        assert_eq!(app.controller.engine().filter().level, None);

        app.process_action(&Action::CycleUrgencyFilter).unwrap();
        assert_eq!(
            app.controller.engine().filter().urgency,
            Some(Urgency::Critical)
        );
    }

    #[test]
    fn cycle_choice_wraps_to_unrestricted() {
        let options = [1, 2, 3];
        assert_eq!(cycle_choice(&options, None), Some(1));
        assert_eq!(cycle_choice(&options, Some(2)), Some(3));
        assert_eq!(cycle_choice(&options, Some(3)), None);
    }

    #[test]
    fn sort_options_cover_every_field_in_both_directions() {
        let options = sort_options();
        assert_eq!(options.len(), 10);
        assert!(options.contains(&"urgency-desc".to_owned()));
        assert!(options.contains(&"time-asc".to_owned()));
    }
}

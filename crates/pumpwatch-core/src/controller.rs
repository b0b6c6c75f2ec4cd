// ── Alert list controller ──
//
// Facade over the store and engine. Owns all session UI state (active
// tab, open panel, area drill-down) and pushes every visible change
// through the injected [`Renderer`]. Public methods never return errors;
// recoverable failures become toasts and leave the previous state
// visible.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::{debug, warn};

use crate::engine::{FilterPatch, FilterSortEngine, OCCURRENCE_MIN};
use crate::error::CoreError;
use crate::model::{AlertRecord, AlertStatus, AreaHierarchy, AreaNode, ROOT_AREA};
use crate::store::{AlertStore, StatusCounts};

/// Terminal width (columns) below which the side panels cannot be shown.
pub const NARROW_BREAKPOINT: u16 = 80;

/// Kind of a user-facing toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Presentation seam. The controller calls these whenever visible state
/// changes; implementations draw, forward actions, or record calls in
/// tests.
pub trait Renderer {
    fn render_list(&mut self, records: &[AlertRecord]);
    fn render_counts(&mut self, counts: StatusCounts);
    fn show_message(&mut self, kind: MessageKind, text: &str);
}

/// The three mutually exclusive overlay panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Panel {
    Filter,
    Sort,
    Area,
}

/// Status tab across the top of the list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertTab {
    All,
    Unhandled,
    Processing,
    Handled,
}

impl AlertTab {
    /// Status restriction the tab imposes. `All` imposes none.
    pub fn status(self) -> Option<AlertStatus> {
        match self {
            Self::All => None,
            Self::Unhandled => Some(AlertStatus::Unhandled),
            Self::Processing => Some(AlertStatus::Processing),
            Self::Handled => Some(AlertStatus::Handled),
        }
    }
}

/// Builder for [`AlertListController`]. All three collaborators are
/// required; `build` reports the first missing one.
#[derive(Default)]
pub struct ControllerBuilder {
    store: Option<AlertStore>,
    engine: Option<FilterSortEngine>,
    renderer: Option<Box<dyn Renderer>>,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store(mut self, store: AlertStore) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn engine(mut self, engine: FilterSortEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    #[must_use]
    pub fn renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn build(self) -> Result<AlertListController, CoreError> {
        let store = self
            .store
            .ok_or(CoreError::DependencyMissing { dependency: "store" })?;
        let engine = self
            .engine
            .ok_or(CoreError::DependencyMissing { dependency: "engine" })?;
        let renderer = self.renderer.ok_or(CoreError::DependencyMissing {
            dependency: "renderer",
        })?;
        Ok(AlertListController {
            store,
            engine,
            renderer,
            hierarchy: AreaHierarchy::new(),
            active_tab: AlertTab::All,
            open_panel: None,
            area_cursor: ROOT_AREA,
        })
    }
}

/// Session controller for the alert list screen.
pub struct AlertListController {
    store: AlertStore,
    engine: FilterSortEngine,
    renderer: Box<dyn Renderer>,
    hierarchy: AreaHierarchy,
    active_tab: AlertTab,
    open_panel: Option<Panel>,
    /// Current drill-down position in the area panel.
    area_cursor: &'static str,
}

impl AlertListController {
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }

    // ── Read-only session state ──

    pub fn active_tab(&self) -> AlertTab {
        self.active_tab
    }

    pub fn open_panel(&self) -> Option<Panel> {
        self.open_panel
    }

    /// `true` when any panel (and therefore the shared overlay) is shown.
    pub fn overlay_visible(&self) -> bool {
        self.open_panel.is_some()
    }

    pub fn counts(&self) -> StatusCounts {
        self.store.counts()
    }

    pub fn engine(&self) -> &FilterSortEngine {
        &self.engine
    }

    /// Entries to list at the current area drill-down position.
    pub fn area_options(&self) -> &[AreaNode] {
        self.hierarchy.children(self.area_cursor)
    }

    // ── Rendering ──

    /// Re-run the pipeline and push the list and counts to the renderer.
    pub fn refresh(&mut self) {
        let rendered = self.engine.apply(&self.store.get_all());
        debug!(visible = rendered.len(), tab = %self.active_tab, "refreshed alert list");
        self.renderer.render_list(&rendered);
        self.renderer.render_counts(self.store.counts());
    }

    // ── Panel state machine ──

    /// Open the panel, or close it when it is already open. Opening one
    /// panel closes any other.
    pub fn toggle_panel(&mut self, panel: Panel) {
        self.open_panel = if self.open_panel == Some(panel) {
            None
        } else {
            Some(panel)
        };
    }

    /// Escape closes the open panel. Returns `true` if one was closed,
    /// so callers can fall through to their own escape handling.
    pub fn handle_escape(&mut self) -> bool {
        self.open_panel.take().is_some()
    }

    /// A click on the shared overlay outside the panel closes it.
    pub fn handle_outside_click(&mut self) {
        self.open_panel = None;
    }

    /// Panels cannot survive a viewport narrower than the breakpoint.
    pub fn handle_resize(&mut self, width: u16) {
        if width < NARROW_BREAKPOINT && self.open_panel.take().is_some() {
            debug!(width, "viewport too narrow, closed panel");
        }
    }

    // ── User operations ──

    /// Switch the status tab by name (`all`, `unhandled`, `processing`,
    /// `handled`). An unknown name leaves the current tab active.
    pub fn switch_tab(&mut self, name: &str) {
        let Ok(tab) = name.parse::<AlertTab>() else {
            self.report(&CoreError::invalid_argument(format!(
                "unknown tab `{name}`"
            )));
            return;
        };
        self.active_tab = tab;
        self.patch_filter(FilterPatch {
            status: Some(tab.status()),
            ..FilterPatch::default()
        });
    }

    /// Select an area in the drill-down panel. A district moves the
    /// cursor deeper and narrows the filter; a station narrows the
    /// filter and closes the panel.
    pub fn select_area(&mut self, code: &str) {
        if let Some(node) = self
            .hierarchy
            .children(self.area_cursor)
            .iter()
            .find(|n| n.code == code)
        {
            let code = node.code;
            if self.hierarchy.has_children(code) {
                self.area_cursor = code;
            } else {
                self.open_panel = None;
            }
            self.patch_filter(FilterPatch {
                area: Some(code.to_owned()),
                ..FilterPatch::default()
            });
        } else {
            self.report(&CoreError::invalid_argument(format!(
                "area `{code}` is not selectable here"
            )));
        }
    }

    /// Step the area drill-down back up one level.
    pub fn area_back(&mut self) {
        if let Some(parent) = self.hierarchy.parent_of(self.area_cursor) {
            self.area_cursor = parent;
        } else {
            self.area_cursor = ROOT_AREA;
        }
    }

    /// Apply a search term. Callers are expected to debounce keystrokes
    /// before reaching this.
    pub fn search(&mut self, text: &str) {
        self.patch_filter(FilterPatch {
            search_text: Some(text.to_owned()),
            ..FilterPatch::default()
        });
    }

    /// Apply a compact `field-direction` sort option from the sort panel.
    pub fn apply_sort_option(&mut self, option: &str) {
        match self.engine.set_sort_option(option) {
            Ok(()) => self.refresh(),
            Err(err) => self.report(&err),
        }
    }

    /// Apply an arbitrary filter patch (the filter panel's confirm path).
    pub fn apply_filter(&mut self, patch: FilterPatch) {
        self.patch_filter(patch);
    }

    /// Restore default filter criteria and re-render. The active tab's
    /// status restriction is re-applied on top of the defaults.
    pub fn reset_filters(&mut self) {
        self.engine.reset_filter();
        self.area_cursor = ROOT_AREA;
        self.patch_filter(FilterPatch {
            status: Some(self.active_tab.status()),
            ..FilterPatch::default()
        });
        self.renderer
            .show_message(MessageKind::Success, "Filters reset");
    }

    /// Set or clear the inclusive creation-date window.
    pub fn set_date_range(&mut self, range: Option<(NaiveDate, NaiveDate)>) {
        self.patch_filter(FilterPatch {
            date_range: Some(range),
            ..FilterPatch::default()
        });
    }

    /// Raise or lower the upper occurrence-weight bound.
    pub fn set_occurrence_max(&mut self, max: u32) {
        self.patch_filter(FilterPatch {
            occurrence_range: Some((OCCURRENCE_MIN, max)),
            ..FilterPatch::default()
        });
    }

    /// Show the detail summary for one alert.
    pub fn view_alert(&mut self, id: u32) {
        match self.store.get_by_id(id) {
            Ok(record) => {
                let text = format!(
                    "{} — {} · {} · assigned to {}",
                    record.title, record.station, record.status, record.assignee
                );
                self.renderer.show_message(MessageKind::Info, &text);
            }
            Err(err) => self.report(&err),
        }
    }

    /// Dispatch an alert for handling. The status change itself happens
    /// upstream; this confirms the dispatch to the operator.
    pub fn handle_alert(&mut self, id: u32) {
        match self.store.get_by_id(id) {
            Ok(record) => {
                let text = format!("Dispatched: {}", record.title);
                self.renderer.show_message(MessageKind::Success, &text);
            }
            Err(err) => self.report(&err),
        }
    }

    // ── Internals ──

    fn patch_filter(&mut self, patch: FilterPatch) {
        match self.engine.set_filter(patch) {
            Ok(()) => self.refresh(),
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &CoreError) {
        warn!(%err, "alert list operation failed");
        self.renderer.show_message(MessageKind::Error, &err.to_string());
    }
}

/// Tab names in display order, for callers building a tab bar.
pub fn tab_names() -> Vec<String> {
    AlertTab::iter().map(|t| t.to_string()).collect()
}

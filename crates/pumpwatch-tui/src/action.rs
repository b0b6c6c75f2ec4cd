//! All possible UI actions. Actions are the sole mechanism for state mutation.

use pumpwatch_core::{AlertRecord, MessageKind, Panel, StatusCounts};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl From<MessageKind> for NotificationLevel {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Info => Self::Info,
            MessageKind::Success => Self::Success,
            MessageKind::Warning => Self::Warning,
            MessageKind::Error => Self::Error,
        }
    }
}

/// A toast notification. Auto-dismissed by the app loop after a few
/// seconds.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Tabs ──────────────────────────────────────────────────────
    SwitchTab(String),
    CycleTab,

    // ── Panels ────────────────────────────────────────────────────
    TogglePanel(Panel),
    ClosePanel,
    OutsideClick,

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    /// Raw keystroke state of the search box; debounced before it
    /// reaches the controller.
    SearchInput(String),
    /// Debounce window elapsed; apply the term.
    SearchCommitted(String),

    // ── Filter / sort / area panels ───────────────────────────────
    ApplySortOption(String),
    SelectArea(String),
    AreaBack,
    SetOccurrenceMax(u32),
    SetDateRange(Option<(chrono::NaiveDate, chrono::NaiveDate)>),
    /// Step the level criterion: all → level1 → … → level4 → all.
    CycleLevelFilter,
    /// Step the urgency criterion: all → critical → important → normal → all.
    CycleUrgencyFilter,
    ResetFilters,

    // ── Per-alert operations ──────────────────────────────────────
    ViewAlert(u32),
    HandleAlert(u32),

    // ── Controller output (via the bridge renderer) ───────────────
    ListUpdated(Vec<AlertRecord>),
    CountsUpdated(StatusCounts),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}

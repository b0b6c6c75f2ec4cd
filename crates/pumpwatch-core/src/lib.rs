//! Business logic for the pump-station alert dashboard.
//!
//! This crate owns the domain model and the full alert-list pipeline;
//! frontends (currently the TUI in `pumpwatch-tui`) stay thin over it:
//!
//! - **[`AlertStore`]** — canonical record set for the session. Pure
//!   reads: [`get_all()`](AlertStore::get_all),
//!   [`get_by_id()`](AlertStore::get_by_id),
//!   [`counts()`](AlertStore::counts), plus draft validation for
//!   untyped input.
//!
//! - **[`FilterSortEngine`]** — session filter/sort criteria mutated
//!   through validated patches, and a pure
//!   [`apply()`](FilterSortEngine::apply) pass producing the visible
//!   list.
//!
//! - **[`AlertListController`]** — facade wiring store, engine, and an
//!   injected [`Renderer`] together. Owns the tab/panel/drill-down
//!   session state; every visible change flows through the renderer,
//!   and recoverable errors surface as toasts instead of bubbling up.
//!
//! - **Domain model** ([`model`]) — the [`AlertRecord`] and its closed
//!   enum vocabulary, plus the static [`AreaHierarchy`].

pub mod controller;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use controller::{
    AlertListController, AlertTab, ControllerBuilder, MessageKind, Panel, Renderer,
    NARROW_BREAKPOINT,
};
pub use engine::{
    FilterCriteria, FilterPatch, FilterSortEngine, SortCriteria, SortDirection, SortField,
    SortPatch, AREA_ALL, OCCURRENCE_MAX, OCCURRENCE_MIN,
};
pub use error::CoreError;
pub use store::{AlertStore, StatusCounts};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AlertKind, AlertLevel, AlertRecord, AlertStatus, AreaHierarchy, AreaNode, Occurrence,
    Severity, Urgency, ROOT_AREA,
};

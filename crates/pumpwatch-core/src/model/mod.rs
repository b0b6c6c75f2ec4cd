//! Canonical domain types for the alert pipeline.

pub mod alert;
pub mod area;

pub use alert::{
    AlertKind, AlertLevel, AlertRecord, AlertStatus, Occurrence, Severity, Urgency,
};
pub use area::{AreaHierarchy, AreaNode, ROOT_AREA};

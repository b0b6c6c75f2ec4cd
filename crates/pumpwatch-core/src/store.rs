// ── Alert store ──
//
// Owns the canonical record set for the page session. All reads are
// pure; the set is fixed at construction (mock dataset in this scope).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::error::CoreError;
use crate::model::{AlertLevel, AlertRecord, AlertStatus, AreaHierarchy};

/// Record counts grouped by handling status. `all` is the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub all: usize,
    pub unhandled: usize,
    pub processing: usize,
    pub handled: usize,
}

/// In-memory store for the alert list.
#[derive(Debug, Clone)]
pub struct AlertStore {
    records: Vec<AlertRecord>,
    hierarchy: AreaHierarchy,
}

impl AlertStore {
    /// Build a store over an explicit record set (insertion order kept).
    pub fn new(records: Vec<AlertRecord>) -> Self {
        Self {
            records,
            hierarchy: AreaHierarchy::new(),
        }
    }

    /// The shipped mock dataset: six pump-station faults, three unhandled,
    /// one processing, two handled.
    pub fn with_mock_data() -> Self {
        Self::new(mock_records())
    }

    /// Defensive copy of all records, in insertion order.
    pub fn get_all(&self) -> Vec<AlertRecord> {
        self.records.clone()
    }

    /// Look up one record by id.
    ///
    /// `InvalidArgument` for a non-positive id, `NotFound` when no record
    /// carries it.
    pub fn get_by_id(&self, id: u32) -> Result<AlertRecord, CoreError> {
        if id == 0 {
            return Err(CoreError::invalid_argument("alert id must be positive"));
        }
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { id })
    }

    /// Counts grouped by status, computed in a single pass.
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            all: self.records.len(),
            ..StatusCounts::default()
        };
        for record in &self.records {
            match record.status {
                AlertStatus::Unhandled => counts.unhandled += 1,
                AlertStatus::Processing => counts.processing += 1,
                AlertStatus::Handled => counts.handled += 1,
            }
        }
        counts
    }

    /// Validate a raw (untyped) alert draft.
    ///
    /// Reports *every* missing required field, then *every* invalid
    /// value (bad enum strings, an `updatedAt` earlier than `createdAt`)
    /// in one `Validation` error, so a caller can fix the draft in a
    /// single round. An unknown area code is logged as a warning but
    /// does not fail validation.
    pub fn validate(&self, raw: &serde_json::Value) -> Result<(), CoreError> {
        const REQUIRED: [&str; 8] = [
            "id",
            "title",
            "type",
            "description",
            "time",
            "status",
            "level",
            "urgency",
        ];

        let missing: Vec<&str> = REQUIRED
            .iter()
            .filter(|field| raw.get(**field).is_none())
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::validation(format!(
                "alert draft missing required fields: {}",
                missing.join(", ")
            )));
        }

        let mut invalid = Vec::new();
        if let Some(status) = raw.get("status").and_then(serde_json::Value::as_str) {
            if AlertStatus::from_str(status).is_err() {
                invalid.push(format!("status `{status}`"));
            }
        }
        if let Some(level) = raw.get("level").and_then(serde_json::Value::as_str) {
            if AlertLevel::from_str(level).is_err() {
                invalid.push(format!("level `{level}`"));
            }
        }
        let created = parse_draft_timestamp(raw, "createdAt");
        let updated = parse_draft_timestamp(raw, "updatedAt");
        if let (Some(created), Some(updated)) = (created, updated) {
            if updated < created {
                invalid.push(format!(
                    "updatedAt `{updated}` earlier than createdAt `{created}`"
                ));
            }
        }
        if !invalid.is_empty() {
            return Err(CoreError::validation(format!(
                "alert draft has invalid values: {}",
                invalid.join(", ")
            )));
        }

        if let Some(area) = raw.get("area").and_then(serde_json::Value::as_str) {
            if !self.hierarchy.is_registered(area) {
                warn!(area, "unknown area code on alert draft");
            }
        }

        Ok(())
    }
}

/// Optional timestamp field on a draft, in the same ISO form the
/// records serialize to. An unparseable value reads as absent.
fn parse_draft_timestamp(raw: &serde_json::Value, field: &str) -> Option<NaiveDateTime> {
    raw.get(field)
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok())
}

fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("static mock timestamp is valid")
}

/// The fixed dataset the dashboard ships with.
#[allow(clippy::too_many_lines)]
fn mock_records() -> Vec<AlertRecord> {
    use crate::model::{AlertKind, Occurrence, Severity, Urgency};

    vec![
        AlertRecord {
            id: 1,
            title: "Pump Station No. 2 pressure anomaly".into(),
            kind: AlertKind::Warning,
            description: "Outlet pressure above 5.5 MPa threshold, currently 5.8 MPa".into(),
            severity: Severity::Warning,
            area: "area1".into(),
            status: AlertStatus::Unhandled,
            level: AlertLevel::Level2,
            urgency: Urgency::Important,
            occurrence: Occurrence::Repeated,
            station: "Pump Station No. 2".into(),
            created_at: ts(2023, 6, 15, 14, 32),
            updated_at: ts(2023, 6, 15, 14, 32),
            assignee: "Zhang San".into(),
        },
        AlertRecord {
            id: 2,
            title: "Pump Station No. 3 fault shutdown".into(),
            kind: AlertKind::Emergency,
            description: "Motor overload protection tripped, unit stopped automatically".into(),
            severity: Severity::Danger,
            area: "area2".into(),
            status: AlertStatus::Handled,
            level: AlertLevel::Level1,
            urgency: Urgency::Critical,
            occurrence: Occurrence::Single,
            station: "Pump Station No. 3".into(),
            created_at: ts(2023, 6, 15, 10, 15),
            updated_at: ts(2023, 6, 15, 12, 30),
            assignee: "Li Si".into(),
        },
        AlertRecord {
            id: 3,
            title: "Pump Station No. 1 water level high".into(),
            kind: AlertKind::Warning,
            description: "Sump water level above the safety line, currently 2.8 m".into(),
            severity: Severity::Warning,
            area: "area1".into(),
            status: AlertStatus::Unhandled,
            level: AlertLevel::Level2,
            urgency: Urgency::Important,
            occurrence: Occurrence::Repeated,
            station: "Pump Station No. 1".into(),
            created_at: ts(2023, 6, 15, 9, 20),
            updated_at: ts(2023, 6, 15, 9, 20),
            assignee: "Wang Wu".into(),
        },
        AlertRecord {
            id: 4,
            title: "Pump Station No. 4 motor overheating".into(),
            kind: AlertKind::Emergency,
            description: "Motor temperature reached 85 C, above the safe threshold".into(),
            severity: Severity::Danger,
            area: "area3".into(),
            status: AlertStatus::Unhandled,
            level: AlertLevel::Level1,
            urgency: Urgency::Critical,
            occurrence: Occurrence::Repeated,
            station: "Pump Station No. 4".into(),
            created_at: ts(2023, 6, 14, 16, 45),
            updated_at: ts(2023, 6, 14, 16, 45),
            assignee: "Zhao Liu".into(),
        },
        AlertRecord {
            id: 5,
            title: "Pump Station No. 5 flow anomaly".into(),
            kind: AlertKind::General,
            description: "Instantaneous flow outside the normal range by more than 10%".into(),
            severity: Severity::Info,
            area: "area2".into(),
            status: AlertStatus::Handled,
            level: AlertLevel::Level4,
            urgency: Urgency::Normal,
            occurrence: Occurrence::Single,
            station: "Pump Station No. 5".into(),
            created_at: ts(2023, 6, 14, 14, 10),
            updated_at: ts(2023, 6, 14, 15, 20),
            assignee: "Qian Qi".into(),
        },
        AlertRecord {
            id: 6,
            title: "Pump Station No. 6 scheduled maintenance".into(),
            kind: AlertKind::General,
            description: "Routine maintenance inspection in progress".into(),
            severity: Severity::Info,
            area: "area3".into(),
            status: AlertStatus::Processing,
            level: AlertLevel::Level4,
            urgency: Urgency::Normal,
            occurrence: Occurrence::Repeated,
            station: "Pump Station No. 6".into(),
            created_at: ts(2023, 6, 16, 9, 0),
            updated_at: ts(2023, 6, 16, 9, 0),
            assignee: "Sun Ba".into(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_group_by_status_in_one_pass() {
        let store = AlertStore::with_mock_data();
        assert_eq!(
            store.counts(),
            StatusCounts {
                all: 6,
                unhandled: 3,
                processing: 1,
                handled: 2,
            }
        );
    }

    #[test]
    fn get_all_is_a_defensive_copy_in_insertion_order() {
        let store = AlertStore::with_mock_data();
        let mut copy = store.get_all();
        let ids: Vec<u32> = copy.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        // Mutating the copy must not affect later reads.
        copy.clear();
        assert_eq!(store.get_all().len(), 6);
    }

    #[test]
    fn get_by_id_finds_records() {
        let store = AlertStore::with_mock_data();
        let record = store.get_by_id(4).unwrap();
        assert_eq!(record.station, "Pump Station No. 4");
    }

    #[test]
    fn get_by_id_rejects_zero() {
        let store = AlertStore::with_mock_data();
        assert!(matches!(
            store.get_by_id(0),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn get_by_id_signals_not_found() {
        let store = AlertStore::with_mock_data();
        assert!(matches!(
            store.get_by_id(999),
            Err(CoreError::NotFound { id: 999 })
        ));
    }

    #[test]
    fn validate_lists_every_missing_field() {
        let store = AlertStore::with_mock_data();
        let draft = json!({ "id": 7, "title": "x", "status": "unhandled" });
        let err = store.validate(&draft).unwrap_err();
        let msg = err.to_string();
        for field in ["type", "description", "time", "level", "urgency"] {
            assert!(msg.contains(field), "missing `{field}` not reported: {msg}");
        }
    }

    #[test]
    fn validate_lists_every_invalid_enum_value() {
        let store = AlertStore::with_mock_data();
        let draft = json!({
            "id": 7, "title": "x", "type": "warning", "description": "d",
            "time": "2023-06-15 14:32", "status": "wat", "level": "level9",
            "urgency": "important"
        });
        let err = store.validate(&draft).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("status `wat`"));
        assert!(msg.contains("level `level9`"));
    }

    #[test]
    fn validate_rejects_update_before_creation() {
        let store = AlertStore::with_mock_data();
        let draft = json!({
            "id": 7, "title": "x", "type": "warning", "description": "d",
            "time": "2023-06-15 14:32", "status": "unhandled", "level": "level3",
            "urgency": "normal",
            "createdAt": "2023-06-15T14:32:00",
            "updatedAt": "2023-06-15T09:00:00"
        });
        let err = store.validate(&draft).unwrap_err();
        assert!(err.to_string().contains("earlier than createdAt"));
    }

    #[test]
    fn mock_records_never_update_before_creation() {
        for record in AlertStore::with_mock_data().get_all() {
            assert!(
                record.updated_at >= record.created_at,
                "alert {} updated before it was created",
                record.id
            );
        }
    }

    #[test]
    fn validate_accepts_complete_draft_with_unknown_area() {
        let store = AlertStore::with_mock_data();
        // Unknown area is a warning, not an error.
        let draft = json!({
            "id": 7, "title": "x", "type": "warning", "description": "d",
            "time": "2023-06-15 14:32", "status": "unhandled", "level": "level3",
            "urgency": "normal", "area": "area99"
        });
        assert!(store.validate(&draft).is_ok());
    }
}

// ── Alert domain types ──
//
// The alert record and its closed enum vocabulary. Rank and weight
// mappings live here as pure functions so filtering and sorting never
// touch string tables.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Handling state of an alert. Mutated only by handling actions, which
/// are outside this crate's scope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertStatus {
    Unhandled,
    Processing,
    Handled,
}

/// Severity rank, `Level1` highest. Raw values outside `level1..level4`
/// are rejected at validation time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertLevel {
    Level1,
    Level2,
    Level3,
    Level4,
}

impl AlertLevel {
    /// Numeric rank: 1 (highest priority) through 4.
    pub fn rank(self) -> u8 {
        match self {
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
            Self::Level4 => 4,
        }
    }
}

/// Business-priority tier, independent of [`AlertLevel`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Urgency {
    Critical,
    Important,
    Normal,
}

impl Urgency {
    /// Sort rank: critical(3) > important(2) > normal(1).
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::Important => 2,
            Self::Normal => 1,
        }
    }
}

/// Display severity used for badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// Classification label shown next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Emergency,
    General,
}

/// Categorical repeat-count indicator, carried as a numeric weight for
/// filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Occurrence {
    Repeated,
    Single,
}

impl Occurrence {
    /// Numeric proxy for the categorical label: repeated = 5, single = 1.
    pub fn weight(self) -> u32 {
        match self {
            Self::Repeated => 5,
            Self::Single => 1,
        }
    }
}

/// One monitored fault/event entry. Immutable after creation within the
/// alert-list pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    /// Unique positive identifier. Zero is never issued.
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub description: String,
    pub severity: Severity,
    /// Hierarchical location code (`areaN` district or `siteN` station).
    pub area: String,
    pub status: AlertStatus,
    pub level: AlertLevel,
    pub urgency: Urgency,
    pub occurrence: Occurrence,
    pub station: String,
    pub created_at: NaiveDateTime,
    /// Always `>= created_at`; bumped when the alert is handled.
    pub updated_at: NaiveDateTime,
    pub assignee: String,
}

impl AlertRecord {
    /// Occurrence weight shortcut used by the filter and sort paths.
    pub fn occurrence_weight(&self) -> u32 {
        self.occurrence.weight()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn level_ranks_are_ordered() {
        assert_eq!(AlertLevel::Level1.rank(), 1);
        assert_eq!(AlertLevel::Level4.rank(), 4);
        assert!(AlertLevel::Level1.rank() < AlertLevel::Level2.rank());
    }

    #[test]
    fn urgency_ranks_critical_highest() {
        assert!(Urgency::Critical.rank() > Urgency::Important.rank());
        assert!(Urgency::Important.rank() > Urgency::Normal.rank());
    }

    #[test]
    fn occurrence_weights() {
        assert_eq!(Occurrence::Repeated.weight(), 5);
        assert_eq!(Occurrence::Single.weight(), 1);
    }

    #[test]
    fn status_parses_lowercase() {
        assert_eq!(
            AlertStatus::from_str("processing").unwrap(),
            AlertStatus::Processing
        );
        assert!(AlertStatus::from_str("bogus").is_err());
    }

    #[test]
    fn record_roundtrips_through_json() {
        let json = serde_json::json!({
            "id": 1,
            "title": "Pressure anomaly",
            "type": "warning",
            "description": "Outlet pressure above threshold",
            "severity": "warning",
            "area": "area1",
            "status": "unhandled",
            "level": "level2",
            "urgency": "important",
            "occurrence": "repeated",
            "station": "Pump Station No. 2",
            "createdAt": "2023-06-15T14:32:00",
            "updatedAt": "2023-06-15T14:32:00",
            "assignee": "Zhang San"
        });
        let record: AlertRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.level, AlertLevel::Level2);
        assert_eq!(record.occurrence_weight(), 5);
    }
}

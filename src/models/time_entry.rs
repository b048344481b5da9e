//! Time entry model and related types.
//!
//! A time entry records the hours a user logged for one work type on one
//! date, together with the weighted-hours value derived under the
//! statutory work-type rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state shared by soft-deletable records.
///
/// Deleted records stay in the store but are excluded from every query and
/// aggregate by the store layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// The record is live.
    Active,
    /// The record was soft-deleted.
    Deleted,
}

/// Input for recording a new time entry.
///
/// Plain data only; identifiers and derived values are filled in by the
/// recorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTimeEntry {
    /// The user logging the hours.
    pub user_id: String,
    /// The date the work was performed.
    pub work_date: NaiveDate,
    /// The work type code from the catalog.
    pub work_type: String,
    /// Hours worked; must be a positive multiple of 0.5.
    pub hours: Decimal,
    /// Optional client the hours are billed against.
    #[serde(default)]
    pub client_code: Option<String>,
    /// Optional service/engagement the hours belong to.
    #[serde(default)]
    pub service_code: Option<String>,
}

/// A persisted time entry.
///
/// One row per submission; `weighted_hours` is derived at record time and
/// stored with the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The user who logged the hours.
    pub user_id: String,
    /// The date the work was performed.
    pub work_date: NaiveDate,
    /// The work type code from the catalog.
    pub work_type: String,
    /// Hours as submitted.
    pub hours: Decimal,
    /// Hours after the work-type weighting rule was applied.
    pub weighted_hours: Decimal,
    /// Optional client the hours are billed against.
    pub client_code: Option<String>,
    /// Optional service/engagement the hours belong to.
    pub service_code: Option<String>,
    /// Lifecycle state.
    pub status: RecordStatus,
}

impl TimeEntry {
    /// Returns true if the entry has not been soft-deleted.
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_entry(status: RecordStatus) -> TimeEntry {
        TimeEntry {
            id: Uuid::new_v4(),
            user_id: "u_001".to_string(),
            work_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            work_type: "regular".to_string(),
            hours: Decimal::from_str("8").unwrap(),
            weighted_hours: Decimal::from_str("8").unwrap(),
            client_code: None,
            service_code: None,
            status,
        }
    }

    #[test]
    fn test_is_active() {
        assert!(make_entry(RecordStatus::Active).is_active());
        assert!(!make_entry(RecordStatus::Deleted).is_active());
    }

    #[test]
    fn test_entry_serialization_round_trip() {
        let entry = make_entry(RecordStatus::Active);
        let json = serde_json::to_string(&entry).unwrap();
        let back: TimeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }

    #[test]
    fn test_new_entry_deserialization_defaults_linkage() {
        let json = r#"{
            "user_id": "u_001",
            "work_date": "2026-03-02",
            "work_type": "weekday_overtime",
            "hours": "2.0"
        }"#;
        let entry: NewTimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.work_type, "weekday_overtime");
        assert!(entry.client_code.is_none());
        assert!(entry.service_code.is_none());
    }
}

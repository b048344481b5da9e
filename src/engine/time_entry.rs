//! The time-entry recorder component.
//!
//! Validates a submission against the work-type rules and the statutory
//! calendar, stores the weighted entry, and triggers the compensatory
//! accrual and notification side effects.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculation::{STATUTORY_DAILY_FLOOR, comp_leave_hours, weighted_hours};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{NewTimeEntry, RecordStatus, TimeEntry};
use crate::store::{HolidayCalendar, NotificationSink, TimeEntryStore};

use super::comp_ledger::CompensatoryLeaveLedger;

const HALF_HOUR: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Records validated, weighted time entries.
#[derive(Clone)]
pub struct TimeEntryRecorder {
    config: Arc<EngineConfig>,
    entries: Arc<TimeEntryStore>,
    ledger: CompensatoryLeaveLedger,
    calendar: Arc<dyn HolidayCalendar>,
    notifications: Arc<dyn NotificationSink>,
}

impl TimeEntryRecorder {
    /// Creates a recorder over the given store and collaborators.
    pub fn new(
        config: Arc<EngineConfig>,
        entries: Arc<TimeEntryStore>,
        ledger: CompensatoryLeaveLedger,
        calendar: Arc<dyn HolidayCalendar>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            config,
            entries,
            ledger,
            calendar,
            notifications,
        }
    }

    /// Validates and persists one time entry.
    ///
    /// Validation order: work-type lookup, hours precision, daily cap,
    /// makeup-workday restriction, within-eight-hours limit. On success
    /// the entry is stored with its derived weighted hours; a qualifying
    /// overtime entry also accrues compensatory leave, and any pending
    /// missing-timesheet notification for the day is dismissed
    /// best-effort.
    pub fn record(&self, new_entry: NewTimeEntry) -> EngineResult<TimeEntry> {
        let work_type = self.config.work_type(&new_entry.work_type)?;

        if new_entry.hours <= Decimal::ZERO || new_entry.hours % HALF_HOUR != Decimal::ZERO {
            return Err(EngineError::HoursPrecision {
                hours: new_entry.hours,
            });
        }

        let cap = self.config.settings().daily_work_hours_limit;
        let logged = self
            .entries
            .total_hours_on(&new_entry.user_id, new_entry.work_date);
        if logged + new_entry.hours > cap {
            return Err(EngineError::DailyCapExceeded {
                date: new_entry.work_date,
                logged,
                requested: new_entry.hours,
                cap,
            });
        }

        if work_type.category.is_rest_day()
            && self.calendar.is_makeup_workday(new_entry.work_date)
        {
            return Err(EngineError::InvalidWorkTypeForContext {
                work_type: new_entry.work_type.clone(),
                date: new_entry.work_date,
                message: "rest-day work types are not allowed on a makeup workday".to_string(),
            });
        }

        if work_type.category.has_statutory_floor() && new_entry.hours > STATUTORY_DAILY_FLOOR {
            return Err(EngineError::InvalidWorkTypeForContext {
                work_type: new_entry.work_type.clone(),
                date: new_entry.work_date,
                message: format!(
                    "at most 8 hours may be logged under this type; log the excess {} hours under the beyond-eight type",
                    new_entry.hours - STATUTORY_DAILY_FLOOR
                ),
            });
        }

        let entry = TimeEntry {
            id: Uuid::new_v4(),
            user_id: new_entry.user_id,
            work_date: new_entry.work_date,
            work_type: new_entry.work_type,
            hours: new_entry.hours,
            weighted_hours: weighted_hours(work_type, new_entry.hours),
            client_code: new_entry.client_code,
            service_code: new_entry.service_code,
            status: RecordStatus::Active,
        };
        self.entries.insert(entry.clone());
        debug!(
            user_id = %entry.user_id,
            work_date = %entry.work_date,
            work_type = %entry.work_type,
            weighted = %entry.weighted_hours,
            "recorded time entry"
        );

        if work_type.is_overtime && work_type.generates_comp_leave {
            self.ledger.accrue(
                &entry.user_id,
                comp_leave_hours(work_type, entry.hours),
                entry.work_date,
                Some(entry.id),
            )?;
        }

        // Best-effort: a failure here must never fail the recording.
        self.notifications
            .dismiss_missing_timesheet(&entry.user_id, entry.work_date);

        Ok(entry)
    }

    /// Soft-deletes an entry.
    pub fn remove(&self, entry_id: Uuid) -> EngineResult<()> {
        self.entries.mark_deleted(entry_id)?;
        warn!(%entry_id, "time entry soft-deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::store::{CompLeaveStore, RecordingNotificationStore, StaticHolidayCalendar};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    struct Fixture {
        recorder: TimeEntryRecorder,
        ledger: CompensatoryLeaveLedger,
        notifications: Arc<RecordingNotificationStore>,
    }

    fn make_fixture() -> Fixture {
        let config = Arc::new(
            ConfigLoader::load("./config/engine")
                .expect("Failed to load config")
                .into_config(),
        );
        let calendar = Arc::new(StaticHolidayCalendar::from_config(config.calendar()));
        let notifications = Arc::new(RecordingNotificationStore::new());
        let ledger =
            CompensatoryLeaveLedger::new(Arc::clone(&config), Arc::new(CompLeaveStore::new()));
        let recorder = TimeEntryRecorder::new(
            Arc::clone(&config),
            Arc::new(TimeEntryStore::new()),
            ledger.clone(),
            calendar,
            Arc::clone(&notifications) as Arc<dyn NotificationSink>,
        );
        Fixture {
            recorder,
            ledger,
            notifications,
        }
    }

    fn make_entry(work_date: &str, work_type: &str, hours: &str) -> NewTimeEntry {
        NewTimeEntry {
            user_id: "u_001".to_string(),
            work_date: date(work_date),
            work_type: work_type.to_string(),
            hours: dec(hours),
            client_code: None,
            service_code: None,
        }
    }

    // =========================================================================
    // TE-001: regular entry weights at the plain multiplier
    // =========================================================================
    #[test]
    fn test_te_001_regular_entry_recorded() {
        let fixture = make_fixture();
        let entry = fixture
            .recorder
            .record(make_entry("2026-03-02", "regular", "8"))
            .unwrap();
        assert_eq!(entry.weighted_hours, dec("8"));
        assert_eq!(entry.status, RecordStatus::Active);
    }

    // =========================================================================
    // TE-002: hours precision
    // =========================================================================
    #[test]
    fn test_te_002_non_half_hour_multiple_rejected() {
        let fixture = make_fixture();
        let result = fixture
            .recorder
            .record(make_entry("2026-03-02", "regular", "1.3"));
        match result {
            Err(EngineError::HoursPrecision { hours }) => assert_eq!(hours, dec("1.3")),
            other => panic!("Expected HoursPrecision, got {:?}", other),
        }
    }

    #[test]
    fn test_te_003_zero_and_negative_hours_rejected() {
        let fixture = make_fixture();
        assert!(matches!(
            fixture.recorder.record(make_entry("2026-03-02", "regular", "0")),
            Err(EngineError::HoursPrecision { .. })
        ));
        assert!(matches!(
            fixture.recorder.record(make_entry("2026-03-02", "regular", "-2")),
            Err(EngineError::HoursPrecision { .. })
        ));
    }

    // =========================================================================
    // TE-004: daily cap
    // =========================================================================
    #[test]
    fn test_te_004_daily_cap_enforced_cumulatively() {
        let fixture = make_fixture();
        fixture
            .recorder
            .record(make_entry("2026-03-02", "regular", "8"))
            .unwrap();
        fixture
            .recorder
            .record(make_entry("2026-03-02", "weekday_overtime", "2"))
            .unwrap();

        // 10 logged; 3 more would breach the cap of 12.
        let result = fixture
            .recorder
            .record(make_entry("2026-03-02", "weekday_overtime", "3"));
        match result {
            Err(EngineError::DailyCapExceeded { logged, cap, .. }) => {
                assert_eq!(logged, dec("10"));
                assert_eq!(cap, dec("12"));
            }
            other => panic!("Expected DailyCapExceeded, got {:?}", other),
        }

        // 2 more exactly reaches the cap.
        fixture
            .recorder
            .record(make_entry("2026-03-02", "weekday_overtime", "2"))
            .unwrap();
    }

    #[test]
    fn test_te_005_cap_is_per_day() {
        let fixture = make_fixture();
        fixture
            .recorder
            .record(make_entry("2026-03-02", "regular", "8"))
            .unwrap();
        // A different day starts fresh.
        fixture
            .recorder
            .record(make_entry("2026-03-03", "regular", "8"))
            .unwrap();
    }

    // =========================================================================
    // TE-006: makeup workday rejects rest-day types
    // =========================================================================
    #[test]
    fn test_te_006_makeup_day_rejects_rest_day_types() {
        let fixture = make_fixture();
        // 2026-02-07 is a makeup workday in the shipped calendar.
        let result = fixture
            .recorder
            .record(make_entry("2026-02-07", "rest_day_within_8", "4"));
        assert!(matches!(
            result,
            Err(EngineError::InvalidWorkTypeForContext { .. })
        ));

        // Regular and weekday-overtime types are fine on a makeup day.
        fixture
            .recorder
            .record(make_entry("2026-02-07", "regular", "8"))
            .unwrap();
        fixture
            .recorder
            .record(make_entry("2026-02-07", "weekday_overtime", "2"))
            .unwrap();
    }

    // =========================================================================
    // TE-007: within-eight types cap at eight hours
    // =========================================================================
    #[test]
    fn test_te_007_within_eight_rejects_overflow() {
        let fixture = make_fixture();
        let result = fixture
            .recorder
            .record(make_entry("2026-05-01", "holiday_within_8", "9"));
        assert!(matches!(
            result,
            Err(EngineError::InvalidWorkTypeForContext { .. })
        ));
    }

    // =========================================================================
    // TE-008: statutory floor weighting
    // =========================================================================
    #[test]
    fn test_te_008_statutory_floor_weighting() {
        let fixture = make_fixture();
        let entry = fixture
            .recorder
            .record(make_entry("2026-05-01", "holiday_within_8", "3"))
            .unwrap();
        assert_eq!(entry.hours, dec("3"));
        assert_eq!(entry.weighted_hours, dec("8"));
    }

    // =========================================================================
    // TE-009: comp leave accrual side effect
    // =========================================================================
    #[test]
    fn test_te_009_overtime_accrues_actual_hours() {
        let fixture = make_fixture();
        fixture
            .recorder
            .record(make_entry("2026-03-02", "weekday_overtime", "2"))
            .unwrap();
        assert_eq!(fixture.ledger.balance("u_001", date("2026-03-02")), dec("2"));
    }

    #[test]
    fn test_te_010_within_eight_accrues_full_floor() {
        let fixture = make_fixture();
        fixture
            .recorder
            .record(make_entry("2026-05-01", "holiday_within_8", "3"))
            .unwrap();
        assert_eq!(fixture.ledger.balance("u_001", date("2026-05-01")), dec("8"));
    }

    #[test]
    fn test_te_011_regular_entry_accrues_nothing() {
        let fixture = make_fixture();
        fixture
            .recorder
            .record(make_entry("2026-03-02", "regular", "8"))
            .unwrap();
        assert_eq!(
            fixture.ledger.balance("u_001", date("2026-03-02")),
            Decimal::ZERO
        );
    }

    // =========================================================================
    // TE-012: notification dismissal side effect
    // =========================================================================
    #[test]
    fn test_te_012_notification_dismissed_on_record() {
        let fixture = make_fixture();
        fixture
            .recorder
            .record(make_entry("2026-03-02", "regular", "8"))
            .unwrap();
        assert_eq!(
            fixture.notifications.dismissed(),
            vec![("u_001".to_string(), date("2026-03-02"))]
        );
    }

    #[test]
    fn test_te_013_unknown_work_type_rejected() {
        let fixture = make_fixture();
        let result = fixture
            .recorder
            .record(make_entry("2026-03-02", "unknown", "8"));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
        // Nothing was dismissed for a failed submission.
        assert!(fixture.notifications.dismissed().is_empty());
    }

    #[test]
    fn test_te_014_removed_entry_frees_daily_cap() {
        let fixture = make_fixture();
        let entry = fixture
            .recorder
            .record(make_entry("2026-03-02", "regular", "8"))
            .unwrap();
        fixture.recorder.remove(entry.id).unwrap();
        // The full cap is available again.
        fixture
            .recorder
            .record(make_entry("2026-03-02", "regular", "12"))
            .unwrap();
    }
}

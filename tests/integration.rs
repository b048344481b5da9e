//! Comprehensive integration tests for the Time & Compensation Ledger
//! Engine.
//!
//! This test suite drives the assembled engine end-to-end against the
//! shipped configuration, covering:
//! - Weighted-hours rules including the statutory eight-hour floor
//! - Daily cap and precision validation
//! - FIFO compensatory accrual, consumption, expiry, and conversion
//! - Leave intake rules (gender, overlap, menstrual overflow)
//! - Per-type balances with carryover
//! - Monthly payroll with tiered overtime and the attendance bonus

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use comp_engine::calculation::overtime_multiplier;
use comp_engine::config::ConfigLoader;
use comp_engine::engine::{EngineStores, LedgerEngine};
use comp_engine::error::EngineError;
use comp_engine::models::{
    Employee, EmployeeSalaryItem, Gender, GrantStatus, NewLeaveApplication, NewTimeEntry,
    OvertimeCategory,
};
use comp_engine::store::{
    EmployeeDirectory, InMemoryDirectory, NotificationSink, RecordingNotificationStore,
    StaticHolidayCalendar,
};
use uuid::Uuid;

// =============================================================================
// Test Helpers
// =============================================================================

struct TestEnv {
    engine: LedgerEngine,
    stores: EngineStores,
    notifications: Arc<RecordingNotificationStore>,
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

fn create_test_env() -> TestEnv {
    let config = ConfigLoader::load("./config/engine")
        .expect("Failed to load config")
        .into_config();

    let directory = Arc::new(InMemoryDirectory::new());
    directory.insert(Employee {
        id: "emp_f".to_string(),
        name: "Lin Wei".to_string(),
        gender: Gender::Female,
        hire_date: date("2021-04-01"),
        base_monthly_salary: dec("48000"),
    });
    directory.insert(Employee {
        id: "emp_m".to_string(),
        name: "Chen Hao".to_string(),
        gender: Gender::Male,
        hire_date: date("2019-09-16"),
        base_monthly_salary: dec("52000"),
    });

    let calendar = Arc::new(StaticHolidayCalendar::from_config(config.calendar()));
    let notifications = Arc::new(RecordingNotificationStore::new());
    let stores = EngineStores::in_memory();

    let engine = LedgerEngine::new(
        config,
        stores.clone(),
        calendar,
        Arc::clone(&notifications) as Arc<dyn NotificationSink>,
        directory as Arc<dyn EmployeeDirectory>,
    );

    TestEnv {
        engine,
        stores,
        notifications,
    }
}

fn entry(user: &str, work_date: &str, work_type: &str, hours: &str) -> NewTimeEntry {
    NewTimeEntry {
        user_id: user.to_string(),
        work_date: date(work_date),
        work_type: work_type.to_string(),
        hours: dec(hours),
        client_code: None,
        service_code: None,
    }
}

fn leave(user: &str, leave_type: &str, start: &str, end: &str, days: &str) -> NewLeaveApplication {
    NewLeaveApplication {
        user_id: user.to_string(),
        leave_type: leave_type.to_string(),
        start_date: date(start),
        end_date: date(end),
        days: dec(days),
    }
}

fn salary_item(
    user: &str,
    item_type: &str,
    amount: &str,
    effective: &str,
    expiry: Option<&str>,
) -> EmployeeSalaryItem {
    EmployeeSalaryItem {
        id: Uuid::new_v4(),
        user_id: user.to_string(),
        item_type: item_type.to_string(),
        amount: dec(amount),
        effective_date: date(effective),
        expiry_date: expiry.map(date),
    }
}

// =============================================================================
// Weighted hours and time entry validation
// =============================================================================

#[test]
fn test_weighted_hours_plain_multiplier() {
    let env = create_test_env();

    let recorded = env
        .engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "2"))
        .unwrap();

    assert_eq!(recorded.weighted_hours, dec("2.68"));
}

#[test]
fn test_weighted_hours_statutory_floor_short_day() {
    let env = create_test_env();

    // Three hours on a national holiday still weights as a full eight.
    let recorded = env
        .engine
        .record_time_entry(entry("emp_f", "2026-05-01", "holiday_within_8", "3"))
        .unwrap();

    assert_eq!(recorded.hours, dec("3"));
    assert_eq!(recorded.weighted_hours, dec("8"));
}

#[test]
fn test_weighted_hours_statutory_floor_full_day() {
    let env = create_test_env();

    let recorded = env
        .engine
        .record_time_entry(entry("emp_f", "2026-05-01", "holiday_within_8", "8"))
        .unwrap();

    assert_eq!(recorded.weighted_hours, dec("8"));
}

#[test]
fn test_hours_precision_rejected() {
    let env = create_test_env();

    let result = env
        .engine
        .record_time_entry(entry("emp_f", "2026-03-02", "regular", "1.3"));

    assert!(matches!(result, Err(EngineError::HoursPrecision { .. })));
}

#[test]
fn test_daily_cap_boundary() {
    let env = create_test_env();

    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "regular", "8"))
        .unwrap();
    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "2"))
        .unwrap();

    // 10 logged: 3 more breaches the cap of 12, 2 more reaches it exactly.
    assert!(matches!(
        env.engine
            .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "3")),
        Err(EngineError::DailyCapExceeded { .. })
    ));
    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "2"))
        .unwrap();
}

#[test]
fn test_makeup_workday_rejects_rest_day_type() {
    let env = create_test_env();

    let result = env
        .engine
        .record_time_entry(entry("emp_f", "2026-02-07", "rest_day_within_8", "4"));

    assert!(matches!(
        result,
        Err(EngineError::InvalidWorkTypeForContext { .. })
    ));
}

#[test]
fn test_within_eight_type_rejects_overflow_hours() {
    let env = create_test_env();

    let result = env
        .engine
        .record_time_entry(entry("emp_f", "2026-05-01", "holiday_within_8", "8.5"));

    assert!(matches!(
        result,
        Err(EngineError::InvalidWorkTypeForContext { .. })
    ));
}

#[test]
fn test_recording_dismisses_missing_timesheet_notification() {
    let env = create_test_env();

    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "regular", "8"))
        .unwrap();

    assert_eq!(
        env.notifications.dismissed(),
        vec![("emp_f".to_string(), date("2026-03-02"))]
    );
}

// =============================================================================
// Compensatory leave ledger
// =============================================================================

#[test]
fn test_overtime_entry_accrues_comp_leave() {
    let env = create_test_env();

    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "2"))
        .unwrap();

    assert_eq!(
        env.engine.compensatory_balance("emp_f", date("2026-03-02")),
        dec("2")
    );
}

#[test]
fn test_holiday_floor_accrues_eight_comp_hours() {
    let env = create_test_env();

    env.engine
        .record_time_entry(entry("emp_f", "2026-05-01", "holiday_within_8", "3"))
        .unwrap();

    assert_eq!(
        env.engine.compensatory_balance("emp_f", date("2026-05-01")),
        dec("8")
    );
}

#[test]
fn test_fifo_consumption_drains_oldest_first() {
    let env = create_test_env();

    // Day 1 earns 2 hours, day 2 earns 5.
    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "2"))
        .unwrap();
    env.engine
        .record_time_entry(entry("emp_f", "2026-03-03", "weekday_overtime", "5"))
        .unwrap();

    let breakdown = env
        .engine
        .consume_compensatory_leave("emp_f", dec("3"), date("2026-03-10"), None)
        .unwrap();

    assert_eq!(breakdown.usages.len(), 2);
    assert_eq!(breakdown.usages[0].hours_used, dec("2"));
    assert_eq!(breakdown.usages[1].hours_used, dec("1"));

    // The day-1 grant is fully drained and flagged used.
    let first_grant = env.stores.comp_leave.grant(breakdown.usages[0].grant_id).unwrap();
    assert_eq!(first_grant.status, GrantStatus::Used);
    assert_eq!(first_grant.hours_remaining, Decimal::ZERO);

    assert_eq!(
        env.engine.compensatory_balance("emp_f", date("2026-03-10")),
        dec("4")
    );
}

#[test]
fn test_over_consumption_fails_atomically() {
    let env = create_test_env();

    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "2"))
        .unwrap();
    env.engine
        .record_time_entry(entry("emp_f", "2026-03-03", "weekday_overtime", "5"))
        .unwrap();

    let result =
        env.engine
            .consume_compensatory_leave("emp_f", dec("8"), date("2026-03-10"), None);

    assert!(matches!(
        result,
        Err(EngineError::InsufficientCompensatoryLeave { .. })
    ));
    // No grant lost any hours.
    assert_eq!(
        env.engine.compensatory_balance("emp_f", date("2026-03-10")),
        dec("7")
    );
}

#[test]
fn test_expired_grants_excluded_before_sweep() {
    let env = create_test_env();

    // Under the 3_months rule a March grant expires 2026-06-30.
    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "4"))
        .unwrap();

    assert_eq!(
        env.engine.compensatory_balance("emp_f", date("2026-06-30")),
        dec("4")
    );
    // Past expiry the hours are gone even though no sweep ran.
    assert_eq!(
        env.engine.compensatory_balance("emp_f", date("2026-07-01")),
        Decimal::ZERO
    );
}

#[test]
fn test_sweep_flags_expired_grants() {
    let env = create_test_env();

    env.engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "4"))
        .unwrap();

    assert_eq!(
        env.engine
            .sweep_expired_compensatory_leave(date("2026-07-01"))
            .unwrap(),
        1
    );
    // Idempotent: nothing left on the second run.
    assert_eq!(
        env.engine
            .sweep_expired_compensatory_leave(date("2026-07-01"))
            .unwrap(),
        0
    );
}

#[test]
fn test_conversion_to_payment() {
    let env = create_test_env();

    let recorded = env
        .engine
        .record_time_entry(entry("emp_f", "2026-03-02", "weekday_overtime", "4"))
        .unwrap();
    let snapshot = env.stores.comp_leave.snapshot("emp_f");
    let grant = snapshot
        .grants
        .iter()
        .find(|g| g.source_entry_id == Some(recorded.id))
        .unwrap();

    let payment = env
        .engine
        .convert_compensatory_leave_to_payment("emp_f", &[grant.id], dec("200"))
        .unwrap();

    assert_eq!(payment, dec("800"));
    assert_eq!(
        env.stores.comp_leave.grant(grant.id).unwrap().status,
        GrantStatus::Converted
    );
    assert_eq!(
        env.engine.compensatory_balance("emp_f", date("2026-03-10")),
        Decimal::ZERO
    );
}

// =============================================================================
// Leave intake and balances
// =============================================================================

#[test]
fn test_gender_restricted_leave_rejected() {
    let env = create_test_env();

    let result = env
        .engine
        .apply_leave(leave("emp_m", "menstrual", "2026-03-03", "2026-03-03", "1"));
    assert!(matches!(
        result,
        Err(EngineError::GenderRestriction { .. })
    ));

    let result = env
        .engine
        .apply_leave(leave("emp_f", "paternity", "2026-03-03", "2026-03-05", "3"));
    assert!(matches!(
        result,
        Err(EngineError::GenderRestriction { .. })
    ));
}

#[test]
fn test_overlapping_leave_rejected() {
    let env = create_test_env();

    env.engine
        .apply_leave(leave("emp_f", "annual", "2026-01-05", "2026-01-10", "4"))
        .unwrap();

    let result = env
        .engine
        .apply_leave(leave("emp_f", "annual", "2026-01-08", "2026-01-12", "3"));

    assert!(matches!(result, Err(EngineError::LeaveOverlap { .. })));
}

#[test]
fn test_menstrual_overflow_charges_sick_quota() {
    let env = create_test_env();

    for (start, end) in [
        ("2026-01-06", "2026-01-06"),
        ("2026-02-03", "2026-02-03"),
        ("2026-03-03", "2026-03-03"),
    ] {
        let app = env
            .engine
            .apply_leave(leave("emp_f", "menstrual", start, end, "1"))
            .unwrap();
        assert!(!app.counts_as_sick_leave);
    }

    let fourth = env
        .engine
        .apply_leave(leave("emp_f", "menstrual", "2026-04-07", "2026-04-07", "1"))
        .unwrap();
    assert!(fourth.counts_as_sick_leave);

    let report = env
        .engine
        .get_leave_balance("emp_f", 2026, date("2026-06-01"))
        .unwrap();
    assert_eq!(report.sick.menstrual_overflow_days, dec("1"));
    assert_eq!(report.sick.remaining_days, dec("29"));
    assert_eq!(report.menstrual.used_days, dec("4"));
}

#[test]
fn test_annual_balance_with_and_without_snapshot() {
    let env = create_test_env();

    // No snapshot: carryover degrades to zero.
    let before = env
        .engine
        .get_leave_balance("emp_f", 2026, date("2026-06-01"))
        .unwrap();
    assert_eq!(before.annual.carryover_days, Decimal::ZERO);

    // Use some 2025 annual leave, then run the year-rollover job.
    env.engine
        .apply_leave(leave("emp_f", "annual", "2025-06-02", "2025-06-06", "5"))
        .unwrap();
    env.engine.snapshot_annual_balances(2025).unwrap();

    let after = env
        .engine
        .get_leave_balance("emp_f", 2026, date("2026-06-01"))
        .unwrap();
    // 14 entitled − 5 used in 2025 = 9 carried into 2026.
    assert_eq!(after.annual.carryover_days, dec("9"));
    assert_eq!(
        after.annual.remaining_days,
        after.annual.entitled_days + dec("9") - after.annual.used_days
    );
}

#[test]
fn test_sick_quota_remaining_can_go_negative() {
    let env = create_test_env();

    // Eleven separate three-day sick applications: 33 days used.
    for day in 1..=11 {
        let start = format!("2026-{:02}-{:02}", (day % 9) + 1, day * 2);
        let end = start.clone();
        env.engine
            .apply_leave(leave("emp_m", "sick", &start, &end, "3"))
            .unwrap();
    }

    let report = env
        .engine
        .get_leave_balance("emp_m", 2026, date("2026-12-01"))
        .unwrap();
    assert_eq!(report.sick.direct_days_used, dec("33"));
    assert_eq!(report.sick.remaining_days, dec("-3"));
}

// =============================================================================
// Payroll
// =============================================================================

#[test]
fn test_monthly_payroll_full_aggregation() {
    let env = create_test_env();

    env.stores.salary.insert(salary_item(
        "emp_f",
        "meal_allowance",
        "2400",
        "2026-01-01",
        None,
    ));
    env.stores.salary.insert(salary_item(
        "emp_f",
        "attendance_bonus",
        "2000",
        "2026-01-01",
        None,
    ));
    env.stores.salary.insert(salary_item(
        "emp_f",
        "labor_insurance",
        "1100",
        "2026-01-01",
        None,
    ));

    // Three hours of weekday overtime on one day.
    env.engine
        .record_time_entry(entry("emp_f", "2026-03-04", "weekday_overtime", "3"))
        .unwrap();

    let payroll = env
        .engine
        .calculate_monthly_payroll("emp_f", 2026, 3)
        .unwrap();

    let hourly = dec("48000") / dec("240");
    let overtime = dec("2") * (hourly * overtime_multiplier(OvertimeCategory::WeekdayFirstTwoHours))
        + dec("1") * (hourly * overtime_multiplier(OvertimeCategory::WeekdayBeyondTwoHours));

    assert_eq!(payroll.allowances_total, dec("2400"));
    assert_eq!(payroll.attendance_bonus, dec("2000"));
    assert_eq!(payroll.deductions_total, dec("1100"));
    assert_eq!(payroll.overtime_pay, overtime);
    assert_eq!(
        payroll.gross_pay,
        dec("48000") + dec("2400") + dec("2000") + overtime
    );
    assert_eq!(payroll.net_pay, payroll.gross_pay - dec("1100"));
}

#[test]
fn test_attendance_bonus_forfeited_by_personal_leave() {
    let env = create_test_env();

    env.stores.salary.insert(salary_item(
        "emp_f",
        "attendance_bonus",
        "2000",
        "2026-01-01",
        None,
    ));
    env.engine
        .apply_leave(leave("emp_f", "personal", "2026-03-09", "2026-03-09", "1"))
        .unwrap();

    let payroll = env
        .engine
        .calculate_monthly_payroll("emp_f", 2026, 3)
        .unwrap();
    assert_eq!(payroll.attendance_bonus, Decimal::ZERO);
}

#[test]
fn test_attendance_bonus_survives_comp_and_annual_leave() {
    let env = create_test_env();

    env.stores.salary.insert(salary_item(
        "emp_f",
        "attendance_bonus",
        "2000",
        "2026-01-01",
        None,
    ));
    env.engine
        .apply_leave(leave("emp_f", "annual", "2026-03-16", "2026-03-17", "2"))
        .unwrap();
    env.engine
        .apply_leave(leave("emp_f", "compensatory", "2026-03-23", "2026-03-23", "1"))
        .unwrap();

    let payroll = env
        .engine
        .calculate_monthly_payroll("emp_f", 2026, 3)
        .unwrap();
    assert_eq!(payroll.attendance_bonus, dec("2000"));
}

#[test]
fn test_month_scoped_salary_item_wins() {
    let env = create_test_env();

    env.stores.salary.insert(salary_item(
        "emp_f",
        "meal_allowance",
        "2400",
        "2026-01-01",
        None,
    ));
    env.stores.salary.insert(salary_item(
        "emp_f",
        "meal_allowance",
        "3000",
        "2026-03-01",
        Some("2026-03-31"),
    ));

    let march = env
        .engine
        .calculate_monthly_payroll("emp_f", 2026, 3)
        .unwrap();
    let april = env
        .engine
        .calculate_monthly_payroll("emp_f", 2026, 4)
        .unwrap();

    assert_eq!(march.allowances_total, dec("3000"));
    assert_eq!(april.allowances_total, dec("2400"));
}

#[test]
fn test_payroll_recomputation_idempotent() {
    let env = create_test_env();

    env.stores.salary.insert(salary_item(
        "emp_f",
        "meal_allowance",
        "2400",
        "2026-01-01",
        None,
    ));
    env.engine
        .record_time_entry(entry("emp_f", "2026-03-04", "weekday_overtime", "2"))
        .unwrap();

    let first = env
        .engine
        .calculate_monthly_payroll("emp_f", 2026, 3)
        .unwrap();
    let second = env
        .engine
        .calculate_monthly_payroll("emp_f", 2026, 3)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(env.stores.payroll.get("emp_f", 2026, 3).unwrap(), second);
}

#[test]
fn test_full_hourly_cost_rate_end_to_end() {
    let env = create_test_env();

    env.stores.salary.insert(salary_item(
        "emp_f",
        "meal_allowance",
        "2400",
        "2026-01-01",
        None,
    ));
    env.stores
        .overhead
        .insert(comp_engine::models::MonthlyOverheadCost {
            cost_type: "rent".to_string(),
            year: 2026,
            month: 3,
            amount: dec("90000"),
        });

    let rate = env
        .engine
        .calculate_full_hourly_cost_rate("emp_f", 2026, 3)
        .unwrap();

    // (48000 + 2400) / 240 = 210, plus (90000 / 2 employees) / 240 = 187.5.
    assert_eq!(rate, dec("397.5"));
}

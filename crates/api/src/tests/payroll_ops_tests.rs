// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrms_domain::{Money, SystemRole};
use hrms_persistence::{EmployeeFields, Persistence};

use crate::auth::Viewer;
use crate::error::ApiError;
use crate::operations::dashboard::get_dashboard_stats;
use crate::operations::payroll::{list_payroll_records, run_payroll};
use crate::tests::{seed_employee, test_persistence, viewer};

fn admin_viewer() -> Viewer {
    viewer("admin@example.com", SystemRole::Admin)
}

#[test]
fn test_run_payroll_pays_active_employees() {
    let mut persistence: Persistence = test_persistence();
    seed_employee(&mut persistence, "a@example.com", SystemRole::Employee);
    seed_employee(&mut persistence, "b@example.com", SystemRole::Employee);

    let outcome = run_payroll(&mut persistence, &admin_viewer()).expect("Run failed");
    assert_eq!(outcome.created, 2);
    assert_eq!(outcome.skipped, 0);

    let records = list_payroll_records(&mut persistence, &admin_viewer(), None)
        .expect("List failed");
    assert_eq!(records.len(), 2);
    assert!(
        records
            .iter()
            .all(|r| r.amount_cents == Money::MONTHLY_SALARY.cents() && r.status == "Paid")
    );
}

#[test]
fn test_run_payroll_skips_inactive_employees() {
    let mut persistence: Persistence = test_persistence();
    seed_employee(&mut persistence, "a@example.com", SystemRole::Employee);
    let fields: EmployeeFields = EmployeeFields {
        first_name: String::from("Idle"),
        last_name: String::from("Person"),
        email: String::from("idle@example.com"),
        phone: None,
        department: None,
        job_role: None,
        status: String::from("Inactive"),
        join_date: None,
    };
    persistence
        .create_employee(&fields)
        .expect("Failed to seed employee");

    let outcome = run_payroll(&mut persistence, &admin_viewer()).expect("Run failed");
    assert_eq!(outcome.created, 1);
}

#[test]
fn test_run_payroll_is_idempotent_within_a_period() {
    let mut persistence: Persistence = test_persistence();
    seed_employee(&mut persistence, "a@example.com", SystemRole::Employee);

    let first = run_payroll(&mut persistence, &admin_viewer()).expect("Run failed");
    assert_eq!(first.created, 1);

    let second = run_payroll(&mut persistence, &admin_viewer()).expect("Rerun failed");
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 1);

    let records = list_payroll_records(&mut persistence, &admin_viewer(), None)
        .expect("List failed");
    assert_eq!(records.len(), 1);
}

#[test]
fn test_rerun_pays_employees_hired_since() {
    let mut persistence: Persistence = test_persistence();
    seed_employee(&mut persistence, "a@example.com", SystemRole::Employee);
    run_payroll(&mut persistence, &admin_viewer()).expect("Run failed");

    seed_employee(&mut persistence, "b@example.com", SystemRole::Employee);
    let outcome = run_payroll(&mut persistence, &admin_viewer()).expect("Rerun failed");
    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn test_run_payroll_requires_admin() {
    let mut persistence: Persistence = test_persistence();

    let hr: Viewer = viewer("hr@example.com", SystemRole::Hr);
    let result = run_payroll(&mut persistence, &hr);
    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { required_role, .. }) if required_role == "admin"
    ));
}

#[test]
fn test_employee_viewer_sees_only_own_records() {
    let mut persistence: Persistence = test_persistence();
    let own: i64 = seed_employee(&mut persistence, "worker@example.com", SystemRole::Employee);
    seed_employee(&mut persistence, "other@example.com", SystemRole::Employee);
    run_payroll(&mut persistence, &admin_viewer()).expect("Run failed");

    let worker: Viewer = viewer("worker@example.com", SystemRole::Employee);
    let mine = list_payroll_records(&mut persistence, &worker, None).expect("List failed");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].employee_id, own);

    let ghost: Viewer = viewer("ghost@example.com", SystemRole::Employee);
    let none = list_payroll_records(&mut persistence, &ghost, None).expect("List failed");
    assert!(none.is_empty());
}

#[test]
fn test_dashboard_stats_reflect_payroll_run() {
    let mut persistence: Persistence = test_persistence();
    seed_employee(&mut persistence, "a@example.com", SystemRole::Employee);
    seed_employee(&mut persistence, "b@example.com", SystemRole::Employee);
    run_payroll(&mut persistence, &admin_viewer()).expect("Run failed");

    let stats = get_dashboard_stats(&mut persistence, &admin_viewer()).expect("Stats failed");
    assert_eq!(stats.total_employees, 2);
    assert_eq!(stats.pending_leaves, 0);
    assert_eq!(stats.on_leave_today, 0);
    assert_eq!(stats.total_payroll_cents, 2 * Money::MONTHLY_SALARY.cents());
    assert_eq!(stats.total_payroll_display, "$10,000.00");
}

#[test]
fn test_dashboard_is_open_to_employee_viewers() {
    let mut persistence: Persistence = test_persistence();
    seed_employee(&mut persistence, "worker@example.com", SystemRole::Employee);
    run_payroll(&mut persistence, &admin_viewer()).expect("Run failed");

    let worker: Viewer = viewer("worker@example.com", SystemRole::Employee);
    let stats = get_dashboard_stats(&mut persistence, &worker).expect("Stats failed");
    assert_eq!(stats.total_employees, 1);
    assert_eq!(stats.total_payroll_cents, Money::MONTHLY_SALARY.cents());
}

#[test]
fn test_dashboard_stats_on_empty_store() {
    let mut persistence: Persistence = test_persistence();

    let stats = get_dashboard_stats(&mut persistence, &admin_viewer()).expect("Stats failed");
    assert_eq!(stats.total_employees, 0);
    assert_eq!(stats.pending_leaves, 0);
    assert_eq!(stats.on_leave_today, 0);
    assert_eq!(stats.total_payroll_cents, 0);
    assert_eq!(stats.total_payroll_display, "$0.00");
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for payroll persistence operations.

use super::create_test_employee;
use crate::Persistence;

const SALARY_CENTS: i64 = 500_000;

#[test]
fn test_run_payroll_pays_active_employees_once() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .create_employee(&create_test_employee("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    persistence
        .create_employee(&create_test_employee("Grace", "Hopper", "grace@example.com"))
        .unwrap();

    let mut inactive = create_test_employee("In", "Active", "inactive@example.com");
    inactive.status = String::from("Inactive");
    persistence.create_employee(&inactive).unwrap();

    let outcome = persistence
        .run_payroll("2026-08", "2026-08-23", SALARY_CENTS)
        .unwrap();
    assert_eq!(outcome.created, 2);
    assert_eq!(outcome.skipped, 0);

    let records = persistence.list_payroll_records(None).unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.amount_cents, SALARY_CENTS);
        assert_eq!(record.status, "Paid");
        assert_eq!(record.pay_period, "2026-08");
        assert_eq!(record.payment_date, "2026-08-23");
    }
}

#[test]
fn test_run_payroll_is_idempotent_per_period() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .create_employee(&create_test_employee("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    let first = persistence
        .run_payroll("2026-08", "2026-08-23", SALARY_CENTS)
        .unwrap();
    assert_eq!(first.created, 1);

    let second = persistence
        .run_payroll("2026-08", "2026-08-24", SALARY_CENTS)
        .unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 1);

    assert_eq!(persistence.list_payroll_records(None).unwrap().len(), 1);
}

#[test]
fn test_run_payroll_pays_new_employees_in_a_second_pass() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .create_employee(&create_test_employee("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    persistence
        .run_payroll("2026-08", "2026-08-23", SALARY_CENTS)
        .unwrap();

    persistence
        .create_employee(&create_test_employee("Grace", "Hopper", "grace@example.com"))
        .unwrap();

    let outcome = persistence
        .run_payroll("2026-08", "2026-08-25", SALARY_CENTS)
        .unwrap();
    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(persistence.list_payroll_records(None).unwrap().len(), 2);
}

#[test]
fn test_list_payroll_records_filters_by_employee_and_orders_by_date() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let ada = persistence
        .create_employee(&create_test_employee("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    persistence
        .create_employee(&create_test_employee("Grace", "Hopper", "grace@example.com"))
        .unwrap();

    persistence
        .run_payroll("2026-07", "2026-07-31", SALARY_CENTS)
        .unwrap();
    persistence
        .run_payroll("2026-08", "2026-08-31", SALARY_CENTS)
        .unwrap();

    let own = persistence.list_payroll_records(Some(ada)).unwrap();
    assert_eq!(own.len(), 2);
    assert!(own.iter().all(|r| r.employee_id == ada));
    assert_eq!(own[0].payment_date, "2026-08-31");
    assert_eq!(own[1].payment_date, "2026-07-31");
    assert_eq!(own[0].employee_first_name, "Ada");
    assert_eq!(own[0].employee_job_role.as_deref(), Some("Engineer"));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for leave request persistence operations.

use super::create_test_employee;
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_leave_request_starts_pending() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let employee_id = persistence
        .create_employee(&create_test_employee("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    let leave_id = persistence
        .create_leave_request(
            employee_id,
            "Vacation",
            "2026-09-01",
            "2026-09-05",
            Some("Family trip"),
        )
        .unwrap();

    let leave = persistence
        .get_leave_request_by_id(leave_id)
        .unwrap()
        .unwrap();
    assert_eq!(leave.status, "Pending");
    assert_eq!(leave.employee_id, employee_id);
    assert_eq!(leave.employee_first_name, "Ada");
    assert_eq!(leave.employee_email, "ada@example.com");
}

#[test]
fn test_create_leave_request_requires_existing_employee() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result =
        persistence.create_leave_request(999, "Vacation", "2026-09-01", "2026-09-05", None);

    assert!(result.is_err());
}

#[test]
fn test_list_leave_requests_orders_by_start_date_descending() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let employee_id = persistence
        .create_employee(&create_test_employee("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    persistence
        .create_leave_request(employee_id, "Vacation", "2026-03-01", "2026-03-05", None)
        .unwrap();
    persistence
        .create_leave_request(employee_id, "Sick", "2026-07-01", "2026-07-02", None)
        .unwrap();
    persistence
        .create_leave_request(employee_id, "Vacation", "2026-05-10", "2026-05-12", None)
        .unwrap();

    let leaves = persistence.list_leave_requests(None, None).unwrap();
    let starts: Vec<&str> = leaves.iter().map(|l| l.start_date.as_str()).collect();
    assert_eq!(starts, vec!["2026-07-01", "2026-05-10", "2026-03-01"]);
}

#[test]
fn test_list_leave_requests_filters_by_status_and_employee() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let ada = persistence
        .create_employee(&create_test_employee("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    let grace = persistence
        .create_employee(&create_test_employee("Grace", "Hopper", "grace@example.com"))
        .unwrap();

    let ada_leave = persistence
        .create_leave_request(ada, "Vacation", "2026-03-01", "2026-03-05", None)
        .unwrap();
    persistence
        .create_leave_request(grace, "Sick", "2026-04-01", "2026-04-02", None)
        .unwrap();

    persistence
        .update_leave_status(ada_leave, "Approved")
        .unwrap();

    let approved = persistence
        .list_leave_requests(Some("Approved"), None)
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, ada_leave);

    let own = persistence.list_leave_requests(None, Some(grace)).unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].employee_id, grace);

    let both = persistence
        .list_leave_requests(Some("Pending"), Some(ada))
        .unwrap();
    assert!(both.is_empty());
}

#[test]
fn test_update_leave_status_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(matches!(
        persistence.update_leave_status(999, "Approved"),
        Err(PersistenceError::NotFound(_))
    ));
}

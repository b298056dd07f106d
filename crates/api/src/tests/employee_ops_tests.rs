// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrms_domain::SystemRole;
use hrms_persistence::Persistence;

use crate::auth::Viewer;
use crate::error::{ApiError, AuthError};
use crate::operations::employees::{
    EMPLOYEE_PAGE_SIZE, create_employee, delete_employee, list_employees, update_employee,
};
use crate::request_response::{CreateEmployeeRequest, EmployeeListQuery, UpdateEmployeeRequest};
use crate::tests::{test_persistence, viewer};

fn hr_viewer() -> Viewer {
    viewer("hr@example.com", SystemRole::Hr)
}

fn employee_viewer() -> Viewer {
    viewer("worker@example.com", SystemRole::Employee)
}

fn create_request(email: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        first_name: String::from("Ada"),
        last_name: String::from("Lovelace"),
        email: String::from(email),
        phone: Some(String::from("555-0100")),
        department: Some(String::from("Engineering")),
        job_role: Some(String::from("Engineer")),
        status: None,
        join_date: Some(String::from("2025-06-01")),
    }
}

#[test]
fn test_create_employee_defaults_to_active() {
    let mut persistence: Persistence = test_persistence();

    let employee = create_employee(&mut persistence, &hr_viewer(), &create_request("ada@example.com"))
        .expect("Create failed");
    assert_eq!(employee.email, "ada@example.com");
    assert_eq!(employee.status, "Active");
    assert_eq!(employee.system_role, "employee");
}

#[test]
fn test_create_employee_requires_elevated_role() {
    let mut persistence: Persistence = test_persistence();

    let result = create_employee(
        &mut persistence,
        &employee_viewer(),
        &create_request("ada@example.com"),
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_create_employee_rejects_missing_first_name() {
    let mut persistence: Persistence = test_persistence();

    let mut request = create_request("ada@example.com");
    request.first_name = String::from("  ");
    let result = create_employee(&mut persistence, &hr_viewer(), &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "First name"
    ));
}

#[test]
fn test_create_employee_rejects_invalid_status() {
    let mut persistence: Persistence = test_persistence();

    let mut request = create_request("ada@example.com");
    request.status = Some(String::from("Retired"));
    let result = create_employee(&mut persistence, &hr_viewer(), &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "status"
    ));
}

#[test]
fn test_create_employee_rejects_duplicate_email() {
    let mut persistence: Persistence = test_persistence();

    create_employee(&mut persistence, &hr_viewer(), &create_request("ada@example.com"))
        .expect("Create failed");
    let result = create_employee(
        &mut persistence,
        &hr_viewer(),
        &create_request("ada@example.com"),
    );
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "unique_email"
    ));
}

#[test]
fn test_update_employee_merges_partial_fields() {
    let mut persistence: Persistence = test_persistence();

    let employee = create_employee(&mut persistence, &hr_viewer(), &create_request("ada@example.com"))
        .expect("Create failed");

    let request: UpdateEmployeeRequest = UpdateEmployeeRequest {
        department: Some(String::from("Research")),
        status: Some(String::from("On Leave")),
        ..UpdateEmployeeRequest::default()
    };
    let updated = update_employee(&mut persistence, &hr_viewer(), employee.id, &request)
        .expect("Update failed");

    assert_eq!(updated.department.as_deref(), Some("Research"));
    assert_eq!(updated.status, "On Leave");
    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.email, "ada@example.com");
}

#[test]
fn test_update_missing_employee_is_not_found() {
    let mut persistence: Persistence = test_persistence();

    let result = update_employee(
        &mut persistence,
        &hr_viewer(),
        999,
        &UpdateEmployeeRequest::default(),
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_employee_rejects_email_taken_by_another() {
    let mut persistence: Persistence = test_persistence();

    create_employee(&mut persistence, &hr_viewer(), &create_request("ada@example.com"))
        .expect("Create failed");
    let other = create_employee(
        &mut persistence,
        &hr_viewer(),
        &create_request("grace@example.com"),
    )
    .expect("Create failed");

    let request: UpdateEmployeeRequest = UpdateEmployeeRequest {
        email: Some(String::from("ada@example.com")),
        ..UpdateEmployeeRequest::default()
    };
    let result = update_employee(&mut persistence, &hr_viewer(), other.id, &request);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "unique_email"
    ));
}

#[test]
fn test_delete_employee() {
    let mut persistence: Persistence = test_persistence();

    let employee = create_employee(&mut persistence, &hr_viewer(), &create_request("ada@example.com"))
        .expect("Create failed");
    delete_employee(&mut persistence, &hr_viewer(), employee.id).expect("Delete failed");

    let result = delete_employee(&mut persistence, &hr_viewer(), employee.id);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_delete_employee_requires_elevated_role() {
    let mut persistence: Persistence = test_persistence();

    let result = delete_employee(&mut persistence, &employee_viewer(), 1);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_list_employees_paginates() {
    let mut persistence: Persistence = test_persistence();

    for i in 0..12 {
        create_employee(
            &mut persistence,
            &hr_viewer(),
            &create_request(&format!("person{i}@example.com")),
        )
        .expect("Create failed");
    }

    let first = list_employees(&mut persistence, &hr_viewer(), &EmployeeListQuery::default())
        .expect("List failed");
    assert_eq!(first.employees.len(), usize::try_from(EMPLOYEE_PAGE_SIZE).unwrap());
    assert_eq!(first.total_count, 12);

    let query: EmployeeListQuery = EmployeeListQuery {
        page: Some(1),
        search: None,
    };
    let second = list_employees(&mut persistence, &hr_viewer(), &query).expect("List failed");
    assert_eq!(second.employees.len(), 2);
    assert_eq!(second.total_count, 12);
}

#[test]
fn test_list_employees_search_filters() {
    let mut persistence: Persistence = test_persistence();

    create_employee(&mut persistence, &hr_viewer(), &create_request("ada@example.com"))
        .expect("Create failed");
    let mut other = create_request("grace@example.com");
    other.first_name = String::from("Grace");
    other.last_name = String::from("Hopper");
    create_employee(&mut persistence, &hr_viewer(), &other).expect("Create failed");

    let query: EmployeeListQuery = EmployeeListQuery {
        page: None,
        search: Some(String::from("hopper")),
    };
    let page = list_employees(&mut persistence, &hr_viewer(), &query).expect("List failed");
    assert_eq!(page.total_count, 1);
    assert_eq!(page.employees[0].email, "grace@example.com");
}

#[test]
fn test_list_employees_requires_elevated_role() {
    let mut persistence: Persistence = test_persistence();

    let result = list_employees(
        &mut persistence,
        &employee_viewer(),
        &EmployeeListQuery::default(),
    );
    assert!(matches!(
        result,
        Err(ApiError::Unauthorized { action, .. }) if action == "list employees"
    ));
}

#[test]
fn test_unauthorized_error_converts_from_auth_error() {
    let err: ApiError = ApiError::from(AuthError::Unauthorized {
        action: String::from("list employees"),
        required_role: String::from("admin or hr"),
    });
    assert_eq!(
        err.to_string(),
        "Unauthorized: 'list employees' requires admin or hr role"
    );
}

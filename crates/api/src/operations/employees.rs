// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee directory operations.

use std::str::FromStr;

use hrms_domain::{EmailAddress, EmployeeStatus, validate_employee_fields};
use hrms_persistence::{EmployeeData, EmployeeFields, EmployeePage, Persistence};
use tracing::info;

use crate::auth::Viewer;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{CreateEmployeeRequest, EmployeeListQuery, UpdateEmployeeRequest};

/// Rows per directory page.
pub const EMPLOYEE_PAGE_SIZE: i64 = 10;

/// Lists one page of the employee directory.
///
/// # Errors
///
/// Returns an error if the viewer is not elevated or the query fails.
pub fn list_employees(
    persistence: &mut Persistence,
    viewer: &Viewer,
    query: &EmployeeListQuery,
) -> Result<EmployeePage, ApiError> {
    viewer.require_elevated("list employees")?;

    let page: i64 = query.page.unwrap_or(0).max(0);
    persistence
        .list_employees(page, EMPLOYEE_PAGE_SIZE, query.search.as_deref())
        .map_err(translate_persistence_error)
}

/// Creates an employee.
///
/// # Errors
///
/// Returns an error if the viewer is not elevated, a field fails
/// validation, the email is already taken, or the insert fails.
pub fn create_employee(
    persistence: &mut Persistence,
    viewer: &Viewer,
    request: &CreateEmployeeRequest,
) -> Result<EmployeeData, ApiError> {
    viewer.require_elevated("create employee")?;

    let email: EmailAddress =
        validate_employee_fields(&request.first_name, &request.last_name, &request.email)
            .map_err(translate_domain_error)?;
    let status: EmployeeStatus = parse_status(request.status.as_deref())?;

    if persistence
        .get_employee_by_email(email.value())
        .map_err(translate_persistence_error)?
        .is_some()
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("An employee with email '{}' already exists", email.value()),
        });
    }

    let fields: EmployeeFields = EmployeeFields {
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        email: email.value().to_string(),
        phone: request.phone.clone(),
        department: request.department.clone(),
        job_role: request.job_role.clone(),
        status: status.as_str().to_string(),
        join_date: request.join_date.clone(),
    };

    let employee_id: i64 = persistence
        .create_employee(&fields)
        .map_err(translate_persistence_error)?;
    info!(employee_id, "Created employee");

    fetch_employee(persistence, employee_id)
}

/// Updates an employee. Absent request fields keep their stored values.
///
/// # Errors
///
/// Returns an error if the viewer is not elevated, the employee does
/// not exist, a field fails validation, or the update fails.
pub fn update_employee(
    persistence: &mut Persistence,
    viewer: &Viewer,
    employee_id: i64,
    request: &UpdateEmployeeRequest,
) -> Result<EmployeeData, ApiError> {
    viewer.require_elevated("update employee")?;

    let existing: EmployeeData = persistence
        .get_employee_by_id(employee_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("No employee with id {employee_id}"),
        })?;

    let first_name: String = request
        .first_name
        .clone()
        .unwrap_or_else(|| existing.first_name.clone());
    let last_name: String = request
        .last_name
        .clone()
        .unwrap_or_else(|| existing.last_name.clone());
    let email_input: String = request.email.clone().unwrap_or_else(|| existing.email.clone());

    let email: EmailAddress = validate_employee_fields(&first_name, &last_name, &email_input)
        .map_err(translate_domain_error)?;
    let status: EmployeeStatus = match request.status.as_deref() {
        Some(value) => EmployeeStatus::from_str(value).map_err(translate_domain_error)?,
        None => EmployeeStatus::from_str(&existing.status).unwrap_or_default(),
    };

    if email.value() != existing.email
        && persistence
            .get_employee_by_email(email.value())
            .map_err(translate_persistence_error)?
            .is_some()
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("An employee with email '{}' already exists", email.value()),
        });
    }

    let fields: EmployeeFields = EmployeeFields {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        email: email.value().to_string(),
        phone: request.phone.clone().or_else(|| existing.phone.clone()),
        department: request
            .department
            .clone()
            .or_else(|| existing.department.clone()),
        job_role: request
            .job_role
            .clone()
            .or_else(|| existing.job_role.clone()),
        status: status.as_str().to_string(),
        join_date: request
            .join_date
            .clone()
            .or_else(|| existing.join_date.clone()),
    };

    persistence
        .update_employee(employee_id, &fields)
        .map_err(translate_persistence_error)?;
    info!(employee_id, "Updated employee");

    fetch_employee(persistence, employee_id)
}

/// Deletes an employee. Leave and payroll rows cascade with it.
///
/// # Errors
///
/// Returns an error if the viewer is not elevated, the employee does
/// not exist, or the delete fails.
pub fn delete_employee(
    persistence: &mut Persistence,
    viewer: &Viewer,
    employee_id: i64,
) -> Result<(), ApiError> {
    viewer.require_elevated("delete employee")?;

    persistence
        .delete_employee(employee_id)
        .map_err(translate_persistence_error)?;
    info!(employee_id, "Deleted employee");

    Ok(())
}

fn parse_status(status: Option<&str>) -> Result<EmployeeStatus, ApiError> {
    match status {
        Some(value) => EmployeeStatus::from_str(value).map_err(translate_domain_error),
        None => Ok(EmployeeStatus::default()),
    }
}

fn fetch_employee(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<EmployeeData, ApiError> {
    persistence
        .get_employee_by_id(employee_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Employee {employee_id} missing after write"),
        })
}

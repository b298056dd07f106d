// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request operations.

use std::str::FromStr;

use chrono::NaiveDate;
use hrms_domain::{DomainError, LeaveStatus};
use hrms_persistence::{LeaveRequestData, Persistence};
use tracing::info;

use crate::auth::Viewer;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::operations::own_employee_id;
use crate::request_response::{LeaveListQuery, SubmitLeaveRequest, UpdateLeaveStatusRequest};

/// Lists leave requests, newest span first.
///
/// Elevated viewers see every request and may filter by employee.
/// Everyone else sees only their own; a viewer with no employee row
/// sees an empty list.
///
/// # Errors
///
/// Returns an error if a filter is invalid or the query fails.
pub fn list_leave_requests(
    persistence: &mut Persistence,
    viewer: &Viewer,
    query: &LeaveListQuery,
) -> Result<Vec<LeaveRequestData>, ApiError> {
    let status: Option<LeaveStatus> = parse_status_filter(query.status.as_deref())?;

    let employee_id: Option<i64> = if viewer.role.is_elevated() {
        query.employee_id
    } else {
        match own_employee_id(persistence, viewer)? {
            Some(id) => Some(id),
            None => return Ok(Vec::new()),
        }
    };

    persistence
        .list_leave_requests(status.map(|s| s.as_str()), employee_id)
        .map_err(translate_persistence_error)
}

/// Submits a leave request in the `Pending` state.
///
/// Elevated viewers may submit for any employee; everyone else submits
/// for their own employee row.
///
/// # Errors
///
/// Returns an error if a field fails validation, the viewer has no
/// employee row, or the insert fails.
pub fn submit_leave_request(
    persistence: &mut Persistence,
    viewer: &Viewer,
    request: &SubmitLeaveRequest,
) -> Result<LeaveRequestData, ApiError> {
    if request.leave_type.trim().is_empty() {
        return Err(missing_field("Leave type"));
    }
    let start: NaiveDate = parse_date("start_date", &request.start_date)?;
    let end: NaiveDate = parse_date("end_date", &request.end_date)?;
    if end < start {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("leave_date_order"),
            message: String::from("End date must not be before start date"),
        });
    }

    let employee_id: i64 = match (viewer.role.is_elevated(), request.employee_id) {
        (true, Some(id)) => id,
        _ => own_employee_id(persistence, viewer)?.ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("No employee row for '{}'", viewer.user.email),
        })?,
    };

    let leave_id: i64 = persistence
        .create_leave_request(
            employee_id,
            request.leave_type.trim(),
            &request.start_date,
            &request.end_date,
            request.reason.as_deref(),
        )
        .map_err(translate_persistence_error)?;
    info!(leave_id, employee_id, "Submitted leave request");

    fetch_leave(persistence, leave_id)
}

/// Reviews a leave request.
///
/// # Errors
///
/// Returns an error if the viewer is not elevated, the status is
/// invalid, the request does not exist, or the update fails.
pub fn update_leave_status(
    persistence: &mut Persistence,
    viewer: &Viewer,
    leave_id: i64,
    request: &UpdateLeaveStatusRequest,
) -> Result<LeaveRequestData, ApiError> {
    viewer.require_elevated("review leave request")?;

    let status: LeaveStatus =
        LeaveStatus::from_str(&request.status).map_err(translate_domain_error)?;

    persistence
        .update_leave_status(leave_id, status.as_str())
        .map_err(translate_persistence_error)?;
    info!(leave_id, status = status.as_str(), "Reviewed leave request");

    fetch_leave(persistence, leave_id)
}

/// Parses the status filter. `All` or absent means no filter.
fn parse_status_filter(status: Option<&str>) -> Result<Option<LeaveStatus>, ApiError> {
    match status {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => LeaveStatus::from_str(value)
            .map(Some)
            .map_err(translate_domain_error),
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    if value.trim().is_empty() {
        return Err(missing_field(field));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ApiError::InvalidInput {
        field: String::from(field),
        message: format!("'{value}' is not a valid YYYY-MM-DD date"),
    })
}

fn missing_field(field: &str) -> ApiError {
    translate_domain_error(DomainError::MissingField {
        field: String::from(field),
    })
}

fn fetch_leave(persistence: &mut Persistence, leave_id: i64) -> Result<LeaveRequestData, ApiError> {
    persistence
        .get_leave_request_by_id(leave_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Leave request {leave_id} missing after write"),
        })
}

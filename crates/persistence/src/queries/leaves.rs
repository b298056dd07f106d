// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::LeaveRequestData;
use crate::diesel_schema::{employees, leave_request};
use crate::error::PersistenceError;

type LeaveJoinRow = (
    i64,
    i64,
    String,
    String,
    String,
    Option<String>,
    String,
    String,
    String,
    String,
    String,
);

fn to_leave_data(row: LeaveJoinRow) -> LeaveRequestData {
    let (
        id,
        employee_id,
        leave_type,
        start_date,
        end_date,
        reason,
        status,
        created_at,
        employee_first_name,
        employee_last_name,
        employee_email,
    ) = row;
    LeaveRequestData {
        id,
        employee_id,
        leave_type,
        start_date,
        end_date,
        reason,
        status,
        created_at,
        employee_first_name,
        employee_last_name,
        employee_email,
    }
}

/// Lists leave requests with their embedded employee summary.
///
/// Rows are ordered by start date, latest first. An optional status
/// filter narrows to one review state, and an optional employee filter
/// restricts to that employee's own requests.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `status` - Optional review status filter
/// * `employee_id` - Optional owning-employee filter
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_leave_requests(
    conn: &mut SqliteConnection,
    status: Option<&str>,
    employee_id: Option<i64>,
) -> Result<Vec<LeaveRequestData>, PersistenceError> {
    debug!(
        "Listing leave requests, status: {:?}, employee_id: {:?}",
        status, employee_id
    );

    let mut query = leave_request::table
        .inner_join(employees::table)
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(leave_request::status.eq(status.to_string()));
    }
    if let Some(employee_id) = employee_id {
        query = query.filter(leave_request::employee_id.eq(employee_id));
    }

    let rows: Vec<LeaveJoinRow> = query
        .select((
            leave_request::id,
            leave_request::employee_id,
            leave_request::leave_type,
            leave_request::start_date,
            leave_request::end_date,
            leave_request::reason,
            leave_request::status,
            leave_request::created_at,
            employees::first_name,
            employees::last_name,
            employees::email,
        ))
        .order_by(leave_request::start_date.desc())
        .load(conn)?;

    Ok(rows.into_iter().map(to_leave_data).collect())
}

/// Retrieves a leave request by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `leave_id` - The leave request ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the leave request is not found.
pub fn get_leave_request_by_id(
    conn: &mut SqliteConnection,
    leave_id: i64,
) -> Result<Option<LeaveRequestData>, PersistenceError> {
    debug!("Looking up leave request by ID: {}", leave_id);

    let result: Result<LeaveJoinRow, diesel::result::Error> = leave_request::table
        .inner_join(employees::table)
        .filter(leave_request::id.eq(leave_id))
        .select((
            leave_request::id,
            leave_request::employee_id,
            leave_request::leave_type,
            leave_request::start_date,
            leave_request::end_date,
            leave_request::reason,
            leave_request::status,
            leave_request::created_at,
            employees::first_name,
            employees::last_name,
            employees::email,
        ))
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_leave_data(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::diesel_schema::leave_request;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new leave request in the `Pending` state.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The requesting employee's ID
/// * `leave_type` - The kind of leave requested
/// * `start_date` - First day of leave (`YYYY-MM-DD`)
/// * `end_date` - Last day of leave (`YYYY-MM-DD`)
/// * `reason` - Optional free-text reason
///
/// # Errors
///
/// Returns an error if the insert fails, including when the employee
/// does not exist (foreign key violation).
pub fn create_leave_request(
    conn: &mut SqliteConnection,
    employee_id: i64,
    leave_type: &str,
    start_date: &str,
    end_date: &str,
    reason: Option<&str>,
) -> Result<i64, PersistenceError> {
    info!(
        employee_id,
        leave_type, start_date, end_date, "Creating leave request"
    );

    diesel::insert_into(leave_request::table)
        .values((
            leave_request::employee_id.eq(employee_id),
            leave_request::leave_type.eq(leave_type),
            leave_request::start_date.eq(start_date),
            leave_request::end_date.eq(end_date),
            leave_request::reason.eq(reason),
        ))
        .execute(conn)?;

    let leave_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(leave_id, "Leave request created successfully");

    Ok(leave_id)
}

/// Updates the review status of a leave request.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `leave_id` - The leave request ID
/// * `status` - The new status string
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row matches, or another
/// error if the update fails.
pub fn update_leave_status(
    conn: &mut SqliteConnection,
    leave_id: i64,
    status: &str,
) -> Result<(), PersistenceError> {
    info!(leave_id, status, "Updating leave request status");

    let updated: usize = diesel::update(leave_request::table)
        .filter(leave_request::id.eq(leave_id))
        .set(leave_request::status.eq(status))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Leave request {leave_id} not found"
        )));
    }

    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee directory mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::data_models::EmployeeFields;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new employee row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - The employee fields to insert
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmail` if the email is already
/// taken, or another error if the insert fails.
pub fn create_employee(
    conn: &mut SqliteConnection,
    fields: &EmployeeFields,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating employee: {} {}",
        fields.first_name, fields.last_name
    );

    let result: Result<usize, diesel::result::Error> = diesel::insert_into(employees::table)
        .values((
            employees::first_name.eq(&fields.first_name),
            employees::last_name.eq(&fields.last_name),
            employees::email.eq(&fields.email),
            employees::phone.eq(&fields.phone),
            employees::department.eq(&fields.department),
            employees::job_role.eq(&fields.job_role),
            employees::status.eq(&fields.status),
            employees::join_date.eq(&fields.join_date),
        ))
        .execute(conn);

    match result {
        Ok(_) => {}
        Err(e) => match PersistenceError::from(e) {
            PersistenceError::UniqueViolation(_) => {
                return Err(PersistenceError::DuplicateEmail(fields.email.clone()));
            }
            other => return Err(other),
        },
    }

    let employee_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(employee_id, "Employee created successfully");

    Ok(employee_id)
}

/// Updates an existing employee row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
/// * `fields` - The replacement field values
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row matches,
/// `PersistenceError::DuplicateEmail` if the new email is taken by
/// another row, or another error if the update fails.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    fields: &EmployeeFields,
) -> Result<(), PersistenceError> {
    info!("Updating employee ID: {}", employee_id);

    let result: Result<usize, diesel::result::Error> = diesel::update(employees::table)
        .filter(employees::id.eq(employee_id))
        .set((
            employees::first_name.eq(&fields.first_name),
            employees::last_name.eq(&fields.last_name),
            employees::email.eq(&fields.email),
            employees::phone.eq(&fields.phone),
            employees::department.eq(&fields.department),
            employees::job_role.eq(&fields.job_role),
            employees::status.eq(&fields.status),
            employees::join_date.eq(&fields.join_date),
        ))
        .execute(conn);

    let updated: usize = match result {
        Ok(count) => count,
        Err(e) => match PersistenceError::from(e) {
            PersistenceError::UniqueViolation(_) => {
                return Err(PersistenceError::DuplicateEmail(fields.email.clone()));
            }
            other => return Err(other),
        },
    };

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Employee {employee_id} not found"
        )));
    }

    Ok(())
}

/// Deletes an employee row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row matches, or another
/// error if the delete fails.
pub fn delete_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting employee ID: {}", employee_id);

    let deleted: usize = diesel::delete(employees::table)
        .filter(employees::id.eq(employee_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Employee {employee_id} not found"
        )));
    }

    Ok(())
}

/// Sets the stored system role for the employee with the given email.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The employee's email address
/// * `system_role` - The new stored role string
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no employee carries the
/// email, or another error if the update fails.
pub fn set_system_role(
    conn: &mut SqliteConnection,
    email: &str,
    system_role: &str,
) -> Result<(), PersistenceError> {
    debug!("Setting system role to '{}'", system_role);

    let updated: usize = diesel::update(employees::table)
        .filter(employees::email.eq(email))
        .set(employees::system_role.eq(system_role))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "No employee found with email '{email}'"
        )));
    }

    info!("System role updated to '{}'", system_role);
    Ok(())
}

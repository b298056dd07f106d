// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee directory queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{EmployeeData, EmployeePage};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    department: Option<String>,
    job_role: Option<String>,
    status: String,
    join_date: Option<String>,
    system_role: String,
    created_at: String,
}

impl From<EmployeeRow> for EmployeeData {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            department: row.department,
            job_role: row.job_role,
            status: row.status,
            join_date: row.join_date,
            system_role: row.system_role,
            created_at: row.created_at,
        }
    }
}

type BoxedEmployeeQuery<'a> =
    employees::BoxedQuery<'a, diesel::sqlite::Sqlite>;

fn apply_search<'a>(query: BoxedEmployeeQuery<'a>, search: &str) -> BoxedEmployeeQuery<'a> {
    let pattern: String = format!("%{}%", search.trim());
    query.filter(
        employees::first_name
            .like(pattern.clone())
            .nullable()
            .or(employees::last_name.like(pattern.clone()).nullable())
            .or(employees::email.like(pattern.clone()).nullable())
            .or(employees::job_role.like(pattern)),
    )
}

/// Retrieves one page of the employee directory with the exact total
/// count of matching rows.
///
/// When a search term is given it is OR-matched case-insensitively
/// against first name, last name, email, and job role. Rows are ordered
/// by creation time, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `page` - Zero-based page number
/// * `page_size` - Rows per page
/// * `search` - Optional search term
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees(
    conn: &mut SqliteConnection,
    page: i64,
    page_size: i64,
    search: Option<&str>,
) -> Result<EmployeePage, PersistenceError> {
    debug!("Listing employees, page: {}, search: {:?}", page, search);

    let search: Option<&str> = search.map(str::trim).filter(|s| !s.is_empty());

    let mut count_query: BoxedEmployeeQuery<'_> = employees::table.into_boxed();
    let mut page_query: BoxedEmployeeQuery<'_> = employees::table.into_boxed();
    if let Some(term) = search {
        count_query = apply_search(count_query, term);
        page_query = apply_search(page_query, term);
    }

    let total_count: i64 = count_query.count().get_result(conn)?;

    let rows: Vec<EmployeeRow> = page_query
        .select(EmployeeRow::as_select())
        .order_by(employees::created_at.desc())
        .limit(page_size)
        .offset(page * page_size)
        .load(conn)?;

    Ok(EmployeePage {
        employees: rows.into_iter().map(EmployeeData::from).collect(),
        total_count,
    })
}

/// Retrieves an employee by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn get_employee_by_id(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<EmployeeData>, PersistenceError> {
    debug!("Looking up employee by ID: {}", employee_id);

    let result: Result<EmployeeRow, diesel::result::Error> = employees::table
        .filter(employees::id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EmployeeData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves an employee by email address.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The email address to search for
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no employee carries the email.
pub fn get_employee_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<EmployeeData>, PersistenceError> {
    debug!("Looking up employee by email");

    let result: Result<EmployeeRow, diesel::result::Error> = employees::table
        .filter(employees::email.eq(email))
        .select(EmployeeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EmployeeData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the stored system role for an identity email.
///
/// The `employees.email` column is unique, so at most one row matches.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The identity email address
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no employee row carries the email.
pub fn get_system_role_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<String>, PersistenceError> {
    debug!("Looking up system role by email");

    let result: Result<String, diesel::result::Error> = employees::table
        .filter(employees::email.eq(email))
        .select(employees::system_role)
        .first(conn);

    match result {
        Ok(role) => Ok(Some(role)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

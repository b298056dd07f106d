// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll record queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::PayrollRecordData;
use crate::diesel_schema::{employees, payroll};
use crate::error::PersistenceError;

type PayrollJoinRow = (
    i64,
    i64,
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
);

fn to_payroll_data(row: PayrollJoinRow) -> PayrollRecordData {
    let (
        id,
        employee_id,
        amount_cents,
        payment_date,
        pay_period,
        status,
        created_at,
        employee_first_name,
        employee_last_name,
        employee_email,
        employee_job_role,
    ) = row;
    PayrollRecordData {
        id,
        employee_id,
        amount_cents,
        payment_date,
        pay_period,
        status,
        created_at,
        employee_first_name,
        employee_last_name,
        employee_email,
        employee_job_role,
    }
}

/// Lists payroll records with their embedded employee summary.
///
/// Rows are ordered by payment date, latest first. The optional
/// employee filter restricts to that employee's own records.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - Optional owning-employee filter
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_payroll_records(
    conn: &mut SqliteConnection,
    employee_id: Option<i64>,
) -> Result<Vec<PayrollRecordData>, PersistenceError> {
    debug!("Listing payroll records, employee_id: {:?}", employee_id);

    let mut query = payroll::table.inner_join(employees::table).into_boxed();

    if let Some(employee_id) = employee_id {
        query = query.filter(payroll::employee_id.eq(employee_id));
    }

    let rows: Vec<PayrollJoinRow> = query
        .select((
            payroll::id,
            payroll::employee_id,
            payroll::amount_cents,
            payroll::payment_date,
            payroll::pay_period,
            payroll::status,
            payroll::created_at,
            employees::first_name,
            employees::last_name,
            employees::email,
            employees::job_role,
        ))
        .order_by(payroll::payment_date.desc())
        .load(conn)?;

    Ok(rows.into_iter().map(to_payroll_data).collect())
}

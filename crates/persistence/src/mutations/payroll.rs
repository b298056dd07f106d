// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrms_domain::{EmployeeStatus, PayrollStatus};
use tracing::{debug, info};

use crate::data_models::PayrollRunOutcome;
use crate::diesel_schema::{employees, payroll};
use crate::error::PersistenceError;

/// Runs payroll for every active employee.
///
/// Inserts one `Paid` record per active employee at the given amount
/// for the given pay period. The `(employee_id, pay_period)` unique
/// constraint makes the run idempotent: employees who already have a
/// record for the period are skipped and counted, never duplicated.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `pay_period` - The pay period (`YYYY-MM`)
/// * `payment_date` - The disbursement date (`YYYY-MM-DD`)
/// * `amount_cents` - The gross amount per employee in cents
///
/// # Errors
///
/// Returns an error if the employee select or any insert fails for a
/// reason other than the uniqueness rule.
pub fn run_payroll(
    conn: &mut SqliteConnection,
    pay_period: &str,
    payment_date: &str,
    amount_cents: i64,
) -> Result<PayrollRunOutcome, PersistenceError> {
    info!(pay_period, payment_date, "Running payroll");

    let active_ids: Vec<i64> = employees::table
        .filter(employees::status.eq(EmployeeStatus::Active.as_str()))
        .select(employees::id)
        .load(conn)?;

    let mut created: usize = 0;
    let mut skipped: usize = 0;

    for employee_id in active_ids {
        let result: Result<usize, diesel::result::Error> = diesel::insert_into(payroll::table)
            .values((
                payroll::employee_id.eq(employee_id),
                payroll::amount_cents.eq(amount_cents),
                payroll::payment_date.eq(payment_date),
                payroll::pay_period.eq(pay_period),
                payroll::status.eq(PayrollStatus::Paid.as_str()),
            ))
            .execute(conn);

        match result {
            Ok(_) => created += 1,
            Err(e) => match PersistenceError::from(e) {
                PersistenceError::UniqueViolation(_) => {
                    debug!(employee_id, pay_period, "Payroll row exists, skipping");
                    skipped += 1;
                }
                other => return Err(other),
            },
        }
    }

    info!(created, skipped, "Payroll run complete");

    Ok(PayrollRunOutcome { created, skipped })
}

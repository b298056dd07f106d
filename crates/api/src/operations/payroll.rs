// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll operations.

use chrono::{NaiveDate, Utc};
use hrms_domain::{Money, PayPeriod};
use hrms_persistence::{PayrollRecordData, PayrollRunOutcome, Persistence};
use tracing::info;

use crate::auth::Viewer;
use crate::error::{ApiError, translate_persistence_error};
use crate::operations::own_employee_id;

/// Lists payroll records, newest payment first.
///
/// Elevated viewers see every record and may filter by employee.
/// Everyone else sees only their own; a viewer with no employee row
/// sees an empty list.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_payroll_records(
    persistence: &mut Persistence,
    viewer: &Viewer,
    employee_id: Option<i64>,
) -> Result<Vec<PayrollRecordData>, ApiError> {
    let employee_id: Option<i64> = if viewer.role.is_elevated() {
        employee_id
    } else {
        match own_employee_id(persistence, viewer)? {
            Some(id) => Some(id),
            None => return Ok(Vec::new()),
        }
    };

    persistence
        .list_payroll_records(employee_id)
        .map_err(translate_persistence_error)
}

/// Runs payroll for the current month.
///
/// Pays every active employee the fixed monthly salary, dated today.
/// Employees who already have a record for the period are skipped and
/// counted, so rerunning within a month is safe.
///
/// # Errors
///
/// Returns an error if the viewer is not an admin or the run fails.
pub fn run_payroll(
    persistence: &mut Persistence,
    viewer: &Viewer,
) -> Result<PayrollRunOutcome, ApiError> {
    viewer.require_admin("run payroll")?;

    let today: NaiveDate = Utc::now().date_naive();
    let period: PayPeriod = PayPeriod::from_date(today);
    let payment_date: String = today.format("%Y-%m-%d").to_string();

    let outcome: PayrollRunOutcome = persistence
        .run_payroll(
            &period.to_string(),
            &payment_date,
            Money::MONTHLY_SALARY.cents(),
        )
        .map_err(translate_persistence_error)?;
    info!(
        pay_period = %period,
        created = outcome.created,
        skipped = outcome.skipped,
        "Payroll run complete"
    );

    Ok(outcome)
}

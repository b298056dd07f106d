// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard aggregate queries.

use chrono::NaiveDate;
use diesel::dsl::{count, sql};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;
use hrms_domain::LeaveStatus;
use tracing::debug;

use crate::data_models::DashboardStats;
use crate::diesel_schema::{employees, leave_request, payroll};
use crate::error::PersistenceError;

/// Computes the dashboard aggregates in four independent queries.
///
/// - total employee count
/// - pending leave-request count
/// - approved leaves whose span covers `today`
/// - sum of all payroll amounts in cents
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `today` - The date used for the on-leave-today check
///
/// # Errors
///
/// Returns an error if any of the queries fail.
pub fn get_dashboard_stats(
    conn: &mut SqliteConnection,
    today: NaiveDate,
) -> Result<DashboardStats, PersistenceError> {
    debug!("Computing dashboard stats for {}", today);

    let total_employees: i64 = employees::table
        .select(count(employees::id))
        .first(conn)?;

    let pending_leaves: i64 = leave_request::table
        .filter(leave_request::status.eq(LeaveStatus::Pending.as_str()))
        .select(count(leave_request::id))
        .first(conn)?;

    let today_str: String = today.format("%Y-%m-%d").to_string();
    let on_leave_today: i64 = leave_request::table
        .filter(leave_request::status.eq(LeaveStatus::Approved.as_str()))
        .filter(leave_request::start_date.le(today_str.clone()))
        .filter(leave_request::end_date.ge(today_str))
        .select(count(leave_request::id))
        .first(conn)?;

    // SUM over an empty table is NULL; COALESCE keeps the load a
    // plain BigInt.
    let total_payroll_cents: i64 = payroll::table
        .select(sql::<BigInt>("COALESCE(SUM(amount_cents), 0)"))
        .first(conn)?;

    Ok(DashboardStats {
        total_employees,
        pending_leaves,
        on_leave_today,
        total_payroll_cents,
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard operations.

use chrono::Utc;
use hrms_domain::Money;
use hrms_persistence::{DashboardStats, Persistence};
use tracing::debug;

use crate::auth::Viewer;
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::DashboardStatsResponse;

/// Computes the dashboard aggregates as of today.
///
/// The dashboard is the default landing view and is open to every
/// signed-in viewer regardless of role.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn get_dashboard_stats(
    persistence: &mut Persistence,
    viewer: &Viewer,
) -> Result<DashboardStatsResponse, ApiError> {
    debug!(viewer = %viewer.user.email, "Computing dashboard stats");

    let stats: DashboardStats = persistence
        .get_dashboard_stats(Utc::now().date_naive())
        .map_err(translate_persistence_error)?;

    Ok(DashboardStatsResponse {
        total_employees: stats.total_employees,
        pending_leaves: stats.pending_leaves,
        on_leave_today: stats.on_leave_today,
        total_payroll_cents: stats.total_payroll_cents,
        total_payroll_display: Money::from_cents(stats.total_payroll_cents).to_string(),
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response payloads for the API layer.

use serde::{Deserialize, Serialize};

/// Sign-up request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    /// The email address to register.
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// Sign-in request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    /// The identity email.
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// Query parameters for the employee directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeListQuery {
    /// Zero-based page index. Defaults to the first page.
    pub page: Option<i64>,
    /// Case-insensitive substring to match against name, email, and
    /// job role.
    pub search: Option<String>,
}

/// Request to create an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Job role or title.
    pub job_role: Option<String>,
    /// Employment status. Defaults to `Active`.
    pub status: Option<String>,
    /// Joining date (`YYYY-MM-DD`).
    pub join_date: Option<String>,
}

/// Request to update an employee. Absent fields keep their stored
/// values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Job role or title.
    pub job_role: Option<String>,
    /// Employment status.
    pub status: Option<String>,
    /// Joining date (`YYYY-MM-DD`).
    pub join_date: Option<String>,
}

/// Query parameters for the leave request list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveListQuery {
    /// Review status filter. `All` or absent means no filter.
    pub status: Option<String>,
    /// Owning-employee filter. Only honored for elevated viewers.
    pub employee_id: Option<i64>,
}

/// Request to submit a leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitLeaveRequest {
    /// The employee the leave is for. Only honored for elevated
    /// viewers; everyone else submits for their own employee row.
    pub employee_id: Option<i64>,
    /// Kind of leave requested.
    pub leave_type: String,
    /// First day of leave (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of leave (`YYYY-MM-DD`).
    pub end_date: String,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// Request to review a leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeaveStatusRequest {
    /// The new review status, `Approved` or `Rejected`.
    pub status: String,
}

/// Dashboard aggregates with the payroll total pre-formatted for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    /// Total number of employee rows.
    pub total_employees: i64,
    /// Number of leave requests awaiting a decision.
    pub pending_leaves: i64,
    /// Number of approved leaves whose span covers today.
    pub on_leave_today: i64,
    /// Sum of all payroll amounts in cents.
    pub total_payroll_cents: i64,
    /// The payroll sum formatted as dollars.
    pub total_payroll_display: String,
}

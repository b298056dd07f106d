// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain data structs returned by the persistence layer.
//!
//! These carry stored representations (statuses and roles as strings,
//! dates as ISO 8601 text). The boundary layer converts them to domain
//! types where it needs the stronger guarantees.

use serde::{Deserialize, Serialize};

/// Data for an employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeData {
    /// Row identifier.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Phone number, if recorded.
    pub phone: Option<String>,
    /// Department, if recorded.
    pub department: Option<String>,
    /// Job role or title, if recorded.
    pub job_role: Option<String>,
    /// Employment status string.
    pub status: String,
    /// Joining date (`YYYY-MM-DD`), if recorded.
    pub join_date: Option<String>,
    /// Stored system role string.
    pub system_role: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Input fields for creating or updating an employee row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeFields {
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
    /// Employment status string.
    pub status: String,
    /// Joining date (`YYYY-MM-DD`).
    pub join_date: Option<String>,
}

/// One page of the employee directory with the exact total row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePage {
    /// The rows on this page.
    pub employees: Vec<EmployeeData>,
    /// Total rows matching the filter across all pages.
    pub total_count: i64,
}

/// Data for a leave request row with the embedded employee summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestData {
    /// Row identifier.
    pub id: i64,
    /// The requesting employee's row identifier.
    pub employee_id: i64,
    /// Kind of leave requested.
    pub leave_type: String,
    /// First day of leave (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of leave (`YYYY-MM-DD`).
    pub end_date: String,
    /// Free-text reason, if given.
    pub reason: Option<String>,
    /// Review status string.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
    /// The employee's first name.
    pub employee_first_name: String,
    /// The employee's last name.
    pub employee_last_name: String,
    /// The employee's email address.
    pub employee_email: String,
}

/// Data for a payroll row with the embedded employee summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecordData {
    /// Row identifier.
    pub id: i64,
    /// The paid employee's row identifier.
    pub employee_id: i64,
    /// Gross amount in cents.
    pub amount_cents: i64,
    /// Disbursement date (`YYYY-MM-DD`).
    pub payment_date: String,
    /// Pay period (`YYYY-MM`).
    pub pay_period: String,
    /// Settlement status string.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
    /// The employee's first name.
    pub employee_first_name: String,
    /// The employee's last name.
    pub employee_last_name: String,
    /// The employee's email address.
    pub employee_email: String,
    /// The employee's job role, if recorded.
    pub employee_job_role: Option<String>,
}

/// Outcome of a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunOutcome {
    /// Number of payroll rows created.
    pub created: usize,
    /// Number of active employees skipped because a row for the pay
    /// period already existed.
    pub skipped: usize,
}

/// Data for an identity row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityData {
    /// Row identifier.
    pub id: i64,
    /// Unique email address.
    pub email: String,
    /// Bcrypt password hash.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for a session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// Row identifier.
    pub id: i64,
    /// The opaque session token.
    pub session_token: String,
    /// The owning identity's row identifier.
    pub identity_id: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiry timestamp (RFC 3339, UTC).
    pub expires_at: String,
}

/// Aggregate counts for the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total number of employee rows.
    pub total_employees: i64,
    /// Number of leave requests awaiting a decision.
    pub pending_leaves: i64,
    /// Number of approved leaves whose span covers today.
    pub on_leave_today: i64,
    /// Sum of all payroll amounts in cents.
    pub total_payroll_cents: i64,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Pastel HRMS.
//!
//! This crate sits between the HTTP server and the persistence layer.
//! It owns the authentication service (sign up / sign in / sign out /
//! session snapshots with a session-change broadcast), the session
//! resolver that folds those events into one observable session state,
//! the role gate, and the page operations (employee directory, leave
//! approvals, payroll runs, dashboard stats) with explicit error
//! translation.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod gate;
mod operations;
mod password_policy;
mod request_response;
mod resolver;

#[cfg(test)]
mod tests;

pub use auth::{AuthSession, AuthenticationService, SessionEvent, SessionUser, Viewer};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use gate::{GateDecision, RoleGate};
pub use operations::dashboard::get_dashboard_stats;
pub use operations::employees::{
    EMPLOYEE_PAGE_SIZE, create_employee, delete_employee, list_employees, update_employee,
};
pub use operations::leaves::{list_leave_requests, submit_leave_request, update_leave_status};
pub use operations::payroll::{list_payroll_records, run_payroll};
pub use password_policy::{PasswordPolicyError, validate_password};
pub use request_response::{
    CreateEmployeeRequest, DashboardStatsResponse, EmployeeListQuery, LeaveListQuery,
    SignInRequest, SignUpRequest, SubmitLeaveRequest, UpdateEmployeeRequest,
    UpdateLeaveStatusRequest,
};
pub use resolver::{SessionResolver, SessionState, WATCHDOG_TIMEOUT};

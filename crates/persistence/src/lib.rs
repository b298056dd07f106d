// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Pastel HRMS.
//!
//! This crate provides database persistence for the HR tables
//! (`employees`, `leave_request`, `payroll`) and the identity tables
//! (`identities`, `sessions`). It is built on Diesel over `SQLite`:
//! unique in-memory databases for tests, file-based with WAL for
//! deployment. Migrations are embedded and run at connection time.
//!
//! Queries live in `queries/`, writes in `mutations/`; the
//! [`Persistence`] adapter is the single public entry point.

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

use chrono::NaiveDate;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    DashboardStats, EmployeeData, EmployeeFields, EmployeePage, IdentityData, LeaveRequestData,
    PayrollRecordData, PayrollRunOutcome, SessionData,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
///
/// Backend configuration happens once at construction time and is
/// transparent to callers.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Employee Directory
    // ========================================================================

    /// Retrieves one page of the employee directory with the exact
    /// total count of matching rows.
    ///
    /// # Arguments
    ///
    /// * `page` - Zero-based page number
    /// * `page_size` - Rows per page
    /// * `search` - Optional search term, OR-matched against first name,
    ///   last name, email, and job role
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_employees(
        &mut self,
        page: i64,
        page_size: i64,
        search: Option<&str>,
    ) -> Result<EmployeePage, PersistenceError> {
        queries::employees::list_employees(&mut self.conn, page, page_size, search)
    }

    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_employee_by_id(
        &mut self,
        employee_id: i64,
    ) -> Result<Option<EmployeeData>, PersistenceError> {
        queries::employees::get_employee_by_id(&mut self.conn, employee_id)
    }

    /// Retrieves an employee by email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_employee_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<EmployeeData>, PersistenceError> {
        queries::employees::get_employee_by_email(&mut self.conn, email)
    }

    /// Retrieves the stored system role for an identity email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    /// Returns `Ok(None)` if no employee row carries the email.
    pub fn get_system_role_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<String>, PersistenceError> {
        queries::employees::get_system_role_by_email(&mut self.conn, email)
    }

    /// Creates a new employee row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if the email is
    /// already taken, or another error if the insert fails.
    pub fn create_employee(&mut self, fields: &EmployeeFields) -> Result<i64, PersistenceError> {
        mutations::employees::create_employee(&mut self.conn, fields)
    }

    /// Updates an existing employee row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no row matches, or
    /// another error if the update fails.
    pub fn update_employee(
        &mut self,
        employee_id: i64,
        fields: &EmployeeFields,
    ) -> Result<(), PersistenceError> {
        mutations::employees::update_employee(&mut self.conn, employee_id, fields)
    }

    /// Deletes an employee row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no row matches, or
    /// another error if the delete fails.
    pub fn delete_employee(&mut self, employee_id: i64) -> Result<(), PersistenceError> {
        mutations::employees::delete_employee(&mut self.conn, employee_id)
    }

    /// Sets the stored system role for the employee with the given email.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no employee carries the
    /// email, or another error if the update fails.
    pub fn set_system_role(
        &mut self,
        email: &str,
        system_role: &str,
    ) -> Result<(), PersistenceError> {
        mutations::employees::set_system_role(&mut self.conn, email, system_role)
    }

    // ========================================================================
    // Leave Requests
    // ========================================================================

    /// Lists leave requests with their embedded employee summary,
    /// ordered by start date descending.
    ///
    /// # Arguments
    ///
    /// * `status` - Optional review status filter
    /// * `employee_id` - Optional owning-employee filter
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_leave_requests(
        &mut self,
        status: Option<&str>,
        employee_id: Option<i64>,
    ) -> Result<Vec<LeaveRequestData>, PersistenceError> {
        queries::leaves::list_leave_requests(&mut self.conn, status, employee_id)
    }

    /// Retrieves a leave request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_leave_request_by_id(
        &mut self,
        leave_id: i64,
    ) -> Result<Option<LeaveRequestData>, PersistenceError> {
        queries::leaves::get_leave_request_by_id(&mut self.conn, leave_id)
    }

    /// Creates a new leave request in the `Pending` state.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_leave_request(
        &mut self,
        employee_id: i64,
        leave_type: &str,
        start_date: &str,
        end_date: &str,
        reason: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::leaves::create_leave_request(
            &mut self.conn,
            employee_id,
            leave_type,
            start_date,
            end_date,
            reason,
        )
    }

    /// Updates the review status of a leave request.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no row matches, or
    /// another error if the update fails.
    pub fn update_leave_status(
        &mut self,
        leave_id: i64,
        status: &str,
    ) -> Result<(), PersistenceError> {
        mutations::leaves::update_leave_status(&mut self.conn, leave_id, status)
    }

    // ========================================================================
    // Payroll
    // ========================================================================

    /// Lists payroll records with their embedded employee summary,
    /// ordered by payment date descending.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - Optional owning-employee filter
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_payroll_records(
        &mut self,
        employee_id: Option<i64>,
    ) -> Result<Vec<PayrollRecordData>, PersistenceError> {
        queries::payroll::list_payroll_records(&mut self.conn, employee_id)
    }

    /// Runs payroll for every active employee.
    ///
    /// The `(employee_id, pay_period)` unique constraint makes the run
    /// idempotent: employees who already have a record for the period
    /// are skipped and counted, never duplicated.
    ///
    /// # Arguments
    ///
    /// * `pay_period` - The pay period (`YYYY-MM`)
    /// * `payment_date` - The disbursement date (`YYYY-MM-DD`)
    /// * `amount_cents` - The gross amount per employee in cents
    ///
    /// # Errors
    ///
    /// Returns an error if the run fails for a reason other than the
    /// uniqueness rule.
    pub fn run_payroll(
        &mut self,
        pay_period: &str,
        payment_date: &str,
        amount_cents: i64,
    ) -> Result<PayrollRunOutcome, PersistenceError> {
        mutations::payroll::run_payroll(&mut self.conn, pay_period, payment_date, amount_cents)
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Computes the dashboard aggregates.
    ///
    /// # Arguments
    ///
    /// * `today` - The date used for the on-leave-today check
    ///
    /// # Errors
    ///
    /// Returns an error if any of the queries fail.
    pub fn get_dashboard_stats(
        &mut self,
        today: NaiveDate,
    ) -> Result<DashboardStats, PersistenceError> {
        queries::stats::get_dashboard_stats(&mut self.conn, today)
    }

    // ========================================================================
    // Identities & Sessions
    // ========================================================================

    /// Creates a new identity with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if the email is
    /// already registered, or another error if the insert fails.
    pub fn create_identity(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::identity::create_identity(&mut self.conn, email, password)
    }

    /// Retrieves an identity by email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_identity_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<IdentityData>, PersistenceError> {
        queries::identity::get_identity_by_email(&mut self.conn, email)
    }

    /// Retrieves an identity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_identity_by_id(
        &mut self,
        identity_id: i64,
    ) -> Result<Option<IdentityData>, PersistenceError> {
        queries::identity::get_identity_by_id(&mut self.conn, identity_id)
    }

    /// Creates a new session for an identity.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `identity_id` - The identity ID
    /// * `expires_at` - The expiration timestamp (RFC 3339, UTC)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        identity_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::identity::create_session(&mut self.conn, session_token, identity_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::identity::get_session_by_token(&mut self.conn, session_token)
    }

    /// Extends the expiry of an existing session.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no session matches, or
    /// another error if the update fails.
    pub fn update_session_expiry(
        &mut self,
        session_token: &str,
        expires_at: &str,
    ) -> Result<(), PersistenceError> {
        mutations::identity::update_session_expiry(&mut self.conn, session_token, expires_at)
    }

    /// Deletes a session by token. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::identity::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions that expired at or before the given instant.
    ///
    /// # Arguments
    ///
    /// * `now` - The current timestamp (RFC 3339, UTC)
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::identity::delete_expired_sessions(&mut self.conn, now)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if password verification fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::identity::verify_password(password, password_hash)
    }
}

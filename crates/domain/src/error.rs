// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by domain-level validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The email address does not match the accepted format.
    InvalidEmail(String),
    /// The system role string is not one of `admin`, `hr`, or `employee`.
    InvalidRole(String),
    /// The employee status string is not recognized.
    InvalidEmployeeStatus(String),
    /// The leave status string is not recognized.
    InvalidLeaveStatus(String),
    /// The payroll status string is not recognized.
    InvalidPayrollStatus(String),
    /// The pay period string is not a valid `YYYY-MM` value.
    InvalidPayPeriod(String),
    /// A required field was empty.
    MissingField {
        /// The name of the missing field.
        field: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "Invalid email format: '{value}'"),
            Self::InvalidRole(value) => {
                write!(
                    f,
                    "Invalid system role: '{value}'. Must be 'admin', 'hr', or 'employee'"
                )
            }
            Self::InvalidEmployeeStatus(value) => {
                write!(f, "Invalid employee status: '{value}'")
            }
            Self::InvalidLeaveStatus(value) => write!(f, "Invalid leave status: '{value}'"),
            Self::InvalidPayrollStatus(value) => {
                write!(f, "Invalid payroll status: '{value}'")
            }
            Self::InvalidPayPeriod(value) => {
                write!(f, "Invalid pay period: '{value}'. Expected YYYY-MM")
            }
            Self::MissingField { field } => write!(f, "{field} is required"),
        }
    }
}

impl std::error::Error for DomainError {}

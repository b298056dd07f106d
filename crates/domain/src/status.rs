// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Employment status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeStatus {
    /// On the payroll and counted in payroll runs.
    #[default]
    Active,
    /// No longer employed, retained for history.
    Inactive,
    /// Employed but currently on leave.
    OnLeave,
}

impl FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            "On Leave" => Ok(Self::OnLeave),
            _ => Err(DomainError::InvalidEmployeeStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EmployeeStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }
}

/// Review state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeaveStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Granted.
    Approved,
    /// Denied.
    Rejected,
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidLeaveStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LeaveStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// Settlement state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PayrollStatus {
    /// Disbursed.
    Paid,
    /// Created but not yet disbursed.
    #[default]
    Pending,
    /// Disbursement attempted and failed.
    Failed,
}

impl FromStr for PayrollStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paid" => Ok(Self::Paid),
            "Pending" => Ok(Self::Pending),
            "Failed" => Ok(Self::Failed),
            _ => Err(DomainError::InvalidPayrollStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PayrollStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_status_round_trip() {
        for status in [
            EmployeeStatus::Active,
            EmployeeStatus::Inactive,
            EmployeeStatus::OnLeave,
        ] {
            assert_eq!(EmployeeStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_employee_status_rejects_unknown() {
        assert!(EmployeeStatus::from_str("Retired").is_err());
        assert!(EmployeeStatus::from_str("active").is_err());
    }

    #[test]
    fn test_leave_status_round_trip() {
        for status in [
            LeaveStatus::Pending,
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
        ] {
            assert_eq!(LeaveStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_payroll_status_round_trip() {
        for status in [
            PayrollStatus::Paid,
            PayrollStatus::Pending,
            PayrollStatus::Failed,
        ] {
            assert_eq!(PayrollStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(EmployeeStatus::default(), EmployeeStatus::Active);
        assert_eq!(LeaveStatus::default(), LeaveStatus::Pending);
        assert_eq!(PayrollStatus::default(), PayrollStatus::Pending);
    }
}

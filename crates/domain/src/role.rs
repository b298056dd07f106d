// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Application-level access tier for an authenticated identity.
///
/// The role is derived from the `system_role` column of the matching
/// employee row and is used only for gating access to views and
/// operations. It is never written back as a side effect of gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SystemRole {
    /// Full access, including payroll runs and admin promotion.
    Admin,
    /// Human-resources access: employee directory and leave decisions.
    Hr,
    /// Baseline access: own leave and payroll records only.
    #[default]
    Employee,
}

impl FromStr for SystemRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "hr" => Ok(Self::Hr),
            "employee" => Ok(Self::Employee),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for SystemRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SystemRole {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::Employee => "employee",
        }
    }

    /// Resolves a role from an optional stored value.
    ///
    /// Absent or unrecognized values resolve to the named default
    /// `Employee`. The role lookup fails open, never closed.
    #[must_use]
    pub fn resolve(value: Option<&str>) -> Self {
        value
            .and_then(|s| Self::from_str(s).ok())
            .unwrap_or_default()
    }

    /// Returns whether this role may act on other employees' records.
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Self::Admin | Self::Hr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(SystemRole::from_str("Admin"), Ok(SystemRole::Admin));
        assert_eq!(SystemRole::from_str("HR"), Ok(SystemRole::Hr));
        assert_eq!(SystemRole::from_str("employee"), Ok(SystemRole::Employee));
    }

    #[test]
    fn test_parse_rejects_unknown_role() {
        assert_eq!(
            SystemRole::from_str("superuser"),
            Err(DomainError::InvalidRole(String::from("superuser")))
        );
    }

    #[test]
    fn test_resolve_defaults_to_employee() {
        assert_eq!(SystemRole::resolve(None), SystemRole::Employee);
        assert_eq!(SystemRole::resolve(Some("")), SystemRole::Employee);
        assert_eq!(SystemRole::resolve(Some("manager")), SystemRole::Employee);
        assert_eq!(SystemRole::resolve(Some("hr")), SystemRole::Hr);
    }

    #[test]
    fn test_elevation() {
        assert!(SystemRole::Admin.is_elevated());
        assert!(SystemRole::Hr.is_elevated());
        assert!(!SystemRole::Employee.is_elevated());
    }
}

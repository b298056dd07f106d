// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A validated email address.
///
/// The accepted format is deliberately loose: a non-empty local part, a
/// single `@`, and a domain containing at least one interior dot, with
/// no whitespace anywhere. This is a form-level plausibility check, not
/// RFC 5321 conformance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress {
    value: String,
}

impl EmailAddress {
    /// Parses and validates an email address.
    ///
    /// The value is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the value does not match
    /// the accepted format.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if Self::is_valid(trimmed) {
            Ok(Self {
                value: trimmed.to_string(),
            })
        } else {
            Err(DomainError::InvalidEmail(value.to_string()))
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn is_valid(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        // The domain needs a dot with non-empty labels on both sides.
        domain
            .rfind('.')
            .is_some_and(|dot| dot > 0 && dot + 1 < domain.len())
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(EmailAddress::parse("a@b.com").is_ok());
        assert!(EmailAddress::parse("jane.doe+hr@example.co.uk").is_ok());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let email: EmailAddress = EmailAddress::parse("  a@b.com  ").unwrap();
        assert_eq!(email.value(), "a@b.com");
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for bad in [
            "",
            "plainaddress",
            "@no-local.com",
            "no-domain@",
            "no-dot@domain",
            "trailing-dot@domain.",
            ".leading@dot",
            "two@@at.com",
            "spa ce@domain.com",
        ] {
            assert!(EmailAddress::parse(bad).is_err(), "accepted: {bad}");
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::email::EmailAddress;
use crate::error::DomainError;

/// Validates the required fields of an employee form submission.
///
/// Checks run in a fixed order so the caller always reports the first
/// problem: first name, last name, email presence, then email format.
/// Values are trimmed before the presence checks.
///
/// # Errors
///
/// Returns `DomainError::MissingField` for the first empty required
/// field, or `DomainError::InvalidEmail` if the email is present but
/// malformed.
pub fn validate_employee_fields(
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<EmailAddress, DomainError> {
    if first_name.trim().is_empty() {
        return Err(DomainError::MissingField {
            field: String::from("First name"),
        });
    }
    if last_name.trim().is_empty() {
        return Err(DomainError::MissingField {
            field: String::from("Last name"),
        });
    }
    if email.trim().is_empty() {
        return Err(DomainError::MissingField {
            field: String::from("Email"),
        });
    }
    EmailAddress::parse(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_first_missing_field() {
        assert_eq!(
            validate_employee_fields("", "", ""),
            Err(DomainError::MissingField {
                field: String::from("First name")
            })
        );
        assert_eq!(
            validate_employee_fields("Ada", "  ", ""),
            Err(DomainError::MissingField {
                field: String::from("Last name")
            })
        );
        assert_eq!(
            validate_employee_fields("Ada", "Lovelace", "  "),
            Err(DomainError::MissingField {
                field: String::from("Email")
            })
        );
    }

    #[test]
    fn test_malformed_email_after_presence_checks() {
        assert_eq!(
            validate_employee_fields("Ada", "Lovelace", "not-an-email"),
            Err(DomainError::InvalidEmail(String::from("not-an-email")))
        );
    }

    #[test]
    fn test_valid_fields_return_parsed_email() {
        let email: EmailAddress =
            validate_employee_fields("Ada", "Lovelace", " ada@example.com ").unwrap();
        assert_eq!(email.value(), "ada@example.com");
    }
}

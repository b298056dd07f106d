// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! Sign-up passwords must meet the same minimum the original hosted
//! auth service enforced: at least six characters.

use thiserror::Error;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password was empty.
    #[error("Password is required")]
    Empty,

    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },
}

/// Validates a sign-up password.
///
/// # Arguments
///
/// * `password` - The password to validate
///
/// # Errors
///
/// Returns a `PasswordPolicyError` if the password does not meet policy
/// requirements.
pub fn validate_password(password: &str) -> Result<(), PasswordPolicyError> {
    if password.is_empty() {
        return Err(PasswordPolicyError::Empty);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min_length: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

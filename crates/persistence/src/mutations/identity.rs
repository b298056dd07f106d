// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity and session mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::{identities, sessions};
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new identity.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The email address
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmail` if the email is already
/// registered, or another error if the insert fails.
pub fn create_identity(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating identity");

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let result: Result<usize, diesel::result::Error> = diesel::insert_into(identities::table)
        .values((
            identities::email.eq(email),
            identities::password_hash.eq(&password_hash),
        ))
        .execute(conn);

    match result {
        Ok(_) => {}
        Err(e) => match PersistenceError::from(e) {
            PersistenceError::UniqueViolation(_) => {
                return Err(PersistenceError::DuplicateEmail(email.to_string()));
            }
            other => return Err(other),
        },
    }

    let identity_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(identity_id, "Identity created successfully");

    Ok(identity_id)
}

/// Creates a new session for an identity.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `identity_id` - The identity ID
/// * `expires_at` - The expiration timestamp (RFC 3339, UTC)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    identity_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(identity_id, "Creating session");

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::identity_id.eq(identity_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    Ok(sqlite::get_last_insert_rowid(conn)?)
}

/// Extends the expiry of an existing session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token
/// * `expires_at` - The new expiration timestamp (RFC 3339, UTC)
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no session matches, or
/// another error if the update fails.
pub fn update_session_expiry(
    conn: &mut SqliteConnection,
    session_token: &str,
    expires_at: &str,
) -> Result<(), PersistenceError> {
    debug!("Extending session expiry");

    let updated: usize = diesel::update(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .set(sessions::expires_at.eq(expires_at))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound("Session not found".to_string()));
    }

    Ok(())
}

/// Deletes a session by token.
///
/// Deleting a token that does not exist is not an error; sign-out is
/// idempotent.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token to delete
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes all sessions that expired at or before the given instant.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    Ok(diesel::delete(sessions::table)
        .filter(sessions::expires_at.le(now))
        .execute(conn)?)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity and session queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{IdentityData, SessionData};
use crate::diesel_schema::{identities, sessions};
use crate::error::PersistenceError;

/// Diesel Queryable struct for identity rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = identities)]
struct IdentityRow {
    id: i64,
    email: String,
    password_hash: String,
    created_at: String,
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    id: i64,
    session_token: String,
    identity_id: i64,
    created_at: String,
    expires_at: String,
}

/// Retrieves an identity by email address.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The email address to search for
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the identity is not found.
pub fn get_identity_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<IdentityData>, PersistenceError> {
    debug!("Looking up identity by email");

    let result: Result<IdentityRow, diesel::result::Error> = identities::table
        .filter(identities::email.eq(email))
        .select(IdentityRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(IdentityData {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves an identity by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `identity_id` - The identity ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the identity is not found.
pub fn get_identity_by_id(
    conn: &mut SqliteConnection,
    identity_id: i64,
) -> Result<Option<IdentityData>, PersistenceError> {
    debug!("Looking up identity by ID: {}", identity_id);

    let result: Result<IdentityRow, diesel::result::Error> = identities::table
        .filter(identities::id.eq(identity_id))
        .select(IdentityRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(IdentityData {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a session by token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            id: row.id,
            session_token: row.session_token,
            identity_id: row.identity_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Verifies a password against a stored hash.
///
/// # Arguments
///
/// * `password` - The plain text password to verify
/// * `password_hash` - The stored bcrypt hash
///
/// # Errors
///
/// Returns an error if password verification fails.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}

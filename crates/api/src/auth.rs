// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication service and session types.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use hrms_domain::{EmailAddress, SystemRole};
use hrms_persistence::{IdentityData, Persistence, SessionData};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
use crate::password_policy;

/// Session lifetime granted at sign-in and extended on refresh.
const SESSION_LIFETIME_DAYS: i64 = 30;

/// Capacity of the session-change broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// The signed-in identity visible to session consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// The identity's row identifier.
    pub identity_id: i64,
    /// The identity's email address.
    pub email: String,
}

/// A session-change notification.
///
/// Broadcast to every subscriber whenever a session is created,
/// refreshed, or torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was created by sign-in or sign-up.
    SignedIn {
        /// The new session's token.
        token: String,
    },
    /// A session's expiry was extended.
    TokenRefreshed {
        /// The refreshed session's token.
        token: String,
    },
    /// A session was torn down.
    SignedOut,
}

/// The result of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// The opaque session token.
    pub token: String,
    /// The signed-in identity.
    pub user: SessionUser,
    /// Expiry timestamp (RFC 3339, UTC).
    pub expires_at: String,
}

/// The caller of a page operation: a signed-in identity with its
/// resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// The signed-in identity.
    pub user: SessionUser,
    /// The role resolved for the identity's email.
    pub role: SystemRole,
}

impl Viewer {
    /// Creates a new viewer.
    #[must_use]
    pub const fn new(user: SessionUser, role: SystemRole) -> Self {
        Self { user, role }
    }

    /// Checks that this viewer holds an elevated role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for a non-elevated viewer.
    pub fn require_elevated(&self, action: &str) -> Result<(), AuthError> {
        if self.role.is_elevated() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("admin or hr"),
            })
        }
    }

    /// Checks that this viewer holds the admin role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for a non-admin viewer.
    pub fn require_admin(&self, action: &str) -> Result<(), AuthError> {
        if self.role == SystemRole::Admin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("admin"),
            })
        }
    }
}

/// Authentication service for session-based authentication.
///
/// Holds the session-change broadcast channel; the persistence handle
/// is passed per call so the caller controls locking.
#[derive(Debug, Clone)]
pub struct AuthenticationService {
    events: broadcast::Sender<SessionEvent>,
}

impl Default for AuthenticationService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthenticationService {
    /// Creates a new authentication service with its own broadcast
    /// channel.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { events }
    }

    /// Subscribes to session-change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Registers a new identity and signs it in immediately.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The email address to register
    /// * `password` - The plain-text password
    ///
    /// # Errors
    ///
    /// Returns an error if either field fails validation, the email is
    /// already registered, or persistence fails.
    pub fn sign_up(
        &self,
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let email: EmailAddress = EmailAddress::parse(email).map_err(translate_domain_error)?;
        password_policy::validate_password(password)?;

        info!("Handling sign-up request");

        let identity_id: i64 = persistence
            .create_identity(email.value(), password)
            .map_err(translate_persistence_error)?;

        let user: SessionUser = SessionUser {
            identity_id,
            email: email.value().to_string(),
        };
        let session: AuthSession = self.open_session(persistence, user)?;

        Ok(session)
    }

    /// Verifies credentials and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The identity email
    /// * `password` - The plain-text password
    ///
    /// # Errors
    ///
    /// Returns an error if either field is missing, the credentials are
    /// invalid, or persistence fails.
    pub fn sign_in(
        &self,
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Email and password are required"),
            });
        }

        info!("Handling sign-in request");

        let identity: IdentityData = persistence
            .get_identity_by_email(email.trim())
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid login credentials"),
            })?;

        let verified: bool = persistence
            .verify_password(password, &identity.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to verify password: {e}"),
            })?;
        if !verified {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid login credentials"),
            });
        }

        let user: SessionUser = SessionUser {
            identity_id: identity.id,
            email: identity.email,
        };
        self.open_session(persistence, user)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: e.to_string(),
            })
    }

    /// Tears down the session for the given token. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the session delete fails.
    pub fn sign_out(
        &self,
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        info!("Handling sign-out request");

        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        let _ = self.events.send(SessionEvent::SignedOut);

        Ok(())
    }

    /// Looks up the session for a token.
    ///
    /// Returns `Ok(None)` for an unknown or expired token; only a
    /// persistence fault is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the session or identity lookup fails.
    pub fn current_session(
        &self,
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<Option<SessionUser>, AuthError> {
        let Some(session) = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
        else {
            return Ok(None);
        };

        if Self::is_expired(&session)? {
            return Ok(None);
        }

        let identity: Option<IdentityData> = persistence
            .get_identity_by_id(session.identity_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?;

        Ok(identity.map(|identity| SessionUser {
            identity_id: identity.id,
            email: identity.email,
        }))
    }

    /// Extends the expiry of an existing session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown, expired, or the
    /// update fails.
    pub fn refresh(
        &self,
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<String, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        if Self::is_expired(&session)? {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let expires_at: String = Self::expiry_from_now();
        persistence
            .update_session_expiry(session_token, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to extend session: {e}"),
            })?;

        let _ = self.events.send(SessionEvent::TokenRefreshed {
            token: session_token.to_string(),
        });

        Ok(expires_at)
    }

    /// Resolves the system role for an identity email.
    ///
    /// The lookup fails open: a missing employee row, an unrecognized
    /// stored value, or a persistence fault all resolve to the baseline
    /// `employee` role with a warning, never an error.
    pub fn resolve_role(&self, persistence: &mut Persistence, email: &str) -> SystemRole {
        match persistence.get_system_role_by_email(email) {
            Ok(stored) => {
                if stored.is_none() {
                    warn!("No employee row for identity, defaulting role to employee");
                }
                SystemRole::resolve(stored.as_deref())
            }
            Err(e) => {
                warn!(error = %e, "Role lookup failed, defaulting role to employee");
                SystemRole::default()
            }
        }
    }

    fn open_session(
        &self,
        persistence: &mut Persistence,
        user: SessionUser,
    ) -> Result<AuthSession, ApiError> {
        let token: String = Self::generate_session_token();
        let expires_at: String = Self::expiry_from_now();

        persistence
            .create_session(&token, user.identity_id, &expires_at)
            .map_err(translate_persistence_error)?;

        let _ = self.events.send(SessionEvent::SignedIn {
            token: token.clone(),
        });

        Ok(AuthSession {
            token,
            user,
            expires_at,
        })
    }

    /// Generates a random session token.
    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn expiry_from_now() -> String {
        (Utc::now() + Duration::days(SESSION_LIFETIME_DAYS))
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn is_expired(session: &SessionData) -> Result<bool, AuthError> {
        let expires_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&session.expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?
            .with_timezone(&Utc);
        Ok(Utc::now() > expires_at)
    }
}

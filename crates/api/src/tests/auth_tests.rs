// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrms_domain::SystemRole;
use hrms_persistence::Persistence;

use crate::auth::{AuthSession, AuthenticationService, SessionEvent};
use crate::error::{ApiError, AuthError};
use crate::tests::{seed_employee, test_persistence};

#[test]
fn test_sign_up_creates_session() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let session: AuthSession = auth
        .sign_up(&mut persistence, "new@example.com", "secret1")
        .expect("Sign-up failed");

    assert_eq!(session.user.email, "new@example.com");
    assert!(!session.token.is_empty());

    let user = auth
        .current_session(&mut persistence, &session.token)
        .expect("Session lookup failed")
        .expect("Session should exist");
    assert_eq!(user.email, "new@example.com");
}

#[test]
fn test_sign_up_rejects_invalid_email() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let result = auth.sign_up(&mut persistence, "not-an-email", "secret1");
    assert!(matches!(result, Err(ApiError::InvalidInput { field, .. }) if field == "email"));
}

#[test]
fn test_sign_up_rejects_short_password() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let result = auth.sign_up(&mut persistence, "new@example.com", "short");
    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
}

#[test]
fn test_sign_up_rejects_duplicate_email() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    auth.sign_up(&mut persistence, "dup@example.com", "secret1")
        .expect("First sign-up failed");
    let result = auth.sign_up(&mut persistence, "dup@example.com", "secret2");
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "unique_email"
    ));
}

#[test]
fn test_sign_in_with_correct_credentials() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    auth.sign_up(&mut persistence, "user@example.com", "secret1")
        .expect("Sign-up failed");
    let session: AuthSession = auth
        .sign_in(&mut persistence, "user@example.com", "secret1")
        .expect("Sign-in failed");
    assert_eq!(session.user.email, "user@example.com");
}

#[test]
fn test_sign_in_with_wrong_password() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    auth.sign_up(&mut persistence, "user@example.com", "secret1")
        .expect("Sign-up failed");
    let result = auth.sign_in(&mut persistence, "user@example.com", "wrong-password");
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { reason }) if reason == "Invalid login credentials"
    ));
}

#[test]
fn test_sign_in_with_unknown_email() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let result = auth.sign_in(&mut persistence, "nobody@example.com", "secret1");
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { reason }) if reason == "Invalid login credentials"
    ));
}

#[test]
fn test_sign_in_requires_both_fields() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let result = auth.sign_in(&mut persistence, "", "secret1");
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { reason }) if reason == "Email and password are required"
    ));
    let result = auth.sign_in(&mut persistence, "user@example.com", "");
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { reason }) if reason == "Email and password are required"
    ));
}

#[test]
fn test_sign_out_invalidates_session_and_is_idempotent() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let session: AuthSession = auth
        .sign_up(&mut persistence, "user@example.com", "secret1")
        .expect("Sign-up failed");

    auth.sign_out(&mut persistence, &session.token)
        .expect("Sign-out failed");
    assert!(
        auth.current_session(&mut persistence, &session.token)
            .expect("Session lookup failed")
            .is_none()
    );

    auth.sign_out(&mut persistence, &session.token)
        .expect("Second sign-out should succeed");
}

#[test]
fn test_current_session_with_unknown_token() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let user = auth
        .current_session(&mut persistence, "no-such-token")
        .expect("Session lookup failed");
    assert!(user.is_none());
}

#[test]
fn test_current_session_with_expired_token() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let session: AuthSession = auth
        .sign_up(&mut persistence, "user@example.com", "secret1")
        .expect("Sign-up failed");
    persistence
        .update_session_expiry(&session.token, "2020-01-01T00:00:00Z")
        .expect("Failed to backdate session");

    let user = auth
        .current_session(&mut persistence, &session.token)
        .expect("Session lookup failed");
    assert!(user.is_none());
}

#[test]
fn test_refresh_extends_expiry() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let session: AuthSession = auth
        .sign_up(&mut persistence, "user@example.com", "secret1")
        .expect("Sign-up failed");
    let new_expiry: String = auth
        .refresh(&mut persistence, &session.token)
        .expect("Refresh failed");
    assert!(new_expiry >= session.expires_at);
}

#[test]
fn test_refresh_rejects_unknown_token() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    let result = auth.refresh(&mut persistence, "no-such-token");
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { reason }) if reason == "Invalid session token"
    ));
}

#[test]
fn test_session_events_are_broadcast() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();
    let mut events = auth.subscribe();

    let session: AuthSession = auth
        .sign_up(&mut persistence, "user@example.com", "secret1")
        .expect("Sign-up failed");
    auth.sign_out(&mut persistence, &session.token)
        .expect("Sign-out failed");

    assert_eq!(
        events.try_recv().expect("Expected sign-in event"),
        SessionEvent::SignedIn {
            token: session.token
        }
    );
    assert_eq!(
        events.try_recv().expect("Expected sign-out event"),
        SessionEvent::SignedOut
    );
}

#[test]
fn test_resolve_role_reads_employee_row() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    seed_employee(&mut persistence, "boss@example.com", SystemRole::Admin);
    assert_eq!(
        auth.resolve_role(&mut persistence, "boss@example.com"),
        SystemRole::Admin
    );
}

#[test]
fn test_resolve_role_defaults_without_employee_row() {
    let mut persistence: Persistence = test_persistence();
    let auth: AuthenticationService = AuthenticationService::new();

    assert_eq!(
        auth.resolve_role(&mut persistence, "ghost@example.com"),
        SystemRole::Employee
    );
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role gate.
//!
//! Decides, from a session state snapshot and a page's allowed roles,
//! whether to render the page, wait, or redirect. The decision is pure
//! so callers can evaluate it on every state change.

use hrms_domain::SystemRole;

use crate::resolver::SessionState;

/// The outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The session is still resolving. Show nothing yet.
    Wait,
    /// No session. Send the viewer to the login page.
    RedirectToLogin,
    /// Signed in but not allowed here. Send the viewer to their
    /// default page.
    RedirectToDefault,
    /// Signed in and allowed. Render the page.
    Render,
}

/// Pure role-based access decisions.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate;

impl RoleGate {
    /// Decides whether a viewer may see a page.
    ///
    /// An empty `allowed_roles` slice means the page only requires a
    /// session.
    #[must_use]
    pub fn decide(state: &SessionState, allowed_roles: &[SystemRole]) -> GateDecision {
        if state.loading {
            return GateDecision::Wait;
        }
        if state.user.is_none() {
            return GateDecision::RedirectToLogin;
        }
        if allowed_roles.is_empty() || allowed_roles.contains(&state.role) {
            GateDecision::Render
        } else {
            GateDecision::RedirectToDefault
        }
    }
}

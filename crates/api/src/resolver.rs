// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session resolver.
//!
//! Folds session-change events into a single observable `SessionState`.
//! Every event allocates a sequence number before any lookup work
//! starts, and the applier only accepts a resolved state whose sequence
//! is newer than the last one applied. A slow lookup can therefore
//! never clobber the outcome of a later sign-in or sign-out. A watchdog
//! forces the state out of `loading` after five seconds so consumers
//! are never stuck waiting on a lookup that will not finish.

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use hrms_domain::SystemRole;
use hrms_persistence::Persistence;
use tokio::sync::{Mutex, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Sleep, sleep};
use tracing::{debug, warn};

use crate::auth::{AuthenticationService, SessionEvent, SessionUser};

/// How long a session lookup may stay unresolved before the resolver
/// forces the state out of `loading`.
pub const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(5);

/// The resolver's observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// The signed-in identity, if any.
    pub user: Option<SessionUser>,
    /// The resolved role. Meaningless while `user` is `None`.
    pub role: SystemRole,
    /// Whether a session lookup is still in flight.
    pub loading: bool,
}

impl SessionState {
    /// The state before the first lookup has resolved.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            user: None,
            role: SystemRole::Employee,
            loading: true,
        }
    }

    /// The state with no session.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            user: None,
            role: SystemRole::Employee,
            loading: false,
        }
    }

    /// The state for a resolved session.
    #[must_use]
    pub const fn signed_in(user: SessionUser, role: SystemRole) -> Self {
        Self {
            user: Some(user),
            role,
            loading: false,
        }
    }
}

/// Updates flowing from event handling into the applier.
#[derive(Debug)]
enum Update {
    /// A lookup for the given sequence number has started.
    Loading { seq: u64 },
    /// The state resolved for the given sequence number.
    Apply { seq: u64, state: SessionState },
}

/// Owns the applier and listener tasks and exposes the state channel.
#[derive(Debug)]
pub struct SessionResolver {
    state: watch::Receiver<SessionState>,
    applier: JoinHandle<()>,
    listener: JoinHandle<()>,
}

impl SessionResolver {
    /// Spawns the resolver.
    ///
    /// Resolves `initial_token` immediately, then follows the
    /// authentication service's session-change events until shut down.
    ///
    /// # Arguments
    ///
    /// * `persistence` - Shared persistence handle for session lookups
    /// * `auth` - The authentication service to follow
    /// * `initial_token` - A previously stored session token, if any
    #[must_use]
    pub fn spawn(
        persistence: Arc<Mutex<Persistence>>,
        auth: AuthenticationService,
        initial_token: Option<String>,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(SessionState::initial());
        let (update_tx, update_rx) = mpsc::unbounded_channel::<Update>();
        let seq: Arc<AtomicU64> = Arc::new(AtomicU64::new(0));
        let events: broadcast::Receiver<SessionEvent> = auth.subscribe();

        match initial_token {
            Some(token) => {
                start_lookup(&persistence, &auth, &seq, &update_tx, token);
            }
            None => {
                let initial_seq: u64 = seq.fetch_add(1, Ordering::SeqCst) + 1;
                let _ = update_tx.send(Update::Apply {
                    seq: initial_seq,
                    state: SessionState::signed_out(),
                });
            }
        }

        let applier: JoinHandle<()> = tokio::spawn(run_applier(state_tx, update_rx));
        let listener: JoinHandle<()> =
            tokio::spawn(run_listener(persistence, auth, seq, update_tx, events));

        Self {
            state: state_rx,
            applier,
            listener,
        }
    }

    /// Returns the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribes to session state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Stops the resolver tasks.
    pub fn shutdown(&self) {
        self.applier.abort();
        self.listener.abort();
    }
}

impl Drop for SessionResolver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Allocates a sequence number and spawns a lookup task for the token.
///
/// The sequence number is taken before any await so the applier can
/// discard this lookup's result if a later event lands first.
fn start_lookup(
    persistence: &Arc<Mutex<Persistence>>,
    auth: &AuthenticationService,
    seq: &Arc<AtomicU64>,
    update_tx: &mpsc::UnboundedSender<Update>,
    token: String,
) {
    let lookup_seq: u64 = seq.fetch_add(1, Ordering::SeqCst) + 1;
    let _ = update_tx.send(Update::Loading { seq: lookup_seq });

    let persistence: Arc<Mutex<Persistence>> = Arc::clone(persistence);
    let auth: AuthenticationService = auth.clone();
    let update_tx: mpsc::UnboundedSender<Update> = update_tx.clone();
    tokio::spawn(async move {
        let state: SessionState = {
            let mut persistence = persistence.lock().await;
            match auth.current_session(&mut persistence, &token) {
                Ok(Some(user)) => {
                    let role: SystemRole = auth.resolve_role(&mut persistence, &user.email);
                    SessionState::signed_in(user, role)
                }
                Ok(None) => SessionState::signed_out(),
                Err(e) => {
                    warn!(error = %e, "Session lookup failed, resolving to signed out");
                    SessionState::signed_out()
                }
            }
        };
        let _ = update_tx.send(Update::Apply {
            seq: lookup_seq,
            state,
        });
    });
}

/// Applies updates in sequence order and runs the loading watchdog.
///
/// The watchdog is armed when the state enters `loading` and is not
/// re-armed by updates that arrive while a lookup is already pending,
/// so the bound runs from loading entry.
async fn run_applier(
    state_tx: watch::Sender<SessionState>,
    mut update_rx: mpsc::UnboundedReceiver<Update>,
) {
    let mut last_applied: u64 = 0;
    let mut current: SessionState = SessionState::initial();
    let mut watchdog: Pin<Box<Sleep>> = Box::pin(sleep(WATCHDOG_TIMEOUT));

    loop {
        tokio::select! {
            update = update_rx.recv() => {
                let Some(update) = update else { break };
                match update {
                    Update::Loading { seq } => {
                        if seq > last_applied && !current.loading {
                            current.loading = true;
                            watchdog.as_mut().reset(Instant::now() + WATCHDOG_TIMEOUT);
                            let _ = state_tx.send(current.clone());
                        }
                    }
                    Update::Apply { seq, state } => {
                        if seq > last_applied {
                            last_applied = seq;
                            current = state;
                            let _ = state_tx.send(current.clone());
                        } else {
                            debug!(seq, last_applied, "Discarding stale session state");
                        }
                    }
                }
            }
            // Force the state out of loading without advancing the
            // applied sequence number, so a late but still newest
            // lookup result is not lost.
            () = watchdog.as_mut(), if current.loading => {
                warn!("Session lookup timed out, forcing state to ready");
                current.loading = false;
                current.user = None;
                current.role = SystemRole::Employee;
                let _ = state_tx.send(current.clone());
            }
        }
    }
}

/// Follows the authentication service's session-change events.
async fn run_listener(
    persistence: Arc<Mutex<Persistence>>,
    auth: AuthenticationService,
    seq: Arc<AtomicU64>,
    update_tx: mpsc::UnboundedSender<Update>,
    mut events: broadcast::Receiver<SessionEvent>,
) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::SignedIn { token } | SessionEvent::TokenRefreshed { token }) => {
                start_lookup(&persistence, &auth, &seq, &update_tx, token);
            }
            Ok(SessionEvent::SignedOut) => {
                let signout_seq: u64 = seq.fetch_add(1, Ordering::SeqCst) + 1;
                let _ = update_tx.send(Update::Apply {
                    seq: signout_seq,
                    state: SessionState::signed_out(),
                });
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Session event listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

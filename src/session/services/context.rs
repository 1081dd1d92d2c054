//! Process-wide session state shared by the gateway and presentation.

use crate::session::{
    domain::{AuthResponse, SessionToken, User},
    ports::{TokenStore, TokenStoreResult},
};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{info, warn};

/// Coarse session state broadcast to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No token is held.
    SignedOut,
    /// A token is held.
    Authenticated,
    /// The server rejected the token; the user must sign in again.
    Expired,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<SessionToken>,
    user: Option<User>,
}

/// Holds the bearer token and signed-in user.
///
/// One instance is shared (behind `Arc`) by everything that talks to the
/// gateway. A 401 from any call invalidates it, which clears the persisted
/// token and broadcasts [`SessionStatus::Expired`].
pub struct SessionContext {
    store: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
    status: watch::Sender<SessionStatus>,
}

impl SessionContext {
    /// Creates a signed-out session backed by the given token store.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let (status, _) = watch::channel(SessionStatus::SignedOut);
        Self {
            store,
            state: RwLock::new(SessionState::default()),
            status,
        }
    }

    /// Loads a persisted token, returning whether one was found.
    ///
    /// The user stays unknown until fetched.
    ///
    /// # Errors
    ///
    /// Returns the token store error when storage cannot be read.
    pub fn restore(&self) -> TokenStoreResult<bool> {
        let Some(token) = self.store.load()? else {
            return Ok(false);
        };
        self.write_state(|state| {
            state.token = Some(token);
            state.user = None;
        });
        self.status.send_replace(SessionStatus::Authenticated);
        info!("restored persisted session token");
        Ok(true)
    }

    /// Installs a freshly issued token and user.
    ///
    /// # Errors
    ///
    /// Returns the token store error when the token cannot be persisted; the
    /// in-memory session is left unchanged in that case.
    pub fn establish(&self, auth: AuthResponse) -> TokenStoreResult<()> {
        self.store.save(&auth.token)?;
        self.write_state(|state| {
            state.token = Some(auth.token);
            state.user = Some(auth.user);
        });
        self.status.send_replace(SessionStatus::Authenticated);
        Ok(())
    }

    /// Replaces the cached user, e.g. after a profile update.
    pub fn set_user(&self, user: User) {
        self.write_state(|state| state.user = Some(user));
    }

    /// Returns the bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        self.read_state(|state| state.token.clone())
    }

    /// Returns the signed-in user, if known.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read_state(|state| state.user.clone())
    }

    /// Returns `true` while a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_state(|state| state.token.is_some())
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Subscribes to status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Drops the session after the server rejected the token.
    ///
    /// Memory is always cleared; a failure to clear persisted storage is
    /// logged because the caller is already handling a rejected request.
    pub fn invalidate(&self) {
        self.write_state(|state| *state = SessionState::default());
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear persisted token after rejection");
        }
        self.status.send_replace(SessionStatus::Expired);
        warn!("session invalidated, re-authentication required");
    }

    /// Signs out locally.
    ///
    /// # Errors
    ///
    /// Returns the token store error when the persisted token cannot be
    /// removed. Memory is cleared regardless.
    pub fn sign_out(&self) -> TokenStoreResult<()> {
        self.write_state(|state| *state = SessionState::default());
        self.status.send_replace(SessionStatus::SignedOut);
        self.store.clear()
    }

    fn read_state<T>(&self, read: impl FnOnce(&SessionState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        read(&state)
    }

    fn write_state(&self, write: impl FnOnce(&mut SessionState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        write(&mut state);
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

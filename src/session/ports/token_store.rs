//! Persistent storage port for the session token.

use crate::session::domain::SessionToken;
use std::sync::Arc;
use thiserror::Error;

/// Storage key under which the token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Result type for token store operations.
pub type TokenStoreResult<T> = Result<T, TokenStoreError>;

/// Client-local persistence for the bearer token.
///
/// Implementations hold at most one token, under [`TOKEN_KEY`].
pub trait TokenStore: Send + Sync {
    /// Reads the persisted token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when storage cannot be read.
    fn load(&self) -> TokenStoreResult<Option<SessionToken>>;

    /// Persists the token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when storage cannot be written.
    fn save(&self, token: &SessionToken) -> TokenStoreResult<()>;

    /// Removes the persisted token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when storage cannot be written.
    fn clear(&self) -> TokenStoreResult<()>;
}

/// Errors returned by token store implementations.
#[derive(Debug, Clone, Error)]
pub enum TokenStoreError {
    /// Storage-layer failure.
    #[error("token storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl TokenStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

//! In-memory token store for tests and ephemeral sessions.

use crate::session::{
    domain::SessionToken,
    ports::{TokenStore, TokenStoreError, TokenStoreResult},
};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory token store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    token: Arc<RwLock<Option<SessionToken>>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a token.
    #[must_use]
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token))),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> TokenStoreResult<Option<SessionToken>> {
        let token = self
            .token
            .read()
            .map_err(|err| TokenStoreError::storage(std::io::Error::other(err.to_string())))?;
        Ok(token.clone())
    }

    fn save(&self, token: &SessionToken) -> TokenStoreResult<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|err| TokenStoreError::storage(std::io::Error::other(err.to_string())))?;
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> TokenStoreResult<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|err| TokenStoreError::storage(std::io::Error::other(err.to_string())))?;
        *slot = None;
        Ok(())
    }
}

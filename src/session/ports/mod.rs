//! Port contracts for session management.

pub mod auth_gateway;
pub mod token_store;

pub use auth_gateway::AuthGateway;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use token_store::{TOKEN_KEY, TokenStore, TokenStoreError, TokenStoreResult};

//! Authenticated session management.
//!
//! Holds the bearer token and signed-in user, persists the token between
//! runs and drives the authentication endpoints. Laid out like the task
//! module:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

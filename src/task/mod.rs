//! Task list management for taskdeck.
//!
//! Tasks are fetched from the remote API into a local [`services::TaskStore`],
//! projected through filter and sort criteria, and mutated through
//! [`services::TaskMutationCoordinator`], which patches the local collection
//! with each server response instead of re-fetching. The module follows
//! hexagonal architecture:
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

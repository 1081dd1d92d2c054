//! Port contracts for the task list.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod gateway;

pub use gateway::TaskGateway;
#[cfg(test)]
pub use gateway::MockTaskGateway;

//! taskdeck: client for a personal task-management API.
//!
//! This crate keeps a local copy of the signed-in user's tasks, projects it
//! through filter and sort criteria, and applies create, update, delete and
//! status-toggle operations against the remote REST API, patching the local
//! copy with each server response.
//!
//! # Architecture
//!
//! taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task and session types with no I/O
//! - **Ports**: Abstract trait interfaces for the remote API and token storage
//! - **Adapters**: HTTP, file and in-memory implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task view model and mutation coordination
//! - [`session`]: Bearer token, signed-in user and authentication
//! - [`gateway`]: Shared HTTP client and error normalisation
//! - [`notification`]: Transient success and error notices
//! - [`config`]: Environment-driven client configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod gateway;
pub mod notification;
pub mod session;
pub mod task;
pub mod telemetry;

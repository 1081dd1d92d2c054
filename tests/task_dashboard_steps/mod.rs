//! Step definitions for task dashboard scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;

//! In-memory adapters for task list tests and offline use.

mod gateway;

pub use gateway::{InMemoryTaskGateway, TaskOperation};

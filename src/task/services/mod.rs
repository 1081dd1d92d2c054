//! Application services for the client-side task list.

mod coordinator;
mod store;

pub use coordinator::{TaskMutationCoordinator, TaskMutationError, TaskMutationResult};
pub use store::{LoadStatus, TaskStore};

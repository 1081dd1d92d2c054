//! Remote task endpoints.

use crate::gateway::GatewayResult;
use crate::task::domain::{Task, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;

/// Contract for the REST task resource.
///
/// The remote side is authoritative: every successful call returns the
/// server's view of the affected record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// `GET /tasks`: every task owned by the signed-in user.
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>>;

    /// `POST /tasks`: creates a task and returns it with its assigned id.
    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task>;

    /// `PUT /tasks/{id}`: applies a partial update and returns the result.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<Task>;

    /// `DELETE /tasks/{id}`.
    async fn delete_task(&self, id: &TaskId) -> GatewayResult<()>;
}

//! Orchestrates task writes against the gateway and the local collection.

use crate::gateway::ApiError;
use crate::notification::NotificationCenter;
use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId, TaskPatch},
    ports::TaskGateway,
    services::{LoadStatus, TaskStore},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task mutations.
#[derive(Debug, Clone, Error)]
pub enum TaskMutationError {
    /// Local validation rejected the input before any network call.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] ApiError),
}

impl TaskMutationError {
    /// Returns whether the failure was an expired session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Gateway(err) if err.is_unauthorized())
    }
}

impl From<TaskMutationError> for ApiError {
    fn from(err: TaskMutationError) -> Self {
        match err {
            TaskMutationError::Validation(domain) => Self::new(domain.to_string(), None),
            TaskMutationError::Gateway(api) => api,
        }
    }
}

/// Result type for task mutation operations.
pub type TaskMutationResult<T> = Result<T, TaskMutationError>;

/// Applies create, update, remove and status toggles.
///
/// Every write goes to the gateway first; the local collection is patched
/// with the server's response only on success, so a failed call leaves it
/// exactly as it was. Each operation records one notification.
#[derive(Clone)]
pub struct TaskMutationCoordinator<G, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    store: Arc<TaskStore>,
    notifications: Arc<NotificationCenter<C>>,
}

impl<G, C> TaskMutationCoordinator<G, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over shared state.
    #[must_use]
    pub const fn new(
        gateway: Arc<G>,
        store: Arc<TaskStore>,
        notifications: Arc<NotificationCenter<C>>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifications,
        }
    }

    /// Returns the local collection this coordinator patches.
    #[must_use]
    pub const fn store(&self) -> &Arc<TaskStore> {
        &self.store
    }

    /// Returns the notification centre this coordinator reports to.
    #[must_use]
    pub const fn notifications(&self) -> &Arc<NotificationCenter<C>> {
        &self.notifications
    }

    /// Fetches the collection and replaces the local copy.
    ///
    /// On failure the last successfully fetched collection is kept and the
    /// load status records the message.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Gateway`] when the fetch fails.
    pub async fn load_tasks(&self) -> TaskMutationResult<()> {
        self.store.set_load_status(LoadStatus::Loading);
        match self.gateway.list_tasks().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "task collection loaded");
                self.store.replace_all(tasks);
                self.store.set_load_status(LoadStatus::Succeeded);
                Ok(())
            }
            Err(err) => {
                let api = ApiError::from(err);
                self.store
                    .set_load_status(LoadStatus::Failed(api.message().to_owned()));
                Err(self.reject(api.into()))
            }
        }
    }

    /// Creates a task and appends the server's record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Validation`] for a blank title, without
    /// calling the gateway, or [`TaskMutationError::Gateway`] when the
    /// server rejects the write.
    pub async fn create(&self, draft: &TaskDraft) -> TaskMutationResult<Task> {
        if let Err(err) = draft.validate() {
            return Err(self.reject(err.into()));
        }
        let created = match self.gateway.create_task(draft).await {
            Ok(task) => task,
            Err(err) => return Err(self.reject(ApiError::from(err).into())),
        };
        info!(task_id = %created.id(), "task created");
        self.store.append(created.clone());
        self.notifications.success("Task created successfully");
        Ok(created)
    }

    /// Sends a partial update and replaces the held record in place.
    ///
    /// An id missing from the local collection is not an error: the
    /// server's record is returned and the collection stays as it is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Validation`] when the patch sets a blank
    /// title, or [`TaskMutationError::Gateway`] when the server rejects the
    /// write.
    pub async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskMutationResult<Task> {
        if let Err(err) = patch.validate() {
            return Err(self.reject(err.into()));
        }
        let updated = match self.gateway.update_task(id, patch).await {
            Ok(task) => task,
            Err(err) => return Err(self.reject(ApiError::from(err).into())),
        };
        if self.store.replace(updated.clone()) {
            info!(task_id = %id, "task updated");
        } else {
            debug!(task_id = %id, "updated task is not held locally");
        }
        self.notifications.success("Task updated successfully");
        Ok(updated)
    }

    /// Deletes a task and drops it from the local collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Gateway`] when the server rejects the
    /// delete; the collection is left unchanged.
    pub async fn remove(&self, id: &TaskId) -> TaskMutationResult<()> {
        if let Err(err) = self.gateway.delete_task(id).await {
            return Err(self.reject(ApiError::from(err).into()));
        }
        self.store.remove(id);
        info!(task_id = %id, "task deleted");
        self.notifications.success("Task deleted successfully");
        Ok(())
    }

    /// Flips a task between completed and pending.
    ///
    /// Completed tasks become pending; every other status becomes
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Gateway`] when the server rejects the
    /// status change.
    pub async fn toggle_status(&self, task: &Task) -> TaskMutationResult<Task> {
        let next = task.status().toggled();
        debug!(task_id = %task.id(), from = %task.status(), to = %next, "toggling task status");
        self.update(task.id(), &TaskPatch::status_only(next)).await
    }

    fn reject(&self, err: TaskMutationError) -> TaskMutationError {
        warn!(error = %err, "task mutation failed");
        self.notifications.error(err.to_string());
        err
    }
}

//! In-memory stand-in for the remote task API.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::gateway::{GatewayError, GatewayResult};
use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId, TaskPatch},
    ports::TaskGateway,
};

/// Gateway operations that can be counted or made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    /// `GET /tasks`.
    List,
    /// `POST /tasks`.
    Create,
    /// `PUT /tasks/{id}`.
    Update,
    /// `DELETE /tasks/{id}`.
    Delete,
}

/// Thread-safe fake of the remote task resource.
///
/// Behaves like the server (assigns ids, applies patches, answers 404 for
/// unknown ids) and additionally records call counts and replays queued
/// failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    tasks: Vec<Task>,
    next_id: u64,
    failures: HashMap<TaskOperation, VecDeque<GatewayError>>,
    calls: HashMap<TaskOperation, usize>,
}

fn lock_error(err: &impl std::fmt::Display) -> GatewayError {
    GatewayError::transport(&std::io::Error::other(err.to_string()))
}

fn not_found(id: &TaskId) -> GatewayError {
    GatewayError::Status {
        status: 404,
        message: format!("Task {id} not found"),
    }
}

fn rejected(err: &TaskDomainError) -> GatewayError {
    GatewayError::Status {
        status: 400,
        message: err.to_string(),
    }
}

impl InMemoryTaskGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway already holding the given server-side tasks.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let gateway = Self::new();
        if let Ok(mut state) = gateway.state.write() {
            state.tasks.extend(tasks);
        }
        gateway
    }

    /// Adds a server-side task without counting it as a call.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when lock acquisition fails.
    pub fn insert(&self, task: Task) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.tasks.push(task);
        Ok(())
    }

    /// Returns the server-side tasks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when lock acquisition fails.
    pub fn tasks(&self) -> GatewayResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.tasks.clone())
    }

    /// Queues a failure for the next call of `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when lock acquisition fails.
    pub fn fail_next(&self, operation: TaskOperation, error: GatewayError) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.failures.entry(operation).or_default().push_back(error);
        Ok(())
    }

    /// Returns how many times `operation` was called, failures included.
    #[must_use]
    pub fn call_count(&self, operation: TaskOperation) -> usize {
        self.state
            .read()
            .map(|state| state.calls.get(&operation).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Records the call and, with the lock held, runs `apply` unless a
    /// failure is queued.
    fn call<T>(
        &self,
        operation: TaskOperation,
        apply: impl FnOnce(&mut InMemoryGatewayState) -> GatewayResult<T>,
    ) -> GatewayResult<T> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        *state.calls.entry(operation).or_default() += 1;
        if let Some(error) = state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        apply(&mut state)
    }
}

fn create_from_draft(state: &mut InMemoryGatewayState, draft: &TaskDraft) -> GatewayResult<Task> {
    state.next_id += 1;
    let id = TaskId::new(state.next_id.to_string()).map_err(|err| rejected(&err))?;
    let mut task = Task::new(id, draft.title())
        .map_err(|err| rejected(&err))?
        .with_description(draft.description())
        .with_priority(draft.priority())
        .with_status(draft.status())
        .with_due_date(draft.due_date());
    if let Some(attachment) = draft.attachment() {
        task = task.with_image(format!("/uploads/{}", attachment.file_name()));
    }
    state.tasks.push(task.clone());
    Ok(task)
}

fn apply_patch(task: &Task, patch: &TaskPatch) -> Result<Task, TaskDomainError> {
    let mut updated = task.clone();
    if let Some(title) = patch.title() {
        updated = updated.with_title(title)?;
    }
    if let Some(description) = patch.description() {
        updated = updated.with_description(description);
    }
    if let Some(priority) = patch.priority() {
        updated = updated.with_priority(priority);
    }
    if let Some(status) = patch.status() {
        updated = updated.with_status(status);
    }
    if let Some(due_date) = patch.due_date() {
        updated = updated.with_due_date(due_date);
    }
    if let Some(attachment) = patch.attachment() {
        updated = updated.with_image(format!("/uploads/{}", attachment.file_name()));
    }
    Ok(updated)
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        self.call(TaskOperation::List, |state| Ok(state.tasks.clone()))
    }

    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task> {
        self.call(TaskOperation::Create, |state| create_from_draft(state, draft))
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<Task> {
        self.call(TaskOperation::Update, |state| {
            let slot = state
                .tasks
                .iter_mut()
                .find(|task| task.id() == id)
                .ok_or_else(|| not_found(id))?;
            let updated = apply_patch(slot, patch).map_err(|err| rejected(&err))?;
            slot.clone_from(&updated);
            Ok(updated)
        })
    }

    async fn delete_task(&self, id: &TaskId) -> GatewayResult<()> {
        self.call(TaskOperation::Delete, |state| {
            let before = state.tasks.len();
            state.tasks.retain(|task| task.id() != id);
            if state.tasks.len() == before {
                return Err(not_found(id));
            }
            Ok(())
        })
    }
}

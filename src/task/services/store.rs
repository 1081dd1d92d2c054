//! Last-fetched task collection and the view state applied to it.

use crate::task::domain::{
    SortKey, StatusBuckets, Task, TaskFilter, TaskId, TaskStats, TaskView,
};
use std::sync::{PoisonError, RwLock};

/// Progress of the most recent collection fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch replaced the collection.
    Succeeded,
    /// The last fetch failed with the given message; the previous
    /// collection is kept.
    Failed(String),
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: Vec<Task>,
    view: TaskView,
    load_status: LoadStatus,
}

/// Client-side copy of the task collection.
///
/// Mutations succeed or leave the collection untouched. Each write holds the
/// lock for the whole replacement so readers never see a half-applied
/// change.
#[derive(Debug, Default)]
pub struct TaskStore {
    state: RwLock<StoreState>,
}

impl TaskStore {
    /// Creates an empty store with the default view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given view.
    #[must_use]
    pub fn with_view(view: TaskView) -> Self {
        Self {
            state: RwLock::new(StoreState {
                view,
                ..StoreState::default()
            }),
        }
    }

    /// Replaces the whole collection with a fresh fetch.
    pub fn replace_all(&self, tasks: Vec<Task>) {
        self.write(|state| state.tasks = tasks);
    }

    /// Appends a newly created task.
    pub fn append(&self, task: Task) {
        self.write(|state| state.tasks.push(task));
    }

    /// Replaces the record with the same id, keeping its position.
    ///
    /// Returns `false` and leaves the collection unchanged when the id is
    /// not held.
    pub fn replace(&self, task: Task) -> bool {
        self.write(|state| {
            state
                .tasks
                .iter_mut()
                .find(|held| held.id() == task.id())
                .map(|slot| *slot = task)
                .is_some()
        })
    }

    /// Removes the record with the given id, returning whether it was held.
    pub fn remove(&self, id: &TaskId) -> bool {
        self.write(|state| {
            let before = state.tasks.len();
            state.tasks.retain(|task| task.id() != id);
            state.tasks.len() != before
        })
    }

    /// Returns the collection in fetch order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.read(|state| state.tasks.clone())
    }

    /// Returns the record with the given id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<Task> {
        self.read(|state| state.tasks.iter().find(|task| task.id() == id).cloned())
    }

    /// Returns the number of held records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(|state| state.tasks.len())
    }

    /// Returns whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the filter criteria.
    pub fn set_filter(&self, filter: TaskFilter) {
        self.write(|state| state.view.set_filter(filter));
    }

    /// Replaces the sort key.
    pub fn set_sort(&self, sort: SortKey) {
        self.write(|state| state.view.set_sort(sort));
    }

    /// Replaces the whole view.
    pub fn set_view(&self, view: TaskView) {
        self.write(|state| state.view = view);
    }

    /// Returns the current view.
    #[must_use]
    pub fn view(&self) -> TaskView {
        self.read(|state| state.view.clone())
    }

    /// Returns the filtered and sorted projection of the collection.
    #[must_use]
    pub fn visible(&self) -> Vec<Task> {
        self.read(|state| state.view.project(&state.tasks))
    }

    /// Returns per-status counts over the whole collection.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        self.read(|state| TaskStats::from_tasks(&state.tasks))
    }

    /// Groups the visible projection by status.
    #[must_use]
    pub fn buckets(&self) -> StatusBuckets {
        StatusBuckets::from_tasks(&self.visible())
    }

    /// Returns the status of the latest fetch.
    #[must_use]
    pub fn load_status(&self) -> LoadStatus {
        self.read(|state| state.load_status.clone())
    }

    /// Records the status of the latest fetch.
    pub fn set_load_status(&self, load_status: LoadStatus) {
        self.write(|state| state.load_status = load_status);
    }

    fn read<T>(&self, read: impl FnOnce(&StoreState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        read(&state)
    }

    fn write<T>(&self, write: impl FnOnce(&mut StoreState) -> T) -> T {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        write(&mut state)
    }
}

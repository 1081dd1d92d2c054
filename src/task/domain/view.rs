//! Filter, search and sort projection over an in-memory task collection.
//!
//! Everything here is pure: the same `(tasks, filter, sort)` input always
//! produces the same output and the input slice is never reordered.

use super::{ParseSortKeyError, StatusRank, Task, TaskPriority, TaskStatus};
use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use std::fmt;
use tracing::warn;

/// Status criterion for the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Keep every status.
    #[default]
    All,
    /// Keep only tasks with this status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns `true` when the status passes the criterion.
    #[must_use]
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl From<TaskStatus> for StatusFilter {
    fn from(value: TaskStatus) -> Self {
        Self::Only(value)
    }
}

/// Priority criterion for the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    /// Keep every priority.
    #[default]
    All,
    /// Keep only tasks with this priority.
    Only(TaskPriority),
}

impl PriorityFilter {
    /// Returns `true` when the priority passes the criterion.
    #[must_use]
    pub fn matches(self, priority: TaskPriority) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == priority,
        }
    }
}

impl From<TaskPriority> for PriorityFilter {
    fn from(value: TaskPriority) -> Self {
        Self::Only(value)
    }
}

/// Combined filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: StatusFilter,
    priority: PriorityFilter,
    search: String,
}

impl TaskFilter {
    /// Creates a filter that keeps every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    /// Restricts the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<PriorityFilter>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Returns the status criterion.
    #[must_use]
    pub const fn status(&self) -> StatusFilter {
        self.status
    }

    /// Returns the priority criterion.
    #[must_use]
    pub const fn priority(&self) -> PriorityFilter {
        self.priority
    }

    /// Returns the raw free-text query.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns `true` when the task satisfies every active criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task.status())
            && self.priority.matches(task.priority())
            && SearchNeedle::new(&self.search).matches(task)
    }
}

/// Lower-cased search query; blank queries match everything.
struct SearchNeedle(Option<String>);

impl SearchNeedle {
    fn new(query: &str) -> Self {
        let trimmed = query.trim();
        Self((!trimmed.is_empty()).then(|| trimmed.to_lowercase()))
    }

    fn matches(&self, task: &Task) -> bool {
        let Some(needle) = self.0.as_deref() else {
            return true;
        };
        task.title().to_lowercase().contains(needle)
            || task.description().to_lowercase().contains(needle)
    }
}

/// Field the task list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Earliest due date first; undated tasks last.
    #[default]
    DueDate,
    /// Most severe priority first.
    Priority,
    /// Alphabetical by title.
    Title,
    /// Stable pass-through unless a [`StatusRank`] is supplied.
    Status,
}

impl SortKey {
    /// Returns the canonical name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Title => "title",
            Self::Status => "status",
        }
    }
}

impl TryFrom<&str> for SortKey {
    type Error = ParseSortKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-' | ' '))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "duedate" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            _ => Err(ParseSortKeyError(value.to_owned())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ephemeral list criteria: what to keep and how to order it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskView {
    filter: TaskFilter,
    sort: SortKey,
    status_rank: Option<StatusRank>,
}

impl TaskView {
    /// Creates a view from filter criteria and a sort key.
    #[must_use]
    pub const fn new(filter: TaskFilter, sort: SortKey) -> Self {
        Self {
            filter,
            sort,
            status_rank: None,
        }
    }

    /// Supplies an explicit order for [`SortKey::Status`].
    #[must_use]
    pub fn with_status_rank(mut self, status_rank: StatusRank) -> Self {
        self.status_rank = Some(status_rank);
        self
    }

    /// Returns the filter criteria.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Returns the explicit status order, if any.
    #[must_use]
    pub const fn status_rank(&self) -> Option<&StatusRank> {
        self.status_rank.as_ref()
    }

    /// Replaces the filter criteria.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// Replaces the sort key.
    pub const fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Projects the collection through this view.
    #[must_use]
    pub fn project(&self, tasks: &[Task]) -> Vec<Task> {
        let mut visible: Vec<Task> = tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .cloned()
            .collect();
        // `sort_by` is stable, which every key relies on for ties.
        match (self.sort, self.status_rank.as_ref()) {
            (SortKey::DueDate, _) => visible.sort_by(compare_due_dates),
            (SortKey::Priority, _) => visible.sort_by_key(|task| task.priority().rank()),
            (SortKey::Title, _) => {
                let collator = title_collator();
                visible.sort_by(|left, right| {
                    compare_titles(collator.as_ref(), left.title(), right.title())
                });
            }
            (SortKey::Status, Some(rank)) => visible.sort_by_key(|task| rank.rank(task.status())),
            (SortKey::Status, None) => {}
        }
        visible
    }
}

/// Projects `tasks` through `filter` and orders the result by `sort`.
#[must_use]
pub fn project(tasks: &[Task], filter: &TaskFilter, sort: SortKey) -> Vec<Task> {
    TaskView::new(filter.clone(), sort).project(tasks)
}

/// Ascending by due date with undated tasks after every dated one.
fn compare_due_dates(left: &Task, right: &Task) -> Ordering {
    match (left.due_date(), right.due_date()) {
        (Some(left_date), Some(right_date)) => left_date.cmp(&right_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Root-locale collator at tertiary strength: accents sort beside their base
/// letter and case variants order lowercase first.
fn title_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            warn!(error = %err, "title collation unavailable, using case-folded order");
            None
        }
    }
}

/// Collated title order, falling back to the raw text so that titles the
/// collator treats as equal still order deterministically.
fn compare_titles(collator: Option<&Collator>, left: &str, right: &str) -> Ordering {
    collator
        .map_or_else(
            || left.to_lowercase().cmp(&right.to_lowercase()),
            |active| active.compare(left, right),
        )
        .then_with(|| left.cmp(right))
}

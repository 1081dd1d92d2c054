//! Ordering tables shared by every sorted task view.

use super::{TaskPriority, TaskStatus};

/// Severity rank for each priority; lower ranks sort first.
pub const PRIORITY_RANK: [(TaskPriority, u8); 3] = [
    (TaskPriority::High, 0),
    (TaskPriority::Medium, 1),
    (TaskPriority::Low, 2),
];

/// Looks up the severity rank of a priority in [`PRIORITY_RANK`].
#[must_use]
pub fn priority_rank(priority: TaskPriority) -> u8 {
    PRIORITY_RANK
        .iter()
        .find_map(|(candidate, rank)| (*candidate == priority).then_some(*rank))
        .unwrap_or(u8::MAX)
}

/// Caller-supplied ordering for sorting by status.
///
/// Statuses have no intrinsic order, so a status sort is a stable
/// pass-through unless one of these is supplied. Statuses missing from the
/// ordering sort after every listed status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRank {
    order: Vec<TaskStatus>,
}

impl StatusRank {
    /// Creates a ranking from statuses listed first to last.
    ///
    /// Repeated statuses keep their first position.
    #[must_use]
    pub fn new(order: impl IntoIterator<Item = TaskStatus>) -> Self {
        let mut unique = Vec::new();
        for status in order {
            if !unique.contains(&status) {
                unique.push(status);
            }
        }
        Self { order: unique }
    }

    /// Ranks open work first: in progress, then pending, then completed.
    #[must_use]
    pub fn open_first() -> Self {
        Self::new([
            TaskStatus::InProgress,
            TaskStatus::Pending,
            TaskStatus::Completed,
        ])
    }

    /// Returns the rank of a status; unlisted statuses rank last.
    #[must_use]
    pub fn rank(&self, status: TaskStatus) -> usize {
        self.order
            .iter()
            .position(|candidate| *candidate == status)
            .unwrap_or(self.order.len())
    }
}

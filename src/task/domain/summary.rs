//! Per-status statistics and grouping for dashboard overviews.

use super::{Task, TaskStatus};

/// Task counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks counted.
    pub total: usize,
    /// Tasks not yet started.
    pub pending: usize,
    /// Tasks under way.
    pub in_progress: usize,
    /// Finished tasks.
    pub completed: usize,
}

impl TaskStats {
    /// Counts the given tasks.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status() {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            stats
        })
    }

    /// Returns the count for a single status.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}

/// Tasks split into one column per status, each keeping input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBuckets {
    /// Tasks not yet started.
    pub pending: Vec<Task>,
    /// Tasks under way.
    pub in_progress: Vec<Task>,
    /// Finished tasks.
    pub completed: Vec<Task>,
}

impl StatusBuckets {
    /// Groups tasks by status.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut buckets = Self::default();
        for task in tasks {
            let bucket = match task.status() {
                TaskStatus::Pending => &mut buckets.pending,
                TaskStatus::InProgress => &mut buckets.in_progress,
                TaskStatus::Completed => &mut buckets.completed,
            };
            bucket.push(task.clone());
        }
        buckets
    }

    /// Returns the bucket for a status.
    #[must_use]
    pub fn bucket(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Pending => &self.pending,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }
}

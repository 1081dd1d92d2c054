//! Transient user-facing notices raised by task and session operations.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Number of notices kept before the oldest is dropped.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 20;

/// Unique identifier of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
}

/// A single notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    recorded_at: DateTime<Utc>,
}

impl Notification {
    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the notification was raised.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Ordered, bounded collection of active notifications.
///
/// Once `capacity` notices are active, each new one evicts the oldest.
pub struct NotificationCenter<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    capacity: usize,
    entries: RwLock<VecDeque<Notification>>,
}

impl<C> NotificationCenter<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty notification centre holding up to
    /// [`DEFAULT_NOTIFICATION_CAPACITY`] notices.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self::with_capacity(clock, DEFAULT_NOTIFICATION_CAPACITY)
    }

    /// Creates an empty notification centre holding up to `capacity`
    /// notices; a capacity of zero is treated as one.
    #[must_use]
    pub const fn with_capacity(clock: Arc<C>, capacity: usize) -> Self {
        Self {
            clock,
            capacity: if capacity == 0 { 1 } else { capacity },
            entries: RwLock::new(VecDeque::new()),
        }
    }

    /// Returns the maximum number of active notices.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records a success notice.
    pub fn success(&self, message: impl Into<String>) {
        self.push(Severity::Success, message.into());
    }

    /// Records an error notice.
    pub fn error(&self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    /// Removes a notice, returning whether it was active.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    /// Returns active notices, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Returns the most recent notice, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Notification> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .cloned()
    }

    /// Removes every notice.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, severity: Severity, message: String) {
        let notification = Notification {
            id: NotificationId::new(),
            severity,
            message,
            recorded_at: self.clock.utc(),
        };
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(notification);
    }
}

impl<C> fmt::Debug for NotificationCenter<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("active", &self.active().len())
            .finish_non_exhaustive()
    }
}

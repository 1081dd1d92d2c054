//! Domain model for the client-side task list.
//!
//! The task domain mirrors server records, models write inputs and holds the
//! pure list projection, keeping every network and storage concern outside
//! the domain boundary.

mod draft;
mod error;
mod ids;
mod ordering;
mod summary;
mod task;
mod view;
mod wire;

pub use draft::{Attachment, MAX_ATTACHMENT_BYTES, TaskDraft, TaskPatch};
pub use error::{ParseSortKeyError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use ordering::{PRIORITY_RANK, StatusRank, priority_rank};
pub use summary::{StatusBuckets, TaskStats};
pub use task::{Task, TaskPriority, TaskStatus};
pub use view::{PriorityFilter, SortKey, StatusFilter, TaskFilter, TaskView, project};
pub use wire::{DUE_DATE_FORMAT, parse_due_date};

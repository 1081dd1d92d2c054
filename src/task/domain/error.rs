//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or validating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The task identifier is a relative path segment.
    #[error("task identifier '{0}' is not addressable")]
    DotSegmentTaskId(String),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The attachment exceeds the upload size limit.
    #[error("attachment is {size} bytes, the limit is {limit} bytes")]
    AttachmentTooLarge {
        /// Attachment size in bytes.
        size: usize,
        /// Maximum accepted size in bytes.
        limit: usize,
    },

    /// The attachment content type is not an image type.
    #[error("unsupported attachment type '{0}', expected an image")]
    UnsupportedAttachmentType(String),

    /// The attachment file name is empty after trimming.
    #[error("attachment file name must not be empty")]
    EmptyAttachmentName,
}

/// Error returned while parsing task statuses from external values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from external values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing sort keys from external values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct ParseSortKeyError(pub String);

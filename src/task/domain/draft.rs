//! Write-side task values: new-task drafts, partial patches and binary
//! attachments.

use super::{TaskDomainError, TaskPriority, TaskStatus, task::validated_title};
use chrono::NaiveDate;
use std::fmt;

/// Largest attachment accepted for upload (5 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Binary image attached to a task write.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl Attachment {
    /// Creates a validated image attachment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAttachmentName`] for a blank file
    /// name, [`TaskDomainError::UnsupportedAttachmentType`] when the content
    /// type is not `image/*`, and [`TaskDomainError::AttachmentTooLarge`]
    /// when the payload exceeds [`MAX_ATTACHMENT_BYTES`].
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, TaskDomainError> {
        let raw_name = file_name.into();
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(TaskDomainError::EmptyAttachmentName);
        }

        let mime = content_type.into().trim().to_ascii_lowercase();
        if !mime.starts_with("image/") {
            return Err(TaskDomainError::UnsupportedAttachmentType(mime));
        }

        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(TaskDomainError::AttachmentTooLarge {
                size: bytes.len(),
                limit: MAX_ATTACHMENT_BYTES,
            });
        }

        Ok(Self {
            file_name: name.to_owned(),
            content_type: mime,
            bytes,
        })
    }

    /// Returns the file name sent with the upload.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the normalised MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Input for creating a task.
///
/// Construction never fails so that callers can hand raw form input
/// straight to the coordinator; [`TaskDraft::validate`] is the local
/// precondition checked before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    priority: Option<TaskPriority>,
    status: Option<TaskStatus>,
    attachment: Option<Attachment>,
}

impl TaskDraft {
    /// Creates a draft with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority: None,
            status: None,
            attachment: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches an image.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Checks the local preconditions for creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        validated_title(self.title.as_str()).map(|_| ())
    }

    /// Returns the title with surrounding whitespace removed.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.trim()
    }

    /// Returns the description as entered, empty when omitted.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority, defaulting to [`TaskPriority::Medium`].
    #[must_use]
    pub fn priority(&self) -> TaskPriority {
        self.priority.unwrap_or_default()
    }

    /// Returns the status, defaulting to [`TaskStatus::Pending`].
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        self.status.unwrap_or_default()
    }

    /// Returns the attachment, if any.
    #[must_use]
    pub const fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}

/// Partial update for an existing task.
///
/// Only fields that were set are sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<Option<NaiveDate>>,
    priority: Option<TaskPriority>,
    status: Option<TaskStatus>,
    attachment: Option<Attachment>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch that only changes the status.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self::new().with_status(status)
    }

    /// Changes the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Changes the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Changes the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Changes the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Changes the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Checks the local preconditions for an edit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch sets a blank
    /// title.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        match self.title.as_deref() {
            Some(title) => validated_title(title).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.attachment.is_none()
    }

    /// Returns the trimmed new title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim)
    }

    /// Returns the new description as entered, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due-date change: `None` leaves it alone, `Some(None)`
    /// clears it.
    #[must_use]
    pub const fn due_date(&self) -> Option<Option<NaiveDate>> {
        self.due_date
    }

    /// Returns the new priority, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the new status, if set.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the replacement attachment, if set.
    #[must_use]
    pub const fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}

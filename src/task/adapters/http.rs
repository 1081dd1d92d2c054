//! REST adapter for the task resource.

use crate::gateway::{GatewayError, GatewayResult, HttpGateway};
use crate::task::{
    domain::{Attachment, DUE_DATE_FORMAT, Task, TaskDraft, TaskId, TaskPatch},
    ports::TaskGateway,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{
    Method,
    multipart::{Form, Part},
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Collection segment of the task resource.
const TASKS: &str = "tasks";

/// Multipart field carrying the binary attachment.
const ATTACHMENT_FIELD: &str = "image";

/// Task list, bare or wrapped as `{ "tasks": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TaskListEnvelope {
    Wrapped { tasks: Vec<Task> },
    Bare(Vec<Task>),
}

/// Single task, bare or wrapped as `{ "task": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TaskEnvelope {
    Wrapped { task: Task },
    Bare(Task),
}

impl TaskEnvelope {
    fn into_task(self) -> Task {
        match self {
            Self::Wrapped { task } | Self::Bare(task) => task,
        }
    }
}

/// Text fields of a write, in the order they are sent; `None` is an
/// explicit null.
type Fields = Vec<(&'static str, Option<String>)>;

fn due_date_value(due_date: Option<NaiveDate>) -> Option<String> {
    due_date.map(|date| date.format(DUE_DATE_FORMAT).to_string())
}

fn draft_fields(draft: &TaskDraft) -> Fields {
    let mut fields = vec![
        ("title", Some(draft.title().to_owned())),
        ("description", Some(draft.description().to_owned())),
        ("priority", Some(draft.priority().as_str().to_owned())),
        ("status", Some(draft.status().as_str().to_owned())),
    ];
    if let Some(due_date) = draft.due_date() {
        fields.push(("dueDate", due_date_value(Some(due_date))));
    }
    fields
}

fn patch_fields(patch: &TaskPatch) -> Fields {
    let mut fields = Vec::new();
    if let Some(title) = patch.title() {
        fields.push(("title", Some(title.to_owned())));
    }
    if let Some(description) = patch.description() {
        fields.push(("description", Some(description.to_owned())));
    }
    if let Some(priority) = patch.priority() {
        fields.push(("priority", Some(priority.as_str().to_owned())));
    }
    if let Some(status) = patch.status() {
        fields.push(("status", Some(status.as_str().to_owned())));
    }
    if let Some(due_date) = patch.due_date() {
        fields.push(("dueDate", due_date_value(due_date)));
    }
    fields
}

fn json_body(fields: Fields) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.map_or(Value::Null, Value::String)))
        .collect()
}

fn multipart_body(fields: Fields, attachment: &Attachment) -> GatewayResult<Form> {
    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (key, value)| {
            form.text(key, value.unwrap_or_default())
        });
    let part = Part::bytes(attachment.bytes().to_vec())
        .file_name(attachment.file_name().to_owned())
        .mime_str(attachment.content_type())
        .map_err(|err| GatewayError::transport(&err))?;
    Ok(form.part(ATTACHMENT_FIELD, part))
}

impl HttpGateway {
    /// Sends a task write as multipart when an attachment is present and as
    /// JSON otherwise.
    async fn write_task(
        &self,
        method: Method,
        path: &[&str],
        fields: Fields,
        attachment: Option<&Attachment>,
    ) -> GatewayResult<Task> {
        let envelope: TaskEnvelope = match attachment {
            Some(file) => {
                let form = multipart_body(fields, file)?;
                self.send_form(method, path, form).await?
            }
            None => self.send_json(method, path, &json_body(fields)).await?,
        };
        Ok(envelope.into_task())
    }
}

#[async_trait]
impl TaskGateway for HttpGateway {
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        let envelope: TaskListEnvelope = self.get_json(&[TASKS]).await?;
        Ok(match envelope {
            TaskListEnvelope::Wrapped { tasks } | TaskListEnvelope::Bare(tasks) => tasks,
        })
    }

    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task> {
        self.write_task(Method::POST, &[TASKS], draft_fields(draft), draft.attachment())
            .await
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<Task> {
        let path = [TASKS, id.as_str()];
        self.write_task(Method::PUT, &path, patch_fields(patch), patch.attachment())
            .await
    }

    async fn delete_task(&self, id: &TaskId) -> GatewayResult<()> {
        self.delete(&[TASKS, id.as_str()]).await
    }
}

//! Command-line front end for the task API.
//!
//! Usage:
//!
//! ```text
//! taskdeck login --email <email> --password <password>
//! taskdeck list [--status <status>] [--priority <priority>] [--search <text>] [--sort <key>]
//! taskdeck add <title> [--description <text>] [--priority <p>] [--status <s>] [--due <date>] [--image <path>]
//! taskdeck toggle <id>
//! taskdeck delete <id>
//! taskdeck logout
//! ```
//!
//! Configuration is read from `TASKDECK_*` environment variables (or a
//! `.env` file). The session token persists in `TASKDECK_TOKEN_DIR` between
//! invocations.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use taskdeck::{
    config::{ClientConfig, ConfigError},
    gateway::{GatewayError, HttpGateway},
    notification::NotificationCenter,
    session::{
        adapters::FileTokenStore,
        ports::TokenStoreError,
        services::{AuthError, AuthService, SessionContext},
    },
    task::{
        domain::{
            Attachment, DUE_DATE_FORMAT, SortKey, Task, TaskDomainError, TaskDraft, TaskFilter,
            TaskId, TaskPriority, TaskStatus, parse_due_date,
        },
        services::{TaskMutationCoordinator, TaskMutationError, TaskStore},
    },
    telemetry,
};
use thiserror::Error;
use tracing::error;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Manage tasks on a taskdeck server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session token
    Login {
        /// Account email address
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Forget the remembered session token
    Logout,
    /// List tasks
    List {
        /// Only show tasks with this status
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        /// Only show tasks with this priority
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TaskPriority>,
        /// Only show tasks whose title or description contains this text
        #[arg(long, default_value = "")]
        search: String,
        /// Sort key: dueDate, priority, title or status
        #[arg(long, default_value = "dueDate", value_parser = parse_sort)]
        sort: SortKey,
    },
    /// Create a task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Task priority
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TaskPriority>,
        /// Initial status
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        /// Due date as YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
        /// Image to attach
        #[arg(long)]
        image: Option<Utf8PathBuf>,
    },
    /// Flip a task between completed and pending
    Toggle {
        /// Task identifier
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task identifier
        id: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Storage(#[from] TokenStoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Task(#[from] TaskMutationError),
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    #[error("failed to read {path}: {source}")]
    Attachment {
        path: Utf8PathBuf,
        source: io::Error,
    },
    #[error("task {0} is not in your list")]
    UnknownTask(TaskId),
    #[error("not signed in; run `taskdeck login` first")]
    SignedOut,
    #[error(transparent)]
    Output(#[from] io::Error),
}

type Tasks = TaskMutationCoordinator<HttpGateway, DefaultClock>;

struct App {
    session: Arc<SessionContext>,
    gateway: Arc<HttpGateway>,
    tasks: Tasks,
}

impl App {
    fn connect(config: &ClientConfig) -> Result<Self, CliError> {
        let store = FileTokenStore::open(config.token_dir())?;
        let session = Arc::new(SessionContext::new(Arc::new(store)));
        session.restore()?;
        let gateway = Arc::new(HttpGateway::from_config(config, Arc::clone(&session))?);
        let tasks = TaskMutationCoordinator::new(
            Arc::clone(&gateway),
            Arc::new(TaskStore::new()),
            Arc::new(NotificationCenter::new(Arc::new(DefaultClock))),
        );
        Ok(Self {
            session,
            gateway,
            tasks,
        })
    }

    fn require_session(&self) -> Result<(), CliError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(CliError::SignedOut)
        }
    }

    fn report(&self, out: &mut impl Write) -> Result<(), CliError> {
        if let Some(notice) = self.tasks.notifications().latest() {
            writeln!(out, "{}", notice.message())?;
        }
        Ok(())
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::try_from(raw).map_err(|err| err.to_string())
}

fn parse_priority(raw: &str) -> Result<TaskPriority, String> {
    TaskPriority::try_from(raw).map_err(|err| err.to_string())
}

fn parse_sort(raw: &str) -> Result<SortKey, String> {
    SortKey::try_from(raw).map_err(|err| err.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_due_date(raw).ok_or_else(|| format!("`{raw}` is not a date (expected YYYY-MM-DD)"))
}

fn image_content_type(path: &Utf8Path) -> &'static str {
    match path.extension().map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn read_attachment(path: &Utf8Path) -> Result<Attachment, CliError> {
    let read_error = |source: io::Error| CliError::Attachment {
        path: path.to_owned(),
        source,
    };
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| read_error(io::Error::other("path has no file name")))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let bytes = dir.read(file_name).map_err(read_error)?;
    Ok(Attachment::new(file_name, image_content_type(path), bytes)?)
}

fn render_task(out: &mut impl Write, task: &Task) -> io::Result<()> {
    let due = task.due_date().map_or_else(
        || String::from("-"),
        |date| date.format(DUE_DATE_FORMAT).to_string(),
    );
    writeln!(
        out,
        "{:<26} {:<12} {:<7} {:<10} {}",
        task.id().as_str(),
        task.status().as_str(),
        task.priority().as_str(),
        due,
        task.title()
    )
}

async fn run(command: Command, config: &ClientConfig) -> Result<(), CliError> {
    let app = App::connect(config)?;
    let mut out = io::stdout().lock();
    match command {
        Command::Login { email, password } => {
            let auth = AuthService::new(Arc::clone(&app.gateway), Arc::clone(&app.session));
            let user = auth.login(&email, &password).await?;
            writeln!(out, "Signed in as {} <{}>", user.name(), user.email())?;
        }
        Command::Logout => {
            AuthService::new(Arc::clone(&app.gateway), Arc::clone(&app.session)).logout()?;
            writeln!(out, "Signed out")?;
        }
        Command::List {
            status,
            priority,
            search,
            sort,
        } => {
            app.require_session()?;
            app.tasks.load_tasks().await?;
            let mut filter = TaskFilter::new().with_search(search);
            if let Some(wanted) = status {
                filter = filter.with_status(wanted);
            }
            if let Some(wanted) = priority {
                filter = filter.with_priority(wanted);
            }
            let store = app.tasks.store();
            store.set_filter(filter);
            store.set_sort(sort);
            for task in store.visible() {
                render_task(&mut out, &task)?;
            }
            let stats = store.stats();
            writeln!(
                out,
                "{} tasks: {} pending, {} in progress, {} completed",
                stats.total, stats.pending, stats.in_progress, stats.completed
            )?;
        }
        Command::Add {
            title,
            description,
            priority,
            status,
            due,
            image,
        } => {
            app.require_session()?;
            let mut draft = TaskDraft::new(title);
            if let Some(text) = description {
                draft = draft.with_description(text);
            }
            if let Some(level) = priority {
                draft = draft.with_priority(level);
            }
            if let Some(initial) = status {
                draft = draft.with_status(initial);
            }
            if let Some(date) = due {
                draft = draft.with_due_date(date);
            }
            if let Some(path) = image {
                draft = draft.with_attachment(read_attachment(&path)?);
            }
            let created = app.tasks.create(&draft).await?;
            app.report(&mut out)?;
            render_task(&mut out, &created)?;
        }
        Command::Toggle { id } => {
            app.require_session()?;
            let task_id = TaskId::new(id)?;
            app.tasks.load_tasks().await?;
            let task = app
                .tasks
                .store()
                .get(&task_id)
                .ok_or(CliError::UnknownTask(task_id))?;
            let toggled = app.tasks.toggle_status(&task).await?;
            app.report(&mut out)?;
            render_task(&mut out, &toggled)?;
        }
        Command::Delete { id } => {
            app.require_session()?;
            let task_id = TaskId::new(id)?;
            app.tasks.remove(&task_id).await?;
            app.report(&mut out)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            if writeln!(io::stderr(), "error: {err}").is_err() {
                return ExitCode::from(2);
            }
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = telemetry::init_tracing(config.log_filter()) {
        if writeln!(io::stderr(), "warning: tracing unavailable: {err}").is_err() {
            return ExitCode::from(2);
        }
    }

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            if writeln!(io::stderr(), "error: {err}").is_err() {
                return ExitCode::from(2);
            }
            ExitCode::FAILURE
        }
    }
}

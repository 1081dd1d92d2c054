//! Shared world state for task dashboard BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::notification::NotificationCenter;
use taskdeck::task::{
    adapters::memory::InMemoryTaskGateway,
    domain::Task,
    services::{TaskMutationCoordinator, TaskMutationError, TaskStore},
};

/// Coordinator type used by the BDD world.
pub type TestCoordinator = TaskMutationCoordinator<InMemoryTaskGateway, DefaultClock>;

/// Scenario world for task dashboard behaviour tests.
pub struct DashboardWorld {
    pub gateway: InMemoryTaskGateway,
    pub coordinator: TestCoordinator,
    pub seeds: Vec<Task>,
    pub loaded: bool,
    pub last_result: Option<Result<(), TaskMutationError>>,
}

impl DashboardWorld {
    /// Creates a world with an empty server and list.
    #[must_use]
    pub fn new() -> Self {
        let gateway = InMemoryTaskGateway::new();
        let coordinator = TaskMutationCoordinator::new(
            Arc::new(gateway.clone()),
            Arc::new(TaskStore::new()),
            Arc::new(NotificationCenter::new(Arc::new(DefaultClock))),
        );
        Self {
            gateway,
            coordinator,
            seeds: Vec::new(),
            loaded: false,
            last_result: None,
        }
    }

    /// Publishes seeded tasks to the server and loads them into the list.
    ///
    /// Runs once per scenario, before the first action.
    pub fn ensure_loaded(&mut self) -> Result<(), eyre::Report> {
        if self.loaded {
            return Ok(());
        }
        for seed in self.seeds.drain(..) {
            self.gateway
                .insert(seed)
                .map_err(|err| eyre::eyre!("seed server task: {err}"))?;
        }
        run_async(self.coordinator.load_tasks()).wrap_err("initial task load")?;
        self.loaded = true;
        Ok(())
    }

    /// Returns the listed task with the given title.
    pub fn listed_by_title(&self, title: &str) -> Result<Task, eyre::Report> {
        self.coordinator
            .store()
            .snapshot()
            .into_iter()
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("no listed task titled {title:?}"))
    }
}

impl Default for DashboardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DashboardWorld {
    DashboardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Shared world state for approval workflow BDD scenarios.

use std::sync::Arc;

use greenlight::review::{ApprovalLink, ReviewLinkBuilder};
use greenlight::workflow::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ReviewOutcome, Task},
    services::{ApprovalService, BoardService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Board service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryTaskRepository, DefaultClock>;

/// Approval service type used by the BDD world.
pub type TestApprovalService = ApprovalService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for approval workflow behaviour tests.
pub struct ApprovalWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub board: TestBoardService,
    pub approvals: TestApprovalService,
    pub task: Option<Task>,
    pub link: Option<ApprovalLink>,
    pub last_outcome: Option<ReviewOutcome>,
}

impl ApprovalWorld {
    /// Creates a world backed by a fresh in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        let board = BoardService::new(Arc::clone(&repository), Arc::clone(&clock));
        let approvals = ApprovalService::new(
            Arc::clone(&repository),
            clock,
            ReviewLinkBuilder::new("https://agency.example.com"),
        );

        Self {
            repository,
            board,
            approvals,
            task: None,
            link: None,
            last_outcome: None,
        }
    }

    /// Returns the token path segment of the issued review link.
    pub fn token(&self) -> Result<String, eyre::Report> {
        let link = self
            .link
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing review link in scenario world"))?;
        link.as_str()
            .rsplit('/')
            .next()
            .map(str::to_owned)
            .ok_or_else(|| eyre::eyre!("review link has no token segment"))
    }
}

impl Default for ApprovalWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ApprovalWorld {
    ApprovalWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! In-memory adapters for workflow tests and lightweight deployments.

mod task;

pub use task::InMemoryTaskRepository;

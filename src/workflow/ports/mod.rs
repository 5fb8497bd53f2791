//! Port contracts for the task approval workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by workflow
//! services.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

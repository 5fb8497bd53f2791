//! Repository port for task persistence, lookup, and board reordering.

use crate::workflow::domain::{KanbanType, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists or [`TaskRepositoryError::DuplicateApprovalToken`]
    /// when another task already holds the same token.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, token, feedback,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task. Deletion is plain CRUD; the workflow never destroys
    /// tasks itself.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by internal identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds the task holding the given approval token.
    ///
    /// Returns `None` when no task matches; callers on the external
    /// surface must not distinguish this from "no such task".
    async fn find_by_approval_token(&self, token: &str) -> TaskRepositoryResult<Option<Task>>;

    /// Returns a board column: tasks of the given board and status,
    /// ordered by column position.
    async fn list_column(
        &self,
        kanban_type: KanbanType,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the highest column position currently used in a column, or
    /// `None` when the column is empty.
    async fn max_sort_order(
        &self,
        kanban_type: KanbanType,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<i32>>;

    /// Persists a drag-and-drop move: writes the already-mutated moved
    /// task, then assigns dense 0-based positions to `ordered_siblings`
    /// in the order given. Both writes happen atomically so partial
    /// reordering is never observed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the moved task does
    /// not exist. Sibling identifiers that no longer resolve are skipped;
    /// a concurrent delete must not fail the whole reorder.
    async fn move_and_reorder(
        &self,
        task: &Task,
        ordered_siblings: &[TaskId],
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task's approval token is already held by another task.
    #[error("duplicate approval token on task {0}")]
    DuplicateApprovalToken(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Service layer for board CRUD and drag-and-drop reordering.

use crate::workflow::{
    domain::{KanbanType, NewTaskData, Task, TaskId, TaskStatus, UserRef, WorkflowDomainError},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    kanban_type: KanbanType,
    assigned_to: BTreeSet<UserRef>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, kanban_type: KanbanType) -> Self {
        Self {
            title: title.into(),
            description: None,
            kanban_type,
            assigned_to: BTreeSet::new(),
        }
    }

    /// Sets the card description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee set.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserRef>) -> Self {
        self.assigned_to = assignees.into_iter().collect();
        self
    }
}

/// Request payload for a drag-and-drop move.
///
/// `ordered_siblings` is the full id sequence of the target column after
/// the drop, including the moved task itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    task_id: TaskId,
    new_status: TaskStatus,
    ordered_siblings: Vec<TaskId>,
}

impl MoveTaskRequest {
    /// Creates a move request.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        new_status: TaskStatus,
        ordered_siblings: impl IntoIterator<Item = TaskId>,
    ) -> Self {
        Self {
            task_id,
            new_status,
            ordered_siblings: ordered_siblings.into_iter().collect(),
        }
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task at the initial status of its board, placed after
    /// the column's current last card.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the title is invalid or persistence
    /// fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardResult<Task> {
        let status = request.kanban_type.initial_status();
        let max = self
            .repository
            .max_sort_order(request.kanban_type, status)
            .await?;
        let sort_order = max.map_or(0, |value| value.saturating_add(1));

        let task = Task::new(
            NewTaskData {
                title: request.title,
                description: request.description,
                kanban_type: request.kanban_type,
                assigned_to: request.assigned_to,
                sort_order,
            },
            &*self.clock,
        )?;
        self.repository.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            board = task.kanban_type().as_str(),
            status = task.status().as_str(),
            "task created",
        );
        Ok(task)
    }

    /// Applies a drag-and-drop move: the task takes the new status
    /// unconditionally (no pipeline legality check), and the target
    /// column's cards are renumbered densely from zero in the order
    /// given. The whole move persists atomically.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task does not exist, or
    /// a repository error when persistence fails.
    pub async fn move_task(&self, request: MoveTaskRequest) -> BoardResult<Task> {
        let mut task = self.require_task(request.task_id).await?;
        task.move_to(request.new_status, &*self.clock);
        if let Some(index) = request
            .ordered_siblings
            .iter()
            .position(|id| *id == task.id())
        {
            let own_position = i32::try_from(index).map_err(TaskRepositoryError::persistence)?;
            task.set_sort_order(own_position);
        }
        self.repository
            .move_and_reorder(&task, &request.ordered_siblings)
            .await?;
        tracing::info!(
            task_id = %task.id(),
            status = task.status().as_str(),
            siblings = request.ordered_siblings.len(),
            "task moved and column reordered",
        );
        Ok(task)
    }

    /// Returns a board column ordered by card position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the lookup fails.
    pub async fn column(
        &self,
        kanban_type: KanbanType,
        status: TaskStatus,
    ) -> BoardResult<Vec<Task>> {
        Ok(self.repository.list_column(kanban_type, status).await?)
    }

    /// Attaches the preview asset shown on the external review page.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task does not exist.
    pub async fn attach_preview_asset(
        &self,
        task_id: TaskId,
        asset: impl Into<String> + Send,
    ) -> BoardResult<Task> {
        let mut task = self.require_task(task_id).await?;
        task.set_preview_asset(asset, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task. Plain CRUD; the workflow itself never destroys
    /// tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn delete_task(&self, task_id: TaskId) -> BoardResult<()> {
        self.repository.delete(task_id).await?;
        tracing::info!(task_id = %task_id, "task deleted");
        Ok(())
    }

    async fn require_task(&self, task_id: TaskId) -> BoardResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(BoardError::NotFound(task_id))
    }
}

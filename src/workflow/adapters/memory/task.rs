//! In-memory repository for workflow tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workflow::{
    domain::{KanbanType, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    token_index: HashMap<String, TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Indexes a task's approval token, rejecting a token already held by a
/// different task. Tokens are immutable once issued, so entries are only
/// ever added.
fn index_token(state: &mut InMemoryTaskState, task: &Task) -> TaskRepositoryResult<()> {
    if let Some(token) = task.approval_token() {
        let key = token.as_str().to_owned();
        if let Some(holder) = state.token_index.get(&key)
            && *holder != task.id()
        {
            return Err(TaskRepositoryError::DuplicateApprovalToken(task.id()));
        }
        state.token_index.insert(key, task.id());
    }
    Ok(())
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        index_token(&mut state, task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        index_token(&mut state, task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if let Some(token) = removed.approval_token() {
            state.token_index.remove(token.as_str());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_approval_token(&self, token: &str) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let task = state
            .token_index
            .get(token)
            .and_then(|task_id| state.tasks.get(task_id))
            .cloned();
        Ok(task)
    }

    async fn list_column(
        &self,
        kanban_type: KanbanType,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut column: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.kanban_type() == kanban_type && task.status() == status)
            .cloned()
            .collect();
        column.sort_by_key(|task| (task.sort_order(), task.created_at()));
        Ok(column)
    }

    async fn max_sort_order(
        &self,
        kanban_type: KanbanType,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<i32>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let max = state
            .tasks
            .values()
            .filter(|task| task.kanban_type() == kanban_type && task.status() == status)
            .map(Task::sort_order)
            .max();
        Ok(max)
    }

    async fn move_and_reorder(
        &self,
        task: &Task,
        ordered_siblings: &[TaskId],
    ) -> TaskRepositoryResult<()> {
        // One write lock covers the task write and every sibling position,
        // so readers never observe a partial reorder.
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        index_token(&mut state, task)?;
        state.tasks.insert(task.id(), task.clone());

        for (index, sibling_id) in ordered_siblings.iter().enumerate() {
            let position = i32::try_from(index).map_err(TaskRepositoryError::persistence)?;
            if let Some(sibling) = state.tasks.get_mut(sibling_id) {
                sibling.set_sort_order(position);
            }
        }
        Ok(())
    }
}

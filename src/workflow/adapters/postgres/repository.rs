//! `PostgreSQL` repository implementation for workflow task storage.

use super::{
    models::{TaskRecord, TaskRow},
    schema::workflow_tasks,
};
use crate::workflow::{
    domain::{
        ApprovalToken, KanbanType, PersistedTaskData, Task, TaskId, TaskStatus, UserRef,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeSet;

/// `PostgreSQL` connection pool type used by workflow adapters.
pub type WorkflowPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: WorkflowPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(workflow_tasks::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_token_unique_violation(info.as_ref()) =>
                    {
                        TaskRepositoryError::DuplicateApprovalToken(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                workflow_tasks::table.filter(workflow_tasks::id.eq(task_id.into_inner())),
            )
            .set(&record)
            .execute(connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                    if is_token_unique_violation(info.as_ref()) =>
                {
                    TaskRepositoryError::DuplicateApprovalToken(task_id)
                }
                other => TaskRepositoryError::persistence(other),
            })?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                workflow_tasks::table.filter(workflow_tasks::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = workflow_tasks::table
                .filter(workflow_tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_approval_token(&self, token: &str) -> TaskRepositoryResult<Option<Task>> {
        let lookup = token.to_owned();
        self.run_blocking(move |connection| {
            let row = workflow_tasks::table
                .filter(workflow_tasks::approval_token.eq(&lookup))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_column(
        &self,
        kanban_type: KanbanType,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = workflow_tasks::table
                .filter(workflow_tasks::kanban_type.eq(kanban_type.as_str()))
                .filter(workflow_tasks::status.eq(status.as_str()))
                .order((
                    workflow_tasks::sort_order.asc(),
                    workflow_tasks::created_at.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn max_sort_order(
        &self,
        kanban_type: KanbanType,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<i32>> {
        self.run_blocking(move |connection| {
            workflow_tasks::table
                .filter(workflow_tasks::kanban_type.eq(kanban_type.as_str()))
                .filter(workflow_tasks::status.eq(status.as_str()))
                .select(diesel::dsl::max(workflow_tasks::sort_order))
                .first::<Option<i32>>(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn move_and_reorder(
        &self,
        task: &Task,
        ordered_siblings: &[TaskId],
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task)?;
        let siblings: Vec<TaskId> = ordered_siblings.to_vec();

        self.run_blocking(move |connection| {
            // One transaction covers the moved task and every sibling
            // position, so readers never observe a partial reorder.
            connection.transaction::<_, TaskRepositoryError, _>(|conn| {
                let affected = diesel::update(
                    workflow_tasks::table.filter(workflow_tasks::id.eq(task_id.into_inner())),
                )
                .set(&record)
                .execute(conn)?;
                if affected == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }

                for (index, sibling_id) in siblings.iter().enumerate() {
                    let position =
                        i32::try_from(index).map_err(TaskRepositoryError::persistence)?;
                    // Siblings deleted by a concurrent request are skipped.
                    diesel::update(
                        workflow_tasks::table
                            .filter(workflow_tasks::id.eq(sibling_id.into_inner())),
                    )
                    .set(workflow_tasks::sort_order.eq(position))
                    .execute(conn)?;
                }
                Ok(())
            })
        })
        .await
    }
}

fn to_record(task: &Task) -> TaskRepositoryResult<TaskRecord> {
    let assigned_to =
        serde_json::to_value(task.assigned_to()).map_err(TaskRepositoryError::persistence)?;

    Ok(TaskRecord {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        kanban_type: task.kanban_type().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        approval_token: task
            .approval_token()
            .map(|token| token.as_str().to_owned()),
        last_feedback: task.last_feedback().map(str::to_owned),
        annotation: task.annotation().map(str::to_owned),
        preview_asset: task.preview_asset().map(str::to_owned),
        assigned_to,
        sort_order: task.sort_order(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        kanban_type: persisted_kanban_type,
        status: persisted_status,
        approval_token: persisted_token,
        last_feedback,
        annotation,
        preview_asset,
        assigned_to: persisted_assignees,
        sort_order,
        created_at,
        updated_at,
    } = row;

    let kanban_type = KanbanType::try_from(persisted_kanban_type.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let approval_token = persisted_token
        .map(ApprovalToken::from_persisted)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let assigned_to: BTreeSet<UserRef> = serde_json::from_value(persisted_assignees)
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        kanban_type,
        status,
        approval_token,
        last_feedback,
        annotation,
        preview_asset,
        assigned_to,
        sort_order,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn is_token_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_workflow_tasks_approval_token_unique")
}

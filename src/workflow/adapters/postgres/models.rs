//! Diesel row models for workflow task persistence.

use super::schema::workflow_tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workflow_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Card title.
    pub title: String,
    /// Optional card description.
    pub description: Option<String>,
    /// Board the task belongs to.
    pub kanban_type: String,
    /// Task status.
    pub status: String,
    /// Approval token keying the external review surface.
    pub approval_token: Option<String>,
    /// Most recent rejection feedback.
    pub last_feedback: Option<String>,
    /// Opaque rejection annotation blob.
    pub annotation: Option<String>,
    /// Preview asset shown on the external review page.
    pub preview_asset: Option<String>,
    /// Assignee references as a JSON array.
    pub assigned_to: Value,
    /// Position within the current column.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and changeset model for task records.
///
/// The same shape serves both `INSERT` and full-row `UPDATE`; Diesel's
/// `AsChangeset` skips the primary key. `None` maps to SQL `NULL` so that
/// approval can clear previously stored feedback.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = workflow_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRecord {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Card title.
    pub title: String,
    /// Optional card description.
    pub description: Option<String>,
    /// Board the task belongs to.
    pub kanban_type: String,
    /// Task status.
    pub status: String,
    /// Approval token keying the external review surface.
    pub approval_token: Option<String>,
    /// Most recent rejection feedback.
    pub last_feedback: Option<String>,
    /// Opaque rejection annotation blob.
    pub annotation: Option<String>,
    /// Preview asset shown on the external review page.
    pub preview_asset: Option<String>,
    /// Assignee references as a JSON array.
    pub assigned_to: Value,
    /// Position within the current column.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

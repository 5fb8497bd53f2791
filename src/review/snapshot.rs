//! Read-only task projection for the external review surface.

use crate::workflow::domain::{Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the external reviewer is allowed to see of a task.
///
/// Deliberately excludes the approval token, the assignee set, and the
/// internal annotation blob; the projection is safe to serialise into an
/// anonymous response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSnapshot {
    /// Task identifier.
    pub id: TaskId,
    /// Card title.
    pub title: String,
    /// Current status.
    pub status: TaskStatus,
    /// Human-readable status label.
    pub status_label: &'static str,
    /// Final design asset to preview, if one is attached.
    pub preview_asset: Option<String>,
    /// Most recent rejection feedback, if any.
    pub last_feedback: Option<String>,
    /// When the task last changed.
    pub updated_at: DateTime<Utc>,
}

impl TaskSnapshot {
    /// Projects a task into its external view.
    #[must_use]
    pub fn of(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            status: task.status(),
            status_label: task.status().label(),
            preview_asset: task.preview_asset().map(str::to_owned),
            last_feedback: task.last_feedback().map(str::to_owned),
            updated_at: task.updated_at(),
        }
    }
}

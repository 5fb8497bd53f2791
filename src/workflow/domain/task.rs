//! Task aggregate root and the approval workflow state machine.

use super::{
    ApprovalToken, ExternalAction, InternalReviewAction, KanbanType, ReviewOutcome, TaskId,
    TaskStatus, UserRef, WorkflowDomainError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeSet;

/// Task aggregate root.
///
/// The workflow engine is the sole writer of `status`, `approval_token`,
/// and `last_feedback`; everything else on the task is carried for the
/// board and the external review page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    kanban_type: KanbanType,
    status: TaskStatus,
    approval_token: Option<ApprovalToken>,
    last_feedback: Option<String>,
    annotation: Option<String>,
    preview_asset: Option<String>,
    assigned_to: BTreeSet<UserRef>,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Card title.
    pub title: String,
    /// Optional card description.
    pub description: Option<String>,
    /// Board the task is created on; determines the initial status.
    pub kanban_type: KanbanType,
    /// Assigned users (informational only).
    pub assigned_to: BTreeSet<UserRef>,
    /// Position within the initial column.
    pub sort_order: i32,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted board type.
    pub kanban_type: KanbanType,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted approval token, if one was ever issued.
    pub approval_token: Option<ApprovalToken>,
    /// Persisted rejection feedback, if any.
    pub last_feedback: Option<String>,
    /// Persisted rejection annotation blob, if any.
    pub annotation: Option<String>,
    /// Persisted preview asset reference, if any.
    pub preview_asset: Option<String>,
    /// Persisted assignee set.
    pub assigned_to: BTreeSet<UserRef>,
    /// Persisted column position.
    pub sort_order: i32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task at the initial status of its board.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, WorkflowDomainError> {
        let title = data.title.trim().to_owned();
        if title.is_empty() {
            return Err(WorkflowDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: data.description,
            kanban_type: data.kanban_type,
            status: data.kanban_type.initial_status(),
            approval_token: None,
            last_feedback: None,
            annotation: None,
            preview_asset: None,
            assigned_to: data.assigned_to,
            sort_order: data.sort_order,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            kanban_type: data.kanban_type,
            status: data.status,
            approval_token: data.approval_token,
            last_feedback: data.last_feedback,
            annotation: data.annotation,
            preview_asset: data.preview_asset,
            assigned_to: data.assigned_to,
            sort_order: data.sort_order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the card title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the card description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the board the task belongs to.
    #[must_use]
    pub const fn kanban_type(&self) -> KanbanType {
        self.kanban_type
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the approval token, if one was ever issued.
    #[must_use]
    pub const fn approval_token(&self) -> Option<&ApprovalToken> {
        self.approval_token.as_ref()
    }

    /// Returns the most recent rejection feedback, if any.
    #[must_use]
    pub fn last_feedback(&self) -> Option<&str> {
        self.last_feedback.as_deref()
    }

    /// Returns the rejection annotation blob, if any.
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Returns the preview asset shown on the external review page.
    #[must_use]
    pub fn preview_asset(&self) -> Option<&str> {
        self.preview_asset.as_deref()
    }

    /// Returns the assignee set.
    #[must_use]
    pub const fn assigned_to(&self) -> &BTreeSet<UserRef> {
        &self.assigned_to
    }

    /// Returns the position within the current column.
    #[must_use]
    pub const fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Issues the approval token keying the external review surface.
    ///
    /// Idempotent: once generated the token is never regenerated, and
    /// repeated calls return the existing value. Requesting external
    /// review while the task sits at [`TaskStatus::ReviewInternal`]
    /// implies internal review is complete, so the status advances to
    /// [`TaskStatus::ReviewClient`] as a side effect.
    pub fn issue_approval_token(&mut self, clock: &impl Clock) -> ApprovalToken {
        let mut changed = false;
        let token = match &self.approval_token {
            Some(existing) => existing.clone(),
            None => {
                let fresh = ApprovalToken::generate();
                self.approval_token = Some(fresh.clone());
                changed = true;
                fresh
            }
        };
        if self.status == TaskStatus::ReviewInternal {
            self.status = TaskStatus::ReviewClient;
            changed = true;
        }
        if changed {
            self.touch(clock);
        }
        token
    }

    /// Applies an action submitted through the token-keyed external
    /// surface.
    ///
    /// Approval schedules the task and clears prior feedback; rejection
    /// returns it to internal review with the supplied feedback (empty
    /// when the reviewer gave none). Re-entrant: approving an already
    /// scheduled task simply re-sets the status without error.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::MissingApprovalToken`] when the task
    /// has never issued a token; such a task cannot be the target of
    /// external review.
    pub fn apply_external_action(
        &mut self,
        action: ExternalAction,
        feedback: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        if self.approval_token.is_none() {
            return Err(WorkflowDomainError::MissingApprovalToken(self.id));
        }
        match action {
            ExternalAction::Approve => {
                self.status = TaskStatus::Scheduled;
                self.last_feedback = None;
            }
            ExternalAction::Reject => {
                self.status = TaskStatus::ReviewInternal;
                self.last_feedback = Some(feedback.unwrap_or_default());
            }
        }
        self.touch(clock);
        Ok(())
    }

    /// Applies an action from an authenticated internal reviewer.
    ///
    /// Approval is gated on the two review stages: `review_internal`
    /// advances to `review_client`, `review_client` advances to
    /// `scheduled`, and any other status is left untouched as a
    /// success-no-op. Rejection always resets the task to `design`,
    /// whatever its current status, recording the reason as feedback and
    /// keeping any annotation separately.
    pub fn apply_internal_review(
        &mut self,
        action: InternalReviewAction,
        clock: &impl Clock,
    ) -> ReviewOutcome {
        match action {
            InternalReviewAction::Approve => {
                let target = match self.status {
                    TaskStatus::ReviewInternal => Some(TaskStatus::ReviewClient),
                    TaskStatus::ReviewClient => Some(TaskStatus::Scheduled),
                    _ => None,
                };
                target.map_or(ReviewOutcome::Unchanged, |to| {
                    let from = self.status;
                    self.status = to;
                    self.touch(clock);
                    ReviewOutcome::Advanced { from, to }
                })
            }
            InternalReviewAction::Reject { reason, annotation } => {
                self.status = TaskStatus::Design;
                self.last_feedback = Some(reason.unwrap_or_default());
                if annotation.is_some() {
                    self.annotation = annotation;
                }
                self.touch(clock);
                ReviewOutcome::Reverted {
                    to: TaskStatus::Design,
                }
            }
        }
    }

    /// Moves the task to an arbitrary status.
    ///
    /// This is the drag-and-drop escape hatch: no pipeline legality check
    /// is applied, matching the source board's permissive behaviour. The
    /// gated operations above remain the only guarded entry points.
    pub fn move_to(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Sets the position of the task within its column.
    ///
    /// Positional sorting is not semantically part of the workflow, so
    /// reassigning it does not bump `updated_at`; racing drags resolve as
    /// last-write-wins.
    pub const fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }

    /// Attaches the preview asset shown on the external review page.
    pub fn set_preview_asset(&mut self, asset: impl Into<String>, clock: &impl Clock) {
        self.preview_asset = Some(asset.into());
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

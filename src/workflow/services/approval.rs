//! Service layer for the two review surfaces of the approval workflow.
//!
//! The external surface is keyed solely by the approval token; the
//! internal surface is reached by authenticated actors with a task id.
//! The two approve/reject paths deliberately stay separate: they encode
//! different authority levels with divergent rejection targets.

use crate::review::{
    ApprovalLink, ReviewLinkBuilder, ReviewPageError, TaskSnapshot, render_review_page,
};
use crate::workflow::{
    domain::{
        ExternalAction, InternalReviewAction, ParseReviewActionError, ReviewOutcome, Task,
        TaskId, WorkflowDomainError,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for an action submitted through the external surface.
#[derive(Clone, PartialEq, Eq)]
pub struct ExternalActionRequest {
    token: String,
    action: String,
    feedback: Option<String>,
}

impl ExternalActionRequest {
    /// Creates a request from the raw token and action strings of the
    /// inbound call.
    #[must_use]
    pub fn new(token: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            action: action.into(),
            feedback: None,
        }
    }

    /// Attaches the reviewer's feedback text.
    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }
}

impl fmt::Debug for ExternalActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The token field is the secret; keep it out of derived output.
        f.debug_struct("ExternalActionRequest")
            .field("token", &"redacted")
            .field("action", &self.action)
            .field("feedback", &self.feedback)
            .finish()
    }
}

/// Service-level errors for review operations.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The token resolves to no task. A single undifferentiated failure:
    /// the anonymous caller must not learn whether the token was wrong or
    /// the task never existed.
    #[error("approval token does not match any task")]
    UnknownToken,

    /// The action string is outside the recognised approve/reject set.
    #[error("invalid review action: {0}")]
    InvalidAction(String),

    /// Rendering the review page failed.
    #[error(transparent)]
    Page(#[from] ReviewPageError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for approval service operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// Review workflow orchestration service.
#[derive(Clone)]
pub struct ApprovalService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    links: ReviewLinkBuilder,
}

impl<R, C> ApprovalService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new approval service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, links: ReviewLinkBuilder) -> Self {
        Self {
            repository,
            clock,
            links,
        }
    }

    /// Issues (or reuses) the task's approval token and returns the
    /// fully-qualified review URL.
    ///
    /// Idempotent with respect to the token: repeated calls return the
    /// same URL. Requesting external review from `review_internal`
    /// advances the task to `review_client`.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::NotFound`] when the task does not exist,
    /// or a repository error when persistence fails.
    pub async fn generate_approval_link(&self, task_id: TaskId) -> ApprovalResult<ApprovalLink> {
        let mut task = self.require_task(task_id).await?;
        let before = task.status();
        let token = task.issue_approval_token(&*self.clock);
        self.repository.update(&task).await?;
        if task.status() != before {
            tracing::info!(
                task_id = %task_id,
                from = before.as_str(),
                to = task.status().as_str(),
                "task advanced to client review",
            );
        }
        Ok(self.links.url_for(&token))
    }

    /// Returns the read-only external view of the task holding the given
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::UnknownToken`] when the token resolves to
    /// no task.
    pub async fn external_view(&self, token: &str) -> ApprovalResult<TaskSnapshot> {
        let task = self
            .repository
            .find_by_approval_token(token)
            .await?
            .ok_or(ApprovalError::UnknownToken)?;
        Ok(TaskSnapshot::of(&task))
    }

    /// Renders the HTML review page for the task holding the given token.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::UnknownToken`] when the token resolves to
    /// no task, or [`ApprovalError::Page`] when rendering fails.
    pub async fn external_page(&self, token: &str) -> ApprovalResult<String> {
        let snapshot = self.external_view(token).await?;
        Ok(render_review_page(&snapshot)?)
    }

    /// Applies an approve/reject action submitted through the external
    /// surface and returns the updated view.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::InvalidAction`] for an unrecognised action
    /// string and [`ApprovalError::UnknownToken`] when the token resolves
    /// to no task; in both cases nothing is mutated.
    pub async fn submit_external_action(
        &self,
        request: ExternalActionRequest,
    ) -> ApprovalResult<TaskSnapshot> {
        let action = ExternalAction::try_from(request.action.as_str())
            .map_err(|ParseReviewActionError(value)| ApprovalError::InvalidAction(value))?;
        let mut task = self
            .repository
            .find_by_approval_token(request.token.as_str())
            .await?
            .ok_or(ApprovalError::UnknownToken)?;
        task.apply_external_action(action, request.feedback, &*self.clock)?;
        self.repository.update(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            action = action.as_str(),
            status = task.status().as_str(),
            "external review action applied",
        );
        Ok(TaskSnapshot::of(&task))
    }

    /// Applies an approve/reject action from an authenticated internal
    /// reviewer and returns the updated task with the transition outcome.
    ///
    /// Approval outside the two gated review stages is a success-no-op
    /// and performs no write.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::NotFound`] when the task does not exist,
    /// or a repository error when persistence fails.
    pub async fn apply_internal_review(
        &self,
        task_id: TaskId,
        action: InternalReviewAction,
    ) -> ApprovalResult<(Task, ReviewOutcome)> {
        let mut task = self.require_task(task_id).await?;
        let outcome = task.apply_internal_review(action, &*self.clock);
        if outcome == ReviewOutcome::Unchanged {
            tracing::debug!(
                task_id = %task_id,
                status = task.status().as_str(),
                "internal approval outside a gated stage; no-op",
            );
            return Ok((task, outcome));
        }
        self.repository.update(&task).await?;
        tracing::info!(
            task_id = %task_id,
            status = task.status().as_str(),
            "internal review action applied",
        );
        Ok((task, outcome))
    }

    async fn require_task(&self, task_id: TaskId) -> ApprovalResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(ApprovalError::NotFound(task_id))
    }
}

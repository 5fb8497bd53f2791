//! Error types for workflow domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// External review was attempted on a task that never issued a token.
    #[error("task {0} has no approval token")]
    MissingApprovalToken(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing kanban board types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown kanban type: {0}")]
pub struct ParseKanbanTypeError(pub String);

/// Error returned while parsing review action strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown review action: {0}")]
pub struct ParseReviewActionError(pub String);

/// Error returned while reconstructing approval tokens from persistence.
///
/// Carries no payload: echoing the rejected value would put token material
/// into error messages and logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed approval token")]
pub struct ParseApprovalTokenError;

//! Domain model for the task approval workflow.
//!
//! The workflow domain models the operational content pipeline, the token
//! that keys the external review surface, and the two approve/reject code
//! paths, while keeping all infrastructure concerns outside of the domain
//! boundary.

mod action;
mod error;
mod ids;
mod status;
mod task;
mod token;

pub use action::{ExternalAction, InternalReviewAction, ReviewOutcome};
pub use error::{
    ParseApprovalTokenError, ParseKanbanTypeError, ParseReviewActionError, ParseTaskStatusError,
    WorkflowDomainError,
};
pub use ids::{TaskId, UserRef};
pub use status::{KanbanType, TaskStatus};
pub use task::{NewTaskData, PersistedTaskData, Task};
pub use token::ApprovalToken;

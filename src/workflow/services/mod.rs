//! Application services for the task approval workflow.

mod approval;
mod board;

pub use approval::{ApprovalError, ApprovalResult, ApprovalService, ExternalActionRequest};
pub use board::{BoardError, BoardResult, BoardService, CreateTaskRequest, MoveTaskRequest};

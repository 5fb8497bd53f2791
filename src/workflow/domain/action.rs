//! Review actions for the two approve/reject code paths.
//!
//! The external (token-keyed) and internal (authenticated) paths share the
//! approve/reject vocabulary but encode different authority levels with
//! divergent rejection targets, so they remain distinct types rather than
//! a unified action.

use super::{ParseReviewActionError, TaskStatus};
use serde::{Deserialize, Serialize};

/// Action submitted through the unauthenticated external review surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalAction {
    /// Accept the work: the task is scheduled for publication.
    Approve,
    /// Request changes: the task returns to internal review.
    Reject,
}

impl ExternalAction {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl TryFrom<&str> for ExternalAction {
    type Error = ParseReviewActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseReviewActionError(value.to_owned())),
        }
    }
}

/// Action taken by an authenticated internal reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalReviewAction {
    /// Advance the task through the gated review stages.
    Approve,
    /// Send the task back to design for rework.
    Reject {
        /// Reviewer's reason, stored as the task's last feedback.
        reason: Option<String>,
        /// Opaque annotation blob, e.g. a drawn-on-image feedback marker.
        annotation: Option<String>,
    },
}

/// Result of applying an internal review action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ReviewOutcome {
    /// The task advanced one gated review stage forward.
    Advanced {
        /// Status before the action.
        from: TaskStatus,
        /// Status after the action.
        to: TaskStatus,
    },
    /// The task was sent back for rework.
    Reverted {
        /// Status after the action.
        to: TaskStatus,
    },
    /// Approval was attempted outside a gated stage; nothing changed.
    Unchanged,
}

//! Board types and task status values.

use super::{ParseKanbanTypeError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};

/// Kanban board a task belongs to.
///
/// Only operational tasks pass through the approval workflow; general
/// tasks follow a plain todo/doing/done board with no review semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KanbanType {
    /// Plain task board with no approval semantics.
    General,
    /// Social-media production pipeline with the review gates.
    Operational,
}

impl KanbanType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Operational => "operational",
        }
    }

    /// Returns the status newly created tasks start at on this board.
    #[must_use]
    pub const fn initial_status(self) -> TaskStatus {
        match self {
            Self::General => TaskStatus::Todo,
            Self::Operational => TaskStatus::Briefing,
        }
    }

    /// Returns the board's columns in display order.
    #[must_use]
    pub const fn stages(self) -> &'static [TaskStatus] {
        match self {
            Self::General => &TaskStatus::GENERAL_STAGES,
            Self::Operational => &TaskStatus::OPERATIONAL_STAGES,
        }
    }
}

impl TryFrom<&str> for KanbanType {
    type Error = ParseKanbanTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "general" => Ok(Self::General),
            "operational" => Ok(Self::Operational),
            _ => Err(ParseKanbanTypeError(value.to_owned())),
        }
    }
}

/// Task status across both boards.
///
/// The source system stores both boards' statuses in a single column, so
/// the general values and the operational pipeline stages share one value
/// space. The operational stages are conceptually ordered as a pipeline;
/// rejection transitions are the only backward moves the workflow defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// General board: not started.
    Todo,
    /// General board: in progress.
    Doing,
    /// General board: finished.
    Done,
    /// Operational pipeline: gathering the brief.
    Briefing,
    /// Operational pipeline: copywriting.
    Copy,
    /// Operational pipeline: design work.
    Design,
    /// Operational pipeline: awaiting internal approval.
    ReviewInternal,
    /// Operational pipeline: awaiting client approval.
    ReviewClient,
    /// Operational pipeline: approved and scheduled for publication.
    Scheduled,
}

impl TaskStatus {
    /// General board columns in display order.
    pub const GENERAL_STAGES: [Self; 3] = [Self::Todo, Self::Doing, Self::Done];

    /// Operational pipeline stages in pipeline order.
    pub const OPERATIONAL_STAGES: [Self; 6] = [
        Self::Briefing,
        Self::Copy,
        Self::Design,
        Self::ReviewInternal,
        Self::ReviewClient,
        Self::Scheduled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
            Self::Briefing => "briefing",
            Self::Copy => "copy",
            Self::Design => "design",
            Self::ReviewInternal => "review_internal",
            Self::ReviewClient => "review_client",
            Self::Scheduled => "scheduled",
        }
    }

    /// Returns the human-readable column label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "To do",
            Self::Doing => "Doing",
            Self::Done => "Done",
            Self::Briefing => "Briefing",
            Self::Copy => "Copy",
            Self::Design => "Design",
            Self::ReviewInternal => "Internal approval",
            Self::ReviewClient => "Client approval",
            Self::Scheduled => "Scheduled",
        }
    }

    /// Returns whether this status belongs to the operational pipeline.
    #[must_use]
    pub const fn is_operational(self) -> bool {
        matches!(
            self,
            Self::Briefing
                | Self::Copy
                | Self::Design
                | Self::ReviewInternal
                | Self::ReviewClient
                | Self::Scheduled
        )
    }

    /// Returns whether the pipeline defines further forward transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Scheduled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            "briefing" => Ok(Self::Briefing),
            "copy" => Ok(Self::Copy),
            "design" => Ok(Self::Design),
            "review_internal" => Ok(Self::ReviewInternal),
            "review_client" => Ok(Self::ReviewClient),
            "scheduled" => Ok(Self::Scheduled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

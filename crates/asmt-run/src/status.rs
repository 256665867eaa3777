//! # Run Status
//!
//! The status enum for an assessment run and the transition log record.
//! `Draft` and `NotStarted` are equivalent pre-start states distinguished
//! only by whether any answer record exists yet; both permit deletion and
//! full mutation.

use serde::{Deserialize, Serialize};

use asmt_core::Timestamp;

/// The lifecycle status of an assessment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    /// Pre-start, at least one answer recorded.
    Draft,
    /// Pre-start, nothing recorded yet.
    NotStarted,
    /// Actively being worked on.
    InProgress,
    /// Work interrupted; answers retained.
    Paused,
    /// Submitted and frozen (terminal for mutation).
    Completed,
}

impl RunStatus {
    /// Whether answers, comments, flags, and evidence may still change.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Completed)
    }

    /// Whether the run has not been started yet.
    pub fn is_pre_start(&self) -> bool {
        matches!(self, Self::Draft | Self::NotStarted)
    }

    /// Whether this status is terminal for mutation purposes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Paused => "PAUSED",
            Self::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

/// Record of a run status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTransitionRecord {
    /// Status before the transition.
    pub from_status: RunStatus,
    /// Status after the transition.
    pub to_status: RunStatus,
    /// When the transition occurred.
    pub timestamp: Timestamp,
    /// Reason for the transition.
    pub reason: String,
}

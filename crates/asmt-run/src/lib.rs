//! # asmt-run — Run Lifecycle Controller
//!
//! The `Run` value and the finite-state machine governing it:
//! `NotStarted`/`Draft → InProgress ⇄ Paused → Completed`, with
//! validation-gated submission, policy-enforced deletion, and clone-based
//! rerun of completed runs.
//!
//! The controller assumes a single logical editor per run. Operations are
//! synchronous and atomic relative to the caller; persistence belongs to
//! the external run store. If concurrent editors are ever introduced,
//! last-write-wins at answer granularity is the accepted policy —
//! concurrent edits to the same question are not merged.

pub mod run;
pub mod status;

pub use run::{Run, RunError};
pub use status::{RunStatus, RunTransitionRecord};

//! # asmt-scoring — Scoring Engine and Validation Gate
//!
//! Pure derived-state computation for assessment runs: the weighted
//! compliance score and the submission-gating issue list. Both are plain
//! functions of (catalog, answers[, evidence]) — no side effects, cheap
//! enough to recompute on every edit.
//!
//! The run lifecycle controller consumes [`validate`] as the hard
//! precondition for submission and [`score`] to freeze the final score;
//! the presentation layer calls both directly for live display.
//!
//! ## Crate Policy
//!
//! - Scoring never fails: malformed or empty input degrades to zero.
//! - Validation output is deterministic (catalog order).
//! - No `unsafe`, no panics, no I/O.

pub mod score;
pub mod validate;

pub use score::{score, ScoreReport};
pub use validate::{validate, Issue, ValidationReport};

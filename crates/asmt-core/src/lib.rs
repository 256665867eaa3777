//! # asmt-core — Foundational Types for the Assessment Stack
//!
//! This crate is the bedrock of the Assessment Stack. It defines the data
//! model that every other crate in the workspace computes over; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `RunId`, `EvidenceId`,
//!    `QuestionId`, `TemplateId` — no bare strings or UUIDs cross an API
//!    boundary.
//!
//! 2. **Typed answer values.** `AnswerValue` is a sum type over the four
//!    question kinds. A value of the wrong shape is rejected at a single
//!    point (the run controller) instead of scattered casts.
//!
//! 3. **Validated catalogs.** `QuestionCatalog::new` rejects duplicate
//!    tokens, bad weights, and option-list mismatches once, at the
//!    boundary; downstream code trusts the catalog shape.
//!
//! 4. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `asmt-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod answer;
pub mod catalog;
pub mod evidence;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use answer::{Answer, AnswerStore, AnswerValue, YesNoAnswer};
pub use catalog::{
    CatalogError, Question, QuestionCatalog, QuestionKind, SCALE_MAX, SCALE_MIN,
};
pub use evidence::{Evidence, EvidenceRegistry};
pub use identity::{EvidenceId, QuestionId, RunId, TemplateId};
pub use temporal::{Timestamp, TimestampError};

//! # asmt-checkpoint — Periodic Draft Checkpointing
//!
//! Auto-save for in-progress assessment runs: a cancellable Tokio task
//! captures a [`RunSnapshot`] on a fixed interval and hands it to an
//! external [`CheckpointSink`] (the run store) while the run is editable.
//!
//! The scheduler's lifetime is tied to the editing session: spawn it when
//! a run is opened for editing, call [`Checkpointer::shutdown`] when the
//! run leaves its editable state or the session ends. The engine performs
//! no durable writes itself.

pub mod scheduler;
pub mod snapshot;

pub use scheduler::{CheckpointError, CheckpointSink, Checkpointer};
pub use snapshot::RunSnapshot;

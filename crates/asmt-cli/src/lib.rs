//! # asmt-cli — Operator CLI for the Assessment Stack
//!
//! Subcommand handlers for the `asmt` binary. Runs and catalogs live as
//! plain JSON files; each handler loads them, drives the engine, and
//! writes the run back where the operation mutates it.

pub mod create;
pub mod score;
pub mod start;
pub mod store;
pub mod submit;
pub mod validate;

//! File-backed catalog and run loading for the CLI.
//!
//! The CLI is a stand-in run store for operator use: runs and catalogs
//! are plain serde JSON on disk. The engine itself owns no file format.

use std::path::Path;

use anyhow::Context;

use asmt_core::QuestionCatalog;
use asmt_run::Run;

/// Load and validate a question catalog from a JSON file.
pub fn load_catalog(path: &Path) -> anyhow::Result<QuestionCatalog> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing catalog {}", path.display()))
}

/// Load a run from a JSON file.
pub fn load_run(path: &Path) -> anyhow::Result<Run> {
    let data =
        std::fs::read_to_string(path).with_context(|| format!("reading run {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing run {}", path.display()))
}

/// Write a run back to a JSON file, pretty-printed.
pub fn save_run(path: &Path, run: &Run) -> anyhow::Result<()> {
    let data = serde_json::to_string_pretty(run).context("serializing run")?;
    std::fs::write(path, data).with_context(|| format!("writing run {}", path.display()))?;
    Ok(())
}

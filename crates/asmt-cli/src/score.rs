//! `asmt score` — print the running score of a run.

use std::path::PathBuf;

use asmt_scoring::score;

use crate::store;

/// Arguments for the `score` subcommand.
#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    /// The catalog JSON file.
    #[arg(long, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// The run JSON file.
    #[arg(long, default_value = "run.json")]
    pub run: PathBuf,
}

/// Compute and print the score report.
pub fn run(args: &ScoreArgs) -> anyhow::Result<()> {
    let catalog = store::load_catalog(&args.catalog)?;
    let run = store::load_run(&args.run)?;
    let report = score(&catalog, &run.answers);

    println!("run {} [{}]", run.id, run.status);
    println!("overall: {}%", report.overall);
    for section in catalog.sections() {
        if let Some(pct) = report.by_section.get(section) {
            println!("  {section}: {pct}%");
        }
    }
    println!(
        "answered {}/{} questions ({}/{} required)",
        report.answered,
        catalog.len(),
        report.required_answered,
        report.required_total
    );
    Ok(())
}

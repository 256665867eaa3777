//! `asmt validate` — print blocking and advisory issues for a run.

use std::path::PathBuf;

use asmt_scoring::validate;

use crate::store;

/// Arguments for the `validate` subcommand.
#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// The catalog JSON file.
    #[arg(long, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// The run JSON file.
    #[arg(long, default_value = "run.json")]
    pub run: PathBuf,
}

/// Evaluate and print the validation report.
pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let catalog = store::load_catalog(&args.catalog)?;
    let run = store::load_run(&args.run)?;
    let report = validate(&catalog, &run.answers, &run.evidence);

    if report.blocking.is_empty() {
        println!("run {} is submittable", run.id);
    } else {
        println!(
            "run {} has {} blocking issue(s):",
            run.id,
            report.blocking.len()
        );
        for issue in &report.blocking {
            println!("  ✗ {issue}");
        }
    }
    for issue in &report.advisory {
        println!("  ⚠ {issue}");
    }
    Ok(())
}

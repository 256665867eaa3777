//! `asmt submit` — submit a run through the validation gate.

use std::path::PathBuf;

use asmt_run::RunError;

use crate::store;

/// Arguments for the `submit` subcommand.
#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// The catalog JSON file.
    #[arg(long, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// The run JSON file; updated in place on success.
    #[arg(long, default_value = "run.json")]
    pub run: PathBuf,

    /// Closing remarks stored alongside the frozen score.
    #[arg(long)]
    pub comments: Option<String>,
}

/// Attempt submission; on success the run file is updated in place.
pub fn run(args: &SubmitArgs) -> anyhow::Result<()> {
    let catalog = store::load_catalog(&args.catalog)?;
    let mut run = store::load_run(&args.run)?;

    if args.comments.is_some() {
        run.set_overall_comments(args.comments.clone())?;
    }

    match run.submit(&catalog) {
        Ok(report) => {
            store::save_run(&args.run, &run)?;
            println!("run {} completed with score {}%", run.id, report.overall);
            Ok(())
        }
        Err(RunError::ValidationFailed { blocking }) => {
            eprintln!("submission refused, {} blocking issue(s):", blocking.len());
            for issue in &blocking {
                eprintln!("  ✗ {issue}");
            }
            anyhow::bail!("run {} is not submittable", run.id)
        }
        Err(e) => Err(e.into()),
    }
}

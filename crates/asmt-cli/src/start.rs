//! `asmt start` — move a run into IN_PROGRESS.

use std::path::PathBuf;

use crate::store;

/// Arguments for the `start` subcommand.
#[derive(clap::Args, Debug)]
pub struct StartArgs {
    /// The run JSON file to start.
    #[arg(long, default_value = "run.json")]
    pub run: PathBuf,
}

/// Start the run and write it back.
pub fn run(args: &StartArgs) -> anyhow::Result<()> {
    let mut run = store::load_run(&args.run)?;
    run.start()?;
    store::save_run(&args.run, &run)?;
    println!("{} is now {}", run.id, run.status);
    Ok(())
}

//! `asmt create` — scaffold a fresh run against a template.

use std::path::PathBuf;

use asmt_core::TemplateId;
use asmt_run::Run;

use crate::store;

/// Arguments for the `create` subcommand.
#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Template id the run will be scored against.
    #[arg(long)]
    pub template: String,

    /// Where to write the new run JSON.
    #[arg(long, default_value = "run.json")]
    pub out: PathBuf,
}

/// Create a new run file.
pub fn run(args: &CreateArgs) -> anyhow::Result<()> {
    let run = Run::new(TemplateId::new(args.template.clone()));
    store::save_run(&args.out, &run)?;
    println!("created {} ({})", run.id, args.out.display());
    Ok(())
}

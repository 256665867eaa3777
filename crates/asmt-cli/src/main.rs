//! # asmt CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Assessment Stack CLI — compliance assessment runs from the terminal.
///
/// Creates runs against a question catalog, previews scores and
/// validation issues, and submits runs through the validation gate.
#[derive(Parser, Debug)]
#[command(name = "asmt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Scaffold a fresh run against a template.
    Create(asmt_cli::create::CreateArgs),
    /// Move a run into IN_PROGRESS.
    Start(asmt_cli::start::StartArgs),
    /// Print the running score of a run.
    Score(asmt_cli::score::ScoreArgs),
    /// Print blocking and advisory issues for a run.
    Validate(asmt_cli::validate::ValidateArgs),
    /// Submit a run through the validation gate.
    Submit(asmt_cli::submit::SubmitArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => asmt_cli::create::run(&args),
        Commands::Start(args) => asmt_cli::start::run(&args),
        Commands::Score(args) => asmt_cli::score::run(&args),
        Commands::Validate(args) => asmt_cli::validate::run(&args),
        Commands::Submit(args) => asmt_cli::submit::run(&args),
    }
}

mod commands;
mod environment;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::commands::Commands;
use crate::environment::GlobalArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "rbdiff")]
#[command(about = "Produce and apply review diffs for Subversion and CVS", long_about = None)]
struct Cli {
    /// Working copy to operate on (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON capabilities document from the review server
    #[arg(long, global = true)]
    capabilities: Option<PathBuf>,

    /// Backend to use instead of scanning (see list-repo-types)
    #[arg(long, global = true)]
    repository_type: Option<String>,

    /// Repository URL to operate on instead of a working copy
    #[arg(long, global = true)]
    repository_url: Option<String>,

    /// Log tool invocations and decisions to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let globals = GlobalArgs {
        path: cli.path,
        config: cli.config,
        capabilities: cli.capabilities,
        repository_type: cli.repository_type,
        repository_url: cli.repository_url,
        show_copies_as_adds: None,
    };

    if let Err(e) = cli.command.execute(globals) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn setup_logging(debug: bool) {
    let filter = EnvFilter::new(if debug { "debug" } else { "warn" });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}

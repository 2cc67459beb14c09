// bounded-reach: bounded two-label reachability over labeled edge files
//
// Thin binary over the library: parse arguments, install logging, dispatch
// the subcommand and turn failures into exit codes.

use anyhow::Result;
use bounded_reach::cli::{self, Cli, Commands, OutputFormat};
use bounded_reach::output::{self, JsonError, JsonResponse};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_command(&cli) {
        match cli.format {
            OutputFormat::Human => output::error(&format!("{:#}", err)),
            OutputFormat::Json => {
                println!("{}", JsonResponse::new(JsonError::from_error(&err)).to_json())
            }
            OutputFormat::Pretty => {
                println!("{}", JsonResponse::new(JsonError::from_error(&err)).to_pretty_json())
            }
        }
        std::process::exit(output::exit_code(&err));
    }
}

fn run_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => cli::cmds::run(args, cli)?,
        Commands::Query(args) => cli::cmds::query(args, cli)?,
        Commands::Stats(args) => cli::cmds::stats(args, cli)?,
    }
    Ok(())
}

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "snippet")]
#[command(about = "Vet, run and place Python code snippets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file with [sandbox] and [ranker] tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Statically vet a snippet against the allowlists
    Check(SourceArgs),

    /// Run a snippet in the sandbox and print the result as JSON
    Exec(ExecArgs),

    /// Rank candidate placements for a snippet across a directory
    Locate(LocateArgs),

    /// Patch the chosen placement in place, keeping a backup
    Apply(ApplyArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Snippet file, or `-` for stdin
    snippet: PathBuf,
}

#[derive(Args)]
struct ExecArgs {
    /// Snippet file, or `-` for stdin
    snippet: PathBuf,

    /// Execution budget in seconds (overrides the settings file)
    #[arg(long)]
    timeout: Option<f64>,
}

#[derive(Args)]
struct LocateArgs {
    /// Snippet file, or `-` for stdin
    snippet: PathBuf,

    /// Directory holding candidate files
    #[arg(default_value = ".")]
    dir: PathBuf,
}

#[derive(Args)]
struct ApplyArgs {
    /// Snippet file, or `-` for stdin
    snippet: PathBuf,

    /// Directory holding candidate files
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Which ranked placement to patch (0 is the best)
    #[arg(long, default_value_t = 0)]
    pick: usize,

    /// Print the placement and patched content without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = AppConfig::load(cli.config.as_deref())?;
    log::debug!("Effective settings: {config:?}");

    match cli.command {
        Commands::Check(args) => commands::run_check(&args.snippet),
        Commands::Exec(args) => commands::run_exec(&args.snippet, args.timeout, config),
        Commands::Locate(args) => commands::run_locate(&args.snippet, &args.dir, config),
        Commands::Apply(args) => {
            commands::run_apply(&args.snippet, &args.dir, args.pick, args.dry_run, config)
        }
    }
}

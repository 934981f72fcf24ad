use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

use quern::build::{build_site, BuildOptions};

/// Build a static blog from Markdown posts and HTML layouts.
#[derive(Parser)]
#[command(name = "quern", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the website
    Build {
        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,

        /// Location to write out the rendered site
        #[arg(short, long)]
        output: PathBuf,

        /// The directory to run the build against
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Minify the output HTML
        #[arg(short, long)]
        minify: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    fmt().with_env_filter(filter).with_target(false).init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Build {
            force,
            output,
            directory,
            minify,
        } => {
            let report = build_site(BuildOptions {
                working_dir: directory,
                output,
                force,
                minify,
            })
            .context("building site")?;

            if !report.skipped.is_empty() {
                warn!(
                    "Skipped {} post(s) with malformed headers",
                    report.skipped.len()
                );
            }
            Ok(())
        }
    }
}

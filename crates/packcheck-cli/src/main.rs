#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "packcheck")]
#[command(author, version, about = "A bundler configuration inspector", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Load a config record and print its normalized form
    Inspect {
        /// Path to config file (overrides auto-discovery)
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Run structural checks over a config record
    Check {
        /// Path to config file (overrides auto-discovery)
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,

        /// Minimum severity to include: "info", "warn", or "error"
        #[arg(long, default_value = "info", value_parser = ["info", "warn", "error"])]
        severity: String,

        /// Output format: "summary" or "list"
        #[arg(long, default_value = "summary", value_parser = ["summary", "list"])]
        format: String,
    },

    /// Compare two config records and report every divergence
    Diff {
        /// Left config file
        left: PathBuf,

        /// Right config file
        right: PathBuf,

        /// Output format: "tree" or "list"
        #[arg(long, default_value = "tree", value_parser = ["tree", "list"])]
        format: String,
    },

    /// Show which rules match a file and how imports would resolve
    Explain {
        /// File name or import specifier (e.g. "src/app.ts", "./util")
        file: String,

        /// Path to config file (overrides auto-discovery)
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Scaffold a webpack.config.js in the working directory
    Init {
        /// Accept all defaults without prompting
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Logs go to stderr; stdout is reserved for command output.
    logging::init(cli.verbose, cli.json);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Inspect { config }) => {
            commands::inspect::run(&cwd, config.as_deref(), cli.json)
        }
        Some(Commands::Check {
            config,
            severity,
            format,
        }) => commands::check::run(&cwd, config.as_deref(), &severity, &format, cli.json),
        Some(Commands::Diff {
            left,
            right,
            format,
        }) => commands::diff::run(&cwd, &left, &right, &format, cli.json),
        Some(Commands::Explain { file, config }) => {
            commands::explain::run(&cwd, &file, config.as_deref(), cli.json)
        }
        Some(Commands::Init { yes }) => commands::init::run(&cwd, yes, cli.json),
    }
}

//! Command-line interface
//!
//! Argument parsing, logging setup, and the top-level run loop. This is the
//! only layer that prints errors and picks the process exit status; everything
//! below returns `Result` and stays quiet.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ConfigBuilder;
use crate::regexu;
use crate::report::{self, Report};
use crate::sources;

/// pycln is a formatter for finding and removing unused import statements
#[derive(Parser)]
#[command(name = "pycln")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory or file to scan
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Read configuration from a file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Include files/directories matching this regex on recursive scans
    #[arg(short, long, default_value = regexu::INCLUDE_REGEX)]
    include: String,

    /// Exclude files/directories matching this regex on recursive scans
    #[arg(short, long, default_value = regexu::EXCLUDE_REGEX)]
    exclude: String,

    /// Remove all unused imports, not only the side-effect-free ones
    #[arg(short = 'a', long = "all")]
    all_flag: bool,

    /// Do not write files back, only report what would change
    #[arg(short, long)]
    check: bool,

    /// Do not write files back, output a diff for each file on stdout
    #[arg(short, long)]
    diff: bool,

    /// Also emit messages about ignored files and paths to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Do not emit non-error messages to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Silence both stdout and stderr
    #[arg(short, long)]
    silence: bool,

    /// Expand wildcard star imports when the module is importable
    #[arg(short = 'x', long)]
    expand_stars: bool,

    /// Ignore `.gitignore` patterns, if present
    #[arg(long)]
    no_gitignore: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let configs = match ConfigBuilder::new(cli.path.unwrap_or_default())
        .config(cli.config)
        .include(cli.include)
        .exclude(cli.exclude)
        .all_flag(cli.all_flag)
        .check(cli.check)
        .diff(cli.diff)
        .verbose(cli.verbose)
        .quiet(cli.quiet)
        .silence(cli.silence)
        .expand_stars(cli.expand_stars)
        .no_gitignore(cli.no_gitignore)
        .build()
    {
        Ok(configs) => configs,
        Err(err) => {
            report::fatal(&err.to_string());
            return ExitCode::FAILURE;
        }
    };

    let mut report = Report::new(&configs);
    let sources = sources::find_sources(&configs, &mut report);
    tracing::debug!(count = sources.len(), "source discovery finished");
    print!("{report}");
    ExitCode::from(report.exit_code())
}

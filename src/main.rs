//! pycln: find and remove unused Python import statements
//!
//! This tool resolves its configuration from the command line and an optional
//! config file, walks the given path for Python sources, and reports what it
//! selected and what it left out.

use std::process::ExitCode;

mod cli;
mod config;
mod regexu;
mod report;
mod sources;

fn main() -> ExitCode {
    cli::run()
}

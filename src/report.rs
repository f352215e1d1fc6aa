//! Run reporting and user-facing diagnostics

use std::fmt;
use std::path::Path;

use console::style;

use crate::config::Config;

/// Print a fatal diagnostic to stderr, bold, the way every terminal message
/// of this tool is styled. Exit-status selection stays with the caller.
pub fn fatal(message: &str) {
    eprintln!("{}", style(message).bold());
}

/// Which filter dropped a walked path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreKind {
    Exclude,
    Include,
}

impl IgnoreKind {
    fn reason(self) -> &'static str {
        match self {
            IgnoreKind::Exclude => "has matched the --exclude regex",
            IgnoreKind::Include => "has not matched the --include regex",
        }
    }
}

/// Collects what happened during a run and renders the closing summary.
///
/// Gating follows the three verbosity flags: `verbose` surfaces per-path
/// detail on stderr, `quiet` drops non-error detail, `silence` drops
/// everything including the summary.
pub struct Report<'a> {
    configs: &'a Config,
    selected: usize,
    ignored: usize,
    gitignored: usize,
    failures: usize,
}

impl<'a> Report<'a> {
    pub fn new(configs: &'a Config) -> Self {
        Self { configs, selected: 0, ignored: 0, gitignored: 0, failures: 0 }
    }

    /// A source that made it through every filter.
    pub fn selected_source(&mut self, path: &Path) {
        self.selected += 1;
        tracing::debug!(source = %path.display(), "selected");
    }

    /// A path dropped by the include/exclude filters.
    pub fn ignored_path(&mut self, path: &Path, kind: IgnoreKind) {
        self.ignored += 1;
        if self.configs.verbose && !self.configs.quiet && !self.configs.silence {
            eprintln!("{}", style(format!("{} {}", path.display(), kind.reason())).dim());
        }
    }

    /// Paths the gitignore rules kept out of the walk entirely.
    pub fn gitignored_paths(&mut self, count: usize) {
        self.gitignored += count;
    }

    /// An operational failure; flips the exit code to the internal-error one.
    pub fn failure(&mut self, message: &str) {
        self.failures += 1;
        if !self.configs.silence {
            eprintln!("{}", style(message).bold().red());
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected
    }

    /// 0 for a clean run, 250 when something broke mid-run.
    pub fn exit_code(&self) -> u8 {
        if self.failures > 0 {
            250
        } else {
            0
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.configs.silence {
            return Ok(());
        }
        if self.selected == 0 {
            writeln!(f, "No Python sources found. Nothing to do")?;
        } else if self.selected == 1 {
            writeln!(f, "Found 1 Python source")?;
        } else {
            writeln!(f, "Found {} Python sources", self.selected)?;
        }
        if !self.configs.quiet && (self.ignored > 0 || self.gitignored > 0) {
            writeln!(
                f,
                "Left out: {} filtered by the include/exclude patterns, {} gitignored",
                self.ignored, self.gitignored
            )?;
        }
        if self.failures > 0 {
            writeln!(f, "{} path(s) could not be scanned", self.failures)?;
        }
        Ok(())
    }
}

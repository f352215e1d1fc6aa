//! Regular-expression utilities for include/exclude filtering

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Default pattern for files that take part in a scan.
pub const INCLUDE_REGEX: &str = r".*\.pyi?$";

/// Default pattern for directories that are skipped on recursive scans.
pub const EXCLUDE_REGEX: &str =
    r"(\.eggs|\.git|\.hg|\.mypy_cache|__pycache__|\.nox|\.tox|\.venv|\.svn|buck-out|build|dist)/";

/// Which of the two filter patterns a string is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Include,
    Exclude,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Include => "include",
            PatternKind::Exclude => "exclude",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern string that does not compile for its category.
#[derive(Debug, Error)]
#[error("Invalid regular expression for {kind} given: '{pattern}'")]
pub struct PatternError {
    pub kind: PatternKind,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Compile `pattern` case-insensitively, labelling failures with `kind`.
pub fn safe_compile(pattern: &str, kind: PatternKind) -> Result<Regex, PatternError> {
    RegexBuilder::new(pattern).case_insensitive(true).build().map_err(|source| PatternError {
        kind,
        pattern: pattern.to_string(),
        source,
    })
}

/// Check whether a relative path takes part in the scan.
///
/// An empty include pattern means every file is included regardless of name.
pub fn is_included(name: &str, include: &Regex) -> bool {
    include.as_str().is_empty() || include.is_match(name)
}

/// Check whether a relative path is shut out of the scan.
///
/// An empty exclude pattern means no path is excluded. Directory names are
/// expected with a trailing slash so patterns like `build/` can anchor on it.
pub fn is_excluded(name: &str, exclude: &Regex) -> bool {
    !exclude.as_str().is_empty() && exclude.is_match(name)
}

//! Runtime configuration resolution
//!
//! A `ConfigBuilder` carries the raw settings exactly as the command line
//! supplied them. `build` overlays the referenced config file (if any) and
//! then validates, yielding an immutable `Config` whose scan path is known to
//! exist and whose filter patterns are compiled. Construction is the only
//! phase that mutates settings; everything downstream reads them.

mod decode;
pub mod error;
mod loader;
mod merge;

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::regexu::{self, PatternKind};

pub use error::ConfigError;

/// Raw settings draft, before any config file is read or anything is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBuilder {
    pub(crate) path: PathBuf,
    pub(crate) config: Option<PathBuf>,
    pub(crate) include: String,
    pub(crate) exclude: String,
    pub(crate) all_flag: bool,
    pub(crate) check: bool,
    pub(crate) diff: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
    pub(crate) silence: bool,
    pub(crate) expand_stars: bool,
    pub(crate) no_gitignore: bool,
}

impl ConfigBuilder {
    /// Start a draft at `path` with the built-in defaults.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: None,
            include: regexu::INCLUDE_REGEX.to_string(),
            exclude: regexu::EXCLUDE_REGEX.to_string(),
            all_flag: false,
            check: false,
            diff: false,
            verbose: false,
            quiet: false,
            silence: false,
            expand_stars: false,
            no_gitignore: false,
        }
    }

    /// Reference a config file whose tool section overlays this draft.
    pub fn config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    /// Raw include pattern; compiled during validation.
    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    /// Raw exclude pattern; compiled during validation.
    pub fn exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = exclude.into();
        self
    }

    /// Select every unused import, not only the side-effect-free ones.
    pub fn all_flag(mut self, all_flag: bool) -> Self {
        self.all_flag = all_flag;
        self
    }

    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn diff(mut self, diff: bool) -> Self {
        self.diff = diff;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn silence(mut self, silence: bool) -> Self {
        self.silence = silence;
        self
    }

    pub fn expand_stars(mut self, expand_stars: bool) -> Self {
        self.expand_stars = expand_stars;
        self
    }

    pub fn no_gitignore(mut self, no_gitignore: bool) -> Self {
        self.no_gitignore = no_gitignore;
        self
    }

    /// Resolve the draft into a validated `Config`.
    ///
    /// The config file reference is taken out of the draft before the file is
    /// read, so a section that names `config` again cannot chain another
    /// load. File-provided values overwrite command-line ones; validation
    /// runs on whatever survives the merge.
    pub fn build(mut self) -> Result<Config, ConfigError> {
        if let Some(file) = self.config.take() {
            self.apply_file(&file)?;
        }
        self.validate()
    }

    /// Overlay this draft with the tool section of the config file at `file`.
    pub fn apply_file(&mut self, file: &Path) -> Result<(), ConfigError> {
        loader::apply_file(file, self)
    }

    /// Check the scan path and compile the filter patterns.
    pub fn validate(self) -> Result<Config, ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::NoPath);
        }
        if !(self.path.is_dir() || self.path.is_file()) {
            return Err(ConfigError::InvalidPath { path: self.path });
        }
        let include = regexu::safe_compile(&self.include, PatternKind::Include)?;
        let exclude = regexu::safe_compile(&self.exclude, PatternKind::Exclude)?;
        Ok(Config {
            path: self.path,
            include,
            exclude,
            all_flag: self.all_flag,
            check: self.check,
            diff: self.diff,
            verbose: self.verbose,
            quiet: self.quiet,
            silence: self.silence,
            expand_stars: self.expand_stars,
            no_gitignore: self.no_gitignore,
        })
    }
}

/// Validated runtime settings for one invocation.
///
/// `path` is an existing directory or file and both patterns compiled; the
/// only way to obtain one is through [`ConfigBuilder::build`] or
/// [`ConfigBuilder::validate`].
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub include: Regex,
    pub exclude: Regex,
    pub all_flag: bool,
    pub check: bool,
    pub diff: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub silence: bool,
    pub expand_stars: bool,
    pub no_gitignore: bool,
}

impl Config {
    /// Re-anchor an absolute candidate location under the scan path.
    ///
    /// A candidate that already is an existing file comes back untouched;
    /// anything else is rewritten relative to `path` and joined back onto it.
    /// Purely lexical, no filesystem writes.
    pub fn get_relpath(&self, src: &Path) -> PathBuf {
        if src.is_file() {
            return src.to_path_buf();
        }
        match pathdiff::diff_paths(src, &self.path) {
            Some(rel) => self.path.join(rel),
            None => src.to_path_buf(),
        }
    }
}

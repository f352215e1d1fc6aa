//! Python source discovery with gitignore support

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::Config;
use crate::regexu;
use crate::report::{IgnoreKind, Report};

/// Walk `configs.path` and collect the Python sources to work on.
///
/// Directories matching the exclude pattern are pruned whole, files are kept
/// when they survive the exclude pattern and match the include one, both
/// tested against the slash-normalized path relative to the scan root.
/// A scan path that is itself a file is returned as-is, unfiltered.
/// Results come back sorted by relative path.
pub fn find_sources(configs: &Config, report: &mut Report<'_>) -> Vec<PathBuf> {
    if configs.path.is_file() {
        report.selected_source(&configs.path);
        return vec![configs.path.clone()];
    }

    let respect_gitignore = !configs.no_gitignore;

    // Count raw files with gitignore rules off so the gitignored total can
    // be derived from the difference. The same directories are pruned in
    // both walks to keep the counts comparable.
    let raw_file_count = if respect_gitignore {
        let mut raw = WalkBuilder::new(&configs.path);
        raw.git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .hidden(false)
            .parents(false)
            .filter_entry(dir_filter(configs));
        raw.build().flatten().filter(|entry| !entry.path().is_dir()).count()
    } else {
        0
    };

    let mut builder = WalkBuilder::new(&configs.path);
    builder
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .git_exclude(respect_gitignore)
        .require_git(false)
        .hidden(false)
        .parents(true)
        .filter_entry(dir_filter(configs));

    let mut walked_file_count = 0usize;
    let mut sources: Vec<(PathBuf, String)> = Vec::new();

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                report.failure(&err.to_string());
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        walked_file_count += 1;

        let Some(rel) = relative_slash(path, &configs.path) else {
            continue;
        };
        if regexu::is_excluded(&rel, &configs.exclude) {
            report.ignored_path(path, IgnoreKind::Exclude);
            continue;
        }
        if !regexu::is_included(&rel, &configs.include) {
            report.ignored_path(path, IgnoreKind::Include);
            continue;
        }
        report.selected_source(path);
        sources.push((path.to_path_buf(), rel));
    }

    if respect_gitignore {
        report.gitignored_paths(raw_file_count.saturating_sub(walked_file_count));
    }

    // Sort by relative path for deterministic ordering
    sources.sort_by(|a, b| a.1.cmp(&b.1));
    sources.into_iter().map(|(path, _)| path).collect()
}

/// Directory filter shared by both walks. Prunes any directory whose
/// slash-terminated relative path matches the exclude pattern.
fn dir_filter(configs: &Config) -> impl Fn(&ignore::DirEntry) -> bool + Send + Sync + 'static {
    let root = configs.path.clone();
    let exclude = configs.exclude.clone();
    move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        if !entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false) {
            return true;
        }
        let Some(rel) = relative_slash(entry.path(), &root) else {
            return true;
        };
        let dir = format!("{rel}/");
        if regexu::is_excluded(&dir, &exclude) {
            tracing::debug!(directory = %dir, "pruned by the exclude regex");
            return false;
        }
        true
    }
}

/// Path relative to `root`, joined with forward slashes on every platform.
fn relative_slash(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut out = String::new();
    for part in rel.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&part.as_os_str().to_string_lossy());
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn rel_names(sources: &[PathBuf], root: &Path) -> Vec<String> {
        sources.iter().filter_map(|path| relative_slash(path, root)).collect()
    }

    #[test]
    fn finds_python_sources_in_sorted_order() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("b.py"), "import os\n").expect("write");
        fs::write(tmp.path().join("a.py"), "import sys\n").expect("write");
        fs::create_dir(tmp.path().join("pkg")).expect("mkdir");
        fs::write(tmp.path().join("pkg/c.pyi"), "x: int\n").expect("write");
        fs::write(tmp.path().join("notes.txt"), "not python\n").expect("write");

        let configs = ConfigBuilder::new(tmp.path()).build().expect("build");
        let mut report = Report::new(&configs);
        let sources = find_sources(&configs, &mut report);

        assert_eq!(rel_names(&sources, tmp.path()), vec!["a.py", "b.py", "pkg/c.pyi"]);
        assert_eq!(report.selected_count(), 3);
    }

    #[test]
    fn excluded_directories_are_pruned_whole() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("build")).expect("mkdir");
        fs::write(tmp.path().join("build/gen.py"), "import os\n").expect("write");
        fs::create_dir(tmp.path().join("src")).expect("mkdir");
        fs::write(tmp.path().join("src/main.py"), "import os\n").expect("write");

        let configs = ConfigBuilder::new(tmp.path()).build().expect("build");
        let mut report = Report::new(&configs);
        let sources = find_sources(&configs, &mut report);

        assert_eq!(rel_names(&sources, tmp.path()), vec!["src/main.py"]);
    }

    #[test]
    fn exclude_wins_over_include_for_files() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("keep.py"), "import os\n").expect("write");
        fs::write(tmp.path().join("skip.py"), "import os\n").expect("write");

        let configs =
            ConfigBuilder::new(tmp.path()).exclude(r"skip\.py").build().expect("build");
        let mut report = Report::new(&configs);
        let sources = find_sources(&configs, &mut report);

        assert_eq!(rel_names(&sources, tmp.path()), vec!["keep.py"]);
    }

    #[test]
    fn gitignore_rules_drop_matching_files() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".gitignore"), "generated.py\n").expect("write");
        fs::write(tmp.path().join("kept.py"), "import os\n").expect("write");
        fs::write(tmp.path().join("generated.py"), "import os\n").expect("write");

        let configs = ConfigBuilder::new(tmp.path()).build().expect("build");
        let mut report = Report::new(&configs);
        let sources = find_sources(&configs, &mut report);

        assert_eq!(rel_names(&sources, tmp.path()), vec!["kept.py"]);
        assert!(report.to_string().contains("1 gitignored"));
    }

    #[test]
    fn no_gitignore_flag_keeps_ignored_files() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".gitignore"), "generated.py\n").expect("write");
        fs::write(tmp.path().join("kept.py"), "import os\n").expect("write");
        fs::write(tmp.path().join("generated.py"), "import os\n").expect("write");

        let configs =
            ConfigBuilder::new(tmp.path()).no_gitignore(true).build().expect("build");
        let mut report = Report::new(&configs);
        let sources = find_sources(&configs, &mut report);

        assert_eq!(rel_names(&sources, tmp.path()), vec!["generated.py", "kept.py"]);
    }

    #[test]
    fn a_file_scan_path_is_returned_unfiltered() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("only.py");
        fs::write(&file, "import os\n").expect("write");

        let configs = ConfigBuilder::new(&file).build().expect("build");
        let mut report = Report::new(&configs);
        let sources = find_sources(&configs, &mut report);

        assert_eq!(sources, vec![file]);
        assert_eq!(report.selected_count(), 1);
    }
}

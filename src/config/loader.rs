//! Config-file loading pipeline
//!
//! Resolves a file's extension against the static format table, runs the
//! bound decoder over the tool's section, and merges the result onto the
//! settings draft. Validation is the caller's next step, not ours.

use std::fs;
use std::path::Path;

use super::decode::{self, SectionMap};
use super::error::ConfigError;
use super::merge;
use super::ConfigBuilder;

/// One row per supported config format.
struct Format {
    extension: &'static str,
    section: &'static str,
    decode: fn(&str, &str) -> anyhow::Result<SectionMap>,
}

/// Extension table. Ini-style, JSON and YAML keep the tool's settings under a
/// flat `pycln` key; TOML nests them under `[tool.pycln]`. `.yml` rides on
/// the `.yaml` decoder.
const FORMATS: &[Format] = &[
    Format { extension: "cfg", section: "pycln", decode: decode::decode_cfg },
    Format { extension: "toml", section: "tool.pycln", decode: decode::decode_toml },
    Format { extension: "json", section: "pycln", decode: decode::decode_json },
    Format { extension: "yaml", section: "pycln", decode: decode::decode_yaml },
    Format { extension: "yml", section: "pycln", decode: decode::decode_yaml },
];

/// Rendered for the unsupported-format diagnostic; must track `FORMATS`.
pub(super) const SUPPORTED_EXTENSIONS: &str = ".cfg, .toml, .json, .yaml, .yml";

fn resolve_format(path: &Path) -> Option<&'static Format> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    FORMATS.iter().find(|format| format.extension == extension)
}

/// Overlay `builder` with the tool section of the config file at `path`.
pub(crate) fn apply_file(path: &Path, builder: &mut ConfigBuilder) -> Result<(), ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile { path: path.to_path_buf() });
    }
    let format = resolve_format(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat { path: path.to_path_buf() })?;

    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let section = (format.decode)(&content, format.section)
        .map_err(|err| ConfigError::Parse { path: path.to_path_buf(), message: format!("{err:#}") })?;

    tracing::debug!(file = %path.display(), keys = section.len(), "merging config file section");
    merge::apply(builder, &section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn draft(dir: &TempDir) -> ConfigBuilder {
        ConfigBuilder::new(dir.path())
    }

    #[test]
    fn supported_extensions_tracks_the_table() {
        let rendered =
            FORMATS.iter().map(|f| format!(".{}", f.extension)).collect::<Vec<_>>().join(", ");
        assert_eq!(rendered, SUPPORTED_EXTENSIONS);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let tmp = TempDir::new().expect("tmp");
        let gone = tmp.path().join("setup.cfg");
        let mut builder = draft(&tmp);
        let err = apply_file(&gone, &mut builder).expect_err("should fail");
        match err {
            ConfigError::MissingFile { path } => assert_eq!(path, gone),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unrecognized_extension_is_unsupported() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("tox.ini");
        fs::write(&file, "[pycln]\nverbose = true\n").expect("write");
        let mut builder = draft(&tmp);
        let err = apply_file(&file, &mut builder).expect_err("should fail");
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
        assert!(err.to_string().contains(SUPPORTED_EXTENSIONS));
    }

    #[test]
    fn extensionless_file_is_unsupported() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("pyclnrc");
        fs::write(&file, "verbose = true\n").expect("write");
        let mut builder = draft(&tmp);
        let err = apply_file(&file, &mut builder).expect_err("should fail");
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn every_format_merges_the_same_section_content() {
        let tmp = TempDir::new().expect("tmp");
        let files = [
            ("setup.cfg", "[pycln]\nall = true\nverbose = true\n"),
            ("pyproject.toml", "[tool.pycln]\nall = true\nverbose = true\n"),
            ("pycln.json", "{\"pycln\": {\"all\": true, \"verbose\": true}}"),
            ("pycln.yaml", "pycln:\n  all: true\n  verbose: true\n"),
            ("pycln.yml", "pycln:\n  all: true\n  verbose: true\n"),
        ];
        let mut merged = Vec::new();
        for (name, content) in files {
            let file = tmp.path().join(name);
            fs::write(&file, content).expect("write");
            let mut builder = draft(&tmp);
            apply_file(&file, &mut builder).expect("apply");
            merged.push(builder);
        }
        for other in &merged[1..] {
            assert_eq!(&merged[0], other);
        }
        assert!(merged[0].all_flag);
        assert!(merged[0].verbose);
        assert!(!merged[0].check);
    }

    #[test]
    fn absent_section_leaves_the_draft_untouched() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("pyproject.toml");
        fs::write(&file, "[tool.black]\nline-length = 88\n").expect("write");
        let mut builder = draft(&tmp);
        let before = builder.clone();
        apply_file(&file, &mut builder).expect("apply");
        assert_eq!(builder, before);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("pycln.json");
        fs::write(&file, "{\"pycln\": ").expect("write");
        let mut builder = draft(&tmp);
        let err = apply_file(&file, &mut builder).expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("pycln.json"));
    }

    #[test]
    fn uppercase_extension_still_resolves() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("PYCLN.TOML");
        fs::write(&file, "[tool.pycln]\ncheck = true\n").expect("write");
        let mut builder = draft(&tmp);
        apply_file(&file, &mut builder).expect("apply");
        assert!(builder.check);
    }
}

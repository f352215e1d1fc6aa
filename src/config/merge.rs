//! Merging a decoded section onto the settings draft
//!
//! The whitelist of assignable fields is the static table below; file keys
//! that name nothing in it are dropped without complaint. The one spelling
//! quirk handled here is `all`, which stands for the `all_flag` field.

use super::decode::{Scalar, SectionMap};
use super::error::ConfigError;
use super::ConfigBuilder;

type Setter = fn(&mut ConfigBuilder, &Scalar) -> Result<(), ConfigError>;

/// Known field names and their typed setters. `config` is deliberately not
/// here: a config file cannot point the loader at another config file.
const FIELD_SETTERS: &[(&str, Setter)] = &[
    ("path", set_path),
    ("include", set_include),
    ("exclude", set_exclude),
    ("all_flag", set_all_flag),
    ("check", set_check),
    ("diff", set_diff),
    ("verbose", set_verbose),
    ("quiet", set_quiet),
    ("silence", set_silence),
    ("expand_stars", set_expand_stars),
    ("no_gitignore", set_no_gitignore),
];

/// Apply every recognized key/value pair of `section` to `builder`.
pub(crate) fn apply(builder: &mut ConfigBuilder, section: &SectionMap) -> Result<(), ConfigError> {
    for (key, value) in section {
        // `all` collides with the flag's field name in the settings schema.
        let field = if key == "all" { "all_flag" } else { key.as_str() };
        match FIELD_SETTERS.iter().find(|(name, _)| *name == field) {
            Some((_, set)) => set(builder, value)?,
            None => tracing::debug!("ignoring unknown config key '{key}'"),
        }
    }
    Ok(())
}

fn set_path(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.path = as_string("path", value)?.into();
    Ok(())
}

fn set_include(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.include = as_string("include", value)?;
    Ok(())
}

fn set_exclude(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.exclude = as_string("exclude", value)?;
    Ok(())
}

fn set_all_flag(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.all_flag = as_bool("all", value)?;
    Ok(())
}

fn set_check(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.check = as_bool("check", value)?;
    Ok(())
}

fn set_diff(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.diff = as_bool("diff", value)?;
    Ok(())
}

fn set_verbose(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.verbose = as_bool("verbose", value)?;
    Ok(())
}

fn set_quiet(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.quiet = as_bool("quiet", value)?;
    Ok(())
}

fn set_silence(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.silence = as_bool("silence", value)?;
    Ok(())
}

fn set_expand_stars(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.expand_stars = as_bool("expand_stars", value)?;
    Ok(())
}

fn set_no_gitignore(builder: &mut ConfigBuilder, value: &Scalar) -> Result<(), ConfigError> {
    builder.no_gitignore = as_bool("no_gitignore", value)?;
    Ok(())
}

/// Read a boolean, accepting the configparser vocabulary for `.cfg` files
/// where every value arrives as a string.
fn as_bool(key: &str, value: &Scalar) -> Result<bool, ConfigError> {
    match value {
        Scalar::Bool(flag) => Ok(*flag),
        Scalar::Str(text) => match text.to_ascii_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok(true),
            "0" | "no" | "false" | "off" => Ok(false),
            _ => Err(invalid(key, "a boolean", value)),
        },
        _ => Err(invalid(key, "a boolean", value)),
    }
}

fn as_string(key: &str, value: &Scalar) -> Result<String, ConfigError> {
    match value {
        Scalar::Str(text) => Ok(text.clone()),
        _ => Err(invalid(key, "a string", value)),
    }
}

fn invalid(key: &str, expected: &'static str, found: &Scalar) -> ConfigError {
    ConfigError::InvalidValue { key: key.to_string(), expected, found: found.to_string() }
}

//! Per-format section extraction
//!
//! Each decoder takes raw file content plus the resolved section key and
//! produces the same intermediate shape: a flat map of scalar values. An
//! absent or explicitly empty section is an empty map, never an error, so
//! defaults survive untouched.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{bail, Context, Result};
use configparser::ini::Ini;

/// A single decoded config value, as typed as the source format allows.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Str(v) => write!(f, "'{v}'"),
        }
    }
}

/// The flat mapping a decoder hands to the merger.
pub(crate) type SectionMap = BTreeMap<String, Scalar>;

/// Parse `.cfg` content with Python-configparser semantics.
///
/// Section and key names come back lowercased, and keys without a value are
/// tolerated; they contribute nothing to the mapping.
pub(crate) fn decode_cfg(content: &str, section: &str) -> Result<SectionMap> {
    let mut ini = Ini::new();
    let parsed = ini
        .read(content.to_string())
        .map_err(|message| anyhow::anyhow!("invalid cfg syntax: {message}"))?;

    let Some(fields) = parsed.get(section) else {
        return Ok(SectionMap::new());
    };
    Ok(fields
        .iter()
        .filter_map(|(key, value)| {
            value.as_ref().map(|value| (key.clone(), Scalar::Str(value.clone())))
        })
        .collect())
}

/// Parse `.toml` content; the section key is a dotted path into nested tables.
pub(crate) fn decode_toml(content: &str, section: &str) -> Result<SectionMap> {
    let doc: toml::Value = toml::from_str(content).context("invalid TOML syntax")?;

    let mut node = Some(&doc);
    for part in section.split('.') {
        node = node.and_then(|value| value.get(part));
    }
    match node {
        None => Ok(SectionMap::new()),
        Some(toml::Value::Table(table)) => Ok(table
            .iter()
            .filter_map(|(key, value)| {
                let scalar = match value {
                    toml::Value::Boolean(v) => Scalar::Bool(*v),
                    toml::Value::Integer(v) => Scalar::Int(*v),
                    toml::Value::Float(v) => Scalar::Float(*v),
                    toml::Value::String(v) => Scalar::Str(v.clone()),
                    _ => return None,
                };
                Some((key.clone(), scalar))
            })
            .collect()),
        Some(other) => bail!("'{section}' is not a table (found {})", other.type_str()),
    }
}

/// Parse `.json` content and extract the top-level section object.
pub(crate) fn decode_json(content: &str, section: &str) -> Result<SectionMap> {
    let doc: serde_json::Value = serde_json::from_str(content).context("invalid JSON syntax")?;

    match doc.get(section) {
        None | Some(serde_json::Value::Null) => Ok(SectionMap::new()),
        Some(serde_json::Value::Object(object)) => Ok(object
            .iter()
            .filter_map(|(key, value)| {
                let scalar = match value {
                    serde_json::Value::Bool(v) => Scalar::Bool(*v),
                    serde_json::Value::String(v) => Scalar::Str(v.clone()),
                    serde_json::Value::Number(v) => match (v.as_i64(), v.as_f64()) {
                        (Some(int), _) => Scalar::Int(int),
                        (None, Some(float)) => Scalar::Float(float),
                        (None, None) => return None,
                    },
                    _ => return None,
                };
                Some((key.clone(), scalar))
            })
            .collect()),
        Some(_) => bail!("'{section}' is not an object"),
    }
}

/// Parse `.yaml` content and extract the top-level section mapping.
///
/// `.yml` files go through this decoder unchanged.
pub(crate) fn decode_yaml(content: &str, section: &str) -> Result<SectionMap> {
    let doc: serde_yaml::Value = serde_yaml::from_str(content).context("invalid YAML syntax")?;

    match doc.get(section) {
        None | Some(serde_yaml::Value::Null) => Ok(SectionMap::new()),
        Some(serde_yaml::Value::Mapping(mapping)) => Ok(mapping
            .iter()
            .filter_map(|(key, value)| {
                let key = key.as_str()?.to_string();
                let scalar = match value {
                    serde_yaml::Value::Bool(v) => Scalar::Bool(*v),
                    serde_yaml::Value::String(v) => Scalar::Str(v.clone()),
                    serde_yaml::Value::Number(v) => match (v.as_i64(), v.as_f64()) {
                        (Some(int), _) => Scalar::Int(int),
                        (None, Some(float)) => Scalar::Float(float),
                        (None, None) => return None,
                    },
                    _ => return None,
                };
                Some((key, scalar))
            })
            .collect()),
        Some(_) => bail!("'{section}' is not a mapping"),
    }
}

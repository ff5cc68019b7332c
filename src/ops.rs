//! Site operations: value lookup, listing, feature reports, template
//! generation, and the `ConfigResult` enum callers use to display results.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::assemble::AssembledConfig;
use crate::error::SitefigError;
use crate::feature::FeatureStatus;
use crate::settings::ProjectSettings;

/// Result of a site operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// Files written by a build, in write order.
    Built { paths: Vec<PathBuf> },
    /// The assembled configuration as pretty JSON.
    Json(String),
    /// One value of the assembled configuration.
    KeyValue { key: String, value: String },
    /// Every leaf of the assembled configuration.
    Listing { entries: Vec<(String, String)> },
    /// Feature switches and where their settings came from.
    Features(Vec<FeatureStatus>),
    /// Outcome of a sidebar check.
    Checked { docs: usize, missing: Vec<String> },
    /// A generated settings template.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
    /// Confirmation that a value was written to the base file.
    ValueSet { key: String, value: String },
    /// Confirmation that a value was removed from the base file.
    ValueUnset { key: String },
}

impl ConfigResult {
    /// Whether the operation found a problem the caller should fail on.
    pub fn is_failure(&self) -> bool {
        matches!(self, ConfigResult::Checked { missing, .. } if !missing.is_empty())
    }
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Built { paths } => {
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "Wrote {}", path.display())?;
                }
                Ok(())
            }
            ConfigResult::Json(json) => write!(f, "{json}"),
            ConfigResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::Features(statuses) => {
                for (i, status) in statuses.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let state = if status.enabled { "enabled" } else { "disabled" };
                    write!(f, "{}: {state} ({})", status.name, status.source.display())?;
                }
                Ok(())
            }
            ConfigResult::Checked { docs, missing } => {
                if missing.is_empty() {
                    return write!(f, "Sidebars OK ({docs} docs)");
                }
                write!(f, "{} of {docs} docs missing:", missing.len())?;
                for id in missing {
                    write!(f, "\n  {id}")?;
                }
                Ok(())
            }
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::TemplateWritten { path } => {
                write!(f, "Settings template written to {}", path.display())
            }
            ConfigResult::ValueSet { key, value } => write!(f, "Set {key} = {value}"),
            ConfigResult::ValueUnset { key } => write!(f, "Unset {key}"),
        }
    }
}

/// Generate a commented `sitefig.toml` template from the settings struct's
/// doc comments and defaults.
pub fn generate_template() -> String {
    confique::toml::template::<ProjectSettings>(confique::toml::FormatOptions::default())
}

/// Look up one value of the assembled configuration by dotted key.
pub fn get_value(config: &AssembledConfig, key: &str) -> Result<ConfigResult, SitefigError> {
    let value = config
        .get(key)
        .ok_or_else(|| SitefigError::KeyNotFound(key.into()))?;
    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: format_value(value),
    })
}

/// Flatten the assembled configuration into `dotted.key = value` pairs.
/// Array elements are addressed by index; empty objects and arrays are kept
/// as leaves.
pub fn list_values(config: &AssembledConfig) -> ConfigResult {
    let mut entries = Vec::new();
    for (key, value) in config.as_map() {
        flatten_into(key.clone(), value, &mut entries);
    }
    ConfigResult::Listing { entries }
}

fn flatten_into(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(format!("{prefix}.{key}"), child, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(format!("{prefix}.{i}"), child, out);
            }
        }
        leaf => out.push((prefix, format_value(leaf))),
    }
}

/// Strings print bare; everything else prints as compact JSON.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

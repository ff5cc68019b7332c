//! Resolution pipelines over pre-loaded data. No I/O happens here, so every
//! step is testable with synthetic inputs.
//!
//! Settings:
//!
//! 1. Validate each settings file (if strict)
//! 2. Parse and deep-merge the files (later overrides earlier)
//! 3. Deep-merge overrides on top
//! 4. Deserialize into the settings layer; confique fills defaults
//!
//! Site:
//!
//! 1. Validate each base file against [`SiteConfig`] (if strict)
//! 2. Parse and deep-merge base and overlays
//! 3. Convert to the JSON base configuration
//! 4. [`assemble`] with the feature set

use std::path::{Path, PathBuf};

use confique::Config;
use toml::{Table, Value};

use crate::assemble::{AssembledConfig, BaseConfig, assemble};
use crate::error::SitefigError;
use crate::feature::FeatureSet;
use crate::merge::deep_merge;
use crate::overrides;
use crate::settings::ProjectSettings;
use crate::site::{self, SiteConfig};
use crate::validate;

type SettingsLayer = <ProjectSettings as Config>::Layer;

/// Everything needed to resolve [`ProjectSettings`].
pub struct SettingsInput {
    /// File contents in precedence order: first = lowest priority, last = highest.
    pub files: Vec<(PathBuf, String)>,
    /// Overrides as `(dotted_key, value)` pairs.
    pub overrides: Vec<(String, Value)>,
    /// Whether to reject unknown keys in settings files.
    pub strict: bool,
}

pub fn resolve_settings(input: SettingsInput) -> Result<ProjectSettings, SitefigError> {
    let mut merged = merge_files(
        &input.files,
        input.strict,
        validate::validate_unknown_keys::<SettingsLayer>,
    )?;

    if !input.overrides.is_empty() {
        let table = overrides::overrides_to_table(&input.overrides)?;
        merged = deep_merge(merged, table);
    }

    let layer: SettingsLayer =
        Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| SitefigError::InvalidValue {
                key: "<settings>".into(),
                reason: e.to_string(),
            })?;

    ProjectSettings::builder()
        .preloaded(layer)
        .load()
        .map_err(SitefigError::from)
}

/// Everything needed to assemble the site configuration.
pub struct SiteInput {
    /// Base file first, then overlays in ascending priority.
    pub base_files: Vec<(PathBuf, String)>,
    pub features: FeatureSet,
    /// Whether to reject unknown keys in base files.
    pub strict: bool,
}

pub fn resolve_site(input: SiteInput) -> Result<AssembledConfig, SitefigError> {
    let merged = merge_files(&input.base_files, input.strict, SiteConfig::validate_file)?;
    let base = BaseConfig::from(site::table_to_json(merged)?);
    assemble(&base, &input.features)
}

/// Validate (with `check`, when strict), parse and deep-merge files.
fn merge_files(
    files: &[(PathBuf, String)],
    strict: bool,
    check: fn(&str, &Path) -> Result<(), SitefigError>,
) -> Result<Table, SitefigError> {
    let mut merged = Table::new();
    for (path, content) in files {
        if strict {
            check(content, path)?;
        }
        let table: Table = toml::from_str(content).map_err(|e| SitefigError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        merged = deep_merge(merged, table);
    }
    Ok(merged)
}

//! Assemble the final site configuration from a base and optional features.
//!
//! [`assemble`] is a pure function: it borrows its inputs, returns a fresh
//! value, and never touches the filesystem or the logger. Everything that
//! reads files lives in [`file`](crate::file) and the builder.

use serde_json::{Map, Value};

use crate::error::SitefigError;
use crate::feature::{FeatureSet, is_enabled};

/// Key of the theme mapping that feature settings are merged into.
pub const THEME_CONFIG: &str = "themeConfig";

/// The always-present core site configuration, as the JSON object the site
/// generator expects (camelCase keys).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseConfig(Map<String, Value>);

impl BaseConfig {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for BaseConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for BaseConfig {
    type Error = SitefigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(SitefigError::MalformedBase {
                field: "<root>".into(),
                reason: "not a mapping".into(),
            }),
        }
    }
}

/// The merged configuration handed to the site generator.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledConfig(Map<String, Value>);

impl AssembledConfig {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// The `themeConfig` mapping. Always present after a successful assembly.
    pub fn theme_config(&self) -> Option<&Map<String, Value>> {
        self.0.get(THEME_CONFIG).and_then(Value::as_object)
    }

    /// Settings merged for feature `name`, if it ended up enabled.
    pub fn feature(&self, name: &str) -> Option<&Map<String, Value>> {
        self.theme_config()?.get(name).and_then(Value::as_object)
    }

    /// Look up a value by dotted path (`themeConfig.navbar.title`).
    ///
    /// Numeric segments index into arrays (`presets.0`).
    pub fn get(&self, dotted_key: &str) -> Option<&Value> {
        let mut segments = dotted_key.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Pretty-printed JSON. Key order follows the base, then feature names.
    pub fn to_json_pretty(&self) -> String {
        format!("{:#}", Value::Object(self.0.clone()))
    }
}

impl From<AssembledConfig> for BaseConfig {
    fn from(config: AssembledConfig) -> Self {
        BaseConfig(config.0)
    }
}

/// Merge `features` into `base`'s `themeConfig`.
///
/// For every feature in the set:
/// - empty settings (see [`is_enabled`]) remove `themeConfig.<name>`;
/// - non-empty settings are shallow-merged at `themeConfig.<name>`: when an
///   object is already there its keys are kept unless the feature overwrites
///   them, otherwise the feature object replaces whatever was there.
///
/// Fails only when `base` has no `themeConfig` object to merge into. That is
/// checked even when `features` is empty.
pub fn assemble(base: &BaseConfig, features: &FeatureSet) -> Result<AssembledConfig, SitefigError> {
    let mut out = base.0.clone();

    let theme = match out.get_mut(THEME_CONFIG) {
        Some(Value::Object(theme)) => theme,
        Some(_) => {
            return Err(SitefigError::MalformedBase {
                field: THEME_CONFIG.into(),
                reason: "not a mapping".into(),
            });
        }
        None => {
            return Err(SitefigError::MalformedBase {
                field: THEME_CONFIG.into(),
                reason: "missing".into(),
            });
        }
    };

    for (name, settings) in features.iter() {
        if !is_enabled(settings) {
            theme.shift_remove(name);
            continue;
        }
        let Value::Object(settings) = settings else {
            continue;
        };
        match theme.get_mut(name) {
            Some(Value::Object(existing)) => {
                for (key, value) in settings {
                    existing.insert(key.clone(), value.clone());
                }
            }
            _ => {
                theme.insert(name.to_string(), Value::Object(settings.clone()));
            }
        }
    }

    Ok(AssembledConfig(out))
}

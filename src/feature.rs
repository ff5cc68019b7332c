//! Optional feature blocks and the emptiness rule that switches them on.
//!
//! A feature is identified by the key it occupies under `themeConfig` in the
//! assembled configuration (`algolia`, `googleAnalytics`, ...). Its settings
//! are opaque JSON loaded from somewhere else; the only question asked of them
//! is whether they hold at least one key.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

/// Search provider settings, merged at `themeConfig.algolia`.
pub const ALGOLIA: &str = "algolia";

/// Analytics tracking settings, merged at `themeConfig.googleAnalytics`.
pub const GOOGLE_ANALYTICS: &str = "googleAnalytics";

/// Whether a settings value switches its feature on.
///
/// Only a JSON object with at least one key counts. `null`, `{}` and
/// non-object values (arrays, strings, numbers, booleans) are all disabled.
pub fn is_enabled(settings: &Value) -> bool {
    match settings {
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}

/// Feature settings keyed by feature name, iterated in name order.
///
/// Inserting the same name twice keeps the last settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    entries: BTreeMap<String, Value>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the settings for `name`.
    pub fn insert(&mut self, name: impl Into<String>, settings: Value) {
        self.entries.insert(name.into(), settings);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, settings: Value) -> Self {
        self.insert(name, settings);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names of the features whose settings are non-empty.
    pub fn enabled(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, settings)| is_enabled(settings))
            .map(|(name, _)| name)
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for (name, settings) in iter {
            set.insert(name, settings);
        }
        set
    }
}

/// Where a feature's settings came from and whether they switched it on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureStatus {
    pub name: String,
    pub source: PathBuf,
    pub enabled: bool,
}

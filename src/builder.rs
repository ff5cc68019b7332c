use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assemble::AssembledConfig;
use crate::error::SitefigError;
use crate::feature::{self, FeatureSet, FeatureStatus};
use crate::file;
use crate::ops::{self, ConfigResult};
use crate::persist;
use crate::resolve::{self, SettingsInput, SiteInput};
use crate::settings::ProjectSettings;
use crate::sidebar::Sidebars;
use crate::types::{ConfigAction, SearchMode, SearchPath};

/// Settings file looked up along the search paths.
pub const DEFAULT_FILE_NAME: &str = "sitefig.toml";

/// Entry point for assembling a site.
pub struct Sitefig;

impl Sitefig {
    pub fn builder() -> SitefigBuilder {
        SitefigBuilder::new()
    }
}

/// A loaded site: resolved settings plus everything assembled from them.
#[derive(Debug, Clone)]
pub struct Site {
    pub root: PathBuf,
    /// Settings with every path resolved against `root`.
    pub settings: ProjectSettings,
    pub config: AssembledConfig,
    /// Present when `sidebars` is configured. Already validated.
    pub sidebars: Option<Sidebars>,
    /// One entry per known feature, in settings order.
    pub features: Vec<FeatureStatus>,
}

impl Site {
    /// Write the assembled configuration (to `output`, or the configured path)
    /// and the sidebars when present. Returns the written paths.
    pub fn write(&self, output: Option<&Path>) -> Result<Vec<PathBuf>, SitefigError> {
        let config_path = output.unwrap_or(self.settings.output.config.as_path());
        file::write_output(config_path, &self.config.to_json_pretty())?;
        let mut paths = vec![config_path.to_path_buf()];

        if let Some(sidebars) = &self.sidebars {
            let path = &self.settings.output.sidebars;
            write_json(path, sidebars)?;
            paths.push(path.clone());
        }
        Ok(paths)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SitefigError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| SitefigError::JsonError {
        path: path.to_path_buf(),
        source: e,
    })?;
    file::write_output(path, &json)
}

/// Builder for locating, loading and assembling a site.
///
/// - **Discovery**: [`root()`](Self::root) and [`search_paths()`](Self::search_paths)
///   decide where `sitefig.toml` is looked up.
/// - **Resolution**: [`search_mode()`](Self::search_mode) merges every settings
///   file found or picks one. [`set()`](Self::set) layers overrides on top.
/// - **Validation**: [`strict()`](Self::strict) rejects unknown keys in settings
///   and base files.
pub struct SitefigBuilder {
    root: Option<PathBuf>,
    file_name: Option<String>,
    search_paths: Option<Vec<SearchPath>>,
    search_mode: SearchMode,
    strict: bool,
    overrides: Vec<(String, toml::Value)>,
}

impl SitefigBuilder {
    fn new() -> Self {
        Self {
            root: None,
            file_name: None,
            search_paths: None,
            search_mode: SearchMode::default(),
            strict: true,
            overrides: Vec::new(),
        }
    }

    /// Project root (default: the current directory). Relative paths in the
    /// settings resolve against it.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Override the settings file name (default: `"sitefig.toml"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Replace the default search paths (`[Root]`) entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has the
    /// highest priority.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path without replacing the defaults.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths
            .get_or_insert_with(|| vec![SearchPath::Root])
            .push(path);
        self
    }

    /// Set the search mode (default: [`SearchMode::Merge`]).
    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Enable or disable strict mode (default: `true`).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override a settings value. `None` is ignored, which suits optional clap args.
    pub fn set<V: Into<toml::Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.overrides.push((key.to_string(), v.into()));
        }
        self
    }

    /// Add pre-parsed overrides, such as `--set` pairs from the command line.
    pub fn overrides(mut self, pairs: impl IntoIterator<Item = (String, toml::Value)>) -> Self {
        self.overrides.extend(pairs);
        self
    }

    fn effective_root(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn effective_file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        self.search_paths
            .clone()
            .unwrap_or_else(|| vec![SearchPath::Root])
    }

    fn settings_at(&self, root: &Path) -> Result<ProjectSettings, SitefigError> {
        let files = file::load_settings_files(
            &self.effective_search_paths(),
            self.effective_file_name(),
            root,
            self.search_mode,
        )?;
        if files.is_empty() {
            tracing::debug!("no {} found, using defaults", self.effective_file_name());
        }

        let settings = resolve::resolve_settings(SettingsInput {
            files,
            overrides: self.overrides.clone(),
            strict: self.strict,
        })?;
        Ok(settings.rooted(root))
    }

    /// Resolve the project settings. Relative paths come back joined to the root.
    pub fn settings(&self) -> Result<ProjectSettings, SitefigError> {
        self.settings_at(&self.effective_root())
    }

    /// Load the base files, feature settings and sidebars, and assemble.
    pub fn load(&self) -> Result<Site, SitefigError> {
        let root = self.effective_root();
        let settings = self.settings_at(&root)?;

        let base_files = file::load_base_files(&settings.base_files())?;

        let mut features = FeatureSet::new();
        let mut statuses = Vec::new();
        for (name, path) in settings.features.sources() {
            let value = file::load_feature_settings(path)?;
            let enabled = feature::is_enabled(&value);
            tracing::debug!(feature = name, enabled, "feature settings from {}", path.display());
            statuses.push(FeatureStatus {
                name: name.to_string(),
                source: path.to_path_buf(),
                enabled,
            });
            features.insert(name, value);
        }

        let config = resolve::resolve_site(SiteInput {
            base_files,
            features,
            strict: self.strict,
        })?;

        let sidebars = match &settings.sidebars {
            Some(path) => {
                let sidebars = file::load_sidebars(path)?;
                sidebars.validate()?;
                let names: Vec<&str> = sidebars.names().collect();
                tracing::debug!("sidebars {} from {}", names.join(", "), path.display());
                Some(sidebars)
            }
            None => None,
        };

        Ok(Site {
            root,
            settings,
            config,
            sidebars,
            features: statuses,
        })
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &ConfigAction) -> Result<ConfigResult, SitefigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(result)
    }

    /// Handle a `ConfigAction`.
    pub fn handle(self, action: &ConfigAction) -> Result<ConfigResult, SitefigError> {
        match action {
            ConfigAction::Build { output } => {
                let site = self.load()?;
                let paths = site.write(output.as_deref())?;
                Ok(ConfigResult::Built { paths })
            }
            ConfigAction::Show => {
                let site = self.load()?;
                Ok(ConfigResult::Json(site.config.to_json_pretty()))
            }
            ConfigAction::Get { key } => {
                let site = self.load()?;
                ops::get_value(&site.config, key)
            }
            ConfigAction::List => {
                let site = self.load()?;
                Ok(ops::list_values(&site.config))
            }
            ConfigAction::Features => {
                let site = self.load()?;
                Ok(ConfigResult::Features(site.features))
            }
            ConfigAction::Check => {
                let settings = self.settings()?;
                let sidebars_path = settings.sidebars.as_ref().ok_or(SitefigError::NoSidebars)?;
                let docs_dir = settings.docs_dir.as_ref().ok_or(SitefigError::NoDocsDir)?;

                let sidebars = file::load_sidebars(sidebars_path)?;
                sidebars.validate()?;
                let missing = sidebars.missing_docs(docs_dir);
                Ok(ConfigResult::Checked {
                    docs: sidebars.doc_ids().len(),
                    missing,
                })
            }
            ConfigAction::Gen { output } => {
                let template = ops::generate_template();
                match output {
                    Some(path) => {
                        file::write_output(path, &template)?;
                        Ok(ConfigResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(ConfigResult::Template(template)),
                }
            }
            ConfigAction::Set { key, value } => {
                let settings = self.settings()?;
                persist::persist_value(&settings.base, key, value, self.strict)
            }
            ConfigAction::Unset { key } => {
                let settings = self.settings()?;
                persist::unset_value(&settings.base, key)
            }
        }
    }
}

//! Project settings (`sitefig.toml`): where the inputs and outputs of a site
//! live. Every field has a compiled default, so a project without a settings
//! file still works.

use std::path::{Path, PathBuf};

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::feature::{ALGOLIA, GOOGLE_ANALYTICS};

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectSettings {
    /// Base site configuration file.
    #[config(default = "site.toml")]
    pub base: PathBuf,

    /// Extra base files layered over `base`, in order. Missing files are skipped.
    pub overlays: Option<Vec<PathBuf>>,

    /// Sidebar navigation manifest.
    pub sidebars: Option<PathBuf>,

    /// Directory holding the markdown docs the sidebars reference.
    pub docs_dir: Option<PathBuf>,

    /// Feature settings files. An empty or missing file disables its feature.
    #[config(nested)]
    pub features: FeatureFiles,

    /// Where assembled files are written.
    #[config(nested)]
    pub output: OutputPaths,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeatureFiles {
    /// Search provider settings, merged at `themeConfig.algolia`.
    #[config(default = "algolia.config.json")]
    pub algolia: PathBuf,

    /// Analytics settings, merged at `themeConfig.googleAnalytics`.
    #[config(default = "google-analytics.config.json")]
    pub google_analytics: PathBuf,
}

impl FeatureFiles {
    /// Feature names paired with their settings files.
    pub fn sources(&self) -> [(&'static str, &Path); 2] {
        [
            (ALGOLIA, self.algolia.as_path()),
            (GOOGLE_ANALYTICS, self.google_analytics.as_path()),
        ]
    }
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutputPaths {
    /// Assembled site configuration (JSON).
    #[config(default = "build/docusaurus.config.json")]
    pub config: PathBuf,

    /// Sidebars (JSON). Only written when `sidebars` is set.
    #[config(default = "build/sidebars.json")]
    pub sidebars: PathBuf,
}

impl ProjectSettings {
    /// Resolve every relative path against `root`.
    pub fn rooted(mut self, root: &Path) -> Self {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        };
        join(&mut self.base);
        for overlay in self.overlays.iter_mut().flatten() {
            join(overlay);
        }
        if let Some(p) = self.sidebars.as_mut() {
            join(p);
        }
        if let Some(p) = self.docs_dir.as_mut() {
            join(p);
        }
        join(&mut self.features.algolia);
        join(&mut self.features.google_analytics);
        join(&mut self.output.config);
        join(&mut self.output.sidebars);
        self
    }

    /// Base file followed by its overlays, lowest priority first.
    pub fn base_files(&self) -> Vec<&Path> {
        std::iter::once(self.base.as_path())
            .chain(self.overlays.iter().flatten().map(PathBuf::as_path))
            .collect()
    }
}

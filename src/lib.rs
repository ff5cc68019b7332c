//! Assemble a documentation site's configuration from a base file and
//! optional feature blocks.
//!
//! A site generator wants one configuration object. Most of it is fixed
//! (title, URLs, navbar, footer) and lives in a base file under version
//! control. Some of it is optional and environment-specific: search provider
//! credentials, analytics tracking ids. Those come from separate settings
//! files that may be absent or empty, and an empty block must not switch the
//! feature on.
//!
//! ```ignore
//! let site = Sitefig::builder().root("website").load()?;
//! println!("{}", site.config.to_json_pretty());
//! ```
//!
//! That call reads `website/sitefig.toml` (if present), the base `site.toml`,
//! each feature's settings file and the sidebar manifest, then hands back the
//! assembled configuration.
//!
//! # The assembly rule
//!
//! [`assemble()`] is the core, and it is a pure function over a
//! [`BaseConfig`] and a [`FeatureSet`]:
//!
//! - A feature whose settings are a JSON object with at least one key is
//!   **enabled** and merged at `themeConfig.<name>`.
//! - Anything else (`{}`, `null`, a missing file, a scalar) is **disabled**,
//!   and `themeConfig.<name>` is absent from the output.
//! - Every other part of the base passes through untouched, in its original
//!   key order.
//!
//! The base must carry a `themeConfig` mapping; without one assembly fails
//! with [`SitefigError::MalformedBase`].
//!
//! # Layer precedence
//!
//! Project settings (`sitefig.toml`) say where the inputs and outputs live:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Settings files        search paths in order, later paths win
//!        ↑ overridden by
//! Overrides             .set() / --set key=value
//! ```
//!
//! The base file works the same way one level down: `overlays` listed in the
//! settings are deep-merged over `site.toml`, so a local preview can change
//! `url` without copying the whole base.
//!
//! # Discovery
//!
//! [`search_paths()`](SitefigBuilder::search_paths) accepts [`SearchPath`]
//! variants in **priority-ascending** order. `Root` is the project root,
//! `Ancestors(Boundary::Marker(".git"))` walks up to the repository root so a
//! monorepo can keep shared settings at the top.
//! [`search_mode()`](SitefigBuilder::search_mode) picks between merging every
//! file found and using only the highest-priority one.
//!
//! # Strict mode
//!
//! Strict mode is **on by default**. Unknown keys in `sitefig.toml` or in a
//! base file fail loading with the file path, key and line number:
//!
//! ```text
//! Unknown key 'themeConfig.navbar.hideOnScrol' in site.local.toml (line 2)
//! ```
//!
//! # Operations
//!
//! [`ConfigAction`] describes what to do (`build`, `show`, `get`, `list`,
//! `features`, `check`, `gen`, `set`, `unset`) and
//! [`SitefigBuilder::handle()`] returns a [`ConfigResult`] for display. The
//! `clap` feature (on by default) adds [`SiteArgs`] and the `sitefig` binary.
//! `set` and `unset` edit the base file with `toml_edit`, so comments survive.

pub mod assemble;
pub mod error;
pub mod feature;
pub mod settings;
pub mod sidebar;
pub mod site;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod file;
pub(crate) mod merge;
mod ops;
mod overrides;
mod persist;
mod resolve;
mod validate;

#[cfg(test)]
mod fixtures;

pub use assemble::{AssembledConfig, BaseConfig, assemble};
pub use builder::{Site, Sitefig, SitefigBuilder};
#[cfg(feature = "clap")]
pub use cli::{SiteArgs, SiteSubcommand};
pub use error::SitefigError;
pub use feature::{FeatureSet, FeatureStatus};
pub use ops::ConfigResult;
pub use settings::ProjectSettings;
pub use sidebar::Sidebars;
pub use types::{Boundary, ConfigAction, SearchMode, SearchPath};

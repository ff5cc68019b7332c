//! Clap adapter for sitefig.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! [`SiteArgs`] and [`SiteSubcommand`] can be flattened into any clap
//! `#[derive(Parser)]` struct; the `sitefig` binary does exactly that.
//!
//! The bridge to the core is [`SiteArgs::into_action()`], which converts
//! parsed arguments into a [`ConfigAction`](crate::ConfigAction), and
//! [`SiteArgs::builder()`], which carries `--root` and `--set` into a
//! [`SitefigBuilder`](crate::SitefigBuilder). Everything else flows through
//! the clap-free [`SitefigBuilder::handle()`](crate::SitefigBuilder::handle).

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::builder::{Sitefig, SitefigBuilder};
use crate::overrides;
use crate::types::ConfigAction;

/// Clap-derived args for the site commands.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     site: SiteArgs,
/// }
/// ```
#[derive(Debug, Args)]
pub struct SiteArgs {
    /// Project root holding sitefig.toml (default: current directory).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Override a setting, e.g. `--set output.config=dist/site.json`. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", global = true, value_parser = parse_override)]
    pub overrides: Vec<(String, toml::Value)>,

    /// Log debug output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub action: Option<SiteSubcommand>,
}

/// Available site subcommands.
#[derive(Debug, Subcommand)]
pub enum SiteSubcommand {
    /// Assemble the site configuration and write the output files.
    Build {
        /// Write the configuration here instead of the configured path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the assembled configuration as JSON.
    Show,
    /// Print one value of the assembled configuration.
    Get {
        /// Dotted key path (e.g. "themeConfig.navbar.title").
        key: String,
    },
    /// Print every value of the assembled configuration.
    List,
    /// Show which optional features are enabled.
    Features,
    /// Check that every doc in the sidebars exists.
    Check,
    /// Generate a commented sitefig.toml.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a value into the base site file.
    Set {
        /// Dotted key path (e.g. "themeConfig.footer.style").
        key: String,
        /// Value to set.
        value: String,
    },
    /// Remove a value from the base site file.
    Unset {
        /// Dotted key path (e.g. "themeConfig.footer.copyright").
        key: String,
    },
}

impl SiteArgs {
    /// A builder rooted at `--root` with every `--set` override applied.
    pub fn builder(&self) -> SitefigBuilder {
        let builder = Sitefig::builder().overrides(self.overrides.iter().cloned());
        match &self.root {
            Some(root) => builder.root(root),
            None => builder,
        }
    }

    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// A bare invocation (no subcommand) maps to `ConfigAction::Build`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None => ConfigAction::Build { output: None },
            Some(SiteSubcommand::Build { output }) => ConfigAction::Build { output },
            Some(SiteSubcommand::Show) => ConfigAction::Show,
            Some(SiteSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(SiteSubcommand::List) => ConfigAction::List,
            Some(SiteSubcommand::Features) => ConfigAction::Features,
            Some(SiteSubcommand::Check) => ConfigAction::Check,
            Some(SiteSubcommand::Gen { output }) => ConfigAction::Gen { output },
            Some(SiteSubcommand::Set { key, value }) => ConfigAction::Set { key, value },
            Some(SiteSubcommand::Unset { key }) => ConfigAction::Unset { key },
        }
    }
}

fn parse_override(arg: &str) -> Result<(String, toml::Value), String> {
    overrides::parse_assignment(arg).map_err(|e| e.to_string())
}

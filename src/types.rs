use std::path::PathBuf;

/// Where to search for the project settings file.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// The project root set on the builder.
    Root,
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
    /// Every directory from the project root up to the boundary, shallowest
    /// first (the root itself has the highest priority).
    Ancestors(Boundary),
}

/// How far an [`Ancestors`](SearchPath::Ancestors) walk goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Up to the filesystem root.
    Root,
    /// Up to (and including) the first directory containing this entry.
    Marker(&'static str),
}

/// What to do when several settings files are found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Deep-merge all of them, later files winning.
    #[default]
    Merge,
    /// Use only the highest-priority one.
    FirstMatch,
}

/// A site operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Assemble and write the output files.
    Build { output: Option<PathBuf> },
    /// Print the assembled configuration as JSON.
    Show,
    /// Print one value of the assembled configuration.
    Get { key: String },
    /// Print every leaf value of the assembled configuration.
    List,
    /// Report which optional features are switched on.
    Features,
    /// Validate the sidebars against the docs directory.
    Check,
    /// Generate a commented settings template.
    Gen { output: Option<PathBuf> },
    /// Write a value into the base file.
    Set { key: String, value: String },
    /// Remove a value from the base file.
    Unset { key: String },
}

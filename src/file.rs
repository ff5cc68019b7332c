//! File discovery and loading.
//!
//! # Settings discovery
//!
//! Each [`SearchPath`] resolves to one or more directories, listed in
//! priority-ascending order. `Ancestors(boundary)` expands inline by walking
//! from the project root toward the filesystem root and is emitted
//! **shallowest first**, so the project root keeps the highest priority.
//!
//! Every directory is checked for `{dir}/{file_name}`:
//!
//! - [`SearchMode::Merge`] returns every file found, in priority order.
//! - [`SearchMode::FirstMatch`] returns only the highest-priority file.
//!
//! Missing files are silently skipped. Only real I/O errors propagate.
//!
//! # Site inputs
//!
//! The base file must exist; overlays are optional. Feature settings files
//! never fail on content: a missing file or invalid JSON disables the feature.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SitefigError;
use crate::sidebar::Sidebars;
use crate::types::{Boundary, SearchMode, SearchPath};

/// Walk from `start` toward the filesystem root, returning directories
/// shallowest first.
///
/// With [`Boundary::Marker`], the walk stops (inclusive) at the first
/// directory containing the marker. It falls back to the filesystem root when
/// the marker is never found.
pub fn expand_ancestors_from(start: &Path, boundary: &Boundary) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut current = start;

    loop {
        dirs.push(current.to_path_buf());

        if let Boundary::Marker(name) = boundary
            && current.join(name).exists()
        {
            break;
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    dirs.reverse();
    dirs
}

/// Expand search paths into concrete directories (priority-ascending).
pub fn expand_search_paths(search_paths: &[SearchPath], root: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for sp in search_paths {
        match sp {
            SearchPath::Root => dirs.push(root.to_path_buf()),
            SearchPath::Cwd => {
                if let Ok(cwd) = std::env::current_dir() {
                    dirs.push(cwd);
                }
            }
            SearchPath::Path(p) => dirs.push(p.clone()),
            SearchPath::Ancestors(boundary) => {
                dirs.extend(expand_ancestors_from(root, boundary));
            }
        }
    }
    dirs
}

/// Load settings files found along the search paths, respecting [`SearchMode`].
pub fn load_settings_files(
    search_paths: &[SearchPath],
    file_name: &str,
    root: &Path,
    mode: SearchMode,
) -> Result<Vec<(PathBuf, String)>, SitefigError> {
    let dirs = expand_search_paths(search_paths, root);

    match mode {
        SearchMode::Merge => load_all(&dirs, file_name),
        SearchMode::FirstMatch => load_first_match(&dirs, file_name),
    }
}

fn load_all(dirs: &[PathBuf], file_name: &str) -> Result<Vec<(PathBuf, String)>, SitefigError> {
    let mut results = Vec::new();
    for dir in dirs {
        let file_path = dir.join(file_name);
        if let Some(content) = read_optional(&file_path)? {
            tracing::debug!("found settings file {}", file_path.display());
            results.push((file_path, content));
        }
    }
    Ok(results)
}

fn load_first_match(
    dirs: &[PathBuf],
    file_name: &str,
) -> Result<Vec<(PathBuf, String)>, SitefigError> {
    for dir in dirs.iter().rev() {
        let file_path = dir.join(file_name);
        if let Some(content) = read_optional(&file_path)? {
            tracing::debug!("using settings file {}", file_path.display());
            return Ok(vec![(file_path, content)]);
        }
    }
    Ok(vec![])
}

/// Read a file, mapping "not found" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>, SitefigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SitefigError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Read the base file and its overlays. The first path is the base and must
/// exist; missing overlays are skipped.
pub fn load_base_files(paths: &[&Path]) -> Result<Vec<(PathBuf, String)>, SitefigError> {
    let mut files = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        match read_optional(path)? {
            Some(content) => files.push((path.to_path_buf(), content)),
            None if i == 0 => return Err(SitefigError::BaseNotFound(path.to_path_buf())),
            None => tracing::debug!("skipping missing overlay {}", path.display()),
        }
    }
    Ok(files)
}

/// Load one feature's settings. Never fails on content: a missing file gives
/// `Null` and invalid JSON is logged and treated as `Null`, both of which
/// disable the feature.
pub fn load_feature_settings(path: &Path) -> Result<Value, SitefigError> {
    let Some(content) = read_optional(path)? else {
        tracing::debug!("no feature settings at {}", path.display());
        return Ok(Value::Null);
    };
    match serde_json::from_str(&content) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(
                "ignoring feature settings in {}: {e}; the feature stays disabled",
                path.display()
            );
            Ok(Value::Null)
        }
    }
}

/// Read and parse a sidebar manifest. The file must exist.
pub fn load_sidebars(path: &Path) -> Result<Sidebars, SitefigError> {
    let content = std::fs::read_to_string(path).map_err(|e| SitefigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Sidebars::parse(&content, path)
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> Result<(), SitefigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SitefigError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| SitefigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    // --- settings discovery ---

    #[test]
    fn no_settings_files_exist() {
        let dir = TempDir::new().unwrap();
        let files =
            load_settings_files(&[SearchPath::Root], "sitefig.toml", dir.path(), SearchMode::Merge)
                .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn root_settings_file_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sitefig.toml"), "base = \"main.toml\"\n").unwrap();
        let files =
            load_settings_files(&[SearchPath::Root], "sitefig.toml", dir.path(), SearchMode::Merge)
                .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].1.contains("main.toml"));
    }

    #[test]
    fn merge_mode_returns_all_in_priority_order() {
        let shared = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        fs::write(shared.path().join("sitefig.toml"), "base = \"shared.toml\"\n").unwrap();
        fs::write(root.path().join("sitefig.toml"), "docs_dir = \"docs\"\n").unwrap();

        let paths = vec![SearchPath::Path(shared.path().to_path_buf()), SearchPath::Root];
        let files =
            load_settings_files(&paths, "sitefig.toml", root.path(), SearchMode::Merge).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].1.contains("shared.toml"));
        assert!(files[1].1.contains("docs_dir"));
    }

    #[test]
    fn first_match_returns_highest_priority() {
        let shared = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        fs::write(shared.path().join("sitefig.toml"), "base = \"low.toml\"\n").unwrap();
        fs::write(root.path().join("sitefig.toml"), "base = \"high.toml\"\n").unwrap();

        let paths = vec![SearchPath::Path(shared.path().to_path_buf()), SearchPath::Root];
        let files =
            load_settings_files(&paths, "sitefig.toml", root.path(), SearchMode::FirstMatch)
                .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].1.contains("high.toml"));
    }

    #[test]
    fn first_match_falls_back_to_lower_priority() {
        let shared = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        fs::write(shared.path().join("sitefig.toml"), "base = \"fallback.toml\"\n").unwrap();

        let paths = vec![SearchPath::Path(shared.path().to_path_buf()), SearchPath::Root];
        let files =
            load_settings_files(&paths, "sitefig.toml", root.path(), SearchMode::FirstMatch)
                .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].1.contains("fallback"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_settings_file_returns_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("sitefig.toml");
        fs::write(&file_path, "base = \"x\"\n").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits are not enforced for root.
        let readable = fs::read_to_string(&file_path).is_ok();
        let result =
            load_settings_files(&[SearchPath::Root], "sitefig.toml", dir.path(), SearchMode::Merge);
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o644)).unwrap();

        if !readable {
            assert!(matches!(result, Err(SitefigError::IoError { .. })));
        }
    }

    // --- ancestors ---

    #[test]
    fn ancestors_stop_at_marker() {
        let dir = TempDir::new().unwrap();
        let website = dir.path().join("repo").join("website");
        fs::create_dir_all(&website).unwrap();
        fs::create_dir(dir.path().join("repo").join(".git")).unwrap();

        let dirs = expand_ancestors_from(&website, &Boundary::Marker(".git"));
        assert_eq!(dirs, vec![dir.path().join("repo"), website.clone()]);
    }

    #[test]
    fn ancestors_without_marker_walk_to_root() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("x").join("y");
        fs::create_dir_all(&deep).unwrap();

        let dirs = expand_ancestors_from(&deep, &Boundary::Marker(".nonexistent"));
        assert!(dirs.contains(&dir.path().to_path_buf()));
        assert_eq!(dirs.last().unwrap(), &deep);
        for pair in dirs.windows(2) {
            assert!(pair[1].starts_with(&pair[0]));
        }
    }

    #[test]
    fn expand_mixes_explicit_and_ancestors() {
        let dir = TempDir::new().unwrap();
        let website = dir.path().join("repo").join("website");
        fs::create_dir_all(&website).unwrap();
        fs::create_dir(dir.path().join("repo").join(".marker")).unwrap();
        let explicit = TempDir::new().unwrap();

        let paths = vec![
            SearchPath::Path(explicit.path().to_path_buf()),
            SearchPath::Ancestors(Boundary::Marker(".marker")),
        ];
        let dirs = expand_search_paths(&paths, &website);
        assert_eq!(
            dirs,
            vec![
                explicit.path().to_path_buf(),
                dir.path().join("repo"),
                website.clone()
            ]
        );
    }

    // --- base files ---

    #[test]
    fn missing_base_is_an_error() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("site.toml");
        let result = load_base_files(&[base.as_path()]);
        assert!(matches!(result, Err(SitefigError::BaseNotFound(p)) if p == base));
    }

    #[test]
    fn missing_overlay_is_skipped() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("site.toml");
        let overlay = dir.path().join("site.local.toml");
        fs::write(&base, "title = \"Hedgehog\"\n").unwrap();

        let files = load_base_files(&[base.as_path(), overlay.as_path()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, base);
    }

    // --- feature settings ---

    #[test]
    fn feature_file_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("google-analytics.config.json");
        fs::write(&path, r#"{"trackingID": "UA-1"}"#).unwrap();
        assert_eq!(
            load_feature_settings(&path).unwrap(),
            json!({"trackingID": "UA-1"})
        );
    }

    #[test]
    fn missing_feature_file_is_null() {
        let dir = TempDir::new().unwrap();
        let value = load_feature_settings(&dir.path().join("algolia.config.json")).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn invalid_feature_json_is_null() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("algolia.config.json");
        fs::write(&path, "{ apiKey: ").unwrap();
        assert_eq!(load_feature_settings(&path).unwrap(), Value::Null);
    }

    // --- output ---

    #[test]
    fn write_output_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build").join("nested").join("out.json");
        write_output(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}

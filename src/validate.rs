//! Strict-mode validation: detect unknown keys in TOML files.
//!
//! Deserializes the file into a schema type whose fields are all optional and
//! uses `serde_ignored` to capture every key the schema doesn't consume. Each
//! unknown key is reported with its file path and best-effort line number.
//! The same check covers `sitefig.toml` (against the settings layer) and base
//! files (against [`SiteConfig`](crate::site::SiteConfig)).

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::SitefigError;

/// Validate that `content` contains no keys unknown to schema `T`.
pub fn validate_unknown_keys<T: DeserializeOwned>(
    content: &str,
    path: &Path,
) -> Result<(), SitefigError> {
    validate_with_open_tables::<T>(content, path, &[])
}

/// Like [`validate_unknown_keys`], but direct children of the dotted tables in
/// `open_tables` are accepted even when `T` doesn't name them. Typed children
/// of an open table are still checked in full.
pub fn validate_with_open_tables<T: DeserializeOwned>(
    content: &str,
    path: &Path,
    open_tables: &[&str],
) -> Result<(), SitefigError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _parsed: T = serde_ignored::deserialize(deserializer, |ignored_path| {
        let key = display_key(&ignored_path.to_string());
        let parent = key.rsplit_once('.').map_or("", |(parent, _)| parent);
        if !open_tables.contains(&parent) {
            unknown_keys.push(key);
        }
    })
    .map_err(|e| SitefigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<SitefigError> = unknown_keys
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            SitefigError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(SitefigError::UnknownKeys(errors))
}

/// `serde_ignored` marks every `Option` it passes through with a `?` segment.
fn display_key(ignored: &str) -> String {
    ignored
        .split('.')
        .filter(|segment| *segment != "?")
        .collect::<Vec<_>>()
        .join(".")
}

/// Find the 1-indexed line of a dotted key in TOML content.
///
/// Tracks `[section]` headers and matches the leaf key only inside the
/// expected section. Array-of-tables headers (`[[a.b]]`) count as sections
/// too, and numeric path segments (array indices reported by
/// `serde_ignored`) are ignored when comparing. Returns 0 when the key cannot
/// be located (quoted keys, inline tables).
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let segments: Vec<&str> = dotted_key
        .split('.')
        .filter(|s| s.parse::<usize>().is_err())
        .collect();
    let Some((leaf, expected_section)) = segments.split_last() else {
        return 0;
    };

    let mut current_section: Vec<String> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') {
            let header = trimmed.trim_start_matches('[').trim_end_matches(']').trim();
            current_section = header.split('.').map(|s| s.trim().to_string()).collect();
            continue;
        }

        let in_right_section = expected_section.len() == current_section.len()
            && expected_section
                .iter()
                .zip(&current_section)
                .all(|(a, b)| *a == b);

        if in_right_section
            && let Some(after_key) = trimmed.strip_prefix(leaf)
            && after_key.trim_start().starts_with('=')
        {
            return i + 1;
        }
    }
    0
}

//! Base file edits: set or remove values while preserving formatting.
//!
//! Uses `toml_edit`, so comments and layout of `site.toml` survive. Dotted
//! keys walk through tables and inline tables; arrays of tables (navbar items,
//! footer links) are not addressable and must be edited by hand.

use std::path::Path;

use toml_edit::{DocumentMut, Item, TableLike};

use crate::error::SitefigError;
use crate::file;
use crate::ops::ConfigResult;
use crate::overrides::parse_value;
use crate::site::SiteConfig;

/// Pure function: patch a TOML document string, setting `key` to `raw_value`.
///
/// `content` of `None` starts from an empty document. Missing intermediate
/// tables are created. Returns the modified document string.
pub fn set_in_document(
    content: Option<&str>,
    key: &str,
    raw_value: &str,
) -> Result<String, SitefigError> {
    let mut doc = parse_document(content.unwrap_or_default(), key)?;
    let (leaf, parents) = split_key(key)?;

    let mut table: &mut dyn TableLike = doc.as_table_mut();
    for segment in parents {
        if table.get(segment).is_none() {
            let mut fresh = toml_edit::Table::new();
            fresh.set_implicit(true);
            table.insert(segment, Item::Table(fresh));
        }
        table = table
            .get_mut(segment)
            .and_then(Item::as_table_like_mut)
            .ok_or_else(|| SitefigError::InvalidValue {
                key: key.into(),
                reason: format!("'{segment}' is not a table"),
            })?;
    }

    table.insert(leaf, toml_edit::value(to_edit_value(parse_value(raw_value))));
    Ok(doc.to_string())
}

/// Pure function: remove `key` from a TOML document string.
pub fn unset_in_document(content: &str, key: &str) -> Result<String, SitefigError> {
    let mut doc = parse_document(content, key)?;
    let (leaf, parents) = split_key(key)?;

    let mut table: &mut dyn TableLike = doc.as_table_mut();
    for segment in parents {
        table = table
            .get_mut(segment)
            .and_then(Item::as_table_like_mut)
            .ok_or_else(|| SitefigError::KeyNotFound(key.into()))?;
    }

    table
        .remove(leaf)
        .ok_or_else(|| SitefigError::KeyNotFound(key.into()))?;
    Ok(doc.to_string())
}

/// I/O wrapper: read the base file (if it exists), set the value, validate the
/// result (when strict) and write it back. Creates parent directories if needed.
pub fn persist_value(
    file_path: &Path,
    key: &str,
    value: &str,
    strict: bool,
) -> Result<ConfigResult, SitefigError> {
    let content = file::read_optional(file_path)?;
    let new_content = set_in_document(content.as_deref(), key, value)?;

    if strict {
        SiteConfig::validate_file(&new_content, file_path)?;
    }

    file::write_output(file_path, &new_content)?;
    Ok(ConfigResult::ValueSet {
        key: key.into(),
        value: value.into(),
    })
}

/// I/O wrapper: remove a value from an existing base file.
pub fn unset_value(file_path: &Path, key: &str) -> Result<ConfigResult, SitefigError> {
    let content = file::read_optional(file_path)?
        .ok_or_else(|| SitefigError::BaseNotFound(file_path.to_path_buf()))?;
    let new_content = unset_in_document(&content, key)?;
    file::write_output(file_path, &new_content)?;
    Ok(ConfigResult::ValueUnset { key: key.into() })
}

fn parse_document(content: &str, key: &str) -> Result<DocumentMut, SitefigError> {
    content
        .parse()
        .map_err(|e: toml_edit::TomlError| SitefigError::InvalidValue {
            key: key.into(),
            reason: e.to_string(),
        })
}

fn split_key(key: &str) -> Result<(&str, Vec<&str>), SitefigError> {
    let mut segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(SitefigError::InvalidValue {
            key: key.into(),
            reason: "empty key segment".into(),
        });
    }
    let leaf = segments.pop().unwrap_or(key);
    Ok((leaf, segments))
}

fn to_edit_value(value: toml::Value) -> toml_edit::Value {
    match value {
        toml::Value::Boolean(b) => b.into(),
        toml::Value::Integer(i) => i.into(),
        toml::Value::Float(f) => f.into(),
        toml::Value::String(s) => s.into(),
        other => other.to_string().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::HEDGEHOG_SITE;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn set_existing_key() {
        let content = "title = \"Hedgehog\"\ntagline = \"Old\"\n";
        let result = set_in_document(Some(content), "tagline", "New").unwrap();
        assert!(result.contains("tagline = \"New\""));
        assert!(result.contains("title = \"Hedgehog\""));
    }

    #[test]
    fn set_string_round_trips_unquoted() {
        let result = set_in_document(Some("title = \"x\"\n"), "tagline", "New").unwrap();
        let parsed: toml::Table = toml::from_str(&result).unwrap();
        assert_eq!(parsed["tagline"].as_str(), Some("New"));
        assert!(!result.contains('\''));
    }

    #[test]
    fn set_nested_key() {
        let content = "[themeConfig.footer]\nstyle = \"dark\"\n";
        let result = set_in_document(Some(content), "themeConfig.footer.style", "light").unwrap();
        assert!(result.contains("style = \"light\""));
        assert!(!result.contains("dark"));
    }

    #[test]
    fn set_inside_inline_table() {
        let content = "[themeConfig.navbar]\nlogo = { alt = \"Logo\", src = \"a.png\" }\n";
        let result =
            set_in_document(Some(content), "themeConfig.navbar.logo.src", "b.png").unwrap();
        assert!(result.contains("src = \"b.png\""));
        assert!(result.contains("alt = \"Logo\""));
    }

    #[test]
    fn set_creates_missing_tables() {
        let result = set_in_document(Some("title = \"x\"\n"), "customFields.scalaVersion", "3.3")
            .unwrap();
        let parsed: toml::Table = toml::from_str(&result).unwrap();
        assert_eq!(parsed["customFields"]["scalaVersion"].as_float(), Some(3.3));
    }

    #[test]
    fn set_typed_values() {
        let result = set_in_document(None, "trailingSlash", "false").unwrap();
        assert!(result.contains("trailingSlash = false"));
    }

    #[test]
    fn set_through_scalar_fails() {
        let result = set_in_document(Some("title = \"x\"\n"), "title.sub", "y");
        assert!(matches!(result, Err(SitefigError::InvalidValue { .. })));
    }

    #[test]
    fn preserves_comments() {
        let content = "# Hedgehog site\ntitle = \"Hedgehog\" # shown in the navbar\n";
        let result = set_in_document(Some(content), "tagline", "PBT").unwrap();
        assert!(result.contains("# Hedgehog site"));
        assert!(result.contains("# shown in the navbar"));
    }

    #[test]
    fn unset_removes_key() {
        let content = "title = \"x\"\n[themeConfig.footer]\nstyle = \"dark\"\ncopyright = \"c\"\n";
        let result = unset_in_document(content, "themeConfig.footer.copyright").unwrap();
        assert!(!result.contains("copyright"));
        assert!(result.contains("style = \"dark\""));
    }

    #[test]
    fn unset_missing_key_fails() {
        let result = unset_in_document("title = \"x\"\n", "themeConfig.algolia");
        assert!(matches!(result, Err(SitefigError::KeyNotFound(_))));
    }

    #[test]
    fn empty_segment_rejected() {
        assert!(set_in_document(None, "themeConfig..style", "x").is_err());
    }

    #[test]
    fn persist_modifies_base_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, HEDGEHOG_SITE).unwrap();

        persist_value(&path, "tagline", "Property testing for Scala", true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("tagline = \"Property testing for Scala\""));
        assert!(content.contains("[[themeConfig.navbar.items]]"));
    }

    #[test]
    fn persist_rejects_unknown_key_when_strict() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "title = \"x\"\n").unwrap();

        let result = persist_value(&path, "tagLine", "typo", true);
        assert!(matches!(result, Err(SitefigError::UnknownKeys(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "title = \"x\"\n");
    }

    #[test]
    fn persist_accepts_generator_theme_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, HEDGEHOG_SITE).unwrap();

        persist_value(&path, "themeConfig.sidebarCollapsible", "false", true).unwrap();
        let parsed: toml::Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            parsed["themeConfig"]["sidebarCollapsible"].as_bool(),
            Some(false)
        );
    }

    #[test]
    fn persist_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        let result = persist_value(&path, "title", "Hedgehog", true).unwrap();
        assert!(matches!(result, ConfigResult::ValueSet { .. }));
        assert!(fs::read_to_string(&path).unwrap().contains("title = \"Hedgehog\""));
    }

    #[test]
    fn unset_value_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let result = unset_value(&dir.path().join("site.toml"), "title");
        assert!(matches!(result, Err(SitefigError::BaseNotFound(_))));
    }
}

//! Typed view of a base site file (`site.toml`).
//!
//! Base files are written in TOML using the site generator's camelCase keys.
//! [`SiteConfig`] covers the keys `sitefig` knows about; it is what strict
//! mode validates each base file against. Top-level keys are closed. Under
//! `themeConfig` only the navbar and footer are checked in depth; any other
//! entry belongs to the generator and passes through unchecked.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use std::path::Path;

use crate::error::SitefigError;
use crate::validate;

/// Known top-level keys of a base file. Every field is optional because
/// overlay files are sparse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub url: Option<String>,
    pub base_url: Option<String>,
    pub on_broken_links: Option<String>,
    pub on_broken_markdown_links: Option<String>,
    pub favicon: Option<String>,
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
    pub trailing_slash: Option<bool>,
    pub theme_config: Option<ThemeConfig>,
    pub presets: Option<Vec<Value>>,
    pub plugins: Option<Vec<Value>>,
    pub custom_fields: Option<Map<String, Value>>,
}

impl SiteConfig {
    /// Tables whose unlisted children strict mode accepts.
    pub const OPEN_TABLES: &'static [&'static str] = &["themeConfig"];

    /// Strict check of one base file or overlay.
    pub fn validate_file(content: &str, path: &Path) -> Result<(), SitefigError> {
        validate::validate_with_open_tables::<SiteConfig>(content, path, Self::OPEN_TABLES)
    }
}

/// `themeConfig`. Navbar and footer are typed. The listed generator entries
/// are kept as raw values, and unlisted ones are accepted by
/// [`SiteConfig::validate_file`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub navbar: Option<Navbar>,
    pub footer: Option<Footer>,
    pub prism: Option<Value>,
    pub color_mode: Option<Value>,
    pub separate_css: Option<Vec<String>>,
    pub announcement_bar: Option<Value>,
    pub metadata: Option<Vec<Value>>,
    pub image: Option<String>,
    pub docs: Option<Value>,
    pub table_of_contents: Option<Value>,
    pub algolia: Option<Value>,
    pub google_analytics: Option<Value>,
    pub gtag: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navbar {
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub items: Option<Vec<NavbarItem>>,
    pub style: Option<String>,
    pub hide_on_scroll: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub alt: Option<String>,
    pub src: Option<String>,
    pub src_dark: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarItem {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub label: Option<String>,
    pub to: Option<String>,
    pub href: Option<String>,
    pub position: Option<String>,
    pub target: Option<String>,
    pub active_base_path: Option<String>,
    pub doc_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub style: Option<String>,
    pub logo: Option<Logo>,
    pub links: Option<Vec<FooterGroup>>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterGroup {
    pub title: Option<String>,
    pub items: Option<Vec<FooterLink>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: Option<String>,
    pub to: Option<String>,
    pub href: Option<String>,
    pub html: Option<String>,
}

/// Convert a merged TOML table into the JSON object the generator reads.
pub fn table_to_json(table: toml::Table) -> Result<Map<String, Value>, SitefigError> {
    match serde_json::to_value(table) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(SitefigError::MalformedBase {
            field: "<root>".into(),
            reason: "not a mapping".into(),
        }),
        Err(e) => Err(SitefigError::InvalidValue {
            key: "<base>".into(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::HEDGEHOG_SITE;
    use serde_json::json;

    fn hedgehog() -> SiteConfig {
        toml::from_str(HEDGEHOG_SITE).unwrap()
    }

    #[test]
    fn reads_site_metadata() {
        let site = hedgehog();
        assert_eq!(site.title.as_deref(), Some("Hedgehog"));
        assert_eq!(site.base_url.as_deref(), Some("/scala-hedgehog/"));
        assert_eq!(site.organization_name.as_deref(), Some("hedgehogqa"));
        assert_eq!(site.on_broken_links.as_deref(), Some("throw"));
    }

    #[test]
    fn reads_navbar_items() {
        let site = hedgehog();
        let navbar = site.theme_config.unwrap().navbar.unwrap();
        let items = navbar.items.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].active_base_path.as_deref(), Some("docs"));
        assert_eq!(items[1].target.as_deref(), Some("_blank"));
        assert_eq!(items[2].position.as_deref(), Some("right"));
    }

    #[test]
    fn generator_owned_theme_entries_kept_raw() {
        let theme = hedgehog().theme_config.unwrap();
        assert_eq!(
            theme.prism.unwrap()["additionalLanguages"],
            json!(["java", "scala", "haskell"])
        );
        assert_eq!(theme.separate_css, Some(vec!["api".to_string()]));
        assert_eq!(
            theme.color_mode,
            Some(json!({"respectPrefersColorScheme": true}))
        );
    }

    #[test]
    fn table_to_json_keeps_camel_case_keys() {
        let table: toml::Table = toml::from_str(HEDGEHOG_SITE).unwrap();
        let map = table_to_json(table).unwrap();
        assert_eq!(map["baseUrl"], json!("/scala-hedgehog/"));
        assert_eq!(map["themeConfig"]["footer"]["style"], json!("dark"));
    }

    #[test]
    fn unlisted_theme_entries_pass_strict_check() {
        let content = "[themeConfig]\nsidebarCollapsible = false\n\n[themeConfig.zoom]\nselector = \".markdown img\"\n";
        assert!(SiteConfig::validate_file(content, Path::new("site.toml")).is_ok());
    }

    #[test]
    fn unknown_top_level_key_fails_strict_check() {
        let err = SiteConfig::validate_file("titel = \"x\"\n", Path::new("site.toml")).unwrap_err();
        assert!(matches!(err, SitefigError::UnknownKeys(_)));
    }

    #[test]
    fn sparse_overlay_deserializes() {
        let site: SiteConfig = toml::from_str("tagline = \"Faster\"\n").unwrap();
        assert_eq!(site.tagline.as_deref(), Some("Faster"));
        assert!(site.theme_config.is_none());
    }
}

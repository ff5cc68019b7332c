//! Sidebar navigation manifest (`sidebars.toml`).
//!
//! Maps sidebar names to item trees. An item is either a bare doc id or a
//! table tagged with `type`:
//!
//! ```toml
//! [[docs]]
//! type = "category"
//! label = "Guides"
//! items = ["guides/tutorial", { type = "link", label = "API", href = "/api" }]
//! ```
//!
//! The manifest is emitted as JSON next to the assembled configuration.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SitefigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Shorthand for a doc entry: just its id.
    Doc(String),
    Entry(SidebarEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    Category {
        label: String,
        items: Vec<SidebarItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collapsed: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collapsible: Option<bool>,
    },
    Doc {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Link {
        label: String,
        href: String,
    },
}

/// All sidebars of a site, keyed by sidebar name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sidebars(BTreeMap<String, Vec<SidebarItem>>);

impl Sidebars {
    /// Parse a manifest. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, SitefigError> {
        toml::from_str(content).map_err(|e| SitefigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Check structural rules: every sidebar and category has items, labels,
    /// ids and hrefs are non-empty, and no doc appears twice in one sidebar.
    pub fn validate(&self) -> Result<(), SitefigError> {
        for (name, items) in &self.0 {
            let invalid = |reason: String| SitefigError::InvalidSidebar {
                sidebar: name.clone(),
                reason,
            };
            if items.is_empty() {
                return Err(invalid("has no items".into()));
            }
            let mut seen = HashSet::new();
            check_items(items, &mut seen).map_err(invalid)?;
        }
        Ok(())
    }

    /// Every doc id referenced, in sidebar-name order then document order.
    pub fn doc_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for items in self.0.values() {
            collect_doc_ids(items, &mut ids);
        }
        ids
    }

    /// Doc ids with neither `<id>.md` nor `<id>.mdx` under `docs_dir`.
    pub fn missing_docs(&self, docs_dir: &Path) -> Vec<String> {
        self.doc_ids()
            .into_iter()
            .filter(|id| {
                !["md", "mdx"]
                    .iter()
                    .any(|ext| docs_dir.join(format!("{id}.{ext}")).is_file())
            })
            .map(str::to_string)
            .collect()
    }
}

fn check_items<'a>(items: &'a [SidebarItem], seen: &mut HashSet<&'a str>) -> Result<(), String> {
    for item in items {
        match item {
            SidebarItem::Doc(id) | SidebarItem::Entry(SidebarEntry::Doc { id, .. }) => {
                if id.trim().is_empty() {
                    return Err("empty doc id".into());
                }
                if !seen.insert(id.as_str()) {
                    return Err(format!("doc '{id}' is listed more than once"));
                }
            }
            SidebarItem::Entry(SidebarEntry::Category { label, items, .. }) => {
                if label.trim().is_empty() {
                    return Err("category with an empty label".into());
                }
                if items.is_empty() {
                    return Err(format!("category '{label}' has no items"));
                }
                check_items(items, seen)?;
            }
            SidebarItem::Entry(SidebarEntry::Link { label, href }) => {
                if label.trim().is_empty() || href.trim().is_empty() {
                    return Err("link needs both a label and an href".into());
                }
            }
        }
    }
    Ok(())
}

fn collect_doc_ids<'a>(items: &'a [SidebarItem], out: &mut Vec<&'a str>) {
    for item in items {
        match item {
            SidebarItem::Doc(id) | SidebarItem::Entry(SidebarEntry::Doc { id, .. }) => {
                out.push(id);
            }
            SidebarItem::Entry(SidebarEntry::Category { items, .. }) => {
                collect_doc_ids(items, out);
            }
            SidebarItem::Entry(SidebarEntry::Link { .. }) => {}
        }
    }
}

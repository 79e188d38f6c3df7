//! Sidebar manifest for the documentation site.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_MAJOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v?(\d+)\.").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub text: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SidebarItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl SidebarItem {
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            items: None,
            collapsed: None,
        }
    }
}

/// Group entries under `N.x.x` headings by major version, keeping the order
/// in which groups first appear. Labels without a version go under `Other`.
pub fn group_by_major(entries: Vec<SidebarItem>) -> Vec<SidebarItem> {
    let mut groups: Vec<(String, Vec<SidebarItem>)> = Vec::new();

    for mut entry in entries {
        let major = RE_MAJOR
            .captures(&entry.text)
            .map(|caps| caps[1].to_string());
        let group = match major {
            Some(major) => {
                entry.text = entry.text.trim_start_matches('v').to_string();
                format!("{}.x.x", major)
            }
            None => "Other".to_string(),
        };
        match groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, items)) => items.push(entry),
            None => groups.push((group, vec![entry])),
        }
    }

    groups
        .into_iter()
        .map(|(text, items)| SidebarItem {
            link: items[0].link.clone(),
            text,
            items: Some(items),
            collapsed: Some(true),
        })
        .collect()
}

/// The manifest as a TypeScript module exporting the entries.
pub fn manifest_source(entries: &[SidebarItem]) -> Result<String> {
    let mut json = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"\t"));
    entries
        .serialize(&mut serializer)
        .context("failed to serialize sidebar")?;
    let json = String::from_utf8(json).context("sidebar JSON is not UTF-8")?;

    Ok(format!(
        "// This file is auto-generated by apidoc\nexport default {};\n",
        json
    ))
}

pub fn write_manifest(path: &Path, entries: &[SidebarItem]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let source = manifest_source(entries)?;
    fs::write(path, source).with_context(|| format!("failed to write {}", path.display()))
}

//! Multi-version orchestration.
//!
//! Renders the newest release tags from one shared clone, then the live
//! checkout as the current version, and publishes the sidebar manifest.
//! Everything runs in sequence: each checkout is read, rendered and written
//! before the next one starts.

pub mod repo;
pub mod sidebar;
pub mod tags;

use crate::compose;
use crate::config::Config;
use crate::reader::DocSource;
use crate::render::MarkdownRenderer;
use anyhow::{Context, Result};
use repo::{Repository, WorkingTree};
use sidebar::SidebarItem;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// One configured run of the pipeline.
#[derive(Debug)]
pub struct Pipeline {
    source: DocSource,
    renderer: MarkdownRenderer,
    current_version: String,
    project_dir: PathBuf,
    api_dir: PathBuf,
    link_base: String,
    sidebar_path: PathBuf,
    group_by_major: bool,
    tags_limit: usize,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            source: config.parser.source()?,
            renderer: MarkdownRenderer::new(config.output.namespace.as_str()),
            current_version: config.current_version()?,
            project_dir: config.project.dir.clone(),
            api_dir: config.output.api_dir.clone(),
            link_base: config.output.link_base.trim_end_matches('/').to_owned(),
            sidebar_path: config.output.sidebar.clone(),
            group_by_major: config.sidebar.group_by_major,
            tags_limit: config.repository.tags_limit,
        })
    }

    /// Run every stage. The first failure aborts the run; pages written
    /// before it stay on disk.
    pub fn run(&self, repo: &mut impl Repository, refresh: bool) -> Result<Vec<SidebarItem>> {
        clear_dir(&self.api_dir)?;

        let mut entries = if self.tags_limit == 0 {
            info!("historical versions disabled");
            Vec::new()
        } else {
            self.render_releases(repo, refresh)?
        };

        let current = tags::normalize_version(&self.current_version);
        info!(version = current, "processing current checkout");
        let tree = WorkingTree::new(&self.project_dir);
        entries.insert(0, self.render_version(current, &tree)?);

        let manifest = if self.group_by_major {
            sidebar::group_by_major(entries)
        } else {
            entries
        };
        sidebar::write_manifest(&self.sidebar_path, &manifest)?;
        info!(path = %self.sidebar_path.display(), "wrote sidebar");
        Ok(manifest)
    }

    fn render_releases(&self, repo: &mut impl Repository, refresh: bool) -> Result<Vec<SidebarItem>> {
        info!(cache = %repo.root().display(), "preparing repository cache");
        repo.prepare(refresh)?;

        let all_tags = repo.tags()?;
        if all_tags.is_empty() {
            warn!("no tags found; run with --pull to fetch them");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for tag in tags::select_tags(&all_tags, &self.current_version, self.tags_limit) {
            info!(tag = tag.name(), "processing tag");
            let tree = repo.checkout(tag.name())?;
            let entry = self
                .render_version(tag.version(), &tree)
                .with_context(|| format!("failed to render tag {}", tag.name()))?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Read the tree, render its page and return its sidebar entry.
    fn render_version(&self, version: &str, tree: &WorkingTree<'_>) -> Result<SidebarItem> {
        let root = self.source.read(tree)?;
        let page = compose::version_page(&self.renderer, version, &root)?;

        let path = self.api_dir.join(format!("{}.md", version));
        fs::write(&path, page).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), classes = root.len(), "wrote API page");

        Ok(SidebarItem::link(
            version,
            format!("{}/{}", self.link_base, version),
        ))
    }
}

/// Remove previously generated pages.
fn clear_dir(dir: &std::path::Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("failed to clear {}", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}

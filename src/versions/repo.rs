//! The shared repository checkout.
//!
//! All historical versions are rendered from one cached clone. Checking out
//! a tag hands back a [`WorkingTree`] that borrows the repository mutably, so
//! the tree must be released before the next checkout can start.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Read access to a checked-out source tree.
#[derive(Debug, Clone, Copy)]
pub struct WorkingTree<'a> {
    root: &'a Path,
}

impl<'a> WorkingTree<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &'a Path {
        self.root
    }

    /// Resolve a path relative to the tree root.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

/// Sequential access to the cached clone.
pub trait Repository {
    /// Directory holding the clone.
    fn root(&self) -> &Path;

    /// Create or reuse the clone. With `refresh`, clone when missing and
    /// fetch all tags.
    fn prepare(&mut self, refresh: bool) -> Result<()>;

    fn tags(&self) -> Result<Vec<String>>;

    fn checkout(&mut self, tag: &str) -> Result<WorkingTree<'_>>;
}

/// A clone driven through the `git` executable.
#[derive(Debug)]
pub struct GitRepository {
    url: String,
    dir: PathBuf,
}

impl GitRepository {
    pub fn new(url: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dir: dir.into(),
        }
    }

    fn is_clone(&self) -> bool {
        self.dir.join(".git").exists()
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        debug!(dir = %self.dir.display(), "git {}", args.join(" "));
        let mut command = Command::new("git");
        command.arg("-C").arg(&self.dir).args(args);
        run(command, args)
    }
}

impl Repository for GitRepository {
    fn root(&self) -> &Path {
        &self.dir
    }

    fn prepare(&mut self, refresh: bool) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create cache directory: {}", self.dir.display())
        })?;

        if refresh {
            if !self.is_clone() {
                info!(url = %self.url, "cloning repository");
                let args = ["clone", "--depth", "1", "--tags", "--", self.url.as_str()];
                let mut command = Command::new("git");
                command.args(args).arg(&self.dir);
                run(command, &args)?;
            }
            info!("fetching all tags from the repository");
            self.git(&["fetch", "--tags"])?;
        } else if !self.is_clone() {
            bail!(
                "no repository clone at {}; run with --pull to create it",
                self.dir.display()
            );
        }

        self.git(&["clean", "--force"])?;
        Ok(())
    }

    fn tags(&self) -> Result<Vec<String>> {
        let out = self.git(&["tag", "--list"])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    fn checkout(&mut self, tag: &str) -> Result<WorkingTree<'_>> {
        self.git(&["checkout", "--quiet", "--force", tag])?;
        Ok(WorkingTree::new(&self.dir))
    }
}

/// Run a git command and return its stdout; a failed status carries stderr.
fn run(mut command: Command, args: &[&str]) -> Result<String> {
    let output = command
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn working_tree_joins_relative_paths() {
        let tree = WorkingTree::new(Path::new("/cache/repo"));
        assert_eq!(tree.join("dist/docs.json"), Path::new("/cache/repo/dist/docs.json"));
    }

    #[test]
    fn reuse_without_clone_fails() {
        let dir = TempDir::new().unwrap();
        let mut repo = GitRepository::new("https://example.invalid/repo.git", dir.path().join("cache"));
        let err = repo.prepare(false).unwrap_err();
        assert!(err.to_string().contains("--pull"), "got: {err}");
        assert!(dir.path().join("cache").is_dir());
    }
}

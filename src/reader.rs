//! Doc model reader: obtain the parser's JSON for a working tree.
//!
//! The comment parser is an external tool. Either its output is already a
//! file inside the tree, or it is run as a command inside the tree and its
//! stdout captured.

use crate::inherit;
use crate::model::RootDoc;
use crate::versions::repo::WorkingTree;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Where the parser's JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSource {
    /// A JSON file, relative to the tree root.
    JsonFile(PathBuf),
    /// A command run with the tree root as working directory.
    Command { program: String, args: Vec<String> },
}

impl DocSource {
    /// Build a fresh, validated class table from `tree`.
    pub fn read(&self, tree: &WorkingTree<'_>) -> Result<RootDoc> {
        let json = match self {
            DocSource::JsonFile(relative) => {
                let path = tree.join(relative);
                fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?
            }
            DocSource::Command { program, args } => {
                debug!(dir = %tree.root().display(), "running {} {}", program, args.join(" "));
                let output = Command::new(program)
                    .args(args)
                    .current_dir(tree.root())
                    .output()
                    .with_context(|| format!("failed to run parser: {}", program))?;
                if !output.status.success() {
                    bail!(
                        "parser {} failed in {}: {}",
                        program,
                        tree.root().display(),
                        String::from_utf8_lossy(&output.stderr).trim()
                    );
                }
                String::from_utf8(output.stdout).context("parser output is not UTF-8")?
            }
        };

        parse(&json).with_context(|| format!("invalid documentation model from {}", tree.root().display()))
    }
}

/// Decode the parser's JSON and check its inheritance invariants.
pub fn parse(json: &str) -> Result<RootDoc> {
    let root = RootDoc::from_json(json).context("failed to parse documentation JSON")?;
    for (id, class) in root.classes() {
        for key in class.unknown_supersections() {
            debug!(class = id, "ignoring supersection {}", key);
        }
    }
    inherit::validate(&root)?;
    Ok(root)
}

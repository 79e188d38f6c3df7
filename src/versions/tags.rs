//! Release tag selection.
//!
//! Only plain `vMAJOR.MINOR.PATCH[-suffix]` releases get a page. Pre-releases
//! and the version currently being documented are skipped.

use regex::Regex;
use std::sync::LazyLock;

static RE_RELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v(\d+)\.(\d+)\.(\d+)(-.+)?$").unwrap());

static RE_PRERELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-dev|-beta|-alpha|-rc").unwrap());

/// Number of historical releases rendered when not configured.
pub const DEFAULT_TAGS_LIMIT: usize = 5;

/// A tag that passed the release filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    name: String,
    major: u64,
    minor: u64,
    patch: u64,
}

impl ReleaseTag {
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = RE_RELEASE.captures(tag)?;
        Some(Self {
            name: tag.to_string(),
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps[3].parse().ok()?,
        })
    }

    /// The tag as it exists in the repository, e.g. `v1.9.4`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tag without its `v` prefix, e.g. `1.9.4`.
    pub fn version(&self) -> &str {
        normalize_version(&self.name)
    }

    fn sort_key(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

/// Strip a leading `v`.
pub fn normalize_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Filter `tags` down to releases and sort them newest first.
pub fn organize_tags(tags: &[String], current_version: &str) -> Vec<ReleaseTag> {
    let current = normalize_version(current_version);
    let mut releases: Vec<ReleaseTag> = tags
        .iter()
        .filter(|tag| normalize_version(tag) != current)
        .filter(|tag| !RE_PRERELEASE.is_match(tag))
        .filter_map(|tag| ReleaseTag::parse(tag))
        .collect();
    releases.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    releases
}

/// [`organize_tags`] truncated to the newest `limit` releases.
pub fn select_tags(tags: &[String], current_version: &str, limit: usize) -> Vec<ReleaseTag> {
    let mut releases = organize_tags(tags, current_version);
    releases.truncate(limit);
    releases
}

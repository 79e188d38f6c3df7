//! Configuration management.
//!
//! Settings come from an optional `apidoc.toml` and are overridden by CLI
//! flags through [`CliSettings`]. Relative paths in the file are resolved
//! against the directory containing it.

use crate::reader::DocSource;
use crate::versions::tags::DEFAULT_TAGS_LIMIT;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "apidoc.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub project_dir: Option<PathBuf>,
    pub current_version: Option<String>,
    pub tags_limit: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid package manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("configuration error: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub project: ProjectConfig,
    pub repository: RepositoryConfig,
    pub parser: ParserConfig,
    pub output: OutputConfig,
    pub sidebar: SidebarConfig,
}

/// The live checkout rendered as the current version.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub dir: PathBuf,
    /// Falls back to `version` in `<dir>/package.json`.
    pub version: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            version: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    pub url: String,
    pub cache_dir: PathBuf,
    pub tags_limit: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            url: "https://github.com/Leaflet/Leaflet.git".to_owned(),
            cache_dir: PathBuf::from("leaflet-repo-cache"),
            tags_limit: DEFAULT_TAGS_LIMIT,
        }
    }
}

/// How to obtain the parser JSON. Set at most one of the two.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// JSON file relative to the working tree.
    pub json: Option<PathBuf>,
    /// Command whose stdout is the JSON, run inside the working tree.
    pub command: Option<Vec<String>>,
}

/// Parser output file used when `[parser]` is empty.
const DEFAULT_PARSER_JSON: &str = "leafdoc.json";

impl ParserConfig {
    pub fn source(&self) -> Result<DocSource, ConfigError> {
        match (&self.json, &self.command) {
            (Some(_), Some(_)) => Err(ConfigError::Invalid(
                "set either parser.json or parser.command, not both".to_owned(),
            )),
            (Some(json), None) => Ok(DocSource::JsonFile(json.clone())),
            (None, Some(command)) => {
                let (program, args) = command.split_first().ok_or_else(|| {
                    ConfigError::Invalid("parser.command must not be empty".to_owned())
                })?;
                Ok(DocSource::Command {
                    program: program.clone(),
                    args: args.to_vec(),
                })
            }
            (None, None) => Ok(DocSource::JsonFile(PathBuf::from(DEFAULT_PARSER_JSON))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving one `<version>.md` per version.
    pub api_dir: PathBuf,
    /// Site path the sidebar links point under.
    pub link_base: String,
    /// Sidebar manifest path.
    pub sidebar: PathBuf,
    /// Prefix for constructor signatures, e.g. `L.`.
    pub namespace: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            api_dir: PathBuf::from("hub/develop/api"),
            link_base: "/develop/api".to_owned(),
            sidebar: PathBuf::from("hub/.vitepress/generated-sidebars/api-sidebar.ts"),
            namespace: String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    pub group_by_major: bool,
}

#[derive(Deserialize)]
struct PackageManifest {
    version: String,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `apidoc.toml` in the
    /// working directory is used when present, otherwise defaults.
    pub fn load(path: Option<&Path>, cli: CliSettings) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILENAME).is_file() => {
                Self::from_file(Path::new(CONFIG_FILENAME))?
            }
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.project.dir,
            &mut self.repository.cache_dir,
            &mut self.output.api_dir,
            &mut self.output.sidebar,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    fn apply_cli(&mut self, cli: CliSettings) {
        if let Some(dir) = cli.project_dir {
            self.project.dir = dir;
        }
        if let Some(version) = cli.current_version {
            self.project.version = Some(version);
        }
        if let Some(limit) = cli.tags_limit {
            self.repository.tags_limit = limit;
        }
    }

    /// The version of the live checkout, from configuration or the
    /// project's `package.json`.
    pub fn current_version(&self) -> Result<String, ConfigError> {
        if let Some(version) = &self.project.version {
            return Ok(version.clone());
        }

        let path = self.project.dir.join("package.json");
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest: PackageManifest =
            serde_json::from_str(&text).map_err(|source| ConfigError::Manifest { path, source })?;
        Ok(manifest.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.repository.tags_limit, 5);
        assert_eq!(config.output.link_base, "/develop/api");
        assert_eq!(
            config.parser.source().unwrap(),
            DocSource::JsonFile(PathBuf::from("leafdoc.json"))
        );
        assert!(!config.sidebar.group_by_major);
    }

    #[test]
    fn file_values_and_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apidoc.toml");
        fs::write(
            &path,
            r#"
[project]
version = "2.0.0"

[repository]
cache_dir = "cache"
tags_limit = 3

[parser]
command = ["npx", "leafdoc", "--json"]

[output]
api_dir = "/abs/api"
namespace = "L."

[sidebar]
group_by_major = true
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), CliSettings::default()).unwrap();
        assert_eq!(config.project.version.as_deref(), Some("2.0.0"));
        assert_eq!(config.repository.cache_dir, dir.path().join("cache"));
        assert_eq!(config.repository.tags_limit, 3);
        assert_eq!(config.output.api_dir, PathBuf::from("/abs/api"));
        assert_eq!(config.output.namespace, "L.");
        assert!(config.sidebar.group_by_major);
        assert_eq!(
            config.parser.source().unwrap(),
            DocSource::Command {
                program: "npx".into(),
                args: vec!["leafdoc".into(), "--json".into()]
            }
        );
    }

    #[test]
    fn cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apidoc.toml");
        fs::write(&path, "[project]\nversion = \"1.0.0\"\n[repository]\ntags_limit = 3\n").unwrap();

        let config = Config::load(
            Some(&path),
            CliSettings {
                current_version: Some("1.1.0".into()),
                tags_limit: Some(0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.current_version().unwrap(), "1.1.0");
        assert_eq!(config.repository.tags_limit, 0);
    }

    #[test]
    fn missing_explicit_file() {
        let err = Config::load(Some(Path::new("/no/such/apidoc.toml")), CliSettings::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apidoc.toml");
        fs::write(&path, "[output]\napi_directory = \"x\"\n").unwrap();
        let err = Config::load(Some(&path), CliSettings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn version_from_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "leaflet", "version": "2.0.0-alpha.1"}"#,
        )
        .unwrap();
        let mut config = Config::default();
        config.apply_cli(CliSettings {
            project_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        });
        assert_eq!(config.current_version().unwrap(), "2.0.0-alpha.1");
    }

    #[test]
    fn both_parser_sources_is_invalid() {
        let parser = ParserConfig {
            json: Some(PathBuf::from("a.json")),
            command: Some(vec!["leafdoc".into()]),
        };
        assert!(matches!(parser.source(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn empty_command_is_invalid() {
        let parser = ParserConfig {
            json: None,
            command: Some(Vec::new()),
        };
        assert!(matches!(parser.source(), Err(ConfigError::Invalid(_))));
    }
}

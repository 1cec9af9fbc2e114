//! User configuration (persisted as `shiplog.toml`).
//!
//! Every field is optional; a missing file or section means defaults.
//! The CLI layers `SHIPLOG_PROJECTS_DIR` and command-line flags on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "shiplog.toml";
pub const PROJECTS_DIR_ENV: &str = "SHIPLOG_PROJECTS_DIR";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiplogConfig {
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Root holding one directory per project. Default: `~/.claude/projects`.
    #[serde(default)]
    pub projects_dir: Option<String>,
    /// Search every project instead of the ones matching the working directory.
    #[serde(default)]
    pub all_projects: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory for exports written under their default file name.
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Html,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl ShiplogConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Projects root with `~/` expanded against `home`.
    pub fn projects_dir(&self, home: &Path) -> PathBuf {
        match self.sessions.projects_dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => expand_home(dir.trim(), home),
            _ => home.join(".claude").join("projects"),
        }
    }

    pub fn output_dir(&self, home: &Path) -> Option<PathBuf> {
        self.export
            .output_dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map(|dir| expand_home(dir, home))
    }
}

fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

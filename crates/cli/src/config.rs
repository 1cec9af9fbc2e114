use anyhow::{Context, Result};
use shiplog_core::config::{ExportFormat, ShiplogConfig, CONFIG_FILE_NAME, PROJECTS_DIR_ENV};
use std::path::{Path, PathBuf};

/// Effective settings after the config file and environment are applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub projects_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub all_projects: bool,
    pub format: ExportFormat,
}

fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home))
}

/// Get the config directory path (~/.config/shiplog/)
pub fn config_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".config").join("shiplog"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_settings() -> Result<Settings> {
    let home = home_dir()?;
    let path = config_path()?;
    let config = ShiplogConfig::load(&path)
        .with_context(|| format!("Failed to load config at {}", path.display()))?;
    let env_projects_dir = std::env::var(PROJECTS_DIR_ENV).ok();
    Ok(settings_from(&config, &home, env_projects_dir.as_deref()))
}

fn settings_from(config: &ShiplogConfig, home: &Path, env_projects_dir: Option<&str>) -> Settings {
    let projects_dir = match env_projects_dir.map(str::trim) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => config.projects_dir(home),
    };
    Settings {
        projects_dir,
        output_dir: config.output_dir(home),
        all_projects: config.sessions.all_projects,
        format: config.export.format,
    }
}

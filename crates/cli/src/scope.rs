use crate::config::Settings;
use anyhow::{Context, Result};
use shiplog_core::session::SessionInfo;
use shiplog_parsers::{find_sessions, project_dirs_for_cwd};
use std::path::Path;

const ALL_PROJECTS_LABEL: &str = "all projects";

/// Which project directories a command looks at.
pub struct Scope {
    /// `None` searches every project.
    pub filter: Option<Vec<String>>,
    pub label: String,
}

impl Scope {
    pub fn all() -> Self {
        Self {
            filter: None,
            label: ALL_PROJECTS_LABEL.to_string(),
        }
    }

    /// Narrow to the working directory's projects, unless there are none.
    pub fn resolve(settings: &Settings, all_projects: bool) -> Self {
        if all_projects {
            return Self::all();
        }
        let Ok(cwd) = std::env::current_dir() else {
            return Self::all();
        };
        let dirs = project_dirs_for_cwd(&settings.projects_dir, &cwd);
        if dirs.is_empty() {
            return Self::all();
        }
        tracing::debug!(?dirs, "Scoped to working directory");
        Self {
            filter: Some(dirs),
            label: cwd.display().to_string(),
        }
    }

    pub fn is_scoped(&self) -> bool {
        self.filter.is_some()
    }

    pub fn find_sessions(&self, projects_dir: &Path) -> Result<Vec<SessionInfo>> {
        find_sessions(projects_dir, self.filter.as_deref()).context("Error scanning sessions")
    }
}

use crate::claude_code::{RecordKind, RecordReader};
use anyhow::{Context, Result};
use shiplog_core::session::{SessionInfo, UNTITLED_LISTING};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Encode a filesystem path the way Claude Code names project directories.
///
/// `/Users/me/value_slim` -> `-Users-me-value-slim`
pub fn project_dir_name(path: &Path) -> String {
    path.to_string_lossy().replace(['/', '_'], "-")
}

/// Recover a readable project path from an encoded directory name.
///
/// Lossy: dashes and underscores in the original path both come back as `/`.
pub fn readable_project(dir_name: &str) -> String {
    dir_name.replace('-', "/").trim_start_matches('/').to_string()
}

/// Project directories for `cwd` and any project nested below it.
pub fn project_dirs_for_cwd(projects_dir: &Path, cwd: &Path) -> Vec<String> {
    let encoded = project_dir_name(cwd);
    let nested = format!("{encoded}-");

    let mut matches: Vec<String> = subdirectory_names(projects_dir)
        .unwrap_or_default()
        .into_iter()
        .filter(|name| *name == encoded || name.starts_with(&nested))
        .collect();
    matches.sort();
    matches
}

/// List transcripts in the given project directories, or in all of them.
///
/// Newest first, by the first timestamp in each file.
pub fn find_sessions(projects_dir: &Path, filter: Option<&[String]>) -> Result<Vec<SessionInfo>> {
    let dir_names = match filter {
        Some(names) => names
            .iter()
            .filter(|name| projects_dir.join(name).is_dir())
            .cloned()
            .collect(),
        None => {
            let mut names = subdirectory_names(projects_dir).with_context(|| {
                format!("Failed to read projects directory: {}", projects_dir.display())
            })?;
            names.sort();
            names
        }
    };

    let mut sessions = Vec::new();
    for dir_name in dir_names {
        let project = readable_project(&dir_name);
        for file_path in jsonl_files(&projects_dir.join(&dir_name)) {
            let Some(session_id) = file_path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let (title, timestamp) = scan_session_file(&file_path);
            sessions.push(SessionInfo {
                title,
                session_id: session_id.to_string(),
                project: project.clone(),
                project_dir: dir_name.clone(),
                file_path: file_path.clone(),
                timestamp,
            });
        }
    }

    sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    tracing::debug!(count = sessions.len(), "Discovered sessions");
    Ok(sessions)
}

/// Read just enough of a transcript to list it: its title and first timestamp.
///
/// Stops at the first read error; an unreadable file lists as untitled.
pub fn scan_session_file(path: &Path) -> (String, String) {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Failed to open {}: {}", path.display(), e);
            return (UNTITLED_LISTING.to_string(), String::new());
        }
    };

    let mut title = String::new();
    let mut first_timestamp = String::new();
    for record in RecordReader::new(BufReader::new(file)) {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Stopped scanning {}: {}", path.display(), e);
                break;
            }
        };

        if let RecordKind::CustomTitle {
            custom_title: Some(custom_title),
        } = &record.kind
        {
            title.clone_from(custom_title);
        }
        if first_timestamp.is_empty() {
            if let Some(ts) = record.effective_timestamp() {
                first_timestamp = ts.to_string();
            }
        }
        if !title.is_empty() && !first_timestamp.is_empty() {
            break;
        }
    }

    if title.is_empty() {
        title = UNTITLED_LISTING.to_string();
    }
    (title, first_timestamp)
}

fn subdirectory_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// Top-level `*.jsonl` files only; subagent transcripts live in subdirectories.
fn jsonl_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/*.jsonl", glob::Pattern::escape(&dir.to_string_lossy()));
    glob::glob(&pattern)
        .map(|paths| paths.filter_map(Result::ok).filter(|p| p.is_file()).collect())
        .unwrap_or_default()
}

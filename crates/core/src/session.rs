use serde::Serialize;
use std::path::PathBuf;

pub const UNTITLED_LISTING: &str = "(untitled)";

/// A transcript file found under the projects directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    /// From the session's `custom-title` record, `(untitled)` otherwise.
    pub title: String,
    /// File stem of the `.jsonl` transcript (a UUID).
    pub session_id: String,
    /// Readable project path, e.g. `Users/me/projects/foo`.
    pub project: String,
    /// Encoded directory name, e.g. `-Users-me-projects-foo`.
    pub project_dir: String,
    pub file_path: PathBuf,
    /// ISO 8601 timestamp of the first timestamped record.
    pub timestamp: String,
}

impl SessionInfo {
    pub fn short_id(&self) -> &str {
        match self.session_id.char_indices().nth(8) {
            Some((idx, _)) => &self.session_id[..idx],
            None => &self.session_id,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum QueryMatch<'a> {
    Found(&'a SessionInfo),
    Ambiguous(Vec<&'a SessionInfo>),
    NotFound,
}

/// Resolve a user query against known sessions.
///
/// Priority: exact title (case-insensitive), session id prefix, title
/// substring, project substring. A substring tier with several hits is
/// ambiguous and stops the search.
pub fn find_by_query<'a>(sessions: &'a [SessionInfo], query: &str) -> QueryMatch<'a> {
    let q = query.trim().to_lowercase();

    if let Some(hit) = sessions.iter().find(|s| s.title.to_lowercase() == q) {
        return QueryMatch::Found(hit);
    }

    if let Some(hit) = sessions
        .iter()
        .find(|s| s.session_id.to_lowercase().starts_with(&q))
    {
        return QueryMatch::Found(hit);
    }

    let tiers: [fn(&SessionInfo) -> &str; 2] = [title_of, project_of];
    for field in tiers {
        let mut hits: Vec<&SessionInfo> = sessions
            .iter()
            .filter(|s| field(s).to_lowercase().contains(&q))
            .collect();
        match hits.len() {
            0 => continue,
            1 => return QueryMatch::Found(hits.remove(0)),
            _ => return QueryMatch::Ambiguous(hits),
        }
    }

    QueryMatch::NotFound
}

fn title_of(session: &SessionInfo) -> &str {
    &session.title
}

fn project_of(session: &SessionInfo) -> &str {
    &session.project
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str, id: &str, project: &str) -> SessionInfo {
        SessionInfo {
            title: title.to_string(),
            session_id: id.to_string(),
            project: project.to_string(),
            project_dir: format!("-{}", project.replace('/', "-")),
            file_path: PathBuf::from(format!("/tmp/{id}.jsonl")),
            timestamp: String::new(),
        }
    }

    fn sample() -> Vec<SessionInfo> {
        vec![
            info("Fix login bug", "a1b2c3d4-0000", "Users/me/web"),
            info("Fix login bug v2", "b2c3d4e5-1111", "Users/me/web"),
            info("Refactor parser", "c3d4e5f6-2222", "Users/me/compiler"),
        ]
    }

    #[test]
    fn exact_title_beats_substring() {
        let sessions = sample();
        assert_eq!(
            find_by_query(&sessions, "  FIX LOGIN BUG "),
            QueryMatch::Found(&sessions[0])
        );
    }

    #[test]
    fn id_prefix_match() {
        let sessions = sample();
        assert_eq!(find_by_query(&sessions, "C3D4"), QueryMatch::Found(&sessions[2]));
    }

    #[test]
    fn unique_title_substring() {
        let sessions = sample();
        assert_eq!(find_by_query(&sessions, "parser"), QueryMatch::Found(&sessions[2]));
    }

    #[test]
    fn ambiguous_title_substring() {
        let sessions = sample();
        match find_by_query(&sessions, "login") {
            QueryMatch::Ambiguous(hits) => assert_eq!(hits.len(), 2),
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn project_substring_is_last_resort() {
        let sessions = sample();
        assert_eq!(find_by_query(&sessions, "compiler"), QueryMatch::Found(&sessions[2]));
        match find_by_query(&sessions, "web") {
            QueryMatch::Ambiguous(hits) => assert_eq!(hits.len(), 2),
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn no_match() {
        assert_eq!(find_by_query(&sample(), "zzz"), QueryMatch::NotFound);
    }

    #[test]
    fn short_id_truncates_to_eight_chars() {
        let sessions = sample();
        assert_eq!(sessions[0].short_id(), "a1b2c3d4");
        assert_eq!(info("t", "abc", "p").short_id(), "abc");
    }
}

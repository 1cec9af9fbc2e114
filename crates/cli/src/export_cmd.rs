use crate::config::Settings;
use crate::scope::Scope;
use anyhow::{bail, Context, Result};
use shiplog_core::config::ExportFormat;
use shiplog_core::render::{count_messages, render_html, render_json};
use shiplog_core::session::{find_by_query, QueryMatch, SessionInfo};
use shiplog_parsers::parse_transcript;
use std::path::{Path, PathBuf};

pub struct ExportOptions {
    pub query: String,
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
}

/// Resolve one session and write its rendered transcript.
pub fn run_export(
    settings: &Settings,
    scope: &Scope,
    sessions: Vec<SessionInfo>,
    options: &ExportOptions,
) -> Result<()> {
    let query = options.query.as_str();

    let mut sessions = sessions;
    if scope.is_scoped() && find_by_query(&sessions, query) == QueryMatch::NotFound {
        println!("  Not found in current project, searching all...");
        sessions = Scope::all().find_sessions(&settings.projects_dir)?;
    }

    let session = match find_by_query(&sessions, query) {
        QueryMatch::Found(session) => session,
        QueryMatch::Ambiguous(candidates) => {
            println!("  Multiple sessions match '{query}':");
            for candidate in candidates {
                println!("    - {} ({})", candidate.title, candidate.project);
            }
            println!("  Be more specific.");
            bail!("Ambiguous session query '{query}'");
        }
        QueryMatch::NotFound => bail!("No session found matching '{query}'"),
    };

    println!("  Found: \"{}\" ({})", session.title, session.project);
    println!("  Parsing transcript...");
    let transcript = parse_transcript(&session.file_path)
        .with_context(|| format!("Error parsing JSONL for session {}", session.session_id))?;
    println!("  {} entries", transcript.records.len());

    let counts = count_messages(&transcript.messages);
    println!(
        "  {} user messages, {} assistant messages",
        counts.user, counts.assistant
    );

    let rendered = match options.format {
        ExportFormat::Html => {
            println!("  Generating HTML...");
            render_html(&transcript.messages, &transcript.meta, &session.project)
        }
        ExportFormat::Json => {
            println!("  Generating JSON...");
            render_json(&transcript.messages, &transcript.meta, &session.project)
                .context("Failed to serialize transcript")?
        }
    };

    let output_path = match &options.output {
        Some(path) => path.clone(),
        None => default_output_path(
            &session.title,
            options.format,
            settings.output_dir.as_deref(),
        ),
    };
    std::fs::write(&output_path, rendered.as_bytes())
        .with_context(|| format!("Error writing file {}", output_path.display()))?;

    println!(
        "  Written to: {} ({})",
        output_path.display(),
        format_size_mb(rendered.len())
    );
    println!("  Done.");
    Ok(())
}

/// `My session/v2` -> `My_session-v2.html`, inside `output_dir` when set.
fn default_output_path(title: &str, format: ExportFormat, output_dir: Option<&Path>) -> PathBuf {
    let file_name = format!(
        "{}.{}",
        title.replace(' ', "_").replace('/', "-"),
        format.extension()
    );
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn format_size_mb(bytes: usize) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

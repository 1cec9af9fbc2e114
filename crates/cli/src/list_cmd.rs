use crate::scope::Scope;
use shiplog_core::meta::format_date;
use shiplog_core::session::SessionInfo;

const TITLE_WIDTH: usize = 24;
const PROJECT_WIDTH: usize = 39;

/// Print the session table, newest first.
pub fn run_list(sessions: &[SessionInfo], scope: &Scope) {
    if sessions.is_empty() && scope.is_scoped() {
        println!("  No sessions found for this project. Use -a to show all.");
        return;
    }
    print!("{}", format_table(sessions));
}

fn format_table(sessions: &[SessionInfo]) -> String {
    let rule = "\u{2500}";
    let mut out = String::from("\n");
    out.push_str(&format!(
        "  {:<4} {:<25} {:<10} {:<40} {}\n",
        "#", "Title", "ID", "Project", "Date"
    ));
    out.push_str(&format!(
        "  {} {} {} {} {}\n",
        rule.repeat(4),
        rule.repeat(25),
        rule.repeat(10),
        rule.repeat(40),
        rule.repeat(12)
    ));

    for (i, session) in sessions.iter().enumerate() {
        out.push_str(&format!(
            "  {:<4} {:<25} {:<10} {:<40} {}\n",
            i + 1,
            truncate(&session.title, TITLE_WIDTH),
            session.short_id(),
            truncate(&session.project, PROJECT_WIDTH),
            format_date(&session.timestamp)
        ));
    }

    out.push_str(&format!("\n  Total: {} sessions\n\n", sessions.len()));
    out
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

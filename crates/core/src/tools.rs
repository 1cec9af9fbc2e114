//! Human-readable labels for assistant tool invocations.

/// Known tool names and the label shown for them.
pub const TOOL_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("Read", "Read file"),
    ("Write", "Write file"),
    ("Edit", "Edit file"),
    ("Bash", "Run command"),
    ("Glob", "Search files"),
    ("Grep", "Search content"),
    ("WebSearch", "Web search"),
    ("WebFetch", "Fetch URL"),
    ("Task", "Run agent"),
    ("Skill", "Run skill"),
    ("TaskCreate", "Create task"),
    ("TaskUpdate", "Update task"),
    ("TaskList", "List tasks"),
    ("TaskGet", "Get task"),
    ("NotebookEdit", "Edit notebook"),
    ("mcp__context7__resolve-library-id", "Lookup docs"),
    ("mcp__context7__query-docs", "Query docs"),
];

/// Namespace marker for MCP server tools (`mcp__<server>__<tool>`).
pub const MCP_TOOL_PREFIX: &str = "mcp__";
pub const MCP_SEGMENT_SEPARATOR: &str = "__";

pub fn tool_display_name(name: &str) -> String {
    if let Some((_, label)) = TOOL_DISPLAY_NAMES.iter().find(|(tool, _)| *tool == name) {
        return (*label).to_string();
    }

    if name.starts_with(MCP_TOOL_PREFIX) {
        let segments: Vec<&str> = name.split(MCP_SEGMENT_SEPARATOR).collect();
        if segments.len() >= 3 {
            let last = segments[segments.len() - 1];
            return title_case(&last.replace(['-', '_'], " "));
        }
    }

    title_case(&name.replace('_', " "))
}

/// Label for a collapsed run of tool calls.
pub fn tool_group_label(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [single] => tool_display_name(single),
        many => format!("{} tool actions performed", many.len()),
    }
}

/// Upper-cases the first character of every whitespace-separated word.
/// The rest of each word is left as is.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for ch in s.chars() {
        if word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        word_start = ch.is_whitespace();
    }
    out
}

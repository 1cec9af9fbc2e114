//! Recognizes harness scaffolding that should not reach a human reader.

use super::record::ContentBlock;

/// Prefixes (after trimming) of injected system/internal text.
pub const SYSTEM_PREFIXES: &[&str] = &[
    "<task-notification",
    "<local-command-",
    "<command-name>",
    "<command-message>",
    "[Request interrupted",
    "# Quick Plan",
    "<system-reminder>",
    "This session is being continued from a previous conversation",
];

/// Local command output is noise wherever it appears in the text.
pub const LOCAL_COMMAND_MARKER: &str = "<local-command-";

pub fn is_system_content(text: &str) -> bool {
    let trimmed = text.trim();
    SYSTEM_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
        || trimmed.contains(LOCAL_COMMAND_MARKER)
}

/// True when a user turn carries nothing but tool output (or nothing at all).
pub fn is_only_tool_results(blocks: &[ContentBlock]) -> bool {
    !blocks.iter().any(carries_visible_content)
}

fn carries_visible_content(block: &ContentBlock) -> bool {
    match block {
        ContentBlock::Text { text } => is_visible_text(text),
        ContentBlock::Plain(text) => is_visible_text(text),
        ContentBlock::Image { .. } => true,
        ContentBlock::ToolUse { .. }
        | ContentBlock::ToolResult
        | ContentBlock::Thinking
        | ContentBlock::Other => false,
    }
}

pub(crate) fn is_visible_text(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && !is_system_content(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ContentBlock {
        ContentBlock::Text {
            text: s.to_string(),
        }
    }

    #[test]
    fn every_prefix_is_system_content() {
        for prefix in SYSTEM_PREFIXES {
            assert!(is_system_content(prefix), "{prefix}");
            assert!(is_system_content(&format!("  \n{prefix} trailing")), "{prefix}");
        }
    }

    #[test]
    fn system_reminder_is_filtered() {
        assert!(is_system_content("<system-reminder>foo</system-reminder>"));
    }

    #[test]
    fn local_command_anywhere_is_filtered() {
        assert!(is_system_content(
            "Output: <local-command-stdout>ok</local-command-stdout>"
        ));
    }

    #[test]
    fn prefix_match_is_case_sensitive_and_anchored() {
        assert!(!is_system_content("<SYSTEM-REMINDER>foo"));
        assert!(!is_system_content("see <system-reminder> below"));
        assert!(!is_system_content("Please fix the login page"));
        assert!(!is_system_content(""));
    }

    #[test]
    fn empty_block_list_is_tool_only() {
        assert!(is_only_tool_results(&[]));
    }

    #[test]
    fn tool_results_with_noise_are_tool_only() {
        let blocks = vec![
            ContentBlock::ToolResult,
            text("   "),
            text("<system-reminder>x</system-reminder>"),
            ContentBlock::Plain("<command-name>/clear</command-name>".to_string()),
            ContentBlock::Thinking,
            ContentBlock::Other,
        ];
        assert!(is_only_tool_results(&blocks));
    }

    #[test]
    fn real_text_or_image_is_not_tool_only() {
        assert!(!is_only_tool_results(&[ContentBlock::ToolResult, text("thanks")]));
        assert!(!is_only_tool_results(&[ContentBlock::Image { source: None }]));
        assert!(!is_only_tool_results(&[ContentBlock::Plain("hi".to_string())]));
    }
}

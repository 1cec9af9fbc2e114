use super::filter::{is_only_tool_results, is_system_content, is_visible_text};
use super::record::{ContentBlock, RawContent, Record};
use shiplog_core::{AssistantMessage, Image, UserMessage};

/// Name recorded for a `tool_use` block without one.
pub const UNKNOWN_TOOL: &str = "unknown";

/// Turn a user record into a display message.
///
/// Returns `None` for system scaffolding, tool-result echoes, and records
/// whose content has no usable shape.
pub fn extract_user_message(record: &Record) -> Option<UserMessage> {
    let message = record.message()?;
    let mut texts = Vec::new();
    let mut images = Vec::new();

    match &message.content {
        RawContent::Text(text) => {
            if text.trim().is_empty() || is_system_content(text) {
                return None;
            }
            // String content is shown as typed.
            texts.push(text.clone());
        }
        RawContent::Blocks(blocks) => {
            if is_only_tool_results(blocks) {
                return None;
            }
            for block in blocks {
                match block {
                    ContentBlock::Text { text } => {
                        if is_visible_text(text) {
                            texts.push(text.trim().to_string());
                        }
                    }
                    ContentBlock::Image {
                        source: Some(source),
                    } if source.source_type.as_deref() == Some("base64") => {
                        images.push(Image::new(
                            source.media_type.as_deref(),
                            source.data.clone().unwrap_or_default(),
                        ));
                    }
                    _ => {}
                }
            }
        }
        RawContent::Unsupported => return None,
    }

    if texts.is_empty() && images.is_empty() {
        return None;
    }
    Some(UserMessage {
        texts,
        images,
        timestamp: record.timestamp.clone(),
    })
}

/// Turn an assistant record into a display message. Thinking is dropped.
pub fn extract_assistant_message(record: &Record) -> Option<AssistantMessage> {
    let RawContent::Blocks(blocks) = &record.message()?.content else {
        return None;
    };

    let mut texts = Vec::new();
    let mut tool_uses = Vec::new();
    for block in blocks {
        match block {
            ContentBlock::Text { text } => {
                let text = text.trim();
                if !text.is_empty() {
                    texts.push(text.to_string());
                }
            }
            ContentBlock::ToolUse { name } => {
                let name = name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(UNKNOWN_TOOL);
                tool_uses.push(name.to_string());
            }
            _ => {}
        }
    }

    if texts.is_empty() && tool_uses.is_empty() {
        return None;
    }
    Some(AssistantMessage {
        texts,
        tool_uses,
        timestamp: record.timestamp.clone(),
    })
}

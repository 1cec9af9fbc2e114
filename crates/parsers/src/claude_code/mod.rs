mod builder;
mod extract;
mod filter;
mod meta;
mod reader;
mod record;

pub use builder::{build_messages, MessageBuilder, ToolBuffer};
pub use extract::{extract_assistant_message, extract_user_message, UNKNOWN_TOOL};
pub use filter::{is_only_tool_results, is_system_content, LOCAL_COMMAND_MARKER, SYSTEM_PREFIXES};
pub use meta::{collect_raw_meta, extract_meta};
pub use reader::{read_records, read_records_from_path, ReadError, RecordReader, MAX_LINE_BYTES};
pub use record::{ContentBlock, ConversationEntry, ImageSource, RawContent, RawMessage, Record, RecordKind};

use anyhow::Result;
use shiplog_core::{Message, SessionMeta};
use std::path::Path;

/// A fully read transcript: the records plus everything derived from them.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub records: Vec<Record>,
    pub messages: Vec<Message>,
    pub meta: SessionMeta,
}

impl Transcript {
    pub fn from_records(records: Vec<Record>) -> Self {
        let messages = build_messages(&records);
        let meta = extract_meta(&records);
        Self {
            records,
            messages,
            meta,
        }
    }
}

/// Read a Claude Code JSONL transcript and normalize it for display.
pub fn parse_transcript(path: &Path) -> Result<Transcript> {
    let records = read_records_from_path(path)?;
    let transcript = Transcript::from_records(records);
    tracing::info!(
        path = %path.display(),
        records = transcript.records.len(),
        messages = transcript.messages.len(),
        "Parsed transcript"
    );
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiplog_core::testing::*;
    use std::io::Write;

    #[test]
    fn test_parse_transcript_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = jsonl(&[
            custom_title("Refactor parser"),
            user_text("Please refactor", "2024-02-10T08:00:00Z"),
            assistant_blocks(
                vec![tool_use_block("Read")],
                "claude-opus-4-6",
                "2024-02-10T08:00:05Z",
            ),
            assistant_blocks(vec![text_block("Done.")], "claude-opus-4-6", "2024-02-10T08:01:00Z"),
        ]);
        file.write_all(body.as_bytes()).unwrap();
        file.write_all(b"garbage line\n").unwrap();

        let transcript = parse_transcript(file.path()).unwrap();
        assert_eq!(transcript.records.len(), 4);
        assert_eq!(transcript.messages.len(), 3);
        assert_eq!(transcript.meta.title, "Refactor parser");
        assert_eq!(transcript.meta.model, "Claude Opus");
        assert_eq!(transcript.meta.date_range, "Feb 10, 2024");
    }

    #[test]
    fn test_parse_transcript_missing_file() {
        assert!(parse_transcript(Path::new("/nonexistent/shiplog.jsonl")).is_err());
    }
}

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

// ── Typed view over one Claude Code JSONL line ──────────────────────────────
//
// The transcript format drifts between releases, so a record is decoded into
// a tagged variant whose fields are all optional. A field that is missing or
// has an unexpected JSON type reads as `None` instead of failing the line.

/// One decoded line of a Claude Code transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// `timestamp`, when present and non-empty.
    pub timestamp: Option<String>,
    /// `snapshot.timestamp`, carried by file-history snapshots.
    pub snapshot_timestamp: Option<String>,
    pub kind: RecordKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    User(ConversationEntry),
    Assistant(ConversationEntry),
    CustomTitle { custom_title: Option<String> },
    /// `file-history-snapshot`, `system`, `progress`, summaries, ...
    Other { raw_type: Option<String> },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationEntry {
    /// `None` when `message` is absent or not an object.
    pub message: Option<RawMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    pub content: RawContent,
    pub model: Option<String>,
}

/// User content is either a plain string or a list of blocks.
/// Assistant content is always a list.
#[derive(Debug, Clone, PartialEq)]
pub enum RawContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    /// Missing, null, or any other JSON type.
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Missing `text` reads as empty.
    Text { text: String },
    Image { source: Option<ImageSource> },
    ToolUse { name: Option<String> },
    ToolResult,
    Thinking,
    /// A bare string inside a block list.
    Plain(String),
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSource {
    pub source_type: Option<String>,
    pub media_type: Option<String>,
    pub data: Option<String>,
}

impl Record {
    /// Decode a JSON value. Only objects are records.
    pub fn from_json(value: &Value) -> Option<Self> {
        let map = value.as_object()?;

        let kind = match str_field(map, "type") {
            Some("user") => RecordKind::User(ConversationEntry::from_map(map)),
            Some("assistant") => RecordKind::Assistant(ConversationEntry::from_map(map)),
            Some("custom-title") => RecordKind::CustomTitle {
                custom_title: str_field(map, "customTitle").map(str::to_string),
            },
            other => RecordKind::Other {
                raw_type: other.map(str::to_string),
            },
        };

        let snapshot_timestamp = map
            .get("snapshot")
            .and_then(Value::as_object)
            .and_then(|snapshot| non_empty_str_field(snapshot, "timestamp"));

        Some(Self {
            timestamp: non_empty_str_field(map, "timestamp"),
            snapshot_timestamp,
            kind,
        })
    }

    /// `timestamp`, falling back to `snapshot.timestamp`.
    pub fn effective_timestamp(&self) -> Option<&str> {
        self.timestamp
            .as_deref()
            .or(self.snapshot_timestamp.as_deref())
    }

    pub fn conversation(&self) -> Option<&ConversationEntry> {
        match &self.kind {
            RecordKind::User(entry) | RecordKind::Assistant(entry) => Some(entry),
            RecordKind::CustomTitle { .. } | RecordKind::Other { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&RawMessage> {
        self.conversation().and_then(|entry| entry.message.as_ref())
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Record::from_json(&value).ok_or_else(|| de::Error::custom("record is not a JSON object"))
    }
}

impl ConversationEntry {
    fn from_map(map: &Map<String, Value>) -> Self {
        let message = map
            .get("message")
            .and_then(Value::as_object)
            .map(RawMessage::from_map);
        Self { message }
    }
}

impl RawMessage {
    fn from_map(map: &Map<String, Value>) -> Self {
        let content = match map.get("content") {
            Some(Value::String(text)) => RawContent::Text(text.clone()),
            Some(Value::Array(items)) => {
                RawContent::Blocks(items.iter().map(ContentBlock::from_json).collect())
            }
            _ => RawContent::Unsupported,
        };
        Self {
            content,
            model: non_empty_str_field(map, "model"),
        }
    }
}

impl ContentBlock {
    pub fn from_json(value: &Value) -> Self {
        let map = match value {
            Value::String(text) => return Self::Plain(text.clone()),
            Value::Object(map) => map,
            _ => return Self::Other,
        };

        match str_field(map, "type") {
            Some("text") => Self::Text {
                text: str_field(map, "text").unwrap_or_default().to_string(),
            },
            Some("image") => Self::Image {
                source: map
                    .get("source")
                    .and_then(Value::as_object)
                    .map(|source| ImageSource {
                        source_type: str_field(source, "type").map(str::to_string),
                        media_type: str_field(source, "media_type").map(str::to_string),
                        data: str_field(source, "data").map(str::to_string),
                    }),
            },
            Some("tool_use") => Self::ToolUse {
                name: str_field(map, "name").map(str::to_string),
            },
            Some("tool_result") => Self::ToolResult,
            Some("thinking") => Self::Thinking,
            _ => Self::Other,
        }
    }
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

fn non_empty_str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    str_field(map, key)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

use super::extract::{extract_assistant_message, extract_user_message};
use super::record::{Record, RecordKind};
use shiplog_core::{AssistantMessage, Message, ToolGroup, UserMessage};

/// Tool names from tool-only assistant turns, held until the next visible turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ToolBuffer {
    #[default]
    Idle,
    /// Never empty.
    Buffering(Vec<String>),
}

impl ToolBuffer {
    pub fn push(&mut self, names: impl IntoIterator<Item = String>) {
        let mut names = names.into_iter().peekable();
        if names.peek().is_none() {
            return;
        }
        match self {
            Self::Idle => *self = Self::Buffering(names.collect()),
            Self::Buffering(pending) => pending.extend(names),
        }
    }

    /// Drain the buffer into a group, leaving it idle.
    pub fn take(&mut self) -> Option<ToolGroup> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Buffering(tool_names) => Some(ToolGroup { tool_names }),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn pending(&self) -> &[String] {
        match self {
            Self::Idle => &[],
            Self::Buffering(pending) => pending,
        }
    }
}

/// Folds records into display messages, collapsing runs of tool-only
/// assistant turns into a single tool group.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    messages: Vec<Message>,
    tools: ToolBuffer,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_record(&mut self, record: &Record) {
        match &record.kind {
            RecordKind::User(_) => {
                if let Some(msg) = extract_user_message(record) {
                    self.push_user(msg);
                }
            }
            RecordKind::Assistant(_) => {
                if let Some(msg) = extract_assistant_message(record) {
                    self.push_assistant(msg);
                }
            }
            RecordKind::CustomTitle { .. } | RecordKind::Other { .. } => {}
        }
    }

    pub fn push_user(&mut self, msg: UserMessage) {
        self.flush_tools();
        self.messages.push(Message::User(msg));
    }

    /// Text-bearing turns are emitted; tool-only turns extend the pending group.
    pub fn push_assistant(&mut self, msg: AssistantMessage) {
        if msg.is_tool_only() {
            self.tools.push(msg.tool_uses);
        } else if !msg.texts.is_empty() {
            self.flush_tools();
            self.messages.push(Message::Assistant(msg));
        }
    }

    pub fn pending_tools(&self) -> &[String] {
        self.tools.pending()
    }

    /// Messages emitted so far, excluding anything still buffered.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn finish(mut self) -> Vec<Message> {
        self.flush_tools();
        self.messages
    }

    fn flush_tools(&mut self) {
        if let Some(group) = self.tools.take() {
            self.messages.push(Message::ToolGroup(group));
        }
    }
}

/// Build the display transcript from records in file order.
pub fn build_messages(records: &[Record]) -> Vec<Message> {
    let mut builder = MessageBuilder::new();
    for record in records {
        builder.push_record(record);
    }
    builder.finish()
}

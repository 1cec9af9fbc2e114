use serde::{Deserialize, Serialize};

use crate::tools::tool_group_label;

/// Display role of a normalized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    ToolGroup,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::ToolGroup => "tool_group",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the normalized transcript handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    User(UserMessage),
    Assistant(AssistantMessage),
    /// Synthesized from consecutive tool-only assistant turns; never read from input.
    ToolGroup(ToolGroup),
}

impl Message {
    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Assistant(_) => Role::Assistant,
            Self::ToolGroup(_) => Role::ToolGroup,
        }
    }

    pub fn texts(&self) -> &[String] {
        match self {
            Self::User(msg) => &msg.texts,
            Self::Assistant(msg) => &msg.texts,
            Self::ToolGroup(_) => &[],
        }
    }

    pub fn images(&self) -> &[Image] {
        match self {
            Self::User(msg) => &msg.images,
            Self::Assistant(_) | Self::ToolGroup(_) => &[],
        }
    }

    /// Tools invoked by an assistant turn, or the collapsed names of a tool group.
    pub fn tool_names(&self) -> &[String] {
        match self {
            Self::User(_) => &[],
            Self::Assistant(msg) => &msg.tool_uses,
            Self::ToolGroup(group) => &group.tool_names,
        }
    }

    pub fn timestamp(&self) -> Option<&str> {
        match self {
            Self::User(msg) => msg.timestamp.as_deref(),
            Self::Assistant(msg) => msg.timestamp.as_deref(),
            Self::ToolGroup(_) => None,
        }
    }

    /// True when the message carries nothing a reader could see.
    pub fn is_empty(&self) -> bool {
        self.texts().is_empty() && self.images().is_empty() && self.tool_names().is_empty()
    }
}

/// A human turn: typed text and pasted images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub texts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// An assistant turn. Reasoning blocks never make it in here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub texts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_uses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl AssistantMessage {
    /// Assistant turns without text only contribute to a tool group.
    pub fn is_tool_only(&self) -> bool {
        self.texts.is_empty() && !self.tool_uses.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolGroup {
    pub tool_names: Vec<String>,
}

impl ToolGroup {
    /// Precomputed display label, e.g. "Read file" or "3 tool actions performed".
    pub fn label(&self) -> String {
        tool_group_label(&self.tool_names)
    }
}

/// Inline image attached to a user turn. The payload is never decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub media_type: String,
    /// base64
    pub data: String,
}

impl Image {
    pub const DEFAULT_MEDIA_TYPE: &'static str = "image/png";

    pub fn new(media_type: Option<&str>, data: impl Into<String>) -> Self {
        let media_type = media_type
            .filter(|value| !value.is_empty())
            .unwrap_or(Self::DEFAULT_MEDIA_TYPE);
        Self {
            media_type: media_type.to_string(),
            data: data.into(),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_defaults_media_type() {
        assert_eq!(Image::new(None, "AAAA").media_type, "image/png");
        assert_eq!(Image::new(Some(""), "AAAA").media_type, "image/png");
        assert_eq!(Image::new(Some("image/jpeg"), "AAAA").media_type, "image/jpeg");
    }

    #[test]
    fn test_image_data_uri() {
        let image = Image::new(Some("image/gif"), "R0lG");
        assert_eq!(image.data_uri(), "data:image/gif;base64,R0lG");
    }

    #[test]
    fn test_message_accessors() {
        let msg = Message::Assistant(AssistantMessage {
            texts: vec!["done".to_string()],
            tool_uses: vec!["Bash".to_string()],
            timestamp: Some("2024-01-01T10:00:00Z".to_string()),
        });
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.texts(), ["done".to_string()]);
        assert_eq!(msg.tool_names(), ["Bash".to_string()]);
        assert!(msg.images().is_empty());
        assert_eq!(msg.timestamp(), Some("2024-01-01T10:00:00Z"));
        assert!(!msg.is_empty());
    }

    #[test]
    fn test_tool_group_has_no_timestamp() {
        let msg = Message::ToolGroup(ToolGroup {
            tool_names: vec!["Read".to_string()],
        });
        assert_eq!(msg.role().as_str(), "tool_group");
        assert_eq!(msg.timestamp(), None);
        assert!(msg.texts().is_empty());
    }

    #[test]
    fn test_empty_message_detection() {
        assert!(Message::User(UserMessage::default()).is_empty());
        assert!(Message::ToolGroup(ToolGroup::default()).is_empty());
    }

    #[test]
    fn test_is_tool_only() {
        let tool_only = AssistantMessage {
            texts: Vec::new(),
            tool_uses: vec!["Grep".to_string()],
            timestamp: None,
        };
        assert!(tool_only.is_tool_only());

        let with_text = AssistantMessage {
            texts: vec!["hi".to_string()],
            ..tool_only.clone()
        };
        assert!(!with_text.is_tool_only());
    }

    #[test]
    fn test_message_serializes_with_role_tag() {
        let msg = Message::ToolGroup(ToolGroup {
            tool_names: vec!["Read".to_string(), "Edit".to_string()],
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "tool_group");
        assert_eq!(value["tool_names"][1], "Edit");

        let back: Message = serde_json::from_value(value).unwrap();
        assert_eq!(back, msg);
    }
}

//! JSON record builders for transcript fixtures.

use serde_json::{json, Value};

/// `user` record whose content is a plain string.
pub fn user_text(text: &str, timestamp: &str) -> Value {
    json!({
        "type": "user",
        "timestamp": timestamp,
        "message": { "role": "user", "content": text },
    })
}

/// `user` record with a block list.
pub fn user_blocks(blocks: Vec<Value>, timestamp: &str) -> Value {
    json!({
        "type": "user",
        "timestamp": timestamp,
        "message": { "role": "user", "content": blocks },
    })
}

/// `assistant` record with a block list and model id.
pub fn assistant_blocks(blocks: Vec<Value>, model: &str, timestamp: &str) -> Value {
    json!({
        "type": "assistant",
        "timestamp": timestamp,
        "message": { "role": "assistant", "model": model, "content": blocks },
    })
}

pub fn custom_title(title: &str) -> Value {
    json!({ "type": "custom-title", "customTitle": title })
}

pub fn snapshot(timestamp: &str) -> Value {
    json!({ "type": "file-history-snapshot", "snapshot": { "timestamp": timestamp } })
}

pub fn text_block(text: &str) -> Value {
    json!({ "type": "text", "text": text })
}

pub fn thinking_block(thinking: &str) -> Value {
    json!({ "type": "thinking", "thinking": thinking })
}

pub fn tool_use_block(name: &str) -> Value {
    json!({ "type": "tool_use", "id": format!("toolu_{name}"), "name": name, "input": {} })
}

pub fn tool_result_block(tool_use_id: &str, output: &str) -> Value {
    json!({ "type": "tool_result", "tool_use_id": tool_use_id, "content": output })
}

pub fn image_block(media_type: &str, data: &str) -> Value {
    json!({
        "type": "image",
        "source": { "type": "base64", "media_type": media_type, "data": data },
    })
}

/// Serialize records as JSONL, one per line.
pub fn jsonl(records: &[Value]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

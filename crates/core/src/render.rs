//! Self-contained HTML (and JSON) export of a normalized transcript.

use std::fmt::Write as _;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use serde::Serialize;

use crate::meta::{format_time, SessionMeta};
use crate::tools::tool_display_name;
use crate::trace::{Message, Role};

const CHAT_TEMPLATE: &str = include_str!("templates/chat.html");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageCounts {
    pub user: usize,
    pub assistant: usize,
}

pub fn count_messages(messages: &[Message]) -> MessageCounts {
    let mut counts = MessageCounts::default();
    for msg in messages {
        match msg.role() {
            Role::User => counts.user += 1,
            Role::Assistant => counts.assistant += 1,
            Role::ToolGroup => {}
        }
    }
    counts
}

/// Render the transcript as one HTML page with inline styles and images.
pub fn render_html(messages: &[Message], meta: &SessionMeta, project: &str) -> String {
    let counts = count_messages(messages);

    let mut header = String::new();
    let _ = write!(
        header,
        "<header>\n<h1>{}</h1>\n<div class=\"meta\">",
        html_escape(&meta.title)
    );
    for item in [project, meta.date_range.as_str(), meta.model.as_str()] {
        if !item.is_empty() {
            let _ = write!(header, "<span>{}</span>", html_escape(item));
        }
    }
    let _ = write!(
        header,
        "<span>{} user / {} assistant messages</span></div>\n</header>",
        counts.user, counts.assistant
    );

    let mut body = String::new();
    for msg in messages {
        render_message(&mut body, msg);
    }

    let title = html_escape(&meta.title);
    fill_template(
        CHAT_TEMPLATE,
        &[
            ("title", title.as_str()),
            ("header", header.as_str()),
            ("messages", body.as_str()),
        ],
    )
}

fn render_message(out: &mut String, msg: &Message) {
    match msg {
        Message::ToolGroup(group) => {
            let label = html_escape(&group.label());
            if group.tool_names.len() > 1 {
                let _ = write!(
                    out,
                    "<details class=\"tool-group\"><summary>{label}</summary><ul>"
                );
                for name in &group.tool_names {
                    let _ = write!(out, "<li>{}</li>", html_escape(&tool_display_name(name)));
                }
                out.push_str("</ul></details>\n");
            } else {
                let _ = writeln!(out, "<div class=\"tool-group\">{label}</div>");
            }
        }
        Message::User(_) | Message::Assistant(_) => {
            let role = msg.role();
            let _ = write!(
                out,
                "<section class=\"message {role}\">\n<div><span class=\"role\">{role}</span>"
            );
            let time = msg.timestamp().map(format_time).unwrap_or_default();
            if !time.is_empty() {
                let _ = write!(out, "<span class=\"time\">{}</span>", html_escape(&time));
            }
            out.push_str("</div>\n");
            for text in msg.texts() {
                let _ = writeln!(out, "<div class=\"text\">{}</div>", render_markdown(text));
            }
            if !msg.images().is_empty() {
                out.push_str("<div class=\"images\">");
                for image in msg.images() {
                    let _ = write!(
                        out,
                        "<img src=\"{}\" alt=\"attached image\">",
                        html_escape(&image.data_uri())
                    );
                }
                out.push_str("</div>\n");
            }
            out.push_str("</section>\n");
        }
    }
}

#[derive(Serialize)]
struct JsonExport<'a> {
    meta: &'a SessionMeta,
    project: &'a str,
    counts: MessageCounts,
    messages: &'a [Message],
}

/// Pretty-printed `{meta, project, counts, messages}` document.
pub fn render_json(
    messages: &[Message],
    meta: &SessionMeta,
    project: &str,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonExport {
        meta,
        project,
        counts: count_messages(messages),
        messages,
    })
}

/// Render message markdown to HTML.
///
/// Raw HTML in the source comes out as escaped text, and `javascript:`
/// link targets are dropped.
pub fn render_markdown(text: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut out, events);
    out.truncate(out.trim_end().len());
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().get(..11).unwrap_or_default();
    if scheme.eq_ignore_ascii_case("javascript:") {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Escape the five HTML-significant characters.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Substitute `{{key}}` placeholders in one pass; inserted values are not rescanned.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

//! Session metadata and the display rules used to derive it.

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

pub const UNTITLED_SESSION: &str = "Untitled Session";
pub const DEFAULT_MODEL_LABEL: &str = "Claude";

/// Substring → display label, checked in order.
pub const MODEL_FAMILIES: &[(&str, &str)] = &[
    ("opus", "Claude Opus"),
    ("sonnet", "Claude Sonnet"),
    ("haiku", "Claude Haiku"),
];

const DATE_FORMAT: &str = "%b %d, %Y";
const TIME_FORMAT: &str = "%b %d, %-I:%M %p";

/// Header information shown above a rendered transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub title: String,
    /// `"Jan 02, 2024"`, `"Jan 02, 2024 - Jan 05, 2024"` or empty.
    pub date_range: String,
    pub model: String,
}

/// Values collected from a transcript before display rules apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSessionMeta {
    pub title: Option<String>,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
    pub model: Option<String>,
}

impl SessionMeta {
    pub fn from_raw(raw: &RawSessionMeta) -> Self {
        let title = raw
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(UNTITLED_SESSION)
            .to_string();

        Self {
            title,
            date_range: date_range(
                raw.first_timestamp.as_deref(),
                raw.last_timestamp.as_deref(),
            ),
            model: display_model(raw.model.as_deref()),
        }
    }
}

impl Default for SessionMeta {
    fn default() -> Self {
        Self::from_raw(&RawSessionMeta::default())
    }
}

/// Bucket a raw model id like `claude-sonnet-4-5` into a family label.
pub fn display_model(model: Option<&str>) -> String {
    let model = model
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_MODEL_LABEL);
    MODEL_FAMILIES
        .iter()
        .find(|(needle, _)| model.contains(needle))
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| model.to_string())
}

/// Parse a transcript timestamp. Only the first `Z` is rewritten to `+00:00`.
///
/// Strict RFC 3339: an upper-case `T` separator, no lower-case designators
/// and no leap second.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<FixedOffset>> {
    let cleaned = ts.replacen('Z', "+00:00", 1);
    if cleaned.as_bytes().get(10) != Some(&b'T')
        || cleaned.bytes().any(|b| b.is_ascii_lowercase())
    {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(&cleaned)
        .or_else(|_| DateTime::parse_from_str(&cleaned, "%Y-%m-%dT%H:%M:%S%.f%:z"))
        .ok()?;
    // chrono folds second 60 into the nanosecond field.
    (parsed.nanosecond() < 1_000_000_000).then_some(parsed)
}

/// `"Jan 02, 2024"`, or empty when the timestamp does not parse.
pub fn format_date(ts: &str) -> String {
    parse_timestamp(ts)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// `"Jan 02, 3:04 PM"`, or empty when the timestamp does not parse.
pub fn format_time(ts: &str) -> String {
    parse_timestamp(ts)
        .map(|dt| dt.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn date_range(first: Option<&str>, last: Option<&str>) -> String {
    let start = first.map(format_date).unwrap_or_default();
    let end = last.map(format_date).unwrap_or_default();
    if !start.is_empty() && !end.is_empty() && start != end {
        format!("{start} - {end}")
    } else {
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_model_buckets() {
        assert_eq!(display_model(Some("claude-opus-4-6")), "Claude Opus");
        assert_eq!(display_model(Some("claude-sonnet-4-5-20250929")), "Claude Sonnet");
        assert_eq!(display_model(Some("claude-3-5-haiku")), "Claude Haiku");
        assert_eq!(display_model(Some("<synthetic>")), "<synthetic>");
        assert_eq!(display_model(None), "Claude");
        assert_eq!(display_model(Some("")), "Claude");
    }

    #[test]
    fn test_display_model_is_case_sensitive() {
        assert_eq!(display_model(Some("Claude-Sonnet")), "Claude-Sonnet");
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-01-01T10:00:00Z"), "Jan 01, 2024");
        assert_eq!(format_date("2026-02-06T04:46:17.839Z"), "Feb 06, 2026");
        assert_eq!(format_date("2024-03-09T23:30:00+09:00"), "Mar 09, 2024");
        assert_eq!(format_date("yesterday"), "");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_non_rfc3339_forms_are_rejected() {
        assert_eq!(format_date("2024-01-01 10:00:00Z"), "");
        assert_eq!(format_date("2024-01-01t10:00:00Z"), "");
        assert_eq!(format_date("2024-01-01T10:00:00z"), "");
        assert_eq!(format_date("2024-12-31T23:59:60Z"), "");
        assert_eq!(format_time("2024-06-30T23:59:60.5+00:00"), "");
        assert!(parse_timestamp("2024-12-31T23:59:59.999999999Z").is_some());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("2024-01-01T15:04:00Z"), "Jan 01, 3:04 PM");
        assert_eq!(format_time("2024-01-01T09:30:00.123Z"), "Jan 01, 9:30 AM");
        assert_eq!(format_time("not a time"), "");
    }

    #[test]
    fn test_same_day_collapses_to_single_date() {
        let range = date_range(Some("2024-01-01T10:00:00Z"), Some("2024-01-01T15:00:00Z"));
        assert_eq!(range, "Jan 01, 2024");
    }

    #[test]
    fn test_multi_day_range() {
        let range = date_range(Some("2024-01-01T10:00:00Z"), Some("2024-01-03T08:00:00Z"));
        assert_eq!(range, "Jan 01, 2024 - Jan 03, 2024");
    }

    #[test]
    fn test_unparseable_start_gives_empty_range() {
        assert_eq!(date_range(Some("garbage"), Some("2024-01-03T08:00:00Z")), "");
        assert_eq!(date_range(None, None), "");
    }

    #[test]
    fn test_unparseable_end_keeps_start() {
        assert_eq!(date_range(Some("2024-01-01T10:00:00Z"), Some("garbage")), "Jan 01, 2024");
    }

    #[test]
    fn test_from_raw_defaults() {
        let meta = SessionMeta::default();
        assert_eq!(meta.title, "Untitled Session");
        assert_eq!(meta.date_range, "");
        assert_eq!(meta.model, "Claude");
    }

    #[test]
    fn test_from_raw_empty_title_falls_back() {
        let meta = SessionMeta::from_raw(&RawSessionMeta {
            title: Some(String::new()),
            model: Some("claude-opus-4-6".to_string()),
            ..Default::default()
        });
        assert_eq!(meta.title, "Untitled Session");
        assert_eq!(meta.model, "Claude Opus");
    }
}

use super::record::{Record, RecordKind};
use shiplog_core::meta::RawSessionMeta;
use shiplog_core::SessionMeta;

/// Single pass over the records collecting title, time span and model.
///
/// The last `custom-title` record sets the title, even when it carries no
/// value. Timestamps are taken by position: the first one seen starts the
/// span and the last one seen ends it.
pub fn collect_raw_meta(records: &[Record]) -> RawSessionMeta {
    let mut raw = RawSessionMeta::default();

    for record in records {
        match &record.kind {
            RecordKind::CustomTitle { custom_title } => {
                raw.title = Some(custom_title.clone().unwrap_or_default());
            }
            RecordKind::Assistant(_) if raw.model.is_none() => {
                raw.model = record.message().and_then(|msg| msg.model.clone());
            }
            _ => {}
        }

        if let Some(ts) = record.effective_timestamp() {
            if raw.first_timestamp.is_none() {
                raw.first_timestamp = Some(ts.to_string());
            }
            raw.last_timestamp = Some(ts.to_string());
        }
    }

    raw
}

pub fn extract_meta(records: &[Record]) -> SessionMeta {
    SessionMeta::from_raw(&collect_raw_meta(records))
}

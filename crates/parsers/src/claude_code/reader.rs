use super::record::Record;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Read};
use std::path::Path;

/// Longest accepted line. Pasted screenshots make single records large.
pub const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line} exceeds the {limit}-byte line limit")]
    LineTooLong { line: usize, limit: usize },
}

/// Streams records out of a JSONL source.
///
/// Blank lines and lines that are not JSON objects are skipped. Only I/O
/// failures and over-long lines surface as errors, after which the reader
/// is exhausted.
pub struct RecordReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    limit: usize,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_line_limit(reader, MAX_LINE_BYTES)
    }

    pub fn with_line_limit(reader: R, limit: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
            limit,
            done: false,
        }
    }

    fn fail(&mut self, err: ReadError) -> Option<Result<Record, ReadError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            let cap = self.limit as u64 + 1;
            let result = (&mut self.reader).take(cap).read_until(b'\n', &mut self.buf);
            let read = match result {
                Ok(read) => read,
                Err(e) => return self.fail(e.into()),
            };
            if read == 0 {
                self.done = true;
                break;
            }
            self.line += 1;

            if self.buf.last() == Some(&b'\n') {
                self.buf.pop();
            }
            if self.buf.len() > self.limit {
                let err = ReadError::LineTooLong {
                    line: self.line,
                    limit: self.limit,
                };
                return self.fail(err);
            }

            let bytes = self.buf.trim_ascii();
            if bytes.is_empty() {
                continue;
            }
            // Invalid UTF-8 becomes U+FFFD rather than costing the whole record.
            let text = String::from_utf8_lossy(bytes);
            match serde_json::from_str::<Record>(&text) {
                Ok(record) => return Some(Ok(record)),
                Err(e) => {
                    tracing::debug!(line = self.line, "Skipping unparseable JSONL line: {}", e);
                }
            }
        }
        None
    }
}

/// Read every record from a JSONL source.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, ReadError> {
    RecordReader::new(reader).collect()
}

pub fn read_records_from_path(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open JSONL file: {}", path.display()))?;
    read_records(io::BufReader::new(file))
        .with_context(|| format!("Failed to read JSONL file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claude_code::record::{RawContent, RecordKind};
    use std::io::Cursor;

    #[test]
    fn skips_blank_and_malformed_lines() {
        let input = concat!(
            "{\"type\":\"user\",\"message\":{\"content\":\"hi\"}}\n",
            "\n",
            "not json at all\n",
            "{\"type\":\"assistant\",\"message\":{\"content\":[]}\n",
            "[1, 2]\n",
            "   {\"type\":\"custom-title\",\"customTitle\":\"T\"}   \r\n",
        );
        let records = read_records(Cursor::new(input)).unwrap();
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0].kind, RecordKind::User(_)));
        assert!(matches!(records[1].kind, RecordKind::CustomTitle { .. }));
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let records = read_records(Cursor::new("{\"type\":\"x\"}")).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn over_long_line_is_an_error() {
        let input = format!("{{\"type\":\"x\"}}\n{{\"pad\":\"{}\"}}\n", "a".repeat(64));
        let mut reader = RecordReader::with_line_limit(Cursor::new(input), 32);

        assert!(reader.next().unwrap().is_ok());
        match reader.next() {
            Some(Err(ReadError::LineTooLong { line, limit })) => {
                assert_eq!(line, 2);
                assert_eq!(limit, 32);
            }
            other => panic!("expected LineTooLong, got {other:?}"),
        }
        assert!(reader.next().is_none());
    }

    #[test]
    fn line_exactly_at_limit_is_accepted() {
        let line = "{\"type\":\"x\"}";
        let input = format!("{line}\n{line}");
        let records: Vec<_> = RecordReader::with_line_limit(Cursor::new(input), line.len())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_dropped() {
        let mut input = b"{\"type\":\"user\",\"message\":{\"content\":\"caf\xe9 is broken\"}}\n".to_vec();
        input.extend_from_slice(b"{\"type\":\"user\",\"message\":{\"content\":\"fine\"}}\n");
        let records = read_records(Cursor::new(input)).unwrap();
        assert_eq!(records.len(), 2);
        match records[0].message().map(|m| &m.content) {
            Some(RawContent::Text(text)) => assert_eq!(text, "caf\u{FFFD} is broken"),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_has_path_in_error() {
        let err = read_records_from_path(Path::new("/nonexistent/shiplog/session.jsonl"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/shiplog/session.jsonl"));
    }
}

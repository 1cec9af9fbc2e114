pub mod claude_code;
pub mod discover;

pub use claude_code::{build_messages, extract_meta, parse_transcript, Transcript};
pub use discover::{find_sessions, project_dirs_for_cwd, scan_session_file};

//! JSONL transcript writer for answer events.
//!
//! Every [`ConversationEvent`] becomes one JSON line carrying `type`,
//! `timestamp` and a per-process `seq` next to the payload fields. The file
//! is opened in append mode so transcripts from several runs accumulate.

use kelly_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Appends one JSON object per line. Thread-safe; flushes after each event.
pub struct JsonlConversationLogger {
    state: Mutex<WriterState>,
    path: PathBuf,
}

struct WriterState {
    writer: BufWriter<File>,
    seq: u64,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path`, creating parent
    /// directories as needed. Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                return None;
            }
        };

        debug!("Writing answer transcript to {}", path.display());
        Some(Self {
            state: Mutex::new(WriterState {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent, seq: u64) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert(
            "timestamp".to_string(),
            Value::from(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        map.insert("seq".to_string(), Value::from(seq));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.seq += 1;
        let record = Self::record(event, state.seq);

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        if writeln!(state.writer, "{}", line)
            .and_then(|_| state.writer.flush())
            .is_err()
        {
            warn!("Failed to append to transcript {}", self.path.display());
        }
    }
}

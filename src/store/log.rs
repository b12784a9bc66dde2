//! File-backed event store using an append-only JSON Lines log.
//!
//! One JSON object per line. This format is crash-tolerant because:
//! - Complete lines are always valid JSON
//! - A partial line (from a crash mid-write) is detected and truncated
//!   on the next open
//!
//! Every insert is followed by fsync, so an acknowledged event survives a
//! power loss. The store tracks the length of the last complete record; if
//! a write error leaves a partial line behind, the next insert cuts the
//! file back to that length before appending, so a failed write can never
//! corrupt a later acknowledged one. The full log is loaded into memory on
//! open; queries are served from the in-memory index.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::types::{Event, StoredEvent};

use super::{EventStore, Result, page_newest_first};

/// A crash-tolerant file-backed [`EventStore`].
pub struct FileStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    /// The log file, opened for append.
    file: File,
    /// All records, in insertion order.
    records: Vec<StoredEvent>,
    /// Next sequence number to assign.
    next_seq: u64,
    /// File length up to the end of the last complete record. Anything
    /// beyond this is debris from a failed write.
    valid_len: u64,
}

impl FileStore {
    /// Opens an existing log file or creates a new one.
    ///
    /// Existing records are loaded into memory. If the final line does not
    /// parse as valid JSON (crash mid-write), the file is truncated at the
    /// start of that line before the log is reopened for append.
    pub fn open(path: impl AsRef<Path>) -> Result<FileStore> {
        let path = path.as_ref().to_path_buf();

        let (records, valid_len) = load_records(&path)?;
        let next_seq = records
            .last()
            .and_then(|r| r.id.parse::<u64>().ok())
            .map_or(0, |n| n + 1);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(FileStore {
            path,
            inner: Mutex::new(Inner {
                file,
                records,
                next_seq,
                valid_len,
            }),
        })
    }

    /// Returns the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another request panicked; the index is
        // rebuilt from the file on the next open regardless.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventStore for FileStore {
    fn insert(&self, event: &Event) -> Result<StoredEvent> {
        let mut inner = self.lock();

        // An earlier failed write may have left a partial line behind; cut
        // the file back to the last complete record before appending, the
        // same way open() truncates after a crash.
        let file_len = inner.file.metadata()?.len();
        if file_len != inner.valid_len {
            warn!(
                path = %self.path.display(),
                file_len,
                valid_len = inner.valid_len,
                "discarding partial line from earlier failed write"
            );
            inner.file.set_len(inner.valid_len)?;
            inner.file.sync_all()?;
        }

        let stored = StoredEvent {
            id: inner.next_seq.to_string(),
            event: event.clone(),
        };

        // Serialize to JSON and write with newline, then fsync so the
        // acknowledgement implies durability
        let json = serde_json::to_string(&stored)?;
        writeln!(inner.file, "{}", json)?;
        inner.file.sync_all()?;

        inner.valid_len += json.len() as u64 + 1;
        inner.next_seq += 1;
        inner.records.push(stored.clone());
        Ok(stored)
    }

    fn count(&self) -> Result<u64> {
        Ok(self.lock().records.len() as u64)
    }

    fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<StoredEvent>> {
        Ok(page_newest_first(&self.lock().records, skip, limit))
    }
}

/// Loads all records from a log file, truncating a trailing partial line.
///
/// Returns the records together with the byte length of the valid prefix.
/// Returns an empty vector if the file does not exist.
fn load_records(path: &Path) -> Result<(Vec<StoredEvent>, u64)> {
    if !path.exists() {
        return Ok((vec![], 0));
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut valid_len: u64 = 0;
    let mut truncate = false;

    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            valid_len += bytes_read as u64;
            continue;
        }

        match serde_json::from_str::<StoredEvent>(trimmed) {
            Ok(record) => {
                records.push(record);
                valid_len += bytes_read as u64;
            }
            Err(_) => {
                // Partial line from a crash; truncate at its start and stop
                truncate = true;
                break;
            }
        }
    }

    if truncate {
        warn!(
            path = %path.display(),
            valid_len,
            "truncating partial trailing line in event log"
        );
        let file = OpenOptions::new().write(true).open(path)?;
        file.set_len(valid_len)?;
        file.sync_all()?;
    }

    Ok((records, valid_len))
}

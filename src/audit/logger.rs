//! Append-only audit log file

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::{TrackerError, TrackerResult};

use super::entry::AuditEntry;

/// JSON-lines file next to the data directory
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one entry as a single line
    pub fn append(&self, entry: &AuditEntry) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TrackerError::Io(format!("Failed to open audit log: {}", e)))?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// The last `count` entries, oldest first.
    ///
    /// Lines that do not parse are skipped with a warning.
    pub fn tail(&self, count: usize) -> TrackerResult<Vec<AuditEntry>> {
        if count == 0 || !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut recent = VecDeque::with_capacity(count);

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => {
                    if recent.len() == count {
                        recent.pop_front();
                    }
                    recent.push_back(entry);
                }
                Err(err) => warn!(line = number + 1, error = %err, "skipping unreadable audit entry"),
            }
        }

        Ok(recent.into())
    }
}

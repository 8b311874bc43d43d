//! Execution history, one JSON object per line.
//!
//! The file keeps at most [`MAX_HISTORY_ENTRIES`] entries (oldest dropped
//! first) and is private to the user: `0600` inside a `0700` directory.

use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::safety::DangerLevel;

/// Entries retained on disk.
pub const MAX_HISTORY_ENTRIES: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub level: String,
    pub executed: bool,
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub timed_out: bool,
}

impl HistoryEntry {
    pub fn new(command: &str, level: DangerLevel) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.to_string(),
            level: level.to_string(),
            executed: false,
            exit_code: None,
            timed_out: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file and its parent directory if needed.
    ///
    /// Once the log holds [`MAX_HISTORY_ENTRIES`] lines the file is rewritten
    /// with the oldest entries dropped.
    pub fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            DirBuilder::new()
                .recursive(true)
                .mode(0o700)
                .create(parent)
                .map_err(|e| self.io_err(e))?;
        }

        let line = serde_json::to_string(entry)?;
        let mut lines = self.read_lines()?;

        if lines.len() < MAX_HISTORY_ENTRIES {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .mode(0o600)
                .open(&self.path)
                .map_err(|e| self.io_err(e))?;
            return file
                .write_all(format!("{line}\n").as_bytes())
                .map_err(|e| self.io_err(e));
        }

        lines.drain(..=lines.len() - MAX_HISTORY_ENTRIES);
        lines.push(line);
        tracing::debug!("Compacting history at {} to {} entries", self.path.display(), lines.len());
        self.rewrite(&lines)
    }

    /// The most recent `limit` entries (capped at [`MAX_HISTORY_ENTRIES`]), oldest first.
    ///
    /// A missing file is an empty history. Malformed lines are skipped.
    pub fn load(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.entries()?;
        let keep = limit.min(MAX_HISTORY_ENTRIES);
        if entries.len() > keep {
            entries.drain(..entries.len() - keep);
        }
        Ok(entries)
    }

    /// Entries whose command contains `query`, ignoring case. Oldest first.
    pub fn search(&self, query: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let needle = query.to_lowercase();
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.command.to_lowercase().contains(&needle))
            .collect())
    }

    /// Delete every entry. Clearing a log that does not exist is a no-op.
    pub fn clear(&self) -> Result<(), HistoryError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self
            .read_lines()?
            .iter()
            .enumerate()
            .filter_map(|(n, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed history line {} in {}: {}",
                        n + 1,
                        self.path.display(),
                        e
                    );
                    None
                }
            })
            .collect();
        Ok(entries)
    }

    /// Non-blank lines of the log; empty if the file does not exist.
    fn read_lines(&self) -> Result<Vec<String>, HistoryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(self.io_err(e)),
        }
    }

    /// Replace the log with `lines` via a temp file and rename.
    fn rewrite(&self, lines: &[String]) -> Result<(), HistoryError> {
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let written = (|| {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .mode(0o600)
                .open(&tmp_path)?;
            for line in lines {
                file.write_all(line.as_bytes())?;
                file.write_all(b"\n")?;
            }
            file.sync_all()?;
            std::fs::rename(&tmp_path, &self.path)
        })();

        written.map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            self.io_err(e)
        })
    }

    fn io_err(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

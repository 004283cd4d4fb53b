//! Purpose: Flat-file quiz-history storage behind the `HistoryStore` seam.
//! Exports: `HistoryStore`, `FileHistoryStore`, `HistoryRecord`, `QuizResult`.
//! Role: Append/scan text store; one pipe-delimited line per recorded result.
//! Invariants: Lines are `username|time|topic|difficulty|correct|total|score`.
//! Invariants: Appends hold an exclusive advisory lock; listings are newest-first.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write as _};
use std::path::PathBuf;

use fs2::FileExt;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::error::{Error, ErrorKind};

/// One quiz outcome to be recorded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuizResult {
    pub topic: String,
    pub difficulty: String,
    pub correct: u32,
    pub total: u32,
    pub score_percent: u32,
}

/// One stored history line; `time` is RFC3339 UTC.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub username: String,
    pub time: String,
    pub topic: String,
    pub difficulty: String,
    pub correct: u32,
    pub total: u32,
    #[serde(rename = "scorePercent")]
    pub score_percent: u32,
}

pub trait HistoryStore {
    fn record(&self, username: &str, result: &QuizResult) -> Result<(), Error>;

    fn list(&self, username: &str) -> Result<Vec<HistoryRecord>, Error>;
}

pub struct FileHistoryStore {
    history_path: PathBuf,
}

impl FileHistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let history_path = path.into();
        if let Some(parent) = history_path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to create history store directory")
                    .with_path(parent)
                    .with_source(err)
            })?;
        }
        Ok(Self { history_path })
    }

    fn append_line(&self, line: &str) -> Result<(), Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.history_path)
            .map_err(|err| self.io_error("failed to open history store", err))?;
        let _lock = AppendLock::acquire(&file, self)?;
        let mut entry = String::with_capacity(line.len() + 1);
        entry.push_str(line);
        entry.push('\n');
        let mut writer = &file;
        writer
            .write_all(entry.as_bytes())
            .map_err(|err| self.io_error("failed to append history record", err))
    }

    fn io_error(&self, message: &str, err: io::Error) -> Error {
        Error::new(ErrorKind::Io)
            .with_message(message)
            .with_path(&self.history_path)
            .with_source(err)
    }
}

impl HistoryStore for FileHistoryStore {
    fn record(&self, username: &str, result: &QuizResult) -> Result<(), Error> {
        let username = username.trim();
        // History is a convenience; unusable records are dropped, not errors.
        if username.is_empty() || result.total == 0 {
            return Ok(());
        }
        let time = OffsetDateTime::now_utc().format(&Rfc3339).map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("timestamp format failed")
                .with_source(err)
        })?;
        let line = [
            escape(username),
            time,
            escape(&result.topic),
            escape(&result.difficulty),
            result.correct.to_string(),
            result.total.to_string(),
            result.score_percent.to_string(),
        ]
        .join("|");
        self.append_line(&line)
    }

    fn list(&self, username: &str) -> Result<Vec<HistoryRecord>, Error> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(Vec::new());
        }
        let contents = match fs::read_to_string(&self.history_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error("failed to read history store", err)),
        };
        let mut records: Vec<HistoryRecord> = contents
            .lines()
            .filter_map(parse_line)
            .filter(|record| record.username == username)
            .collect();
        records.sort_by(|a, b| b.time.cmp(&a.time));
        Ok(records)
    }
}

struct AppendLock<'a> {
    file: &'a File,
}

impl<'a> AppendLock<'a> {
    fn acquire(file: &'a File, store: &FileHistoryStore) -> Result<Self, Error> {
        file.lock_exclusive()
            .map_err(|err| store.io_error("failed to lock history store", err))?;
        Ok(Self { file })
    }
}

impl<'a> Drop for AppendLock<'a> {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn parse_line(line: &str) -> Option<HistoryRecord> {
    if line.trim().is_empty() {
        return None;
    }
    let parts: Vec<&str> = line.splitn(7, '|').collect();
    if parts.len() < 7 {
        return None;
    }
    Some(HistoryRecord {
        username: unescape(parts[0]),
        time: parts[1].to_string(),
        topic: unescape(parts[2]),
        difficulty: unescape(parts[3]),
        correct: parts[4].parse().ok()?,
        total: parts[5].parse().ok()?,
        score_percent: parts[6].parse().ok()?,
    })
}

fn escape(value: &str) -> String {
    value.trim().replace('|', "%7C")
}

fn unescape(value: &str) -> String {
    value.replace("%7C", "|")
}

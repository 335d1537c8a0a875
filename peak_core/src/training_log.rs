//! Training log for actual performance against the plan.
//!
//! Entries are appended to a JSONL (JSON Lines) file with file locking.
//! A later entry for the same (week, day, exercise, set) supersedes earlier
//! ones, so editing a session is just appending again.

use crate::formulas::round_to_increment;
use crate::profile::SessionId;
use crate::{DayPlan, ExerciseKind, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Identifies one logged set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogKey {
    pub week: u8,
    pub day: u8,
    pub exercise_index: u8,
    pub set_number: u32,
}

/// One performed (or pending) set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainingLogEntry {
    pub id: Uuid,
    pub week: u8,
    pub day: u8,
    /// Position of the prescription within the day
    pub exercise_index: u8,
    pub exercise: ExerciseKind,
    /// 1-based
    pub set_number: u32,
    /// Prescribed weight rounded to a loadable increment
    pub planned_weight: f64,
    pub planned_reps: u32,
    pub actual_weight: Option<f64>,
    pub actual_reps: Option<u32>,
    pub memo: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl TrainingLogEntry {
    pub fn key(&self) -> LogKey {
        LogKey {
            week: self.week,
            day: self.day,
            exercise_index: self.exercise_index,
            set_number: self.set_number,
        }
    }
}

/// Build editable log entries for a planned day
///
/// One entry per prescribed set, with the actual weight and reps defaulted
/// to the plan.
pub fn prefill_day(week: u8, plan: &DayPlan, increment: f64) -> Vec<TrainingLogEntry> {
    let now = Utc::now();
    let day = plan.day;
    plan.prescriptions
        .iter()
        .enumerate()
        .flat_map(move |(idx, p)| {
            let planned_weight = round_to_increment(p.weight, increment);
            (1..=p.sets).map(move |set_number| TrainingLogEntry {
                id: Uuid::new_v4(),
                week,
                day,
                exercise_index: idx as u8,
                exercise: p.exercise,
                set_number,
                planned_weight,
                planned_reps: p.reps,
                actual_weight: Some(planned_weight),
                actual_reps: Some(p.reps),
                memo: None,
                logged_at: now,
            })
        })
        .collect()
}

/// Sink for persisting log entries
pub trait LogSink {
    fn append(&mut self, entry: &TrainingLogEntry) -> Result<()>;

    fn append_all(&mut self, entries: &[TrainingLogEntry]) -> Result<()> {
        for entry in entries {
            self.append(entry)?;
        }
        Ok(())
    }
}

/// JSONL-based log sink with file locking
pub struct JsonlLogSink {
    path: PathBuf,
}

impl JsonlLogSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl LogSink for JsonlLogSink {
    fn append(&mut self, entry: &TrainingLogEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!(
            "Logged week {} day {} exercise {} set {}",
            entry.week,
            entry.day,
            entry.exercise_index,
            entry.set_number
        );
        Ok(())
    }
}

/// Read all entries from a log file
///
/// Malformed lines are skipped with a warning.
pub fn read_entries(path: &Path) -> Result<Vec<TrainingLogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<TrainingLogEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse log entry at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} log entries", entries.len());
    Ok(entries)
}

/// Collapse entries so the last write for each set wins
pub fn latest_entries(entries: Vec<TrainingLogEntry>) -> BTreeMap<LogKey, TrainingLogEntry> {
    let mut latest = BTreeMap::new();
    for entry in entries {
        latest.insert(entry.key(), entry);
    }
    latest
}

/// Current entries for one session, ordered by exercise then set
pub fn entries_for_day(path: &Path, session: SessionId) -> Result<Vec<TrainingLogEntry>> {
    let entries = read_entries(path)?
        .into_iter()
        .filter(|e| e.week == session.week && e.day == session.day)
        .collect();

    Ok(latest_entries(entries).into_values().collect())
}

//! Lifter profile: the three input maxes and program progress.
//!
//! The profile is persisted as JSON with file locking and atomic replacement.
//! The plan itself is never stored; it is regenerated from the maxes.

use crate::schedule::{DAYS_PER_WEEK, PROGRAM_WEEKS};
use crate::{Error, ExerciseKind, Result, WeekPlan};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Validated one-rep maxes in kg
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainingMaxes {
    pub bench: f64,
    pub paused_bench: f64,
    pub legs_up: f64,
}

impl TrainingMaxes {
    /// Check and bundle the three maxes
    ///
    /// Every value must be finite and strictly positive.
    pub fn new(bench: f64, paused_bench: f64, legs_up: f64) -> Result<Self> {
        let maxes = Self {
            bench,
            paused_bench,
            legs_up,
        };
        for kind in ExerciseKind::ALL {
            let value = maxes.get(kind);
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidMax {
                    lift: kind.label(),
                    value,
                });
            }
        }
        Ok(maxes)
    }

    /// Max for a given variation
    pub fn get(&self, kind: ExerciseKind) -> f64 {
        match kind {
            ExerciseKind::Bench => self.bench,
            ExerciseKind::PausedBench => self.paused_bench,
            ExerciseKind::LegsUpBench => self.legs_up,
        }
    }
}

/// Position within the program
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionId {
    pub week: u8,
    pub day: u8,
}

impl SessionId {
    pub const FIRST: SessionId = SessionId { week: 1, day: 1 };
    pub const LAST: SessionId = SessionId {
        week: PROGRAM_WEEKS,
        day: DAYS_PER_WEEK,
    };

    /// Checked constructor for user-supplied coordinates
    pub fn new(week: u8, day: u8) -> Result<Self> {
        if (1..=PROGRAM_WEEKS).contains(&week) && (1..=DAYS_PER_WEEK).contains(&day) {
            Ok(Self { week, day })
        } else {
            Err(Error::NoSuchSession { week, day })
        }
    }

    /// The following session, staying on the final one once reached
    pub fn next(&self) -> SessionId {
        if *self >= Self::LAST {
            return Self::LAST;
        }
        if self.day < DAYS_PER_WEEK {
            SessionId {
                week: self.week,
                day: self.day + 1,
            }
        } else {
            SessionId {
                week: self.week + 1,
                day: 1,
            }
        }
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Persistent lifter state
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Profile {
    /// None until the program has been started
    pub maxes: Option<TrainingMaxes>,
    #[serde(default)]
    pub current: SessionId,
    #[serde(default)]
    pub completed_sessions: BTreeSet<SessionId>,
}

impl Profile {
    /// Whether maxes have been entered
    pub fn program_started(&self) -> bool {
        self.maxes.is_some()
    }

    /// Begin the program from week 1 with fresh maxes
    pub fn start_program(&mut self, maxes: TrainingMaxes) {
        self.maxes = Some(maxes);
        self.current = SessionId::FIRST;
        self.completed_sessions.clear();
        tracing::info!(
            "Started program with maxes {}/{}/{}",
            maxes.bench,
            maxes.paused_bench,
            maxes.legs_up
        );
    }

    /// Replace the maxes, keeping progress
    pub fn update_maxes(&mut self, maxes: TrainingMaxes) {
        self.maxes = Some(maxes);
        tracing::info!(
            "Updated maxes to {}/{}/{}",
            maxes.bench,
            maxes.paused_bench,
            maxes.legs_up
        );
    }

    /// Mark a session done and move the cursor past it
    pub fn complete_session(&mut self, session: SessionId) {
        self.completed_sessions.insert(session);
        if session >= self.current {
            self.current = session.next();
        }
        tracing::debug!(
            "Completed week {} day {}; next is week {} day {}",
            session.week,
            session.day,
            self.current.week,
            self.current.day
        );
    }

    pub fn is_completed(&self, session: SessionId) -> bool {
        self.completed_sessions.contains(&session)
    }

    /// Regenerate the plan from the stored maxes
    pub fn program(&self) -> Result<Vec<WeekPlan>> {
        self.maxes
            .map(|m| m.generate())
            .ok_or(Error::ProgramNotStarted)
    }

    /// Load the profile from a file with shared locking
    ///
    /// Returns the default profile if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns the default profile.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No profile file found, using default profile");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open profile {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock profile {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read profile {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<Profile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", path);
                Ok(profile)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse profile {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save the profile with exclusive locking
    ///
    /// Writes to a temp file in the same directory, syncs it, then renames
    /// it over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", path);
        Ok(())
    }

    /// Load, modify and save back in one step
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut Profile) -> Result<()>,
    {
        let mut profile = Self::load(path)?;
        f(&mut profile)?;
        profile.save(path)?;
        Ok(profile)
    }
}

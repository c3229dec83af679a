use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::models::intersection::{CrashReason, PassAttemptResult};
use crate::models::vehicle::CarDesc;

/// One row of the journal: a single pass attempt and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    pub timestamp: u64,
    pub car_id: u64,
    pub car_number: String,
    pub driver: String,
    pub is_success: bool,
    pub crash_reason: Option<CrashReason>,
}

impl PassRecord {
    pub fn new(car: &CarDesc, result: &PassAttemptResult) -> Self {
        Self {
            timestamp: current_timestamp(),
            car_id: car.car_id.0,
            car_number: car.car_number.clone(),
            driver: car.driver_name_surname.clone(),
            is_success: result.is_success,
            crash_reason: result.crash_reason,
        }
    }
}

pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Append-only CSV log of pass attempts.
#[derive(Debug)]
pub struct TrafficJournal {
    path: PathBuf,
    // serializes appends from concurrent handlers
    write_lock: Mutex<()>,
}

impl TrafficJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Append a record. Failures are logged, never returned: the journal must
    /// not change what the caller sees.
    pub fn record(&self, car: &CarDesc, result: &PassAttemptResult) {
        let record = PassRecord::new(car, result);
        if let Err(e) = self.append(&record) {
            log::warn!("Error writing pass record to {}: {}", self.path.display(), e);
        }
    }

    pub fn append(&self, record: &PassRecord) -> Result<(), JournalError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        log_to_csv(&self.path, record)
    }
}

/// Generic helper to log a record to a CSV file, writing headers only once.
fn log_to_csv<T: Serialize>(path: &Path, record: &T) -> Result<(), JournalError> {
    let file_exists = path.exists();
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);
    wtr.serialize(record)?;
    wtr.flush()?;
    Ok(())
}

/// Counts of pass outcomes found in a journal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JournalSummary {
    pub passed: usize,
    pub ran_red_light: usize,
    pub hit_car_in_front: usize,
}

impl JournalSummary {
    pub fn crashed(&self) -> usize {
        self.ran_red_light + self.hit_car_in_front
    }

    pub fn total(&self) -> usize {
        self.passed + self.crashed()
    }

    fn add(&mut self, record: &PassRecord) {
        match (record.is_success, record.crash_reason) {
            (true, _) => self.passed += 1,
            (false, Some(CrashReason::HitCarInFront)) => self.hit_car_in_front += 1,
            // a failed attempt without a reason is counted as a red light run
            (false, _) => self.ran_red_light += 1,
        }
    }
}

impl fmt::Display for JournalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pass attempts:      {}", self.total())?;
        writeln!(f, "  passed:           {}", self.passed)?;
        writeln!(f, "  ran a red light:  {}", self.ran_red_light)?;
        write!(f, "  hit car in front: {}", self.hit_car_in_front)
    }
}

/// Read a journal written by [`TrafficJournal`] and count its outcomes.
pub fn summarize_journal(path: &Path) -> Result<JournalSummary, JournalError> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut summary = JournalSummary::default();
    for row in rdr.deserialize::<PassRecord>() {
        summary.add(&row?);
    }
    Ok(summary)
}

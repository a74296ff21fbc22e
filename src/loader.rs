//! Chunked, idempotent employee loading
//!
//! Records are buffered up to the batch size and each full buffer is written
//! as one multi-row insert with one commit. Existing identity keys are
//! skipped by the store, so re-running a load changes nothing. A crash loses
//! at most the chunk in flight.

use crate::error::{Error, Result};
use crate::model::Employee;
use crate::store::EmployeeStore;
use std::slice;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_BATCH_SIZE: usize = 10_000;
pub const MAX_BATCH_SIZE: usize = 1_000_000;

/// Running totals passed to the progress callback after every chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub attempted: u64,
    pub inserted: u64,
    pub batches: u64,
    /// Known when the input reports an exact length.
    pub expected_total: Option<u64>,
}

impl LoadProgress {
    pub fn percent(&self) -> Option<f64> {
        self.expected_total
            .filter(|total| *total > 0)
            .map(|total| self.attempted as f64 / total as f64 * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub attempted: u64,
    pub inserted: u64,
    pub batches: u64,
    pub elapsed: Duration,
}

impl LoadReport {
    /// Rows dropped because their identity key already existed.
    pub fn skipped(&self) -> u64 {
        self.attempted - self.inserted
    }

    pub fn rows_per_sec(&self) -> f64 {
        self.attempted as f64 / self.elapsed.as_secs_f64().max(0.000001)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BatchLoader {
    batch_size: usize,
}

impl BatchLoader {
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::Config("batch size must be at least 1".to_string()));
        }
        if batch_size > MAX_BATCH_SIZE {
            return Err(Error::Config(format!(
                "batch size cannot exceed {}",
                MAX_BATCH_SIZE
            )));
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Stream `records` into `store` chunk by chunk.
    ///
    /// Every record is validated as it is buffered; an invalid one aborts the
    /// load before its chunk is written. Chunks committed earlier stay.
    pub async fn load<S, I, F>(&self, store: &mut S, records: I, mut on_progress: F) -> Result<LoadReport>
    where
        S: EmployeeStore + ?Sized,
        I: IntoIterator<Item = Employee>,
        F: FnMut(&LoadProgress),
    {
        let records = records.into_iter();
        let (lower, upper) = records.size_hint();
        let mut progress = LoadProgress {
            expected_total: upper.filter(|u| *u == lower).map(|n| n as u64),
            ..LoadProgress::default()
        };

        let start = Instant::now();
        let mut batch = Vec::with_capacity(self.batch_size.min(lower.max(1)));
        for (index, record) in records.enumerate() {
            if let Err(reason) = record.validate() {
                return Err(Error::InvalidRecord {
                    index: index as u64,
                    reason,
                });
            }
            batch.push(record);
            if batch.len() >= self.batch_size {
                self.flush(store, &mut batch, &mut progress).await?;
                on_progress(&progress);
            }
        }
        if !batch.is_empty() {
            self.flush(store, &mut batch, &mut progress).await?;
            on_progress(&progress);
        }

        let report = LoadReport {
            attempted: progress.attempted,
            inserted: progress.inserted,
            batches: progress.batches,
            elapsed: start.elapsed(),
        };
        info!(
            attempted = report.attempted,
            inserted = report.inserted,
            skipped = report.skipped(),
            batches = report.batches,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Load completed"
        );
        Ok(report)
    }

    async fn flush<S>(&self, store: &mut S, batch: &mut Vec<Employee>, progress: &mut LoadProgress) -> Result<()>
    where
        S: EmployeeStore + ?Sized,
    {
        let inserted = store.insert_batch(batch).await?;
        progress.attempted += batch.len() as u64;
        progress.inserted += inserted;
        progress.batches += 1;
        batch.clear();

        info!(
            batch = progress.batches,
            attempted = progress.attempted,
            inserted = progress.inserted,
            "Chunk committed"
        );
        Ok(())
    }
}

impl Default for BatchLoader {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Insert one employee. Returns `false` when the identity key already existed.
pub async fn save_employee<S>(store: &mut S, employee: &Employee) -> Result<bool>
where
    S: EmployeeStore + ?Sized,
{
    employee
        .validate()
        .map_err(|reason| Error::InvalidRecord { index: 0, reason })?;
    let inserted = store.insert_batch(slice::from_ref(employee)).await?;
    debug!(employee = %employee, inserted = inserted > 0, "Saved employee");
    Ok(inserted > 0)
}

//! JSON-file record store for merged sensor records.
//!
//! The whole history lives in one file holding a JSON array of records in
//! ascending timestamp order. Every cycle is a full read-modify-write:
//! load everything, append the new batch, re-sort, rewrite the file. That
//! bounds the practical dataset size, which is fine for one sensor pair
//! reporting a few times a minute.
//!
//! The store is strictly additive and never deduplicates: two readings
//! that floor to the same minute across overlapping fetch windows both
//! persist, and series consumers may see duplicate timestamps.

use anyhow::Context;
use log::info;
use luft_sensor::record::MergedRecord;
use std::path::Path;

/// The persisted, chronologically sorted record history.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MergedRecord>,
}

impl RecordStore {
    /// Load the store from a record file.
    ///
    /// A missing file is the normal first-run state and yields an empty
    /// store; any other I/O or decode failure is an error and surfaces to
    /// the operator.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No record file at {}; starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read record file {}", path.display()))
            }
        };
        let records: Vec<MergedRecord> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to decode record file {}", path.display()))?;
        Ok(RecordStore { records })
    }

    /// Append a batch of records and re-sort the full collection.
    ///
    /// The sort is stable and keyed on timestamp only, so ties keep their
    /// relative insertion order.
    pub fn append(&mut self, new_records: Vec<MergedRecord>) {
        self.records.extend(new_records);
        self.records.sort_by_key(|record| record.timestamp);
    }

    /// Rewrite the record file with the current collection.
    pub fn persist(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .context("Failed to encode records as JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write record file {}", path.display()))?;
        info!("Persisted {} records to {}", self.records.len(), path.display());
        Ok(())
    }

    /// The records in ascending timestamp order.
    pub fn records(&self) -> &[MergedRecord] {
        &self.records
    }

    /// The most recent record, used for the latest-reading summary.
    pub fn latest(&self) -> Option<&MergedRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

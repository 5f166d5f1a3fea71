//! In-memory record sink.
//!
//! Stores records in RAM keyed by id, in first-write order.
//! Useful for tests and short-lived hosts that don't need persistence.

use indexmap::IndexMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chainbundle_core::error::SinkError;
use chainbundle_core::record::{Record, RecordId, RecordKind};
use chainbundle_core::sink::RecordSink;

/// In-memory sink.
///
/// All data is lost when the process exits.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<IndexMap<RecordId, Record>>,
    writes: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, IndexMap<RecordId, Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.records().get(id).cloned()
    }

    /// All stored records of one kind, in first-write order.
    pub fn records_by_kind(&self, kind: RecordKind) -> Vec<Record> {
        self.records()
            .values()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect()
    }

    /// All stored records, in first-write order.
    pub fn all(&self) -> Vec<Record> {
        self.records().values().cloned().collect()
    }

    /// Number of distinct records stored.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Number of `upsert` calls received, including overwrites.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl RecordSink for MemorySink {
    fn upsert(&self, record: Record) -> Result<(), SinkError> {
        let mut records = self.records.lock().map_err(|_| SinkError::Poisoned)?;
        records.insert(record.id().clone(), record);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

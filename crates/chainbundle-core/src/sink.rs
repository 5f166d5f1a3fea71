//! The `RecordSink` trait: where finished records go.
//!
//! The sink is owned by the host. ChainBundle only requires a single keyed
//! upsert; ordering and visibility across concurrent writers are the sink's
//! business.

use crate::error::SinkError;
use crate::record::Record;

/// Persistence boundary for projected records.
///
/// `upsert` must be idempotent: writing the same record (same id, same
/// fields) twice leaves the store unchanged after the first write.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; they manage their own interior
/// locking.
pub trait RecordSink: Send + Sync {
    /// Insert or replace the record stored under `record.id()`.
    fn upsert(&self, record: Record) -> Result<(), SinkError>;

    /// Flush buffered writes, if the sink buffers.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &S {
    fn upsert(&self, record: Record) -> Result<(), SinkError> {
        (**self).upsert(record)
    }

    fn flush(&self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for std::sync::Arc<S> {
    fn upsert(&self, record: Record) -> Result<(), SinkError> {
        (**self).upsert(record)
    }

    fn flush(&self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn upsert(&self, record: Record) -> Result<(), SinkError> {
        (**self).upsert(record)
    }

    fn flush(&self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

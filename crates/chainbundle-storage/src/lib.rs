//! chainbundle-storage: reference `RecordSink` implementations.
//!
//! Backends:
//! - [`memory`]: in-memory, keyed by record id (dev/testing, no persistence)
//! - [`jsonl`]: one JSON object per line to any `Write`
//! - [`sqlite`]: SQLite via `rusqlite` (feature `sqlite`)

pub mod jsonl;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use jsonl::JsonLinesSink;
pub use memory::MemorySink;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;

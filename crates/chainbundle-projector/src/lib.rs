//! # chainbundle-projector
//!
//! Turns one raw bundle blob into normalized, uniquely identified records.
//!
//! ## Pipeline
//! 1. fingerprint the raw bytes (before decoding, so failures have one too)
//! 2. decode the bundle (`chainbundle-pb`)
//! 3. project each entry in source order and hand it to the sink
//!
//! ```ignore
//! use chainbundle_projector::Projector;
//! use chainbundle_storage::MemorySink;
//!
//! let sink = MemorySink::new();
//! let summary = Projector::default().project(&bytes, &sink)?;
//! println!("{} transfers, {} approvals", summary.transfers, summary.approvals);
//! ```

pub mod projection;
pub mod projector;

pub use projection::{project_approval, project_transfer};
pub use projector::{Projection, ProjectionSummary, Projector};

//! # chainbundle-core
//!
//! Core types and primitives shared across all ChainBundle crates.
//! The wire decoder, the projector, and every sink are built on top of the
//! types defined here.

pub mod bundle;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod record;
pub mod sink;

pub use bundle::{BlockTime, Bundle, RawApproveCall, RawTransfer};
pub use config::{AddressFormat, ProjectorConfig};
pub use error::{ConfigError, DecodeError, ProjectError, SinkError};
pub use fingerprint::{DigestAlgorithm, Fingerprint};
pub use record::{ApprovalRecord, Record, RecordId, RecordKind, TransferRecord};
pub use sink::RecordSink;

//! # chainbundle-observability
//!
//! Structured logging for ChainBundle hosts.
//!
//! Every ChainBundle crate logs through `tracing`; this crate installs the
//! subscriber. JSON output is compatible with ELK, Loki and CloudWatch, and
//! levels are configurable per component.

pub mod tracing_setup;

pub use tracing_setup::{build_directives, init_tracing, LogConfig};

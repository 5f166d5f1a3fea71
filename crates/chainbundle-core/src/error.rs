//! Error types for the ChainBundle decode-and-project pipeline.

use thiserror::Error;

use crate::fingerprint::Fingerprint;
use crate::record::RecordId;

/// Errors raised while decoding a raw bundle from its wire bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Wire decode failed: {reason}")]
    Wire { reason: String },

    #[error("Missing required field {message}.{field} at index {index}")]
    MissingField {
        message: &'static str,
        field: &'static str,
        index: usize,
    },

    #[error("Invalid value for {message}.{field} at index {index}: {reason}")]
    InvalidValue {
        message: &'static str,
        field: &'static str,
        index: usize,
        reason: String,
    },
}

/// Errors reported by a [`RecordSink`](crate::sink::RecordSink).
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink lock poisoned")]
    Poisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(String),
}

/// Errors surfaced to the host by a projection call.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The input bytes do not conform to the bundle wire schema.
    /// Raised before any record is written.
    #[error("Malformed input {fingerprint}: {source}")]
    MalformedInput {
        fingerprint: Fingerprint,
        #[source]
        source: DecodeError,
    },

    /// The sink rejected a record. Records written before this one stay written.
    #[error("Sink write failed for {id}: {source}")]
    Sink {
        id: RecordId,
        #[source]
        source: SinkError,
    },
}

impl ProjectError {
    /// Returns `true` if the input itself was rejected.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// Fingerprint of the input this error relates to, when known.
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        match self {
            Self::MalformedInput { fingerprint, .. } => Some(fingerprint),
            Self::Sink { .. } => None,
        }
    }
}

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },
}

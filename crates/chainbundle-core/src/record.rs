//! Projected output records and their identities.
//!
//! A projection produces exactly two kinds of record, modelled as the closed
//! [`Record`] enum. Each carries a [`RecordId`] of the form
//! `{fingerprint}-{kind}-{index}`.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fingerprint::Fingerprint;

/// Which output entity a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Transfer,
    Approval,
}

impl RecordKind {
    /// The segment used inside a record identity.
    pub fn id_segment(&self) -> &'static str {
        match self {
            RecordKind::Transfer => "transfer",
            RecordKind::Approval => "call",
        }
    }

    /// The entity name the host stores this kind under.
    pub fn entity_name(&self) -> &'static str {
        match self {
            RecordKind::Transfer => "TransferEvent",
            RecordKind::Approval => "ApproveCall",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Transfer => write!(f, "transfer"),
            RecordKind::Approval => write!(f, "approval"),
        }
    }
}

/// Deterministic record identity: `{fingerprint}-{kind}-{index}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(fingerprint: &Fingerprint, kind: RecordKind, index: usize) -> Self {
        Self(format!("{}-{}-{}", fingerprint, kind.id_segment(), index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A projected token transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub id: RecordId,
    /// Block number narrowed to 32 bits, see [`crate::normalize::narrow_block_number`]
    pub block_number: i32,
    /// Nanosecond component of the block time
    pub timestamp: i64,
    pub from: String,
    pub to: String,
    #[serde(with = "decimal")]
    pub value: BigUint,
}

/// A projected `approve` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRecord {
    pub id: RecordId,
    pub block_number: i32,
    pub timestamp: i64,
    pub spender: String,
    #[serde(with = "decimal")]
    pub value: BigUint,
}

/// A finished record, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Transfer(TransferRecord),
    Approval(ApprovalRecord),
}

impl Record {
    pub fn id(&self) -> &RecordId {
        match self {
            Record::Transfer(r) => &r.id,
            Record::Approval(r) => &r.id,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Transfer(_) => RecordKind::Transfer,
            Record::Approval(_) => RecordKind::Approval,
        }
    }

    pub fn block_number(&self) -> i32 {
        match self {
            Record::Transfer(r) => r.block_number,
            Record::Approval(r) => r.block_number,
        }
    }

    pub fn as_transfer(&self) -> Option<&TransferRecord> {
        match self {
            Record::Transfer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_approval(&self) -> Option<&ApprovalRecord> {
        match self {
            Record::Approval(r) => Some(r),
            _ => None,
        }
    }
}

impl From<TransferRecord> for Record {
    fn from(r: TransferRecord) -> Self {
        Record::Transfer(r)
    }
}

impl From<ApprovalRecord> for Record {
    fn from(r: ApprovalRecord) -> Self {
        Record::Approval(r)
    }
}

/// Big integers travel as decimal strings so no consumer loses precision.
mod decimal {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<BigUint>().map_err(D::Error::custom)
    }
}

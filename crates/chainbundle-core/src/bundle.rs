//! The decoded bundle: one block's worth of raw transfer events and
//! approve-calls, as they came off the wire.
//!
//! A `Bundle` lives for exactly one projection call. Nothing here is
//! normalized yet: addresses are raw bytes and timestamps still carry both
//! sub-fields.

use num_bigint::BigUint;

/// Block timestamp as carried on the wire: whole seconds plus a nanosecond
/// component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockTime {
    pub seconds: i64,
    pub nanos: i32,
}

impl BlockTime {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}

/// A token-transfer event entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransfer {
    /// Transaction hash, as rendered by the producer
    pub tx_hash: String,
    /// Log index within the block
    pub log_index: u32,
    pub block_number: u64,
    pub block_time: BlockTime,
    /// Sender address bytes
    pub from: Vec<u8>,
    /// Recipient address bytes
    pub to: Vec<u8>,
    pub value: BigUint,
}

/// An `approve(spender, value)` call entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawApproveCall {
    pub tx_hash: String,
    /// Call ordinal within the block
    pub ordinal: u64,
    /// Whether the call succeeded on-chain
    pub success: bool,
    pub block_number: u64,
    pub block_time: BlockTime,
    /// Spender address bytes
    pub spender: Vec<u8>,
    pub value: BigUint,
}

/// One decoded unit of work.
///
/// Each collection is optional: `None` means the producer did not emit it at
/// all, which is distinct from (but projects identically to) an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    pub events: Option<Vec<RawTransfer>>,
    pub calls: Option<Vec<RawApproveCall>>,
}

impl Bundle {
    /// Transfer entries in source order; empty when the collection is absent.
    pub fn transfers(&self) -> &[RawTransfer] {
        self.events.as_deref().unwrap_or_default()
    }

    /// Approve-call entries in source order; empty when the collection is absent.
    pub fn approve_calls(&self) -> &[RawApproveCall] {
        self.calls.as_deref().unwrap_or_default()
    }

    /// Total number of entries across both collections.
    pub fn len(&self) -> usize {
        self.transfers().len() + self.approve_calls().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Per-variant record population.
//!
//! One function per output kind; each is pure and applies the field
//! normalizer to every raw field.

use chainbundle_core::{
    bundle::{RawApproveCall, RawTransfer},
    config::ProjectorConfig,
    fingerprint::Fingerprint,
    normalize::{format_address, narrow_block_number, timestamp_nanos},
    record::{ApprovalRecord, RecordId, RecordKind, TransferRecord},
};

/// Build the transfer record for entry `index` of the events collection.
pub fn project_transfer(
    fingerprint: &Fingerprint,
    index: usize,
    raw: &RawTransfer,
    config: &ProjectorConfig,
) -> TransferRecord {
    TransferRecord {
        id: RecordId::new(fingerprint, RecordKind::Transfer, index),
        block_number: narrow_block_number(raw.block_number),
        timestamp: timestamp_nanos(&raw.block_time),
        from: format_address(&raw.from, config.address_format),
        to: format_address(&raw.to, config.address_format),
        value: raw.value.clone(),
    }
}

/// Build the approval record for entry `index` of the calls collection.
pub fn project_approval(
    fingerprint: &Fingerprint,
    index: usize,
    raw: &RawApproveCall,
    config: &ProjectorConfig,
) -> ApprovalRecord {
    ApprovalRecord {
        id: RecordId::new(fingerprint, RecordKind::Approval, index),
        block_number: narrow_block_number(raw.block_number),
        timestamp: timestamp_nanos(&raw.block_time),
        spender: format_address(&raw.spender, config.address_format),
        value: raw.value.clone(),
    }
}

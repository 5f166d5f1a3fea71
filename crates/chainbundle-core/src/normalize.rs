//! Per-field normalization from raw wire types to record fields.
//!
//! Every function here is pure. None of them fail: the narrowing and
//! truncation behaviours are part of the output contract.

use alloy_primitives::Address;

use crate::bundle::BlockTime;
use crate::config::AddressFormat;

const ADDRESS_LEN: usize = 20;

/// Render raw address bytes as text.
///
/// `Checksum` only applies to 20-byte inputs; anything else falls back to
/// lowercase hex so the rendering never fails.
pub fn format_address(bytes: &[u8], format: AddressFormat) -> String {
    match format {
        AddressFormat::Hex => format!("0x{}", hex::encode(bytes)),
        AddressFormat::Checksum if bytes.len() == ADDRESS_LEN => {
            Address::from_slice(bytes).to_checksum(None)
        }
        AddressFormat::Checksum => format!("0x{}", hex::encode(bytes)),
        AddressFormat::ByteList => bytes
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// The record timestamp is the nanosecond sub-field alone; `seconds` is dropped.
pub fn timestamp_nanos(time: &BlockTime) -> i64 {
    i64::from(time.nanos)
}

/// Narrow a block number to `i32` by keeping its low 32 bits
/// (two's-complement reinterpretation, no saturation).
pub fn narrow_block_number(block_number: u64) -> i32 {
    block_number as u32 as i32
}

/// Whether [`narrow_block_number`] changes the value.
pub fn is_narrowing_lossy(block_number: u64) -> bool {
    block_number > i32::MAX as u64
}

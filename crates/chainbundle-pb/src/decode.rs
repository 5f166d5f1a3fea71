//! Raw bytes → [`Bundle`].
//!
//! Decoding is all-or-nothing: a bundle is either fully valid or rejected,
//! so the projector never sees a partially decoded block.

use chainbundle_core::bundle::{BlockTime, Bundle, RawApproveCall, RawTransfer};
use chainbundle_core::error::DecodeError;
use num_bigint::BigUint;
use prost::Message;

use crate::messages;

/// Decode a bundle from its wire bytes.
///
/// Fails with [`DecodeError`] on truncated or otherwise invalid wire data,
/// on an entry without a block time, and on a value that is not a decimal
/// integer. Unknown fields are skipped.
pub fn decode_bundle(bytes: &[u8]) -> Result<Bundle, DecodeError> {
    let wire = messages::Bundle::decode(bytes).map_err(|e| DecodeError::Wire {
        reason: e.to_string(),
    })?;

    let events = wire
        .events
        .map(|events| {
            events
                .transfers
                .into_iter()
                .enumerate()
                .map(|(index, t)| convert_transfer(index, t))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let calls = wire
        .calls
        .map(|calls| {
            calls
                .approve_calls
                .into_iter()
                .enumerate()
                .map(|(index, c)| convert_approve_call(index, c))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    tracing::trace!(
        transfers = events.as_ref().map_or(0, Vec::len),
        approve_calls = calls.as_ref().map_or(0, Vec::len),
        "decoded bundle"
    );

    Ok(Bundle { events, calls })
}

fn convert_transfer(index: usize, t: messages::TransferEvent) -> Result<RawTransfer, DecodeError> {
    const MESSAGE: &str = "TransferEvent";

    let block_time = t.block_time.ok_or(DecodeError::MissingField {
        message: MESSAGE,
        field: "block_time",
        index,
    })?;
    let value = parse_decimal(&t.value).map_err(|reason| DecodeError::InvalidValue {
        message: MESSAGE,
        field: "value",
        index,
        reason,
    })?;

    Ok(RawTransfer {
        tx_hash: t.tx_hash,
        log_index: t.log_index,
        block_number: t.block_number,
        block_time: BlockTime::new(block_time.seconds, block_time.nanos),
        from: t.from,
        to: t.to,
        value,
    })
}

fn convert_approve_call(
    index: usize,
    c: messages::ApproveCall,
) -> Result<RawApproveCall, DecodeError> {
    const MESSAGE: &str = "ApproveCall";

    let block_time = c.block_time.ok_or(DecodeError::MissingField {
        message: MESSAGE,
        field: "block_time",
        index,
    })?;
    let value = parse_decimal(&c.value).map_err(|reason| DecodeError::InvalidValue {
        message: MESSAGE,
        field: "value",
        index,
        reason,
    })?;

    Ok(RawApproveCall {
        tx_hash: c.tx_hash,
        ordinal: c.ordinal,
        success: c.success,
        block_number: c.block_number,
        block_time: BlockTime::new(block_time.seconds, block_time.nanos),
        spender: c.spender,
        value,
    })
}

/// Parse an unsigned decimal string. The empty string is proto3's default
/// for an unset field and reads as zero.
fn parse_decimal(s: &str) -> Result<BigUint, String> {
    if s.is_empty() {
        return Ok(BigUint::default());
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{s}' is not an unsigned decimal integer"));
    }
    s.parse::<BigUint>().map_err(|e| e.to_string())
}

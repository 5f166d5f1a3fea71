//! # chainbundle-pb
//!
//! Protobuf wire schema for block bundles and the decoder that turns raw
//! bundle bytes into a [`chainbundle_core::Bundle`].
//!
//! ## Wire layout
//! ```text
//! Bundle        { 1: Events (optional), 2: Calls (optional) }
//! Events        { 16: repeated TransferEvent }
//! Calls         { 1: repeated ApproveCall }
//! TransferEvent { 1: tx_hash, 2: log_index, 3: block_time, 4: block_number,
//!                 5: from, 6: to, 7: value }
//! ApproveCall   { 1: tx_hash, 2: block_time, 3: block_number, 4: ordinal,
//!                 5: success, 6: spender, 7: value, 8: approved }
//! ```
//! Fields outside this table are skipped on decode.

pub mod decode;
pub mod messages;
pub mod schema;

pub use decode::decode_bundle;
pub use schema::{inspect_unknown_fields, MessageDescriptor, UnknownField};

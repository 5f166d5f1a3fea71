//! Prost message types for the bundle wire schema.
//!
//! These mirror the producer's `.proto` definitions field-for-field; tags
//! must never be renumbered.

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Bundle {
    #[prost(message, optional, tag = "1")]
    pub events: ::core::option::Option<Events>,
    #[prost(message, optional, tag = "2")]
    pub calls: ::core::option::Option<Calls>,
}

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Events {
    /// Token transfers. Tags 1–15 and 17–19 carry other contract events
    /// that are not projected.
    #[prost(message, repeated, tag = "16")]
    pub transfers: ::prost::alloc::vec::Vec<TransferEvent>,
}

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Calls {
    /// `approve(spender, value)` calls. Tags 2–34 carry other contract calls
    /// that are not projected.
    #[prost(message, repeated, tag = "1")]
    pub approve_calls: ::prost::alloc::vec::Vec<ApproveCall>,
}

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransferEvent {
    #[prost(string, tag = "1")]
    pub tx_hash: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub log_index: u32,
    #[prost(message, optional, tag = "3")]
    pub block_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(uint64, tag = "4")]
    pub block_number: u64,
    #[prost(bytes = "vec", tag = "5")]
    pub from: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub to: ::prost::alloc::vec::Vec<u8>,
    /// Decimal-encoded uint256
    #[prost(string, tag = "7")]
    pub value: ::prost::alloc::string::String,
}

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ApproveCall {
    #[prost(string, tag = "1")]
    pub tx_hash: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub block_time: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(uint64, tag = "3")]
    pub block_number: u64,
    #[prost(uint64, tag = "4")]
    pub ordinal: u64,
    #[prost(bool, tag = "5")]
    pub success: bool,
    #[prost(bytes = "vec", tag = "6")]
    pub spender: ::prost::alloc::vec::Vec<u8>,
    /// Decimal-encoded uint256
    #[prost(string, tag = "7")]
    pub value: ::prost::alloc::string::String,
    /// The call's boolean return value
    #[prost(bool, tag = "8")]
    pub approved: bool,
}

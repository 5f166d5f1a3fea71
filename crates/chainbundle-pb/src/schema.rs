//! Static descriptor table for the bundle wire schema.
//!
//! Maps each message's field tags to a name and a kind. The table is
//! immutable and built at compile time; [`inspect_unknown_fields`] walks raw
//! bytes against it to report fields this build does not understand.

use chainbundle_core::error::DecodeError;
use prost::bytes::Buf;
use prost::encoding::{decode_key, decode_varint, skip_field, DecodeContext, WireType};

/// Scalar or nested-message kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bytes,
    Uint32,
    Uint64,
    Int32,
    Int64,
    Bool,
    Message(&'static MessageDescriptor),
}

impl FieldKind {
    /// Wire type this kind is encoded with.
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldKind::String | FieldKind::Bytes | FieldKind::Message(_) => {
                WireType::LengthDelimited
            }
            FieldKind::Uint32
            | FieldKind::Uint64
            | FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::Bool => WireType::Varint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub tag: u32,
    pub name: &'static str,
    pub kind: FieldKind,
    pub repeated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    pub fn field(&self, tag: u32) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.tag == tag)
    }
}

const fn field(tag: u32, name: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { tag, name, kind, repeated: false }
}

const fn repeated(tag: u32, name: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { tag, name, kind, repeated: true }
}

pub static TIMESTAMP: MessageDescriptor = MessageDescriptor {
    name: "google.protobuf.Timestamp",
    fields: &[
        field(1, "seconds", FieldKind::Int64),
        field(2, "nanos", FieldKind::Int32),
    ],
};

pub static TRANSFER_EVENT: MessageDescriptor = MessageDescriptor {
    name: "TransferEvent",
    fields: &[
        field(1, "tx_hash", FieldKind::String),
        field(2, "log_index", FieldKind::Uint32),
        field(3, "block_time", FieldKind::Message(&TIMESTAMP)),
        field(4, "block_number", FieldKind::Uint64),
        field(5, "from", FieldKind::Bytes),
        field(6, "to", FieldKind::Bytes),
        field(7, "value", FieldKind::String),
    ],
};

pub static APPROVE_CALL: MessageDescriptor = MessageDescriptor {
    name: "ApproveCall",
    fields: &[
        field(1, "tx_hash", FieldKind::String),
        field(2, "block_time", FieldKind::Message(&TIMESTAMP)),
        field(3, "block_number", FieldKind::Uint64),
        field(4, "ordinal", FieldKind::Uint64),
        field(5, "success", FieldKind::Bool),
        field(6, "spender", FieldKind::Bytes),
        field(7, "value", FieldKind::String),
        field(8, "approved", FieldKind::Bool),
    ],
};

pub static EVENTS: MessageDescriptor = MessageDescriptor {
    name: "Events",
    fields: &[repeated(16, "transfers", FieldKind::Message(&TRANSFER_EVENT))],
};

pub static CALLS: MessageDescriptor = MessageDescriptor {
    name: "Calls",
    fields: &[repeated(1, "approve_calls", FieldKind::Message(&APPROVE_CALL))],
};

pub static BUNDLE: MessageDescriptor = MessageDescriptor {
    name: "Bundle",
    fields: &[
        field(1, "events", FieldKind::Message(&EVENTS)),
        field(2, "calls", FieldKind::Message(&CALLS)),
    ],
};

/// A field present on the wire that the descriptor table does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField {
    /// Dotted path of the enclosing message, e.g. `Bundle.events`
    pub path: String,
    pub tag: u32,
    pub wire_type: WireType,
}

/// Walk `bytes` as a [`BUNDLE`] and list every field not in the table.
///
/// Unknown fields are reported once per occurrence, in wire order.
pub fn inspect_unknown_fields(bytes: &[u8]) -> Result<Vec<UnknownField>, DecodeError> {
    let mut unknown = Vec::new();
    walk(bytes, &BUNDLE, BUNDLE.name, &mut unknown)?;
    Ok(unknown)
}

fn walk(
    mut buf: &[u8],
    message: &'static MessageDescriptor,
    path: &str,
    unknown: &mut Vec<UnknownField>,
) -> Result<(), DecodeError> {
    while buf.has_remaining() {
        let (tag, wire_type) = decode_key(&mut buf).map_err(wire)?;
        match message.field(tag) {
            Some(&FieldDescriptor { kind: FieldKind::Message(nested), name, .. })
                if wire_type == WireType::LengthDelimited =>
            {
                let len = decode_varint(&mut buf).map_err(wire)?;
                if len > buf.len() as u64 {
                    return Err(DecodeError::Wire {
                        reason: format!(
                            "{path}.{name}: length {len} exceeds remaining {} bytes",
                            buf.len()
                        ),
                    });
                }
                let (body, rest) = buf.split_at(len as usize);
                walk(body, nested, &format!("{path}.{name}"), unknown)?;
                buf = rest;
            }
            Some(_) => {
                skip_field(wire_type, tag, &mut buf, DecodeContext::default()).map_err(wire)?
            }
            None => {
                unknown.push(UnknownField { path: path.to_string(), tag, wire_type });
                skip_field(wire_type, tag, &mut buf, DecodeContext::default()).map_err(wire)?;
            }
        }
    }
    Ok(())
}

fn wire(e: prost::DecodeError) -> DecodeError {
    DecodeError::Wire { reason: e.to_string() }
}

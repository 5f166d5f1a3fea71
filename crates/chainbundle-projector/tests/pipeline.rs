//! End-to-end projection tests.
//!
//! Each test encodes a bundle with the prost wire types, runs it through the
//! projector into an in-memory sink, and checks the stored records.

use chainbundle_core::{
    config::{AddressFormat, ProjectorConfig},
    error::{DecodeError, ProjectError},
    fingerprint::Fingerprint,
    record::{Record, RecordKind},
};
use chainbundle_pb::messages;
use chainbundle_projector::Projector;
use chainbundle_storage::MemorySink;
use num_bigint::BigUint;
use prost::Message;
use prost_types::Timestamp;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

// ─── Helpers ──────────────────────────────────────────────────────────────────

const USDC: [u8; 20] = [
    0xa0, 0xb8, 0x69, 0x91, 0xc6, 0x21, 0x8b, 0x36, 0xc1, 0xd1, 0x9d, 0x4a, 0x2e, 0x9e, 0xb0, 0xce,
    0x36, 0x06, 0xeb, 0x48,
];

fn transfer(block_number: u64, value: &str) -> messages::TransferEvent {
    messages::TransferEvent {
        tx_hash: format!("0x{block_number:064x}"),
        log_index: 0,
        block_time: Some(Timestamp { seconds: 1_700_000_000, nanos: 500 }),
        block_number,
        from: vec![0x11; 20],
        to: USDC.to_vec(),
        value: value.to_string(),
    }
}

fn approve(block_number: u64, value: &str) -> messages::ApproveCall {
    messages::ApproveCall {
        tx_hash: format!("0x{block_number:064x}"),
        block_time: Some(Timestamp { seconds: 1_700_000_000, nanos: 7 }),
        block_number,
        ordinal: 12,
        success: true,
        spender: USDC.to_vec(),
        value: value.to_string(),
        approved: true,
    }
}

fn encode(
    transfers: Option<Vec<messages::TransferEvent>>,
    approvals: Option<Vec<messages::ApproveCall>>,
) -> Vec<u8> {
    messages::Bundle {
        events: transfers.map(|transfers| messages::Events { transfers }),
        calls: approvals.map(|approve_calls| messages::Calls { approve_calls }),
    }
    .encode_to_vec()
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Project `input` with `config` and return the projected block numbers plus
/// everything logged at warn level or above.
fn project_with_logs(config: ProjectorConfig, input: &[u8]) -> (Vec<i32>, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let projection = tracing::subscriber::with_default(subscriber, || {
        Projector::new(config).project_records(input).unwrap()
    });
    let blocks = projection.records.iter().map(Record::block_number).collect();
    (blocks, logs.text())
}

// ─── Identity ─────────────────────────────────────────────────────────────────

#[test]
fn n_transfers_yield_n_records_in_source_order() {
    let input = encode(
        Some((0..5).map(|i| transfer(19_000_000 + i, &i.to_string())).collect()),
        None,
    );
    let sink = MemorySink::new();
    let summary = Projector::default().project(&input, &sink).unwrap();

    let fp = Fingerprint::keccak256(&input);
    assert_eq!(summary.fingerprint, fp);
    assert_eq!(summary.transfers, 5);
    assert_eq!(summary.approvals, 0);

    let stored = sink.records_by_kind(RecordKind::Transfer);
    let ids: Vec<String> = stored.iter().map(|r| r.id().to_string()).collect();
    let expected: Vec<String> = (0..5).map(|i| format!("{fp}-transfer-{i}")).collect();
    assert_eq!(ids, expected);

    for (i, record) in stored.iter().enumerate() {
        let t = record.as_transfer().unwrap();
        assert_eq!(t.value, BigUint::from(i as u64));
        assert_eq!(t.block_number, 19_000_000 + i as i32);
    }
}

#[test]
fn approvals_use_call_segment() {
    let input = encode(None, Some(vec![approve(1, "10"), approve(2, "20")]));
    let projection = Projector::default().project_records(&input).unwrap();

    let fp = projection.fingerprint.clone();
    let ids: Vec<&str> = projection.records.iter().map(|r| r.id().as_str()).collect();
    assert_eq!(ids, vec![format!("{fp}-call-0"), format!("{fp}-call-1")]);
    assert!(projection.of_kind(RecordKind::Transfer).next().is_none());
}

#[test]
fn identities_are_unique_across_kinds() {
    let input = encode(Some(vec![transfer(1, "1")]), Some(vec![approve(1, "1")]));
    let sink = MemorySink::new();
    let summary = Projector::default().project(&input, &sink).unwrap();
    assert_eq!(summary.total(), 2);
    assert_eq!(sink.len(), 2);
}

// ─── Absent / empty collections ──────────────────────────────────────────────

#[test]
fn absent_calls_produce_no_approvals() {
    let input = encode(Some(vec![transfer(1, "1")]), None);
    let sink = MemorySink::new();
    let summary = Projector::default().project(&input, &sink).unwrap();
    assert_eq!(summary.approvals, 0);
    assert!(sink.records_by_kind(RecordKind::Approval).is_empty());
}

#[test]
fn empty_calls_produce_no_approvals() {
    let input = encode(Some(vec![transfer(1, "1")]), Some(vec![]));
    let sink = MemorySink::new();
    let summary = Projector::default().project(&input, &sink).unwrap();
    assert_eq!(summary.approvals, 0);
    assert_eq!(summary.transfers, 1);
}

#[test]
fn bundle_with_nothing_is_not_an_error() {
    let input = encode(None, None);
    let sink = MemorySink::new();
    let summary = Projector::default().project(&input, &sink).unwrap();
    assert_eq!(summary.total(), 0);
    assert!(sink.is_empty());
}

// ─── Idempotence ─────────────────────────────────────────────────────────────

#[test]
fn projecting_twice_is_idempotent() {
    let input = encode(
        Some(vec![transfer(1, "1"), transfer(2, "2")]),
        Some(vec![approve(3, "3")]),
    );
    let projector = Projector::default();

    let first = projector.project_records(&input).unwrap();
    let second = projector.project_records(&input).unwrap();
    assert_eq!(first, second);

    let sink = MemorySink::new();
    projector.project(&input, &sink).unwrap();
    projector.project(&input, &sink).unwrap();
    assert_eq!(sink.len(), 3);
    assert_eq!(sink.write_count(), 6);
    assert_eq!(sink.all(), first.records);
}

#[test]
fn different_bytes_get_different_namespaces() {
    let a = encode(Some(vec![transfer(1, "1")]), None);
    let b = encode(Some(vec![transfer(1, "2")]), None);
    let projector = Projector::default();
    let ra = projector.project_records(&a).unwrap();
    let rb = projector.project_records(&b).unwrap();
    assert_ne!(ra.fingerprint, rb.fingerprint);
    assert_ne!(ra.records[0].id(), rb.records[0].id());
}

// ─── Field normalization ─────────────────────────────────────────────────────

#[test]
fn timestamp_uses_only_nanos() {
    let mut t = transfer(1, "1");
    t.block_time = Some(Timestamp { seconds: 100, nanos: 42 });
    let projection = Projector::default()
        .project_records(&encode(Some(vec![t]), None))
        .unwrap();
    assert_eq!(projection.records[0].as_transfer().unwrap().timestamp, 42);
}

#[test]
fn block_number_at_i32_boundary_wraps() {
    let input = encode(
        Some(vec![transfer(2_147_483_648, "1")]),
        Some(vec![approve(4_294_967_297, "1")]),
    );
    let projection = Projector::default().project_records(&input).unwrap();
    assert_eq!(projection.records[0].block_number(), -2_147_483_648);
    assert_eq!(projection.records[1].block_number(), 1);
}

#[test]
fn lossy_narrowing_is_logged_by_default() {
    let input = encode(Some(vec![transfer(2_147_483_648, "1"), transfer(7, "1")]), None);
    let (blocks, logs) = project_with_logs(ProjectorConfig::default(), &input);

    assert_eq!(blocks, vec![i32::MIN, 7]);
    assert!(logs.contains("block number exceeds i32 range"), "{logs}");
    assert!(logs.contains("narrowed=-2147483648"), "{logs}");
    assert_eq!(logs.matches("block number exceeds i32 range").count(), 1);
}

#[test]
fn narrowing_warning_can_be_disabled() {
    let input = encode(Some(vec![transfer(2_147_483_648, "1")]), None);
    let config = ProjectorConfig {
        warn_on_block_narrowing: false,
        ..ProjectorConfig::default()
    };
    let (blocks, logs) = project_with_logs(config, &input);

    assert_eq!(blocks, vec![i32::MIN]);
    assert!(!logs.contains("block number exceeds i32 range"), "{logs}");
}

#[test]
fn value_keeps_full_precision() {
    let huge = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
    let projection = Projector::default()
        .project_records(&encode(Some(vec![transfer(1, huge)]), None))
        .unwrap();
    assert_eq!(projection.records[0].as_transfer().unwrap().value.to_string(), huge);
}

#[test]
fn addresses_follow_configured_format() {
    let input = encode(Some(vec![transfer(1, "1")]), Some(vec![approve(1, "1")]));

    let default = Projector::default().project_records(&input).unwrap();
    let t = default.records[0].as_transfer().unwrap();
    assert_eq!(t.from, vec!["17"; 20].join(","));
    assert!(t.to.starts_with("160,184,105,145,"));
    let a = default.records[1].as_approval().unwrap();
    assert_eq!(
        a.spender,
        "160,184,105,145,198,33,139,54,193,209,157,74,46,158,176,206,54,6,235,72"
    );

    let hex = Projector::new(ProjectorConfig {
        address_format: AddressFormat::Hex,
        ..ProjectorConfig::default()
    })
    .project_records(&input)
    .unwrap();
    let t = hex.records[0].as_transfer().unwrap();
    assert_eq!(t.from, format!("0x{}", "11".repeat(20)));
    assert_eq!(t.to, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");

    let checksum = Projector::new(ProjectorConfig {
        address_format: AddressFormat::Checksum,
        ..ProjectorConfig::default()
    })
    .project_records(&input)
    .unwrap();
    let a = checksum.records[1].as_approval().unwrap();
    assert_eq!(a.spender, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
}

#[test]
fn short_spender_defaults_to_decimal_bytes() {
    let mut call = approve(1, "1");
    call.spender = vec![160, 184, 105];
    call.block_time = Some(Timestamp { seconds: 100, nanos: 42 });
    let projection = Projector::default()
        .project_records(&encode(None, Some(vec![call])))
        .unwrap();
    let a = projection.records[0].as_approval().unwrap();
    assert_eq!(a.spender, "160,184,105");
    assert_eq!(a.timestamp, 42);
}

// ─── Malformed input ─────────────────────────────────────────────────────────

#[test]
fn truncated_input_fails_without_writes() {
    let input = encode(Some(vec![transfer(1, "1"), transfer(2, "2")]), None);
    let truncated = &input[..input.len() - 1];
    let sink = MemorySink::new();

    let err = Projector::default().project(truncated, &sink).unwrap_err();

    assert!(err.is_malformed());
    assert_eq!(err.fingerprint(), Some(&Fingerprint::keccak256(truncated)));
    assert!(sink.is_empty());
    assert_eq!(sink.write_count(), 0);
}

#[test]
fn missing_block_time_fails_whole_bundle() {
    let mut bad = transfer(2, "2");
    bad.block_time = None;
    let input = encode(Some(vec![transfer(1, "1"), bad]), None);
    let sink = MemorySink::new();

    let err = Projector::default().project(&input, &sink).unwrap_err();

    assert!(matches!(
        err,
        ProjectError::MalformedInput {
            source: DecodeError::MissingField { field: "block_time", index: 1, .. },
            ..
        }
    ));
    assert!(sink.is_empty());
}

#[test]
fn unknown_fields_do_not_change_records() {
    let input = encode(Some(vec![transfer(1, "1")]), None);
    let mut extended = input.clone();
    extended.extend_from_slice(&[0x48, 0x96, 0x01]); // field 9, varint 150

    let projector = Projector::default();
    let base = projector.project_records(&input).unwrap();
    let ext = projector.project_records(&extended).unwrap();

    assert_ne!(base.fingerprint, ext.fingerprint);
    match (&base.records[0], &ext.records[0]) {
        (Record::Transfer(a), Record::Transfer(b)) => {
            assert_eq!(a.value, b.value);
            assert_eq!(a.from, b.from);
            assert_eq!(a.block_number, b.block_number);
        }
        other => panic!("expected transfers, got {other:?}"),
    }
}

//! `chainbundle inspect` — decode a blob and report what is inside.

use anyhow::{Context, Result};
use chainbundle_core::config::ProjectorConfig;
use chainbundle_core::fingerprint::Fingerprint;
use chainbundle_pb::{decode_bundle, inspect_unknown_fields};

pub fn run(bytes: &[u8], config: &ProjectorConfig, as_json: bool) -> Result<()> {
    let fingerprint = Fingerprint::compute(bytes, config.digest);
    let bundle = decode_bundle(bytes)
        .with_context(|| format!("decode bundle {fingerprint}"))?;
    let unknown = inspect_unknown_fields(bytes)
        .with_context(|| format!("scan unknown fields of {fingerprint}"))?;

    if as_json {
        let report = serde_json::json!({
            "fingerprint": fingerprint,
            "digest": config.digest.to_string(),
            "bytes": bytes.len(),
            "events_present": bundle.events.is_some(),
            "calls_present": bundle.calls.is_some(),
            "transfers": bundle.transfers().len(),
            "approve_calls": bundle.approve_calls().len(),
            "unknown_fields": unknown.iter().map(|f| {
                serde_json::json!({
                    "path": f.path,
                    "tag": f.tag,
                    "wire_type": format!("{:?}", f.wire_type),
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Fingerprint:   {} ({})", fingerprint, config.digest);
    println!("Size:          {} bytes", bytes.len());
    println!(
        "Transfers:     {}{}",
        bundle.transfers().len(),
        if bundle.events.is_none() { " (events absent)" } else { "" }
    );
    println!(
        "Approve calls: {}{}",
        bundle.approve_calls().len(),
        if bundle.calls.is_none() { " (calls absent)" } else { "" }
    );
    if unknown.is_empty() {
        println!("Unknown fields: none");
    } else {
        println!("Unknown fields (skipped on decode):");
        for field in &unknown {
            println!("  {:30} tag={:<4} wire={:?}", field.path, field.tag, field.wire_type);
        }
    }
    Ok(())
}

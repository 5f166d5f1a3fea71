//! `chainbundle project` — project a blob into a record sink.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use chainbundle_core::config::ProjectorConfig;
use chainbundle_core::record::RecordKind;
use chainbundle_core::sink::RecordSink;
use chainbundle_projector::{ProjectionSummary, Projector};
use chainbundle_storage::{JsonLinesSink, SqliteSink};

use crate::SinkKind;

pub fn run(
    bytes: &[u8],
    config: ProjectorConfig,
    sink: SinkKind,
    db: Option<&Path>,
) -> Result<()> {
    let projector = Projector::new(config);

    let summary = match sink {
        SinkKind::Jsonl => {
            let sink = JsonLinesSink::stdout();
            let summary = project_into(&projector, bytes, &sink)?;
            sink.flush().context("flush stdout")?;
            summary
        }
        SinkKind::Sqlite => {
            let path = db.ok_or_else(|| anyhow!("--sink sqlite requires --db <path>"))?;
            let sink = SqliteSink::open(path)
                .with_context(|| format!("open sqlite database '{}'", path.display()))?;
            let summary = project_into(&projector, bytes, &sink)?;
            eprintln!(
                "Database now holds {} {} and {} {} records",
                sink.count(RecordKind::Transfer)?,
                RecordKind::Transfer.entity_name(),
                sink.count(RecordKind::Approval)?,
                RecordKind::Approval.entity_name(),
            );
            summary
        }
    };

    eprintln!(
        "Projected {}: {} transfers, {} approvals",
        summary.fingerprint, summary.transfers, summary.approvals
    );
    Ok(())
}

fn project_into<S: RecordSink>(
    projector: &Projector,
    bytes: &[u8],
    sink: &S,
) -> Result<ProjectionSummary> {
    let summary = projector.project(bytes, sink)?;
    tracing::info!(
        fingerprint = %summary.fingerprint,
        records = summary.total(),
        "projection complete"
    );
    Ok(summary)
}

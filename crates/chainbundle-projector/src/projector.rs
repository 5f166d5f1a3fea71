//! `Projector`: fingerprint, decode, project, write.

use chainbundle_core::{
    bundle::Bundle,
    config::ProjectorConfig,
    error::ProjectError,
    fingerprint::Fingerprint,
    normalize::{is_narrowing_lossy, narrow_block_number},
    record::{Record, RecordKind},
    sink::RecordSink,
};
use chainbundle_pb::decode_bundle;

use crate::projection::{project_approval, project_transfer};

/// Counts of records written by one [`Projector::project`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionSummary {
    pub fingerprint: Fingerprint,
    pub transfers: usize,
    pub approvals: usize,
}

impl ProjectionSummary {
    pub fn total(&self) -> usize {
        self.transfers + self.approvals
    }
}

/// All records of one bundle, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub fingerprint: Fingerprint,
    pub records: Vec<Record>,
}

impl Projection {
    pub fn of_kind(&self, kind: RecordKind) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter().filter(move |r| r.kind() == kind)
    }
}

/// Stateless bundle projector. Cheap to clone; one instance can serve any
/// number of sequential invocations.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Fingerprint of the raw input under the configured digest.
    pub fn fingerprint(&self, input: &[u8]) -> Fingerprint {
        Fingerprint::compute(input, self.config.digest)
    }

    /// Project `input` into `sink`.
    ///
    /// Transfers are written first, then approvals, each in source order.
    /// Malformed input fails before any write. A sink failure stops the loop;
    /// records already written are not retracted.
    pub fn project<S: RecordSink + ?Sized>(
        &self,
        input: &[u8],
        sink: &S,
    ) -> Result<ProjectionSummary, ProjectError> {
        let fingerprint = self.fingerprint(input);
        let bundle = self.decode(input, &fingerprint)?;

        let mut summary = ProjectionSummary {
            fingerprint: fingerprint.clone(),
            transfers: 0,
            approvals: 0,
        };

        for record in self.project_bundle(&bundle, &fingerprint) {
            let kind = record.kind();
            let id = record.id().clone();
            tracing::trace!(%id, "upsert");
            sink.upsert(record)
                .map_err(|source| ProjectError::Sink { id, source })?;
            match kind {
                RecordKind::Transfer => summary.transfers += 1,
                RecordKind::Approval => summary.approvals += 1,
            }
        }

        tracing::debug!(
            fingerprint = %summary.fingerprint,
            transfers = summary.transfers,
            approvals = summary.approvals,
            "projected bundle"
        );
        Ok(summary)
    }

    /// Project `input` without a sink, collecting the records in write order.
    pub fn project_records(&self, input: &[u8]) -> Result<Projection, ProjectError> {
        let fingerprint = self.fingerprint(input);
        let bundle = self.decode(input, &fingerprint)?;
        let records = self.project_bundle(&bundle, &fingerprint).collect();
        Ok(Projection { fingerprint, records })
    }

    /// Lazily project an already decoded bundle.
    pub fn project_bundle<'a>(
        &'a self,
        bundle: &'a Bundle,
        fingerprint: &'a Fingerprint,
    ) -> impl Iterator<Item = Record> + 'a {
        let transfers = bundle.transfers().iter().enumerate().map(move |(i, raw)| {
            self.check_block_number(RecordKind::Transfer, i, raw.block_number);
            Record::from(project_transfer(fingerprint, i, raw, &self.config))
        });
        let approvals = bundle.approve_calls().iter().enumerate().map(move |(i, raw)| {
            self.check_block_number(RecordKind::Approval, i, raw.block_number);
            Record::from(project_approval(fingerprint, i, raw, &self.config))
        });
        transfers.chain(approvals)
    }

    fn decode(&self, input: &[u8], fingerprint: &Fingerprint) -> Result<Bundle, ProjectError> {
        decode_bundle(input).map_err(|source| {
            tracing::warn!(%fingerprint, error = %source, "malformed bundle");
            ProjectError::MalformedInput {
                fingerprint: fingerprint.clone(),
                source,
            }
        })
    }

    fn check_block_number(&self, kind: RecordKind, index: usize, block_number: u64) {
        if self.config.warn_on_block_narrowing && is_narrowing_lossy(block_number) {
            tracing::warn!(
                %kind,
                index,
                block_number,
                narrowed = narrow_block_number(block_number),
                "block number exceeds i32 range; narrowing to low 32 bits"
            );
        }
    }
}

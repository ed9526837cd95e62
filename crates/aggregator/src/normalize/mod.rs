//! Aggregate normalization.
//!
//! Consumes a [`JobAggregate`] and routes every source payload to that
//! source's normalizer, producing the per-job [`JobResult`] handed to the
//! analyzer and the boundary layer.

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{
    JobAggregate, JobResult, LookupJob, RawPayload, SourceId, SourceSummary, UnifiedOffer,
};
use crate::source::{efind, getchips, promelec};

/// Offers and summary for one payload.
fn normalize_payload(payload: &RawPayload, job: &LookupJob) -> (Vec<UnifiedOffer>, Option<SourceSummary>) {
    match payload {
        RawPayload::Getchips(raw) => (getchips::normalize(raw, job), getchips::summarize(raw)),
        RawPayload::Efind(raw) => (efind::normalize(raw, job), efind::summarize(raw)),
        RawPayload::Promelec(raw) => (promelec::normalize(raw, job), promelec::summarize(raw)),
    }
}

/// Turn one aggregate into its result record.
///
/// Offers are grouped by source in [`SourceId`] order. A source that failed
/// contributes its error string and nothing else.
pub fn normalize(aggregate: JobAggregate) -> JobResult {
    let JobAggregate {
        job,
        outcomes,
        timestamp,
    } = aggregate;

    let mut succeeded = Vec::new();
    let mut summaries = BTreeMap::new();
    let mut offers = Vec::new();
    let mut errors = BTreeMap::new();
    let mut raw = BTreeMap::new();

    for (source_id, outcome) in outcomes {
        if let Some(error) = outcome.error {
            errors.insert(source_id, error.to_string());
            continue;
        }
        succeeded.push(source_id);

        let Some(payload) = outcome.raw_payload else {
            continue;
        };

        if payload.source_id() != source_id {
            warn!(
                "Source '{}' returned a '{}' payload for '{}', ignoring it",
                source_id,
                payload.source_id(),
                job.part_number
            );
            continue;
        }

        let (source_offers, summary) = normalize_payload(&payload, &job);
        offers.extend(source_offers);
        if let Some(summary) = summary {
            summaries.insert(source_id, summary);
        }
        raw.insert(source_id, payload);
    }

    JobResult {
        part_number: job.part_number,
        requested_qty: job.requested_quantity,
        row_index: job.row_index,
        succeeded,
        summaries,
        offers,
        errors,
        raw,
        timestamp,
    }
}

/// Offers of a single source within a result.
pub fn offers_from(result: &JobResult, source_id: SourceId) -> impl Iterator<Item = &UnifiedOffer> {
    result.offers.iter().filter(move |offer| offer.source == source_id)
}

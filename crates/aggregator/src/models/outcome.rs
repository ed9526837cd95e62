use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::job::LookupJob;
use super::types::SourceId;
use crate::errors::SourceError;
use crate::source::efind::EfindResponse;
use crate::source::getchips::GetchipsResponse;
use crate::source::promelec::PromelecResponse;

/// Source-specific payload returned by an adapter.
///
/// Serialized untagged so the boundary can echo the distributor's JSON as is.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum RawPayload {
    Getchips(GetchipsResponse),
    Efind(EfindResponse),
    Promelec(PromelecResponse),
}

impl RawPayload {
    /// The source whose schema this payload follows.
    pub fn source_id(&self) -> SourceId {
        match self {
            Self::Getchips(_) => SourceId::Getchips,
            Self::Efind(_) => SourceId::Efind,
            Self::Promelec(_) => SourceId::Promelec,
        }
    }

    /// Whether the payload carries no rows at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Getchips(raw) => raw.data.is_empty(),
            Self::Efind(raw) => raw.iter().all(|stock| stock.rows.is_empty()),
            Self::Promelec(raw) => raw.is_empty(),
        }
    }
}

/// What one source returned for one job.
///
/// At most one of `raw_payload` and `error` is set; neither means "no match".
#[derive(Clone, Debug)]
pub struct SourceOutcome {
    pub source_id: SourceId,
    pub raw_payload: Option<RawPayload>,
    pub error: Option<SourceError>,
}

impl SourceOutcome {
    pub fn from_result(source_id: SourceId, result: Result<Option<RawPayload>, SourceError>) -> Self {
        match result {
            Ok(raw_payload) => Self {
                source_id,
                raw_payload,
                error: None,
            },
            Err(error) => Self {
                source_id,
                raw_payload: None,
                error: Some(error),
            },
        }
    }

    /// The source answered without an error (possibly with no match).
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// All source outcomes for one job, joined.
///
/// Built once by a dispatcher worker after every source has answered, then
/// handed by value to the normalizer.
#[derive(Clone, Debug)]
pub struct JobAggregate {
    pub job: LookupJob,
    pub outcomes: BTreeMap<SourceId, SourceOutcome>,
    pub timestamp: DateTime<Utc>,
}

impl JobAggregate {
    pub fn new(job: LookupJob, outcomes: impl IntoIterator<Item = SourceOutcome>) -> Self {
        Self {
            job,
            outcomes: outcomes
                .into_iter()
                .map(|outcome| (outcome.source_id, outcome))
                .collect(),
            timestamp: Utc::now(),
        }
    }

    pub fn outcome(&self, source_id: SourceId) -> Option<&SourceOutcome> {
        self.outcomes.get(&source_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::getchips::GetchipsResponse;

    #[test]
    fn test_outcome_from_error() {
        let outcome = SourceOutcome::from_result(
            SourceId::Efind,
            Err(SourceError::Timeout {
                source_id: SourceId::Efind,
            }),
        );
        assert!(!outcome.is_success());
        assert!(outcome.raw_payload.is_none());
    }

    #[test]
    fn test_outcome_without_match_is_success() {
        let outcome = SourceOutcome::from_result(SourceId::Promelec, Ok(None));
        assert!(outcome.is_success());
        assert!(outcome.raw_payload.is_none());
    }

    #[test]
    fn test_aggregate_keys_outcomes_by_source() {
        let job = LookupJob::new("BAV99", Some(5), 1);
        let aggregate = JobAggregate::new(
            job,
            vec![
                SourceOutcome::from_result(
                    SourceId::Getchips,
                    Ok(Some(RawPayload::Getchips(GetchipsResponse::default()))),
                ),
                SourceOutcome::from_result(SourceId::Efind, Ok(None)),
            ],
        );

        assert_eq!(aggregate.outcomes.len(), 2);
        let getchips = aggregate.outcome(SourceId::Getchips).unwrap();
        assert!(getchips.raw_payload.as_ref().unwrap().is_empty());
        assert!(aggregate.outcome(SourceId::Promelec).is_none());
    }
}

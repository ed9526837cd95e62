//! Fan-out of one job to every configured source.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::Instant;
use tracing::debug;

use crate::errors::SourceError;
use crate::models::{LookupJob, SourceOutcome};
use crate::observer::PipelineObserver;
use crate::source::SourceAdapter;

/// Call one source, bounding the call with `timeout` when set.
async fn call_source(
    adapter: &dyn SourceAdapter,
    job: &LookupJob,
    timeout: Option<Duration>,
    observer: &dyn PipelineObserver,
) -> SourceOutcome {
    let source_id = adapter.id();
    let started = Instant::now();
    let call = adapter.fetch(&job.part_number, job.requested_quantity);

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(SourceError::Timeout { source_id })),
        None => call.await,
    };

    let elapsed = started.elapsed();
    debug!(
        "Source '{}' answered for '{}' in {:?} (ok: {})",
        source_id,
        job.part_number,
        elapsed,
        result.is_ok()
    );
    observer.on_source_finished(job, source_id, elapsed, result.as_ref().err());

    SourceOutcome::from_result(source_id, result)
}

/// Query every adapter for `job` concurrently and wait for all of them.
///
/// Returns exactly one outcome per adapter, in adapter order. A failing or
/// timed-out source only affects its own outcome.
pub(crate) async fn fan_out(
    adapters: &[Arc<dyn SourceAdapter>],
    job: &LookupJob,
    timeout: Option<Duration>,
    observer: &dyn PipelineObserver,
) -> Vec<SourceOutcome> {
    let calls = adapters
        .iter()
        .map(|adapter| call_source(adapter.as_ref(), job, timeout, observer));

    join_all(calls).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawPayload, SourceId};
    use crate::observer::NoopObserver;
    use crate::source::promelec::PromelecItem;
    use async_trait::async_trait;

    struct Stalled;

    #[async_trait]
    impl SourceAdapter for Stalled {
        fn id(&self) -> SourceId {
            SourceId::Efind
        }

        async fn fetch(&self, _part_number: &str, _quantity: u32) -> Result<Option<RawPayload>, SourceError> {
            futures::future::pending().await
        }
    }

    struct Immediate;

    #[async_trait]
    impl SourceAdapter for Immediate {
        fn id(&self) -> SourceId {
            SourceId::Promelec
        }

        async fn fetch(&self, part_number: &str, _quantity: u32) -> Result<Option<RawPayload>, SourceError> {
            Ok(Some(RawPayload::Promelec(vec![PromelecItem {
                name: part_number.to_string(),
                ..Default::default()
            }])))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_source_times_out_without_blocking_others() {
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![Arc::new(Stalled), Arc::new(Immediate)];
        let job = LookupJob::new("BAV99", None, 1);

        let outcomes = fan_out(&adapters, &job, Some(Duration::from_secs(5)), &NoopObserver).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            outcomes[0].error,
            Some(SourceError::Timeout {
                source_id: SourceId::Efind
            })
        );
        assert!(outcomes[1].is_success());
        assert!(outcomes[1].raw_payload.is_some());
    }
}

//! Pipeline progress notifications.
//!
//! The pipeline never depends on a logging subsystem to make decisions.
//! Instead it reports progress to an injected [`PipelineObserver`]; the
//! default does nothing and [`TracingObserver`] forwards to `tracing`.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::SourceError;
use crate::models::{JobAggregate, LookupJob, SourceId};
use crate::pipeline::RequestStage;

/// Receives progress events from the pipeline.
///
/// Every method has an empty default so implementors only override what
/// they need. Methods are called from worker tasks and must not block.
pub trait PipelineObserver: Send + Sync {
    /// The request moved to a new stage.
    fn on_stage(&self, stage: RequestStage) {
        let _ = stage;
    }

    /// A worker picked up a job.
    fn on_job_started(&self, job: &LookupJob) {
        let _ = job;
    }

    /// One source answered (or failed) for a job.
    fn on_source_finished(
        &self,
        job: &LookupJob,
        source_id: SourceId,
        elapsed: Duration,
        error: Option<&SourceError>,
    ) {
        let _ = (job, source_id, elapsed, error);
    }

    /// Every source answered and the aggregate was emitted.
    fn on_job_completed(&self, aggregate: &JobAggregate) {
        let _ = aggregate;
    }

    /// The job was dropped because the request was cancelled mid fan-out.
    fn on_job_abandoned(&self, job: &LookupJob) {
        let _ = job;
    }
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer emitting structured `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage(&self, stage: RequestStage) {
        debug!(stage = ?stage, "Pricing request stage changed");
    }

    fn on_job_started(&self, job: &LookupJob) {
        debug!(
            part_number = %job.part_number,
            quantity = job.requested_quantity,
            row = job.row_index,
            "Lookup started"
        );
    }

    fn on_source_finished(
        &self,
        job: &LookupJob,
        source_id: SourceId,
        elapsed: Duration,
        error: Option<&SourceError>,
    ) {
        match error {
            Some(e) => warn!(
                part_number = %job.part_number,
                source = %source_id,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "Source lookup failed"
            ),
            None => debug!(
                part_number = %job.part_number,
                source = %source_id,
                elapsed_ms = elapsed.as_millis() as u64,
                "Source lookup finished"
            ),
        }
    }

    fn on_job_completed(&self, aggregate: &JobAggregate) {
        let failed = aggregate
            .outcomes
            .values()
            .filter(|outcome| !outcome.is_success())
            .count();
        info!(
            part_number = %aggregate.job.part_number,
            sources = aggregate.outcomes.len(),
            failed,
            "Lookup completed"
        );
    }

    fn on_job_abandoned(&self, job: &LookupJob) {
        info!(part_number = %job.part_number, "Lookup abandoned on cancellation");
    }
}

//! Request-level orchestration.
//!
//! A pricing request moves through four stages:
//!
//! ```text
//! Extracting --> Dispatching --> Collecting --> Analyzed
//!      |
//!      +--> (validation error, nothing dispatched)
//! ```

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::analysis::Analyzer;
use crate::dispatch::Dispatcher;
use crate::errors::PricingError;
use crate::extract::extract_jobs;
use crate::models::{JobResult, ProcessRequest, ProcessResponse};
use crate::normalize::normalize;

/// Stage a pricing request is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStage {
    Extracting,
    Dispatching,
    Collecting,
    Analyzed,
}

/// Turns a tabular request into normalized, analyzed results.
#[derive(Clone)]
pub struct PricingPipeline {
    dispatcher: Dispatcher,
    analyzer: Analyzer,
}

impl PricingPipeline {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            analyzer: Analyzer::default(),
        }
    }

    /// Use a different pair of sources for price comparisons.
    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Process one request end to end.
    ///
    /// Source failures never fail the request; they show up as error strings
    /// on the affected results. Only an unusable table is an error, and in
    /// that case nothing is dispatched.
    ///
    /// When `cancel` fires, the response holds whatever finished before it
    /// and is flagged as cancelled.
    pub async fn process(
        &self,
        request: &ProcessRequest,
        cancel: &CancellationToken,
    ) -> Result<ProcessResponse, PricingError> {
        let observer = self.dispatcher.observer();

        observer.on_stage(RequestStage::Extracting);
        let jobs = extract_jobs(request)?;
        info!("Extracted {} lookup jobs from {} rows", jobs.len(), request.data.len());

        observer.on_stage(RequestStage::Dispatching);
        let dispatched = self.dispatcher.dispatch(jobs, cancel).await;

        observer.on_stage(RequestStage::Collecting);
        let results: Vec<JobResult> = dispatched.aggregates.into_iter().map(normalize).collect();
        let analysis = self.analyzer.analyze(&results);

        observer.on_stage(RequestStage::Analyzed);
        Ok(ProcessResponse::new(analysis, results, dispatched.cancelled))
    }
}

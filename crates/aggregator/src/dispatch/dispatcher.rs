//! Bounded worker pool dispatching lookup jobs to every source.
//!
//! The dispatcher handles:
//! - A fixed pool of workers sharing one job queue
//! - Concurrent fan-out of each job to all configured sources
//! - Joining every source answer into one aggregate per job
//! - Request-wide cancellation, keeping the aggregates that already finished

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::fan_out::fan_out;
use crate::config::PipelineConfig;
use crate::errors::PricingError;
use crate::models::{JobAggregate, LookupJob, SourceId};
use crate::observer::{NoopObserver, PipelineObserver};
use crate::source::SourceAdapter;

/// Aggregates collected by one dispatch run.
#[derive(Debug)]
pub struct Dispatched {
    /// One aggregate per finished job, in completion order
    pub aggregates: Vec<JobAggregate>,

    /// The run was cut short by cancellation
    pub cancelled: bool,
}

/// Dispatcher fanning every job out to a fixed set of sources.
#[derive(Clone)]
pub struct Dispatcher {
    adapters: Arc<[Arc<dyn SourceAdapter>]>,
    config: PipelineConfig,
    observer: Arc<dyn PipelineObserver>,
}

impl Dispatcher {
    /// Create a dispatcher over `adapters`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidConfig`] if the config is invalid, no
    /// adapter is given, or two adapters report the same source id.
    pub fn new(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        config: PipelineConfig,
    ) -> Result<Self, PricingError> {
        config.validate()?;

        if adapters.is_empty() {
            return Err(PricingError::invalid_config("at least one source adapter is required"));
        }

        let mut seen = HashSet::new();
        for adapter in &adapters {
            if !seen.insert(adapter.id()) {
                return Err(PricingError::invalid_config(format!(
                    "source '{}' is configured twice",
                    adapter.id()
                )));
            }
        }

        Ok(Self {
            adapters: adapters.into(),
            config,
            observer: Arc::new(NoopObserver),
        })
    }

    /// Attach an observer notified of job and source progress.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub(crate) fn observer(&self) -> &Arc<dyn PipelineObserver> {
        &self.observer
    }

    /// Sources every job is fanned out to, in call order.
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.adapters.iter().map(|adapter| adapter.id()).collect()
    }

    /// Run every job through the worker pool.
    ///
    /// Aggregates are returned in completion order. When `cancel` fires,
    /// idle workers stop taking jobs and busy workers abandon their current
    /// job; aggregates that were already finished are still returned.
    pub async fn dispatch(&self, jobs: Vec<LookupJob>, cancel: &CancellationToken) -> Dispatched {
        let total = jobs.len();
        if total == 0 {
            return Dispatched {
                aggregates: Vec::new(),
                cancelled: cancel.is_cancelled(),
            };
        }

        let workers = self.config.workers_for(total);
        info!(
            "Dispatching {} jobs to {} sources with {} workers",
            total,
            self.adapters.len(),
            workers
        );

        // Both queues hold the whole batch, so neither side ever waits on capacity
        let (job_tx, job_rx) = mpsc::channel(total);
        for job in jobs {
            if job_tx.send(job).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::channel(total);

        let handles: Vec<_> = (0..workers)
            .map(|worker_id| {
                let worker = Worker {
                    id: worker_id,
                    adapters: Arc::clone(&self.adapters),
                    config: self.config.clone(),
                    observer: Arc::clone(&self.observer),
                    jobs: Arc::clone(&job_rx),
                    results: result_tx.clone(),
                    cancel: cancel.clone(),
                };
                tokio::spawn(worker.run())
            })
            .collect();
        drop(result_tx);

        let mut aggregates = Vec::with_capacity(total);
        while let Some(aggregate) = result_rx.recv().await {
            aggregates.push(aggregate);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Dispatch worker terminated abnormally: {}", e);
            }
        }

        let cancelled = cancel.is_cancelled() && aggregates.len() < total;
        if cancelled {
            info!(
                "Dispatch cancelled after {} of {} jobs",
                aggregates.len(),
                total
            );
        } else {
            debug!("Dispatch finished {} of {} jobs", aggregates.len(), total);
        }

        Dispatched {
            aggregates,
            cancelled,
        }
    }
}

/// One pool slot, owning clones of everything it touches.
struct Worker {
    id: usize,
    adapters: Arc<[Arc<dyn SourceAdapter>]>,
    config: PipelineConfig,
    observer: Arc<dyn PipelineObserver>,
    jobs: Arc<Mutex<mpsc::Receiver<LookupJob>>>,
    results: mpsc::Sender<JobAggregate>,
    cancel: CancellationToken,
}

impl Worker {
    async fn next_job(&self) -> Option<LookupJob> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            job = async { self.jobs.lock().await.recv().await } => job,
        }
    }

    async fn run(self) {
        while let Some(job) = self.next_job().await {
            self.observer.on_job_started(&job);

            let outcomes = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!("Worker {} abandoning '{}' on cancellation", self.id, job.part_number);
                    self.observer.on_job_abandoned(&job);
                    return;
                }
                outcomes = fan_out(&self.adapters, &job, self.config.adapter_timeout, self.observer.as_ref()) => outcomes,
            };

            let aggregate = JobAggregate::new(job, outcomes);
            self.observer.on_job_completed(&aggregate);

            if self.results.send(aggregate).await.is_err() {
                return;
            }
        }
        debug!("Worker {} exiting", self.id);
    }
}

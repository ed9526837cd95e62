//! Partquote Aggregator Crate
//!
//! This crate turns a spreadsheet of electronic component part numbers into
//! normalized, cross-distributor pricing results.
//!
//! # Overview
//!
//! The aggregator supports:
//! - Tabular requests with configurable column roles
//! - Concurrent lookups against several distributors per part
//! - Per-source failure isolation and timeouts
//! - Unified offers with computed purchase and sale targets
//! - Per-request analysis and cross-source price comparison
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  ProcessRequest  |  (header row + data rows)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Extractor     |  (one LookupJob per usable row)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |   Dispatcher     | --> |  SourceAdapter   |  (Getchips, Efind, Promelec)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |   JobAggregate   |  (every source outcome for one job)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   Normalizer     |  (offers, summaries, error strings)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Analyzer      |  (counts and price comparisons)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`PricingPipeline`] - Runs a request through every stage
//! - [`Dispatcher`] - Bounded worker pool with per-job fan-out
//! - [`SourceAdapter`] - Seam to one distributor
//! - [`UnifiedOffer`] - Source-independent offer with computed targets
//! - [`JobResult`] - Everything produced for one part
//! - [`AnalysisResult`] - Per-request statistics
//!
//! # Type Aliases
//!
//! - [`Currency`] - Currency code as reported by the source (e.g., "USD", "RUB")

pub mod analysis;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod observer;
pub mod pipeline;
pub mod pricing;
pub mod source;

// Re-export all public types from models
pub use models::{
    AnalysisResult, Currency, JobAggregate, JobResult, LookupJob, PriceBreak, PriceComparison,
    ProcessRequest, ProcessResponse, RawPayload, SourceId, SourceOutcome, SourceSummary,
    UnifiedOffer, UnifiedPriceBreak, Winner,
};

// Re-export stage types
pub use analysis::{compare_and_select_best, compare_prices, Analyzer, BestOffer, Selection};
pub use config::PipelineConfig;
pub use dispatch::{Dispatched, Dispatcher};
pub use extract::extract_jobs;
pub use normalize::normalize;
pub use observer::{NoopObserver, PipelineObserver, TracingObserver};
pub use pipeline::{PricingPipeline, RequestStage};
pub use pricing::PriceTargets;

// Re-export source types
pub use source::SourceAdapter;

// Re-export error types
pub use errors::{PricingError, SourceError};

// Re-export the cancellation token callers hand to the pipeline
pub use tokio_util::sync::CancellationToken;

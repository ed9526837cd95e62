//! Aggregation data models
//!
//! This module contains the data types passed between pipeline stages:
//! - `types` - Source identifiers and currency alias
//! - `job` - Incoming request and the lookup jobs extracted from it
//! - `outcome` - Raw source payloads and per-job aggregates (SourceOutcome, JobAggregate)
//! - `offer` - Price breaks and the unified offer schema
//! - `result` - Per-source summaries, per-job results and the response envelope
//! - `analysis` - Cross-source statistics and price comparisons

mod analysis;
mod job;
mod offer;
mod outcome;
mod result;
mod types;

pub use analysis::{AnalysisResult, PriceComparison, Winner};
pub use job::{parse_quantity, LookupJob, ProcessRequest, ROLE_PART_NUMBER, ROLE_QUANTITY};
pub use offer::{base_price, PriceBreak, UnifiedOffer, UnifiedPriceBreak};
pub use outcome::{JobAggregate, RawPayload, SourceOutcome};
pub use result::{JobResult, ProcessResponse, SourceSummary};
pub use types::{Currency, SourceId};

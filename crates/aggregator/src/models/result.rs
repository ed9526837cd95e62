use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::analysis::AnalysisResult;
use super::offer::{PriceBreak, UnifiedOffer};
use super::outcome::RawPayload;
use super::types::{Currency, SourceId};

/// Simplified per-source view of one lookup, used for analysis.
///
/// Built from the first row a source returns for the query.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub part_number: String,
    pub supplier: String,
    pub available_qty: i64,
    pub in_stock: bool,
    pub price: Decimal,
    pub currency: Currency,
    pub price_breaks: Vec<PriceBreak>,
    pub min_order_qty: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_time_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
}

/// Everything produced for one lookup job.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub part_number: String,
    pub requested_qty: u32,
    pub row_index: usize,

    /// Sources that answered without an error
    pub succeeded: Vec<SourceId>,

    pub summaries: BTreeMap<SourceId, SourceSummary>,

    pub offers: Vec<UnifiedOffer>,

    /// Error strings for the sources that failed
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<SourceId, String>,

    /// Untouched source payloads, dropped by [`ProcessResponse::without_raw`]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub raw: BTreeMap<SourceId, RawPayload>,

    pub timestamp: DateTime<Utc>,
}

impl JobResult {
    pub fn summary(&self, source_id: SourceId) -> Option<&SourceSummary> {
        self.summaries.get(&source_id)
    }

    pub fn source_succeeded(&self, source_id: SourceId) -> bool {
        self.succeeded.contains(&source_id)
    }

    pub fn strip_raw(&mut self) {
        self.raw.clear();
    }
}

/// Response handed to the HTTP boundary.
#[derive(Clone, Debug, Serialize)]
pub struct ProcessResponse {
    pub status: &'static str,
    pub analysis: AnalysisResult,
    pub results: Vec<JobResult>,
    pub count: usize,

    /// Set when the request was cancelled before every job finished
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

impl ProcessResponse {
    pub fn new(analysis: AnalysisResult, results: Vec<JobResult>, cancelled: bool) -> Self {
        Self {
            status: "success",
            analysis,
            count: results.len(),
            results,
            cancelled,
        }
    }

    /// The same response with every raw source payload removed.
    pub fn without_raw(mut self) -> Self {
        for result in &mut self.results {
            result.strip_raw();
        }
        self
    }
}

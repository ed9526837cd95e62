use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::types::SourceId;

/// Summary statistics over one request's results.
///
/// Recomputed for every request; never merged across requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_parts: usize,

    /// Jobs for which the source answered without an error
    pub success_count: BTreeMap<SourceId, usize>,

    /// Jobs for which the source reported positive availability
    pub in_stock_count: BTreeMap<SourceId, usize>,

    /// Jobs for which at least two sources answered without an error
    pub both_sources_success: usize,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub price_comparisons: Vec<PriceComparison>,
}

impl AnalysisResult {
    pub fn successes(&self, source_id: SourceId) -> usize {
        self.success_count.get(&source_id).copied().unwrap_or(0)
    }

    pub fn in_stock(&self, source_id: SourceId) -> usize {
        self.in_stock_count.get(&source_id).copied().unwrap_or(0)
    }
}

/// Which side of a pairwise comparison offered the lower price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Source(SourceId),
    Equal,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(id) => f.write_str(id.as_str()),
            Self::Equal => f.write_str("equal"),
        }
    }
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Price comparison between the two designated sources for one part.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceComparison {
    pub part_number: String,
    pub source_a: SourceId,
    pub price_a: Decimal,
    pub source_b: SourceId,
    pub price_b: Decimal,
    pub better_price: Winner,
    pub difference_percent: Decimal,
}

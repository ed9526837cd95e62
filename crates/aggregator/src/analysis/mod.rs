//! Cross-source analysis of one request's results.
//!
//! Counts per-source successes and availability, and compares the prices of
//! two designated sources part by part. Comparisons only happen within one
//! currency; nothing is converted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{AnalysisResult, JobResult, PriceComparison, SourceId, SourceSummary, Winner};

/// Compare two sources' prices for one part.
///
/// Returns `None` when either price is not positive or the currencies differ.
pub fn compare_prices(
    part_number: &str,
    (source_a, a): (SourceId, &SourceSummary),
    (source_b, b): (SourceId, &SourceSummary),
) -> Option<PriceComparison> {
    if a.price <= Decimal::ZERO || b.price <= Decimal::ZERO || a.currency != b.currency {
        return None;
    }

    let (better_price, difference_percent) = if a.price < b.price {
        (Winner::Source(source_a), (b.price - a.price) / b.price * dec!(100))
    } else if b.price < a.price {
        (Winner::Source(source_b), (a.price - b.price) / a.price * dec!(100))
    } else {
        (Winner::Equal, Decimal::ZERO)
    };

    Some(PriceComparison {
        part_number: part_number.to_string(),
        source_a,
        price_a: a.price,
        source_b,
        price_b: b.price,
        better_price,
        difference_percent,
    })
}

/// Computes [`AnalysisResult`]s, comparing one fixed pair of sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Analyzer {
    source_a: SourceId,
    source_b: SourceId,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(SourceId::Getchips, SourceId::Efind)
    }
}

impl Analyzer {
    pub fn new(source_a: SourceId, source_b: SourceId) -> Self {
        Self { source_a, source_b }
    }

    pub fn compared_sources(&self) -> (SourceId, SourceId) {
        (self.source_a, self.source_b)
    }

    /// Summarize every result of a request.
    pub fn analyze(&self, results: &[JobResult]) -> AnalysisResult {
        let mut success_count: BTreeMap<SourceId, usize> = BTreeMap::new();
        let mut in_stock_count: BTreeMap<SourceId, usize> = BTreeMap::new();
        let mut both_sources_success = 0;
        let mut price_comparisons = Vec::new();

        for result in results {
            for source_id in result.succeeded.iter().chain(result.errors.keys()) {
                success_count.entry(*source_id).or_insert(0);
                in_stock_count.entry(*source_id).or_insert(0);
            }

            for source_id in &result.succeeded {
                *success_count.entry(*source_id).or_insert(0) += 1;
            }

            for (source_id, summary) in &result.summaries {
                if summary.in_stock {
                    *in_stock_count.entry(*source_id).or_insert(0) += 1;
                }
            }

            if result.succeeded.len() >= 2 {
                both_sources_success += 1;
            }

            let pair = result
                .summary(self.source_a)
                .zip(result.summary(self.source_b));
            if let Some((a, b)) = pair {
                if let Some(comparison) = compare_prices(
                    &result.part_number,
                    (self.source_a, a),
                    (self.source_b, b),
                ) {
                    price_comparisons.push(comparison);
                }
            }
        }

        AnalysisResult {
            total_parts: results.len(),
            success_count,
            in_stock_count,
            both_sources_success,
            price_comparisons,
        }
    }
}

/// Outcome of choosing between two sources for one part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    NoData,
    OnlyA,
    OnlyB,
    ABetterStock,
    BBetterStock,
    BothValid,
}

impl Selection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoData => "no_data",
            Self::OnlyA => "a_only",
            Self::OnlyB => "b_only",
            Self::ABetterStock => "a_better_stock",
            Self::BBetterStock => "b_better_stock",
            Self::BothValid => "both_valid",
        }
    }
}

/// The summaries kept after [`compare_and_select_best`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestOffer<'a> {
    pub selection: Selection,
    pub a: Option<&'a SourceSummary>,
    pub b: Option<&'a SourceSummary>,
}

/// Pick between two sources' summaries for one part.
///
/// Availability beats price: when exactly one side has stock, that side is
/// kept alone. Otherwise both are kept.
pub fn compare_and_select_best<'a>(
    a: Option<&'a SourceSummary>,
    b: Option<&'a SourceSummary>,
) -> BestOffer<'a> {
    let (selection, a, b) = match (a, b) {
        (None, None) => (Selection::NoData, None, None),
        (Some(a), None) => (Selection::OnlyA, Some(a), None),
        (None, Some(b)) => (Selection::OnlyB, None, Some(b)),
        (Some(a), Some(b)) if a.available_qty > 0 && b.available_qty == 0 => {
            (Selection::ABetterStock, Some(a), None)
        }
        (Some(a), Some(b)) if b.available_qty > 0 && a.available_qty == 0 => {
            (Selection::BBetterStock, None, Some(b))
        }
        (Some(a), Some(b)) => (Selection::BothValid, Some(a), Some(b)),
    };

    BestOffer { selection, a, b }
}

//! Getchips normalization.
//!
//! Getchips answers with a flat list of offers. Each row becomes one
//! [`UnifiedOffer`]. Prices are always in USD and the brand doubles as the
//! seller name.

mod models;

use tracing::debug;

pub use models::{GetchipsItem, GetchipsPriceBreak, GetchipsResponse};

use super::decimal_price;
use crate::models::{base_price, Currency, LookupJob, PriceBreak, SourceId, SourceSummary, UnifiedOffer};
use crate::pricing::build_price_breaks;

const CURRENCY: &str = "USD";

fn price_breaks(item: &GetchipsItem) -> Vec<PriceBreak> {
    item.price_break
        .iter()
        .filter_map(|pb| match decimal_price(pb.price) {
            Ok(price) => Some(PriceBreak::new(pb.quantity, price)),
            Err(e) => {
                debug!("Dropping getchips price break for '{}': {}", item.title, e);
                None
            }
        })
        .collect()
}

/// Normalize a Getchips response into one offer per row.
pub fn normalize(raw: &GetchipsResponse, job: &LookupJob) -> Vec<UnifiedOffer> {
    let currency: Currency = CURRENCY.into();

    raw.data
        .iter()
        .map(|item| {
            let breaks = price_breaks(item);
            UnifiedOffer {
                mpn: item.title.clone(),
                requested_mpn: job.part_number.clone(),
                requested_qty: job.requested_quantity,
                manufacturer: item.brand.clone(),
                seller_name: item.brand.clone(),
                seller_homepage: String::new(),
                stock: item.quantity,
                currency: currency.clone(),
                price: base_price(&breaks),
                price_breaks: build_price_breaks(&breaks, &currency),
                source: SourceId::Getchips,
            }
        })
        .collect()
}

/// Simplified view of the first row, if any.
pub fn summarize(raw: &GetchipsResponse) -> Option<SourceSummary> {
    let item = raw.data.first()?;
    let breaks = price_breaks(item);

    Some(SourceSummary {
        part_number: item.title.clone(),
        supplier: item.donor.clone(),
        available_qty: item.quantity,
        in_stock: item.quantity > 0,
        price: base_price(&breaks),
        currency: CURRENCY.into(),
        price_breaks: breaks,
        min_order_qty: item.minq,
        lead_time_days: Some(item.orderdays),
        packaging: Some(item.packaging.clone()).filter(|p| !p.is_empty()),
    })
}

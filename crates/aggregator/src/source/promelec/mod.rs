//! Promelec normalization.
//!
//! Promelec is a single seller quoting in RUB; each catalogue item becomes
//! one [`UnifiedOffer`].

mod models;

use tracing::debug;

pub use models::{PromelecItem, PromelecPriceBreak, PromelecResponse};

use super::decimal_price;
use crate::models::{base_price, Currency, LookupJob, PriceBreak, SourceId, SourceSummary, UnifiedOffer};
use crate::pricing::build_price_breaks;

const CURRENCY: &str = "RUB";
const SELLER_NAME: &str = "Promelec";
const SELLER_HOMEPAGE: &str = "https://promelec.ru";

fn price_breaks(item: &PromelecItem) -> Vec<PriceBreak> {
    item.pricebreaks
        .iter()
        .filter_map(|pb| match decimal_price(pb.price) {
            Ok(price) => Some(PriceBreak::new(pb.quant, price)),
            Err(e) => {
                debug!("Dropping promelec price break for '{}': {}", item.name, e);
                None
            }
        })
        .collect()
}

/// Normalize a Promelec response into one offer per item.
pub fn normalize(raw: &PromelecResponse, job: &LookupJob) -> Vec<UnifiedOffer> {
    let currency: Currency = CURRENCY.into();

    raw.iter()
        .map(|item| {
            let breaks = price_breaks(item);
            UnifiedOffer {
                mpn: item.name.clone(),
                requested_mpn: job.part_number.clone(),
                requested_qty: job.requested_quantity,
                manufacturer: item.producer_name.clone(),
                seller_name: SELLER_NAME.to_string(),
                seller_homepage: SELLER_HOMEPAGE.to_string(),
                stock: item.quant,
                currency: currency.clone(),
                price: base_price(&breaks),
                price_breaks: build_price_breaks(&breaks, &currency),
                source: SourceId::Promelec,
            }
        })
        .collect()
}

/// Simplified view of the first item, if any.
pub fn summarize(raw: &PromelecResponse) -> Option<SourceSummary> {
    let item = raw.first()?;
    let breaks = price_breaks(item);

    Some(SourceSummary {
        part_number: item.name.clone(),
        supplier: SELLER_NAME.to_string(),
        available_qty: item.quant,
        in_stock: item.quant > 0,
        price: base_price(&breaks),
        currency: CURRENCY.into(),
        price_breaks: breaks,
        min_order_qty: item.moq,
        lead_time_days: None,
        packaging: Some(item.package.clone()).filter(|p| !p.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"[
        {
            "item_id": 90211,
            "name": "BAV99",
            "producer_name": "Nexperia",
            "package": "SOT-23",
            "quant": 15000,
            "moq": 10,
            "munit": "pcs",
            "pricebreaks": [
                {"quant": 10, "price": 2.35},
                {"quant": 1000, "price": 1.9}
            ]
        },
        {
            "item_id": 90212,
            "name": "BAV99W",
            "producer_name": "Diotec",
            "quant": 0
        }
    ]"#;

    #[test]
    fn test_normalize_items() {
        let raw: PromelecResponse = serde_json::from_str(SAMPLE).unwrap();
        let job = LookupJob::new("BAV99", Some(500), 4);
        let offers = normalize(&raw, &job);

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].seller_name, "Promelec");
        assert_eq!(offers[0].seller_homepage, "https://promelec.ru");
        assert_eq!(offers[0].manufacturer, "Nexperia");
        assert_eq!(offers[0].currency, "RUB");
        assert_eq!(offers[0].price, dec!(2.35));
        assert_eq!(offers[0].price_breaks[1].target_price_sales, dec!(4.92));
        assert_eq!(offers[1].price, dec!(0));
        assert_eq!(offers[1].requested_mpn, "BAV99");
    }

    #[test]
    fn test_summarize() {
        let raw: PromelecResponse = serde_json::from_str(SAMPLE).unwrap();
        let summary = summarize(&raw).unwrap();

        assert_eq!(summary.available_qty, 15000);
        assert_eq!(summary.min_order_qty, 10);
        assert_eq!(summary.packaging.as_deref(), Some("SOT-23"));
        assert!(summary.in_stock);
    }

    #[test]
    fn test_huge_price_break_is_dropped() {
        let raw: PromelecResponse = vec![PromelecItem {
            name: "BAV99".to_string(),
            quant: 100,
            pricebreaks: vec![
                PromelecPriceBreak {
                    quant: 1,
                    price: 7.5e28,
                },
                PromelecPriceBreak {
                    quant: 10,
                    price: 2.35,
                },
            ],
            ..Default::default()
        }];

        let offers = normalize(&raw, &LookupJob::new("BAV99", None, 1));

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].price, dec!(2.35));
        assert_eq!(offers[0].price_breaks.len(), 1);
        assert_eq!(offers[0].price_breaks[0].quantity, 10);
        assert_eq!(summarize(&raw).unwrap().price, dec!(2.35));
    }

    #[test]
    fn test_null_pricebreaks_decode_as_empty() {
        let raw: PromelecResponse =
            serde_json::from_str(r#"[{"name": "BAV99", "quant": 4, "pricebreaks": null}]"#).unwrap();
        let summary = summarize(&raw).unwrap();
        assert!(summary.price_breaks.is_empty());
        assert_eq!(summary.price, dec!(0));
    }

    #[test]
    fn test_empty_response() {
        let raw: PromelecResponse = Vec::new();
        assert!(normalize(&raw, &LookupJob::new("BAV99", None, 1)).is_empty());
        assert!(summarize(&raw).is_none());
    }
}

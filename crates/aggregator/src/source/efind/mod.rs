//! Efind normalization.
//!
//! Efind aggregates many stocks. Every row of every stock becomes one
//! [`UnifiedOffer`], with the stock's contact data as the seller. Rows carry
//! their own currency and loosely-typed quantities; malformed price tuples
//! are dropped without failing the row.

mod models;

use tracing::debug;

pub use models::{EfindResponse, EfindRow, EfindStock, EfindStockData};

use super::decimal_price;
use super::loose::LooseValue;
use crate::errors::MalformedField;
use crate::models::{base_price, Currency, LookupJob, PriceBreak, SourceId, SourceSummary, UnifiedOffer};
use crate::pricing::build_price_breaks;

/// Parse one positional price tuple `[quantity, _, price, ...]`.
fn parse_price_row(fields: &[LooseValue]) -> Result<PriceBreak, MalformedField> {
    if fields.len() < 3 {
        return Err(MalformedField::ShortPriceRow(fields.len()));
    }

    let price = fields[2].as_f64().ok_or(MalformedField::NonNumericPrice)?;
    let price = decimal_price(price)?;

    Ok(PriceBreak::new(fields[0].to_int(), price))
}

fn price_breaks(row: &EfindRow) -> Vec<PriceBreak> {
    row.price
        .iter()
        .filter_map(|fields| match parse_price_row(fields.as_deref().unwrap_or_default()) {
            Ok(pb) => Some(pb),
            Err(e) => {
                debug!("Dropping efind price row for '{}': {}", row.part, e);
                None
            }
        })
        .collect()
}

/// Normalize an Efind response into one offer per stock row.
pub fn normalize(raw: &EfindResponse, job: &LookupJob) -> Vec<UnifiedOffer> {
    raw.iter()
        .flat_map(|stock| stock.rows.iter().map(move |row| (stock, row)))
        .map(|(stock, row)| {
            let breaks = price_breaks(row);
            let currency: Currency = row.cur.clone().into();
            UnifiedOffer {
                mpn: row.part.clone(),
                requested_mpn: job.part_number.clone(),
                requested_qty: job.requested_quantity,
                // Efind does not report a manufacturer
                manufacturer: String::new(),
                seller_name: stock.stock_data.title.clone(),
                seller_homepage: stock.stock_data.site.clone(),
                stock: row.stock.to_int(),
                price: base_price(&breaks),
                price_breaks: build_price_breaks(&breaks, &currency),
                currency,
                source: SourceId::Efind,
            }
        })
        .collect()
}

/// Simplified view of the first row of the first stock that has rows.
pub fn summarize(raw: &EfindResponse) -> Option<SourceSummary> {
    let (stock, row) = raw
        .iter()
        .find_map(|stock| stock.rows.first().map(|row| (stock, row)))?;
    let breaks = price_breaks(row);
    let available_qty = row.stock.to_int();

    Some(SourceSummary {
        part_number: row.part.clone(),
        supplier: stock.stock_data.title.clone(),
        available_qty,
        in_stock: available_qty > 0,
        price: base_price(&breaks),
        currency: row.cur.clone().into(),
        price_breaks: breaks,
        min_order_qty: row.moq.to_int(),
        lead_time_days: None,
        packaging: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"[
        {
            "filial": null,
            "finish": 0.42,
            "stock_id": 311,
            "stockdata": {
                "city": "Moscow",
                "contact_email": "sales@example.ru",
                "contact_phones": ["+7 495 000-00-00"],
                "country": "RU",
                "min_order": "1000 RUB",
                "region_id": "77",
                "site": "https://chipdip.example",
                "title": "ChipStock",
                "title_en": "ChipStock"
            },
            "rows": [
                {
                    "part": "ADUM3471ARSZ",
                    "cur": "USD",
                    "instock": true,
                    "price": [
                        [1, 0, 6.4],
                        [10, "x", 5.9],
                        [100, 0],
                        [250, 0, "5.10"],
                        ["1000", 0, 4.75]
                    ],
                    "moq": "1",
                    "mpq": 1,
                    "stock": "340",
                    "od": null
                },
                {
                    "part": "ADUM3471ARSZ-RL",
                    "cur": "RUB",
                    "instock": false,
                    "price": [[1, 0, 520]],
                    "moq": 5.0,
                    "stock": 12.9
                }
            ]
        },
        {
            "stock_id": 12,
            "stockdata": {"title": "EmptyStock"},
            "rows": []
        }
    ]"#;

    fn job() -> LookupJob {
        LookupJob::new("ADUM3471ARSZ", Some(10), 1)
    }

    fn sample() -> EfindResponse {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_response_parsing() {
        let raw = sample();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].rows.len(), 2);
        assert_eq!(raw[0].rows[0].stock, LooseValue::Text("340".to_string()));
        assert_eq!(raw[0].rows[1].stock, LooseValue::Decimal(12.9));
        assert_eq!(raw[0].rows[1].mpq, LooseValue::default());
    }

    #[test]
    fn test_malformed_price_rows_are_dropped() {
        let raw = sample();
        let breaks = price_breaks(&raw[0].rows[0]);

        // [100, 0] is too short and [250, 0, "5.10"] has a text price
        assert_eq!(
            breaks,
            vec![
                PriceBreak::new(1, dec!(6.4)),
                PriceBreak::new(10, dec!(5.9)),
                PriceBreak::new(1000, dec!(4.75)),
            ]
        );
    }

    #[test]
    fn test_parse_price_row_errors() {
        let short = vec![LooseValue::Integer(1), LooseValue::Integer(0)];
        assert_eq!(parse_price_row(&short), Err(MalformedField::ShortPriceRow(2)));

        let text = vec![
            LooseValue::Integer(1),
            LooseValue::Integer(0),
            LooseValue::Text("1.0".to_string()),
        ];
        assert_eq!(parse_price_row(&text), Err(MalformedField::NonNumericPrice));
    }

    #[test]
    fn test_normalize_flattens_stocks_and_rows() {
        let offers = normalize(&sample(), &job());

        assert_eq!(offers.len(), 2);
        let first = &offers[0];
        assert_eq!(first.seller_name, "ChipStock");
        assert_eq!(first.seller_homepage, "https://chipdip.example");
        assert_eq!(first.manufacturer, "");
        assert_eq!(first.stock, 340);
        assert_eq!(first.currency, "USD");
        assert_eq!(first.price, dec!(6.4));
        assert_eq!(first.price_breaks.len(), 3);

        let second = &offers[1];
        assert_eq!(second.currency, "RUB");
        assert_eq!(second.stock, 12);
        assert_eq!(second.price, dec!(520));
        // Delivery coefficient is added without currency conversion
        assert_eq!(second.price_breaks[0].cost_with_delivery, dec!(427.67));
    }

    #[test]
    fn test_normalize_empty_response() {
        let raw: EfindResponse = Vec::new();
        assert!(normalize(&raw, &job()).is_empty());
        assert!(summarize(&raw).is_none());
    }

    #[test]
    fn test_summarize_first_row() {
        let summary = summarize(&sample()).unwrap();
        assert_eq!(summary.supplier, "ChipStock");
        assert_eq!(summary.available_qty, 340);
        assert!(summary.in_stock);
        assert_eq!(summary.min_order_qty, 1);
        assert_eq!(summary.price, dec!(6.4));
    }

    #[test]
    fn test_summarize_skips_stocks_without_rows() {
        let raw: EfindResponse = serde_json::from_str(
            r#"[
                {"stockdata": {"title": "Empty"}, "rows": []},
                {"stockdata": {"title": "Second"}, "rows": [{"part": "BAV99", "cur": "EUR", "stock": 0}]}
            ]"#,
        )
        .unwrap();

        let summary = summarize(&raw).unwrap();
        assert_eq!(summary.supplier, "Second");
        assert!(!summary.in_stock);
        assert_eq!(summary.price, dec!(0));
    }

    #[test]
    fn test_instock_flag_without_quantity_is_not_in_stock() {
        let raw: EfindResponse = serde_json::from_str(
            r#"[{"stockdata": {"title": "Flagged"}, "rows": [{"part": "BAV99", "cur": "USD", "instock": true, "stock": 0}]}]"#,
        )
        .unwrap();

        let summary = summarize(&raw).unwrap();
        assert_eq!(summary.available_qty, 0);
        assert!(!summary.in_stock);
    }

    #[test]
    fn test_null_price_tuple_is_dropped() {
        let raw: EfindResponse = serde_json::from_str(
            r#"[{"stockdata": {"title": "ChipStock"}, "rows": [{"part": "BAV99", "cur": "USD", "stock": 5, "price": [null, [1, 0, 2.5]]}]}]"#,
        )
        .unwrap();

        assert_eq!(price_breaks(&raw[0].rows[0]), vec![PriceBreak::new(1, dec!(2.5))]);
        let offers = normalize(&raw, &job());
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].price, dec!(2.5));
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let raw: EfindResponse = serde_json::from_str(
            r#"[
                {
                    "finish": null,
                    "stock_id": null,
                    "stockdata": {"title": null, "site": "https://parts.example", "contact_phones": null},
                    "rows": [{"part": null, "cur": null, "instock": null, "stock": "7", "price": null}]
                },
                {"stockdata": null, "rows": null},
                {"stockdata": {"title": "Phones", "contact_phones": ["+7 000", null]}, "rows": []}
            ]"#,
        )
        .unwrap();

        assert_eq!(raw.len(), 3);
        let row = &raw[0].rows[0];
        assert_eq!(row.part, "");
        assert_eq!(row.cur, "");
        assert!(row.price.is_empty());
        assert!(raw[0].stock_data.contact_phones.is_empty());
        assert!(raw[1].rows.is_empty());
        assert_eq!(raw[2].stock_data.contact_phones, vec![Some("+7 000".to_string()), None]);

        let offers = normalize(&raw, &job());
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].seller_name, "");
        assert_eq!(offers[0].seller_homepage, "https://parts.example");
        assert_eq!(offers[0].stock, 7);
        assert!(offers[0].price_breaks.is_empty());
    }
}

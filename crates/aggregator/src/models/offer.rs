use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Currency, SourceId};

/// A quantity tier with its own unit price, as reported by a source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceBreak {
    /// Minimum quantity for this tier
    pub quantity: i64,

    /// Unit price at this tier
    pub price: Decimal,
}

impl PriceBreak {
    pub fn new(quantity: i64, price: Decimal) -> Self {
        Self { quantity, price }
    }
}

/// A price break enriched with purchasing and sales targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedPriceBreak {
    pub quantity: i64,

    /// Source list price, rounded to cents
    pub price: Decimal,

    pub currency: Currency,

    /// Target purchase price plus the fixed delivery coefficient
    pub cost_with_delivery: Decimal,

    pub target_price_purchasing: Decimal,

    pub target_price_sales: Decimal,
}

/// Normalized, source-agnostic listing for one priced part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedOffer {
    /// Part number as returned by the source
    pub mpn: String,

    /// Part number that was looked up
    pub requested_mpn: String,

    pub requested_qty: u32,

    #[serde(default)]
    pub manufacturer: String,

    pub seller_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seller_homepage: String,

    /// Quantity available at the seller
    pub stock: i64,

    pub currency: Currency,

    /// Unit price of the first price break, or zero
    pub price: Decimal,

    pub price_breaks: Vec<UnifiedPriceBreak>,

    pub source: SourceId,
}

impl UnifiedOffer {
    /// Whether the seller reports any stock for this listing.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Base/display price: the first price break's unit price, else zero.
///
/// Breaks are taken in source order and never re-sorted.
pub fn base_price(breaks: &[PriceBreak]) -> Decimal {
    breaks.first().map(|pb| pb.price).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_base_price_takes_first_break() {
        let breaks = vec![
            PriceBreak::new(100, dec!(0.85)),
            PriceBreak::new(1, dec!(1.20)),
        ];
        // Unsorted input is tolerated, first entry wins
        assert_eq!(base_price(&breaks), dec!(0.85));
    }

    #[test]
    fn test_base_price_empty_is_zero() {
        assert_eq!(base_price(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_offer_serializes_camel_case() {
        let offer = UnifiedOffer {
            mpn: "ADUM3471ARSZ".to_string(),
            requested_mpn: "ADUM3471ARSZ".to_string(),
            requested_qty: 10,
            manufacturer: "ADI".to_string(),
            seller_name: "ADI".to_string(),
            seller_homepage: String::new(),
            stock: 12,
            currency: "USD".into(),
            price: dec!(4.5),
            price_breaks: Vec::new(),
            source: SourceId::Getchips,
        };

        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["requestedMpn"], "ADUM3471ARSZ");
        assert_eq!(json["source"], "getchips");
        assert!(json.get("sellerHomepage").is_none());
        assert!(offer.in_stock());
    }
}

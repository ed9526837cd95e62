//! Getchips search API response models.
//!
//! The search endpoint answers `{"data": [...]}` with one entry per matching
//! offer. Every field is optional in practice, so everything defaults.

use serde::{Deserialize, Serialize};

use crate::source::null_as_default;

/// Response wrapper for the part-number search endpoint
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GetchipsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<GetchipsItem>,
}

/// One offer row
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetchipsItem {
    /// Part number as listed by the donor
    pub title: String,
    /// Available quantity
    pub quantity: i64,
    /// Standard pack size
    pub s_pack: i64,
    #[serde(rename = "donorID")]
    pub donor_id: serde_json::Value,
    /// Upstream supplier the offer comes from
    pub donor: String,
    pub folddivision: i64,
    /// Minimum order quantity
    pub minq: i64,
    pub brand: String,
    /// Lead time in days
    pub orderdays: i64,
    pub price: f64,
    pub e_quantity: i64,
    #[serde(rename = "search_word")]
    pub search_word: String,
    /// Numeric currency code. Prices are always quoted in USD regardless.
    pub currency: i64,
    #[serde(rename = "match")]
    pub match_kind: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub price_break: Vec<GetchipsPriceBreak>,
    pub quantity_price: f64,
    pub packaging: String,
}

/// Quantity tier inside an offer row
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetchipsPriceBreak {
    pub quantity: i64,
    pub price: f64,
}

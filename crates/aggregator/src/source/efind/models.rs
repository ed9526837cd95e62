//! Efind stock search response models.
//!
//! The endpoint answers with a JSON array of stocks (warehouses), each
//! holding the rows it has for the query. Row fields are loosely typed:
//! `stock`, `moq` and `mpq` arrive as numbers or strings, and each entry of
//! `price` is a positional tuple `[quantity, <unused>, unit price, ...]`.
//! Any field may also arrive as an explicit `null`, which decodes as empty.

use serde::{Deserialize, Serialize};

use crate::source::loose::LooseValue;
use crate::source::null_as_default;

/// Full response: one entry per stock
pub type EfindResponse = Vec<EfindStock>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EfindStock {
    pub filial: serde_json::Value,
    #[serde(deserialize_with = "null_as_default")]
    pub finish: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub rows: Vec<EfindRow>,
    #[serde(deserialize_with = "null_as_default")]
    pub stock_id: i64,
    #[serde(rename = "stockdata", deserialize_with = "null_as_default")]
    pub stock_data: EfindStockData,
}

/// One matching part at a stock
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EfindRow {
    #[serde(deserialize_with = "null_as_default")]
    pub part: String,
    /// Currency code of the row prices
    #[serde(deserialize_with = "null_as_default")]
    pub cur: String,
    /// Availability flag as sent. In-stock is derived from `stock` instead.
    #[serde(deserialize_with = "null_as_default")]
    pub instock: bool,
    /// Positional price tuples; a `null` tuple is kept and dropped as short
    #[serde(deserialize_with = "null_as_default")]
    pub price: Vec<Option<Vec<LooseValue>>>,
    pub moq: LooseValue,
    pub mpq: LooseValue,
    pub stock: LooseValue,
    /// Delivery time hint
    pub od: LooseValue,
}

/// Seller contact data attached to a stock
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EfindStockData {
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact_phones: Vec<Option<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub min_order: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub site: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title_en: String,
}

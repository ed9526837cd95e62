//! Promelec RPC `items_data_find` response models.

use serde::{Deserialize, Serialize};

use crate::source::null_as_default;

/// Full response: one entry per catalogue item
pub type PromelecResponse = Vec<PromelecItem>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromelecItem {
    pub item_id: i64,
    /// Part number
    pub name: String,
    pub producer_name: String,
    /// Package / case
    pub package: String,
    /// Quantity on hand
    pub quant: i64,
    pub moq: i64,
    /// Measurement unit
    pub munit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pricebreaks: Vec<PromelecPriceBreak>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromelecPriceBreak {
    pub quant: i64,
    pub price: f64,
}

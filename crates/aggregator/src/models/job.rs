use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Column role holding the part number.
pub const ROLE_PART_NUMBER: &str = "partNumber";

/// Column role holding the requested quantity.
pub const ROLE_QUANTITY: &str = "quantity";

/// Tabular pricing request as received from the boundary layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Column index (as a string) -> role name, e.g. `"0" -> "partNumber"`
    pub mapping: HashMap<String, String>,

    /// Row matrix; row 0 is the header
    pub data: Vec<Vec<String>>,

    /// Client-side processing mode. Accepted and ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// One part-number lookup to fan out to every source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupJob {
    /// Trimmed, non-empty part number
    pub part_number: String,

    /// Requested quantity, always at least 1
    pub requested_quantity: u32,

    /// Position of the originating row in the request matrix
    pub row_index: usize,
}

impl LookupJob {
    /// Create a job, falling back to a quantity of 1 when none was given.
    pub fn new(part_number: impl Into<String>, requested_quantity: Option<u32>, row_index: usize) -> Self {
        Self {
            part_number: part_number.into(),
            requested_quantity: requested_quantity.filter(|q| *q > 0).unwrap_or(1),
            row_index,
        }
    }
}

/// Parse a quantity cell.
///
/// Empty, unparsable and non-positive values all mean "one piece".
pub fn parse_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(qty) if qty > 0 => u32::try_from(qty).unwrap_or(u32::MAX),
        _ => 1,
    }
}

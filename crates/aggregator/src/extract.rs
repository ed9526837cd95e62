//! Job extraction from a tabular request.
//!
//! Row 0 of the request matrix is a header and is never turned into a job.
//! Rows without a part number are skipped, not rejected.

use tracing::debug;

use crate::errors::PricingError;
use crate::models::{parse_quantity, LookupJob, ProcessRequest, ROLE_PART_NUMBER, ROLE_QUANTITY};

/// Column positions resolved from the request mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ColumnLayout {
    part_number: usize,
    quantity: Option<usize>,
}

impl ColumnLayout {
    /// Resolve column roles. Keys that are not column indices are ignored;
    /// when a role is mapped more than once the leftmost column wins.
    fn from_request(request: &ProcessRequest) -> Result<Self, PricingError> {
        let column_for = |role: &str| {
            request
                .mapping
                .iter()
                .filter(|(_, value)| value.as_str() == role)
                .filter_map(|(key, _)| key.parse::<usize>().ok())
                .min()
        };

        let part_number = column_for(ROLE_PART_NUMBER)
            .ok_or_else(|| PricingError::validation("partNumber mapping not found"))?;

        Ok(Self {
            part_number,
            quantity: column_for(ROLE_QUANTITY),
        })
    }
}

/// Extract lookup jobs from a request.
///
/// # Errors
///
/// Returns [`PricingError::Validation`] when the matrix has fewer than two
/// rows or no column is mapped to the part-number role.
pub fn extract_jobs(request: &ProcessRequest) -> Result<Vec<LookupJob>, PricingError> {
    if request.data.len() < 2 {
        return Err(PricingError::validation("insufficient data"));
    }

    let layout = ColumnLayout::from_request(request)?;

    let jobs: Vec<LookupJob> = request
        .data
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(row_index, row)| {
            let part_number = row.get(layout.part_number)?.trim();
            if part_number.is_empty() {
                return None;
            }

            let quantity = layout
                .quantity
                .and_then(|column| row.get(column))
                .map(|cell| parse_quantity(cell));

            Some(LookupJob::new(part_number, quantity, row_index))
        })
        .collect();

    debug!(
        "Extracted {} jobs from {} data rows",
        jobs.len(),
        request.data.len() - 1
    );

    Ok(jobs)
}

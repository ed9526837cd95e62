//! Error types for the aggregation engine.
//!
//! This module provides:
//! - [`PricingError`]: Request-level failures that abort the whole request
//! - [`SourceError`]: A single source adapter failing for a single job
//! - [`MalformedField`]: A single unparsable field in a source payload

use thiserror::Error;

use crate::models::SourceId;

/// Errors that abort a pricing request.
///
/// Only problems with the request itself (or with the pipeline configuration)
/// surface here. Source failures are recorded per job and never become a
/// request-level error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The request was malformed or carried too little data.
    /// Nothing is dispatched when this is returned.
    #[error("Validation failed: {message}")]
    Validation {
        /// Description of the validation failure
        message: String,
    },

    /// The pipeline configuration cannot be used.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem
        message: String,
    },
}

impl PricingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Errors reported by a source adapter for one lookup.
///
/// These are recorded on the job's aggregate as strings. They do not fail
/// the job or the other sources queried for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The adapter did not answer within the fan-out timeout.
    #[error("Timeout: {source_id}")]
    Timeout {
        /// The source that timed out
        source_id: SourceId,
    },

    /// The request to the source failed (transport, status code, auth).
    #[error("Request failed: {source_id} - {message}")]
    Request {
        /// The source that failed
        source_id: SourceId,
        /// The failure reported by the adapter
        message: String,
    },

    /// The source answered with a body that could not be decoded.
    #[error("Decode failed: {source_id} - {message}")]
    Decode {
        /// The source whose payload was rejected
        source_id: SourceId,
        /// The decoder's message
        message: String,
    },

    /// The source explicitly reported that the part is unknown.
    #[error("Part not found: {source_id} - {part_number}")]
    NotFound {
        /// The source that reported the miss
        source_id: SourceId,
        /// The part number that was looked up
        part_number: String,
    },
}

impl SourceError {
    /// The source this error belongs to.
    pub fn source_id(&self) -> SourceId {
        match self {
            Self::Timeout { source_id }
            | Self::Request { source_id, .. }
            | Self::Decode { source_id, .. }
            | Self::NotFound { source_id, .. } => *source_id,
        }
    }
}

/// A single field or row in a source payload that could not be interpreted.
///
/// Never surfaced to callers: rows carrying one are dropped by the normalizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedField {
    #[error("price row has {0} fields, expected at least 3")]
    ShortPriceRow(usize),

    #[error("price field is not numeric")]
    NonNumericPrice,

    #[error("price {0} is not representable as a decimal")]
    UnrepresentablePrice(f64),

    #[error("price {0} is outside the supported range")]
    PriceOutOfRange(f64),
}

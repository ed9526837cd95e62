//! Source adapter trait definitions.
//!
//! This module defines the `SourceAdapter` capability the dispatcher fans
//! every lookup out to. The wire-level clients implement it elsewhere.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{RawPayload, SourceId};

/// A distributor data source.
///
/// Implementations own their transport, authentication and client-side
/// timeouts. They must be safe to call concurrently and must not touch
/// caller-owned state.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use partquote_aggregator::source::SourceAdapter;
///
/// struct PromelecClient {
///     login: String,
///     password: String,
/// }
///
/// #[async_trait]
/// impl SourceAdapter for PromelecClient {
///     fn id(&self) -> SourceId {
///         SourceId::Promelec
///     }
///
///     async fn fetch(&self, part_number: &str, quantity: u32) -> Result<Option<RawPayload>, SourceError> {
///         // ... call the RPC endpoint, decode into PromelecResponse
///     }
/// }
/// ```
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Which distributor this adapter talks to.
    ///
    /// Used to key outcomes on the job aggregate and to pick the normalizer.
    fn id(&self) -> SourceId;

    /// Look up a part number.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(payload))` when the source answered with data
    /// - `Ok(None)` when the source answered but had no match
    /// - `Err(SourceError)` when the lookup failed
    async fn fetch(&self, part_number: &str, quantity: u32) -> Result<Option<RawPayload>, SourceError>;
}

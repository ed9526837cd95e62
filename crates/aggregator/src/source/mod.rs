//! Distributor sources.
//!
//! This module contains:
//! - The `SourceAdapter` trait the dispatcher calls for every job
//! - The loosely-typed value used by sources with unstable schemas
//! - One submodule per distributor with its payload models and normalizer
//!
//! The wire clients live outside this crate. Each distributor submodule only
//! knows how to turn that distributor's payload into unified offers and a
//! simplified summary.

mod loose;
mod traits;

pub mod efind;
pub mod getchips;
pub mod promelec;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer};

use crate::errors::MalformedField;

pub use loose::LooseValue;
pub use traits::SourceAdapter;

/// Largest unit price accepted from a payload. Anything above it is treated
/// as garbage; pricing targets for it always fit in a `Decimal`.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000000000);

/// Convert a price as decoded from JSON into a decimal.
pub(crate) fn decimal_price(value: f64) -> Result<Decimal, MalformedField> {
    let price = Decimal::from_f64(value).ok_or(MalformedField::UnrepresentablePrice(value))?;
    if price.abs() > MAX_UNIT_PRICE {
        return Err(MalformedField::PriceOutOfRange(value));
    }
    Ok(price)
}

/// Decode an explicit `null` as the field's default.
///
/// `#[serde(default)]` only covers missing fields; distributors also send
/// `null` for empty lists and strings.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

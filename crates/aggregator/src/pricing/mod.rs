//! Purchasing and sales targets derived from a source list price.
//!
//! The model is fixed:
//!
//! ```text
//! markup                  = list * 1.10
//! target_purchase_price   = list * 0.82
//! delivery_inclusive_cost = target_purchase_price + 1.27
//! target_sale_price       = delivery_inclusive_cost + markup
//! ```
//!
//! The delivery coefficient is added in whatever currency the source quoted,
//! without conversion. For non-USD sources the resulting cost is skewed.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

use crate::models::{Currency, PriceBreak, UnifiedPriceBreak};

/// Flat delivery cost added to every target purchase price.
pub const DELIVERY_COEFFICIENT: Decimal = dec!(1.27);

/// Multiplier applied to the list price to get the sales markup.
pub const MARKUP_FACTOR: Decimal = dec!(1.10);

/// Multiplier applied to the list price to get the target purchase price.
pub const PURCHASE_FACTOR: Decimal = dec!(0.82);

/// Monetary outputs are rounded to cents.
const MONEY_DP: u32 = 2;

/// Targets derived from a single list price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceTargets {
    pub list_price: Decimal,
    pub markup: Decimal,
    pub target_purchase_price: Decimal,
    pub delivery_inclusive_cost: Decimal,
    pub target_sale_price: Decimal,
    pub currency: Currency,
}

/// Round to cents, ties away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive all targets for one list price.
///
/// Intermediate values are kept at full precision; only the outputs are rounded.
/// Returns `None` when a target does not fit in a `Decimal`.
pub fn calculate(list_price: Decimal, currency: impl Into<Currency>) -> Option<PriceTargets> {
    let markup = list_price.checked_mul(MARKUP_FACTOR)?;
    let target_purchase = list_price.checked_mul(PURCHASE_FACTOR)?;
    let delivery_cost = target_purchase.checked_add(DELIVERY_COEFFICIENT)?;
    let target_sale = delivery_cost.checked_add(markup)?;

    Some(PriceTargets {
        list_price: round_money(list_price),
        markup: round_money(markup),
        target_purchase_price: round_money(target_purchase),
        delivery_inclusive_cost: round_money(delivery_cost),
        target_sale_price: round_money(target_sale),
        currency: currency.into(),
    })
}

/// Enrich every price break with its targets, keeping source order.
///
/// Breaks whose targets overflow are dropped.
pub fn build_price_breaks(breaks: &[PriceBreak], currency: &Currency) -> Vec<UnifiedPriceBreak> {
    breaks
        .iter()
        .filter_map(|pb| {
            let Some(targets) = calculate(pb.price, currency.clone()) else {
                debug!("Dropping price break at {} pcs: targets overflow", pb.quantity);
                return None;
            };
            Some(UnifiedPriceBreak {
                quantity: pb.quantity,
                price: targets.list_price,
                currency: targets.currency,
                cost_with_delivery: targets.delivery_inclusive_cost,
                target_price_purchasing: targets.target_purchase_price,
                target_price_sales: targets.target_sale_price,
            })
        })
        .collect()
}

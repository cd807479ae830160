use super::discount::discounted_unit_price;
use crate::offer::{QuantityOffer, QuantityOfferTier};
use serde::Serialize;

/// Aggregate figures for one tier against a base unit price.
///
/// All amounts are exact; rounding happens only when a [`PriceFormatter`]
/// renders them.
///
/// [`PriceFormatter`]: super::PriceFormatter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierTotals {
    pub unit: f64,
    pub total: f64,
    pub original_total: f64,
    pub savings: f64,
    pub has_discount: bool,
}

/// Computes the totals shown for a tier.
///
/// `total` is floored at zero, so `savings` never exceeds `original_total`
/// and is never negative. A tier with non-positive quantity totals zero.
pub fn tier_totals(base_price: f64, tier: &QuantityOfferTier) -> TierTotals {
    let quantity = tier.quantity.max(0) as f64;
    let unit = discounted_unit_price(base_price, tier.discount_type, tier.discount_value);
    let total = (unit * quantity).max(0.0);
    let original_total = base_price * quantity;
    TierTotals {
        unit,
        total,
        original_total,
        savings: (original_total - total).max(0.0),
        has_discount: total < original_total,
    }
}

/// Price of a placed order line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePricing {
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    /// `position` of the tier that priced the line, if any.
    pub tier_position: Option<i64>,
}

/// Prices an order line at checkout time.
///
/// The tier applied is the one with the largest quantity not exceeding the
/// ordered quantity, so ordering 5 units against tiers of 1/2/3 gets the
/// 3-unit discount.
pub fn price_order_line(base_price: f64, quantity: i64, offer: Option<&QuantityOffer>) -> LinePricing {
    let quantity = quantity.max(1);
    let tier = offer.and_then(|o| o.tier_for_quantity(quantity));
    let unit_price = match tier {
        Some(t) => discounted_unit_price(base_price, t.discount_type, t.discount_value).max(0.0),
        None => base_price,
    };
    LinePricing {
        quantity,
        unit_price,
        total_price: unit_price * quantity as f64,
        tier_position: tier.map(|t| t.position),
    }
}

//! Discount math shared by quantity tiers and upsells.

pub mod discount;
pub mod format;
pub mod totals;

pub use discount::{DiscountType, discounted_unit_price};
pub use format::{PriceFormatter, cta_label};
pub use totals::{LinePricing, TierTotals, price_order_line, tier_totals};

pub(crate) use discount::lenient_amount;

//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the tally crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use tally::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let upsells = UpsellDefinition::list_from_json(&std::fs::read_to_string("upsells.json")?)?;
//! let queue = resolve_queue(&upsells, &UpsellSettings::default(), &[]);
//!
//! let mut flow = UpsellFlow::new(queue);
//! for effect in flow.start()? {
//!     println!("{:?}", effect);
//! }
//! # Ok(())
//! # }
//! ```

// Block model and configuration
pub use crate::block::{
    Block, BlockKind, BlockList, BlockType, CheckoutConfig, FieldBlock, InputKind,
    validate_config, validate_submission,
};

// Offers and pricing
pub use crate::offer::{QuantityOffer, QuantityOfferTier, find_offer_for_product};
pub use crate::pricing::{
    DiscountType, PriceFormatter, TierTotals, cta_label, discounted_unit_price, price_order_line,
    tier_totals,
};

// Composition
pub use crate::compose::{
    CheckoutSnapshot, OfferView, PlanOutline, RenderGroup, RenderPlan, compose,
};

// Upsell flow
pub use crate::upsell::{
    AcceptedItem, FlowEffect, FlowState, UpsellDefinition, UpsellFlow, UpsellMode,
    UpsellReporter, UpsellSession, UpsellSettings, resolve_queue,
};

// Error types
pub use crate::error::{BlockEditError, ConfigError, FlowError, ReporterError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

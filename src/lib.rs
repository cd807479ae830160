//! # Tally - Checkout Composition and Upsell Flow Engine
//!
//! **Tally** turns a storefront's persisted checkout configuration into an
//! ordered render plan, prices quantity-discount offers, and drives the
//! sequential post-purchase upsell flow.
//!
//! ## Core Workflow
//!
//! 1.  **Load Configuration**: Parse the stored checkout config, quantity offers and
//!     upsells from JSON (`CheckoutConfig::from_json`, `QuantityOffer::list_from_json`,
//!     `UpsellDefinition::list_from_json`).
//! 2.  **Compose**: Call `compose` (or `CheckoutSnapshot::compose`) to merge the blocks
//!     with the product's quantity offer. The result is a `RenderPlan` of field groups,
//!     single blocks and one quantity-offer marker carrying its priced tier rows.
//! 3.  **Upsell**: After checkout, `resolve_queue` selects the upsells for the purchase,
//!     and an `UpsellFlow` (or the async `UpsellSession`) walks them one at a time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tally::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = CheckoutConfig::from_file("checkout.json")?.merged_with_defaults();
//!     let offer = QuantityOffer::from_json(&std::fs::read_to_string("offer.json")?)?;
//!
//!     let plan = compose(&config.form_blocks, Some(&offer), 89900.0);
//!     println!("{}", PlanOutline::format_plan(&plan));
//!
//!     if let Some(view) = plan.offer() {
//!         if let Some(row) = view.selected_row() {
//!             println!("Preselected: {} for {}", row.tier.display_title(), row.totals.total);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod block;
pub mod compose;
pub mod error;
pub mod offer;
pub mod prelude;
pub mod pricing;
pub mod upsell;

pub use compose::compose;

//! Merges a checkout block list with an optional quantity offer into an
//! ordered render plan.
//!
//! Composition is a pure function of its input: blocks are filtered
//! (disabled and removed types dropped), ordered by `position`, consecutive
//! fields are grouped, and when an offer with at least one tier is present
//! its selector is inserted at a deterministic anchor while `product_card`
//! and `variants` are suppressed.
//!
//! Anchor priority:
//!
//! 1. before the first field group;
//! 2. otherwise before the first `price_summary`;
//! 3. otherwise right after the first `variants` slot;
//! 4. otherwise at the end.

use crate::block::{Block, BlockKind, CheckoutConfig};
use crate::offer::QuantityOffer;
use itertools::Itertools;

mod anchor;
pub mod group;
pub mod outline;
pub mod view;

use anchor::OfferAnchor;
pub use group::{RenderGroup, RenderPlan};
pub use outline::PlanOutline;
pub use view::{OfferView, TierLabels, TierRow};

/// A read-only snapshot of everything composition depends on.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutSnapshot<'a> {
    pub blocks: &'a [Block],
    pub quantity_offer: Option<&'a QuantityOffer>,
    pub base_price: f64,
}

impl<'a> CheckoutSnapshot<'a> {
    pub fn new(blocks: &'a [Block]) -> Self {
        Self {
            blocks,
            quantity_offer: None,
            base_price: 0.0,
        }
    }

    pub fn from_config(config: &'a CheckoutConfig) -> Self {
        Self::new(&config.form_blocks)
    }

    pub fn with_offer(mut self, offer: Option<&'a QuantityOffer>, base_price: f64) -> Self {
        self.quantity_offer = offer;
        self.base_price = base_price;
        self
    }

    pub fn compose(&self) -> RenderPlan {
        compose(self.blocks, self.quantity_offer, self.base_price)
    }
}

/// Builds the render plan for `blocks`.
///
/// Only `position` determines order; the order of `blocks` in the slice is
/// irrelevant except as a tie-break between equal positions. A list with no
/// renderable blocks yields an empty plan, even when an offer is present.
pub fn compose(blocks: &[Block], offer: Option<&QuantityOffer>, base_price: f64) -> RenderPlan {
    let offer = offer.filter(|o| o.has_tiers());
    let ordered: Vec<&Block> = blocks
        .iter()
        .filter(|b| b.is_renderable())
        .sorted_by_key(|b| b.position)
        .collect();

    // Nothing renderable means nothing to anchor the offer to.
    if ordered.is_empty() {
        tracing::debug!(offer = offer.is_some(), "no renderable blocks; empty render plan");
        return RenderPlan::default();
    }

    let anchor = offer.map(|_| OfferAnchor::locate(&ordered));
    let mut marker = offer.map(|o| OfferView::new(o, base_price));

    let mut groups: Vec<RenderGroup> = Vec::with_capacity(ordered.len() + 1);
    let mut pending: Vec<Block> = Vec::new();

    for block in ordered {
        if let BlockKind::Field(_) = block.kind {
            if pending.is_empty() && anchor == Some(OfferAnchor::BeforeFirstField) {
                insert_marker(&mut groups, &mut marker);
            }
            pending.push(block.clone());
            continue;
        }

        flush_fields(&mut groups, &mut pending);

        if matches!(block.kind, BlockKind::PriceSummary)
            && anchor == Some(OfferAnchor::BeforePriceSummary)
        {
            insert_marker(&mut groups, &mut marker);
        }

        let suppressed = offer.is_some()
            && matches!(block.kind, BlockKind::ProductCard | BlockKind::Variants);
        if !suppressed {
            groups.push(RenderGroup::Block(block.clone()));
        }

        if matches!(block.kind, BlockKind::Variants) && anchor == Some(OfferAnchor::AfterVariants) {
            insert_marker(&mut groups, &mut marker);
        }
    }
    flush_fields(&mut groups, &mut pending);
    insert_marker(&mut groups, &mut marker);

    tracing::debug!(
        groups = groups.len(),
        offer = offer.is_some(),
        anchor = ?anchor,
        "composed checkout render plan"
    );

    RenderPlan { groups }
}

fn flush_fields(groups: &mut Vec<RenderGroup>, pending: &mut Vec<Block>) {
    if !pending.is_empty() {
        groups.push(RenderGroup::FieldGroup(std::mem::take(pending)));
    }
}

/// Inserts the marker at most once.
fn insert_marker(groups: &mut Vec<RenderGroup>, marker: &mut Option<OfferView>) {
    if let Some(view) = marker.take() {
        groups.push(RenderGroup::QuantityOffer(view));
    }
}

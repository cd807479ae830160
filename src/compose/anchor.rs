use crate::block::{Block, BlockType};

/// Where the quantity-offer marker goes, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OfferAnchor {
    BeforeFirstField,
    BeforePriceSummary,
    AfterVariants,
    End,
}

impl OfferAnchor {
    /// Picks the anchor from the renderable, position-ordered blocks.
    pub(super) fn locate(ordered: &[&Block]) -> Self {
        let has = |t: BlockType| ordered.iter().any(|b| b.block_type() == t);
        if has(BlockType::Field) {
            OfferAnchor::BeforeFirstField
        } else if has(BlockType::PriceSummary) {
            OfferAnchor::BeforePriceSummary
        } else if has(BlockType::Variants) {
            OfferAnchor::AfterVariants
        } else {
            OfferAnchor::End
        }
    }
}

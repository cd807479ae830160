use super::view::OfferView;
use crate::block::Block;

/// One unit of the composed output.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderGroup {
    /// A single non-field block.
    Block(Block),
    /// A contiguous run of field blocks rendered as one card.
    FieldGroup(Vec<Block>),
    /// The quantity-offer selector.
    QuantityOffer(OfferView),
}

impl RenderGroup {
    /// Short tag for the group: the block's `type`, or `_field_group` /
    /// `_quantity_offer` for synthesized groups.
    pub fn tag(&self) -> &'static str {
        match self {
            RenderGroup::Block(block) => block.block_type().as_str(),
            RenderGroup::FieldGroup(_) => "_field_group",
            RenderGroup::QuantityOffer(_) => "_quantity_offer",
        }
    }
}

/// The ordered list of render groups for one checkout form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPlan {
    pub groups: Vec<RenderGroup>,
}

impl RenderPlan {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderGroup> {
        self.groups.iter()
    }

    pub fn tags(&self) -> Vec<&'static str> {
        self.groups.iter().map(RenderGroup::tag).collect()
    }

    pub fn offer(&self) -> Option<&OfferView> {
        self.groups.iter().find_map(|g| match g {
            RenderGroup::QuantityOffer(view) => Some(view),
            _ => None,
        })
    }

    /// Index of the quantity-offer marker, if one was inserted.
    pub fn offer_index(&self) -> Option<usize> {
        self.groups
            .iter()
            .position(|g| matches!(g, RenderGroup::QuantityOffer(_)))
    }
}

impl<'a> IntoIterator for &'a RenderPlan {
    type Item = &'a RenderGroup;
    type IntoIter = std::slice::Iter<'a, RenderGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

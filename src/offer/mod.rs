//! Quantity-discount offers and their tiers.

use crate::error::ConfigError;
use crate::pricing::{DiscountType, lenient_amount};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One selectable purchase quantity inside a [`QuantityOffer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityOfferTier {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub is_preselected: bool,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub discount_value: f64,

    #[serde(default)]
    pub label_text: Option<String>,
    #[serde(default)]
    pub label_bg_color: Option<String>,
    #[serde(default)]
    pub label_text_color: Option<String>,
    #[serde(default)]
    pub label_top_position: Option<String>,
    #[serde(default)]
    pub label_inner_text: Option<String>,
    #[serde(default)]
    pub label_inner_bg_color: Option<String>,
    #[serde(default)]
    pub label_inner_text_color: Option<String>,
    #[serde(default)]
    pub price_color: Option<String>,
    #[serde(default)]
    pub hide_compare_price: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl QuantityOfferTier {
    pub fn new(quantity: i64, position: i64) -> Self {
        Self {
            id: None,
            title: None,
            quantity,
            position,
            is_preselected: false,
            discount_type: DiscountType::None,
            discount_value: 0.0,
            label_text: None,
            label_bg_color: None,
            label_text_color: None,
            label_top_position: None,
            label_inner_text: None,
            label_inner_bg_color: None,
            label_inner_text_color: None,
            price_color: None,
            hide_compare_price: false,
            image_url: None,
        }
    }

    pub fn with_discount(mut self, discount_type: DiscountType, value: f64) -> Self {
        self.discount_type = discount_type;
        self.discount_value = value;
        self
    }

    pub fn preselected(mut self) -> Self {
        self.is_preselected = true;
        self
    }

    /// Tiers that cannot be bought are ignored for selection and order pricing.
    pub fn is_usable(&self) -> bool {
        self.quantity >= 1
    }

    /// The tier's title, or "N unidad(es)" when none is configured.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ if self.quantity == 1 => "1 unidad".to_string(),
            _ => format!("{} unidades", self.quantity),
        }
    }
}

/// A named quantity-discount campaign attached to one or more products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityOffer {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub product_ids: Vec<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub tiers: Vec<QuantityOfferTier>,

    #[serde(default)]
    pub header_text: Option<String>,
    #[serde(default)]
    pub header_bg_color: Option<String>,
    #[serde(default)]
    pub header_text_color: Option<String>,
    #[serde(default = "default_true")]
    pub show_savings: bool,
    #[serde(default)]
    pub show_per_unit: bool,
    #[serde(default)]
    pub hide_product_image: bool,
}

fn default_true() -> bool {
    true
}

impl QuantityOffer {
    pub fn new(name: &str, tiers: Vec<QuantityOfferTier>) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            product_ids: Vec::new(),
            is_active: true,
            tiers,
            header_text: None,
            header_bg_color: None,
            header_text_color: None,
            show_savings: true,
            show_per_unit: false,
            hide_product_image: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a list of offers, as returned for a store.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// An offer takes part in composition only when it has at least one tier.
    pub fn has_tiers(&self) -> bool {
        !self.tiers.is_empty()
    }

    /// Tiers in display order: ascending `position`, stable for ties.
    pub fn sorted_tiers(&self) -> Vec<&QuantityOfferTier> {
        self.tiers.iter().sorted_by_key(|t| t.position).collect()
    }

    /// Index into [`sorted_tiers`](Self::sorted_tiers) of the tier selected
    /// by default: the first usable preselected tier, else the first usable
    /// tier. `None` when no tier is usable.
    pub fn default_tier_index(&self) -> Option<usize> {
        let sorted = self.sorted_tiers();
        sorted
            .iter()
            .position(|t| t.is_usable() && t.is_preselected)
            .or_else(|| sorted.iter().position(|t| t.is_usable()))
    }

    pub fn default_tier(&self) -> Option<&QuantityOfferTier> {
        let index = self.default_tier_index()?;
        self.sorted_tiers().get(index).copied()
    }

    /// The tier that prices an order of `quantity` units: the largest tier
    /// quantity not exceeding it.
    pub fn tier_for_quantity(&self, quantity: i64) -> Option<&QuantityOfferTier> {
        self.tiers
            .iter()
            .filter(|t| t.is_usable() && t.quantity <= quantity)
            .rev()
            .max_by_key(|t| t.quantity)
    }

    pub fn applies_to(&self, product_id: Uuid) -> bool {
        self.product_ids.contains(&product_id)
    }
}

/// First active offer with tiers that lists `product_id`.
pub fn find_offer_for_product(offers: &[QuantityOffer], product_id: Uuid) -> Option<&QuantityOffer> {
    offers
        .iter()
        .find(|o| o.is_active && o.has_tiers() && o.applies_to(product_id))
}

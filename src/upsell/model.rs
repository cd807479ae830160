use crate::block::model::null_as_default;
use crate::error::ConfigError;
use crate::pricing::{DiscountType, discounted_unit_price, lenient_amount};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether an upsell fires for every purchase or only for listed products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    #[default]
    All,
    Specific,
}

/// Whether accepted upsells join the in-progress cart or mutate a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsellMode {
    PrePurchase,
    #[default]
    PostPurchase,
}

/// Store-wide upsell settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpsellSettings {
    pub upsell_type: UpsellMode,
    pub max_upsells_per_order: usize,
    pub is_active: bool,
}

impl Default for UpsellSettings {
    fn default() -> Self {
        Self {
            upsell_type: UpsellMode::PostPurchase,
            max_upsells_per_order: 2,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price_override: Option<f64>,
}

/// The product an upsell offers, resolved by the host before the flow starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsellProduct {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ProductVariant>,
}

impl UpsellProduct {
    pub fn new(id: Uuid, name: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: None,
            price,
            image_url: None,
            variants: Vec::new(),
        }
    }

    pub fn variant(&self, id: Uuid) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

/// Countdown shown under an upsell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Countdown {
    #[serde(rename = "countdown_hours", default)]
    pub hours: u32,
    #[serde(rename = "countdown_minutes", default)]
    pub minutes: u32,
    #[serde(rename = "countdown_seconds", default)]
    pub seconds: u32,
}

impl Countdown {
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn has_countdown(&self) -> bool {
        self.total_seconds() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddButtonStyle {
    #[serde(rename = "add_button_text", default = "default_add_text")]
    pub text: String,
    #[serde(rename = "add_button_animation", default)]
    pub animation: Option<String>,
    #[serde(rename = "add_button_icon", default)]
    pub icon: Option<String>,
    #[serde(rename = "add_button_bg_color", default)]
    pub bg_color: Option<String>,
    #[serde(rename = "add_button_text_color", default)]
    pub text_color: Option<String>,
    #[serde(rename = "add_button_font_size", default)]
    pub font_size: Option<u32>,
    #[serde(rename = "add_button_border_radius", default)]
    pub border_radius: Option<u32>,
    #[serde(rename = "add_button_border_width", default)]
    pub border_width: Option<u32>,
    #[serde(rename = "add_button_border_color", default)]
    pub border_color: Option<String>,
    #[serde(rename = "add_button_shadow", default)]
    pub shadow: Option<f64>,
}

fn default_add_text() -> String {
    "Agregar a tu pedido".to_string()
}

impl Default for AddButtonStyle {
    fn default() -> Self {
        Self {
            text: default_add_text(),
            animation: None,
            icon: None,
            bg_color: None,
            text_color: None,
            font_size: None,
            border_radius: None,
            border_width: None,
            border_color: None,
            shadow: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclineButtonStyle {
    #[serde(rename = "decline_button_text", default = "default_decline_text")]
    pub text: String,
    #[serde(rename = "decline_button_bg_color", default)]
    pub bg_color: Option<String>,
    #[serde(rename = "decline_button_text_color", default)]
    pub text_color: Option<String>,
    #[serde(rename = "decline_button_font_size", default)]
    pub font_size: Option<u32>,
    #[serde(rename = "decline_button_border_radius", default)]
    pub border_radius: Option<u32>,
    #[serde(rename = "decline_button_border_width", default)]
    pub border_width: Option<u32>,
    #[serde(rename = "decline_button_border_color", default)]
    pub border_color: Option<String>,
    #[serde(rename = "decline_button_shadow", default)]
    pub shadow: Option<f64>,
}

fn default_decline_text() -> String {
    "No gracias, completar mi pedido".to_string()
}

impl Default for DeclineButtonStyle {
    fn default() -> Self {
        Self {
            text: default_decline_text(),
            bg_color: None,
            text_color: None,
            font_size: None,
            border_radius: None,
            border_width: None,
            border_color: None,
            shadow: None,
        }
    }
}

/// One post-checkout cross-sell offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsellDefinition {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i64,

    #[serde(default)]
    pub trigger_type: TriggerType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trigger_product_ids: Vec<Uuid>,

    /// `None` when the product was deleted or never set; such upsells are
    /// skipped by the flow.
    #[serde(default)]
    pub upsell_product: Option<UpsellProduct>,

    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub discount_value: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(default)]
    pub product_title_override: Option<String>,
    #[serde(default)]
    pub product_description_override: Option<String>,

    #[serde(default)]
    pub show_quantity_selector: bool,
    #[serde(default)]
    pub hide_close_icon: bool,
    #[serde(default)]
    pub hide_variant_selector: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub countdown_label: String,
    #[serde(flatten)]
    pub countdown: Countdown,

    #[serde(flatten)]
    pub add_button: AddButtonStyle,
    #[serde(flatten)]
    pub decline_button: DeclineButtonStyle,
}

fn default_true() -> bool {
    true
}

impl UpsellDefinition {
    pub fn new(id: Uuid, upsell_product: Option<UpsellProduct>) -> Self {
        Self {
            id,
            name: String::new(),
            is_active: true,
            priority: 0,
            trigger_type: TriggerType::All,
            trigger_product_ids: Vec::new(),
            upsell_product,
            discount_type: DiscountType::None,
            discount_value: 0.0,
            title: "Agregar {product_name} a tu pedido!".to_string(),
            subtitle: String::new(),
            product_title_override: None,
            product_description_override: None,
            show_quantity_selector: false,
            hide_close_icon: false,
            hide_variant_selector: false,
            countdown_label: String::new(),
            countdown: Countdown::default(),
            add_button: AddButtonStyle::default(),
            decline_button: DeclineButtonStyle::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses an upsell list as returned for a store.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_discount(mut self, discount_type: DiscountType, value: f64) -> Self {
        self.discount_type = discount_type;
        self.discount_value = value;
        self
    }

    pub fn triggered_by(mut self, product_ids: Vec<Uuid>) -> Self {
        self.trigger_type = TriggerType::Specific;
        self.trigger_product_ids = product_ids;
        self
    }

    /// Whether the flow may show this upsell at all.
    pub fn is_showable(&self) -> bool {
        self.upsell_product.is_some()
    }

    /// Whether a purchase of any of `purchased` triggers this upsell.
    pub fn is_triggered_by(&self, purchased: &[Uuid]) -> bool {
        match self.trigger_type {
            TriggerType::All => true,
            TriggerType::Specific => purchased
                .iter()
                .any(|id| self.trigger_product_ids.contains(id)),
        }
    }

    /// Name shown to the shopper: the override, else the product name.
    pub fn display_name(&self) -> Option<&str> {
        let product = self.upsell_product.as_ref()?;
        Some(
            self.product_title_override
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(product.name.as_str()),
        )
    }

    /// Undiscounted unit price: the variant override, else the product price.
    pub fn base_price(&self, variant: Option<&ProductVariant>) -> Option<f64> {
        let product = self.upsell_product.as_ref()?;
        Some(variant.and_then(|v| v.price_override).unwrap_or(product.price))
    }

    pub fn unit_price(&self, variant: Option<&ProductVariant>) -> Option<f64> {
        self.base_price(variant)
            .map(|base| discounted_unit_price(base, self.discount_type, self.discount_value).max(0.0))
    }

    /// Builds the record appended to the accepted list when the shopper
    /// accepts this upsell.
    ///
    /// `variant_id` picks a variant of the upsell product; an unknown or
    /// missing id falls back to the first variant, as the popup preselects
    /// it. Quantity is at least one.
    pub fn accept_item(&self, variant_id: Option<Uuid>, quantity: i64) -> Option<AcceptedItem> {
        let product = self.upsell_product.as_ref()?;
        let variant = variant_id
            .and_then(|id| product.variant(id))
            .or_else(|| product.variants.first());
        Some(AcceptedItem {
            product_id: product.id,
            variant_id: variant.map(|v| v.id),
            quantity: quantity.max(1),
            upsell_id: self.id,
            unit_price: self.unit_price(variant)?,
            product_name: self.display_name()?.to_string(),
        })
    }

    /// Substitutes `{product_name}` and `{first_name}` in `template`.
    ///
    /// A missing or blank customer name reads as "Cliente".
    pub fn render_text(&self, template: &str, first_name: Option<&str>) -> String {
        let first_name = first_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Cliente");
        template
            .replace("{product_name}", self.display_name().unwrap_or_default())
            .replace("{first_name}", first_name)
    }

    pub fn rendered_title(&self, first_name: Option<&str>) -> String {
        self.render_text(&self.title, first_name)
    }

    pub fn rendered_subtitle(&self, first_name: Option<&str>) -> String {
        self.render_text(&self.subtitle, first_name)
    }
}

/// An upsell the shopper accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedItem {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub quantity: i64,
    pub upsell_id: Uuid,
    pub unit_price: f64,
    pub product_name: String,
}

/// Payload of the "append item to order" call made in post-purchase mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemAppend {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub quantity: i64,
    pub upsell_id: Uuid,
}

impl From<&AcceptedItem> for OrderItemAppend {
    fn from(item: &AcceptedItem) -> Self {
        Self {
            product_id: item.product_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
            upsell_id: item.upsell_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> UpsellProduct {
        let mut product = UpsellProduct::new(Uuid::from_u128(7), "Crema", 40000.0);
        product.variants.push(ProductVariant {
            id: Uuid::from_u128(8),
            name: "Grande".to_string(),
            price_override: Some(50000.0),
        });
        product
    }

    #[test]
    fn accept_item_prefers_first_variant_price() {
        let upsell = UpsellDefinition::new(Uuid::from_u128(1), Some(product()))
            .with_discount(DiscountType::Percentage, 10.0);
        let item = upsell.accept_item(None, 0).unwrap();
        assert_eq!(item.variant_id, Some(Uuid::from_u128(8)));
        assert_eq!(item.quantity, 1);
        assert!((item.unit_price - 45000.0).abs() < 1e-9);
    }

    #[test]
    fn render_text_defaults_customer_name() {
        let mut upsell = UpsellDefinition::new(Uuid::from_u128(1), Some(product()));
        upsell.product_title_override = Some("Crema X".to_string());
        assert_eq!(
            upsell.render_text("{first_name}, lleva {product_name}", Some("  ")),
            "Cliente, lleva Crema X"
        );
    }

    #[test]
    fn settings_fill_defaults() {
        let settings: UpsellSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, UpsellSettings::default());
        assert_eq!(settings.max_upsells_per_order, 2);
    }
}

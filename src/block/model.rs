use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One configurable unit of a checkout form.
///
/// The shared `position`/`enabled` base is flattened next to the `type` tag,
/// matching the JSON the configuration editor persists:
///
/// ```json
/// { "type": "field", "position": 3, "enabled": true, "field_key": "city", "label": "Ciudad" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, deserialize_with = "lenient_position")]
    pub position: i64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub kind: BlockKind,
}

fn default_enabled() -> bool {
    true
}

/// Stored configurations sometimes carry explicit `null` where a value is optional.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Positions written by the editor may arrive as integral floats (`1.0`).
fn lenient_position<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Position {
        Integer(i64),
        Float(f64),
    }

    match Option::<Position>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Position::Integer(n)) => Ok(n),
        Some(Position::Float(f)) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        Some(Position::Float(f)) => Err(serde::de::Error::custom(format!(
            "position must be a whole number, got {f}"
        ))),
    }
}

/// The closed set of block payloads, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Field(FieldBlock),
    CustomText(CustomTextBlock),
    Image(ImageBlock),
    Divider(DividerBlock),
    Spacer(SpacerBlock),
    ProductCard,
    Variants,
    PriceSummary,
    TrustBadge(TrustBadgeBlock),
    SubmitButton(SubmitButtonBlock),

    // Removed from the editor; kept readable so stored configurations round-trip.
    Offers(LegacyPayload),
    ShippingInfo(LegacyPayload),
    PaymentMethod(LegacyPayload),
}

/// Discriminant of a [`BlockKind`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Field,
    CustomText,
    Image,
    Divider,
    Spacer,
    ProductCard,
    Variants,
    PriceSummary,
    TrustBadge,
    SubmitButton,
    Offers,
    ShippingInfo,
    PaymentMethod,
}

impl BlockType {
    pub const SYSTEM: [BlockType; 4] = [
        BlockType::ProductCard,
        BlockType::Variants,
        BlockType::PriceSummary,
        BlockType::SubmitButton,
    ];

    /// The tag used in persisted JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Field => "field",
            BlockType::CustomText => "custom_text",
            BlockType::Image => "image",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::ProductCard => "product_card",
            BlockType::Variants => "variants",
            BlockType::PriceSummary => "price_summary",
            BlockType::TrustBadge => "trust_badge",
            BlockType::SubmitButton => "submit_button",
            BlockType::Offers => "offers",
            BlockType::ShippingInfo => "shipping_info",
            BlockType::PaymentMethod => "payment_method",
        }
    }

    pub fn is_system(&self) -> bool {
        Self::SYSTEM.contains(self)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            BlockType::Offers | BlockType::ShippingInfo | BlockType::PaymentMethod
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Field(_) => BlockType::Field,
            BlockKind::CustomText(_) => BlockType::CustomText,
            BlockKind::Image(_) => BlockType::Image,
            BlockKind::Divider(_) => BlockType::Divider,
            BlockKind::Spacer(_) => BlockType::Spacer,
            BlockKind::ProductCard => BlockType::ProductCard,
            BlockKind::Variants => BlockType::Variants,
            BlockKind::PriceSummary => BlockType::PriceSummary,
            BlockKind::TrustBadge(_) => BlockType::TrustBadge,
            BlockKind::SubmitButton(_) => BlockType::SubmitButton,
            BlockKind::Offers(_) => BlockType::Offers,
            BlockKind::ShippingInfo(_) => BlockType::ShippingInfo,
            BlockKind::PaymentMethod(_) => BlockType::PaymentMethod,
        }
    }

    pub fn is_system(&self) -> bool {
        self.block_type().is_system()
    }

    pub fn is_legacy(&self) -> bool {
        self.block_type().is_legacy()
    }
}

impl Block {
    pub fn new(position: i64, kind: BlockKind) -> Self {
        Self {
            position,
            enabled: true,
            kind,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    pub fn as_field(&self) -> Option<&FieldBlock> {
        match &self.kind {
            BlockKind::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Whether the block takes part in rendering at all.
    pub fn is_renderable(&self) -> bool {
        self.enabled && !self.kind.is_legacy()
    }
}

/// Input control used by a field block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Text,
    Tel,
    Email,
    Number,
    Textarea,
    Select,
    Checkbox,
    Date,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub field_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub input_type: InputKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<String>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
}

impl FieldBlock {
    pub fn new(field_key: &str, label: &str) -> Self {
        Self {
            field_key: field_key.to_string(),
            label: label.to_string(),
            placeholder: label.to_string(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_input(mut self, input_type: InputKind) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomTextBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt: String,
    #[serde(default)]
    pub max_width: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DividerBlock {
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacerBlock {
    #[serde(default = "default_spacer_height", deserialize_with = "spacer_height")]
    pub height: u32,
}

fn default_spacer_height() -> u32 {
    16
}

fn spacer_height<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_spacer_height))
}

impl Default for SpacerBlock {
    fn default() -> Self {
        Self {
            height: default_spacer_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrustBadgeBlock {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmitButtonBlock {
    #[serde(default)]
    pub text: Option<String>,
}

/// Opaque payload of a removed block type, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyPayload {
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

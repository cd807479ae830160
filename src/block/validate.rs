use super::model::{Block, BlockType, FieldBlock, InputKind};
use crate::offer::QuantityOffer;
use ahash::{AHashMap, AHashSet};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d-]{7,15}$").expect("static phone pattern"));

/// A non-fatal finding about a stored configuration.
///
/// Configurations with issues still compose; these exist so an editor can
/// warn before saving.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    MissingSystemBlock(BlockType),
    DuplicateFieldKey(String),
    EmptyFieldKey { position: i64 },
    OfferWithoutTiers,
    NonPositiveTierQuantity { tier_position: i64, quantity: i64 },
    NegativeDiscount { tier_position: i64, value: f64 },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::MissingSystemBlock(t) => write!(f, "system block '{}' is missing", t),
            ConfigIssue::DuplicateFieldKey(key) => write!(f, "field key '{}' is used more than once", key),
            ConfigIssue::EmptyFieldKey { position } => {
                write!(f, "field at position {} has no field_key", position)
            }
            ConfigIssue::OfferWithoutTiers => write!(f, "quantity offer has no tiers"),
            ConfigIssue::NonPositiveTierQuantity {
                tier_position,
                quantity,
            } => write!(
                f,
                "tier at position {} has non-positive quantity {}",
                tier_position, quantity
            ),
            ConfigIssue::NegativeDiscount {
                tier_position,
                value,
            } => write!(
                f,
                "tier at position {} has negative discount {}",
                tier_position, value
            ),
        }
    }
}

/// Inspects a block list and an optional offer for degenerate configuration.
pub fn validate_config(blocks: &[Block], offer: Option<&QuantityOffer>) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    let present: AHashSet<BlockType> = blocks.iter().map(Block::block_type).collect();
    issues.extend(
        BlockType::SYSTEM
            .iter()
            .filter(|t| !present.contains(*t))
            .map(|t| ConfigIssue::MissingSystemBlock(*t)),
    );

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut reported: AHashSet<&str> = AHashSet::new();
    for block in blocks {
        let Some(field) = block.as_field() else {
            continue;
        };
        if field.field_key.trim().is_empty() {
            issues.push(ConfigIssue::EmptyFieldKey {
                position: block.position,
            });
        } else if !seen.insert(field.field_key.as_str()) && reported.insert(field.field_key.as_str()) {
            issues.push(ConfigIssue::DuplicateFieldKey(field.field_key.clone()));
        }
    }

    if let Some(offer) = offer {
        if offer.tiers.is_empty() {
            issues.push(ConfigIssue::OfferWithoutTiers);
        }
        for tier in offer.sorted_tiers() {
            if tier.quantity < 1 {
                issues.push(ConfigIssue::NonPositiveTierQuantity {
                    tier_position: tier.position,
                    quantity: tier.quantity,
                });
            }
            if tier.discount_value < 0.0 {
                issues.push(ConfigIssue::NegativeDiscount {
                    tier_position: tier.position,
                    value: tier.discount_value,
                });
            }
        }
    }

    issues
}

/// Why a submitted value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidEmail,
    InvalidPhone,
    NotAnOption,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field_key: String,
    pub kind: ViolationKind,
}

impl FieldViolation {
    /// Shopper-facing message, in the storefront's language.
    pub fn message(&self) -> String {
        match self.kind {
            ViolationKind::Required => "Este campo es obligatorio".to_string(),
            ViolationKind::TooShort { min } => format!("Debe tener al menos {} caracteres", min),
            ViolationKind::TooLong { max } => format!("Debe tener como maximo {} caracteres", max),
            ViolationKind::InvalidEmail => "Correo electronico invalido".to_string(),
            ViolationKind::InvalidPhone => "Numero de telefono invalido".to_string(),
            ViolationKind::NotAnOption => "Selecciona una opcion valida".to_string(),
        }
    }
}

/// Validates shopper input against the enabled field blocks, in position order.
///
/// At most one violation is reported per field.
pub fn validate_submission(
    blocks: &[Block],
    values: &AHashMap<String, String>,
) -> Vec<FieldViolation> {
    let mut fields: Vec<(i64, &FieldBlock)> = blocks
        .iter()
        .filter(|b| b.is_renderable())
        .filter_map(|b| b.as_field().map(|f| (b.position, f)))
        .collect();
    fields.sort_by_key(|(position, _)| *position);

    fields
        .into_iter()
        .filter_map(|(_, field)| {
            let value = values.get(&field.field_key).map(|v| v.trim()).unwrap_or("");
            check_field(field, value).map(|kind| FieldViolation {
                field_key: field.field_key.clone(),
                kind,
            })
        })
        .collect()
}

fn check_field(field: &FieldBlock, value: &str) -> Option<ViolationKind> {
    if value.is_empty() || (field.input_type == InputKind::Checkbox && !is_checked(value)) {
        return field.required.then_some(ViolationKind::Required);
    }

    let len = value.chars().count();
    if let Some(min) = field.min_length.filter(|min| len < *min) {
        return Some(ViolationKind::TooShort { min });
    }
    if let Some(max) = field.max_length.filter(|max| len > *max) {
        return Some(ViolationKind::TooLong { max });
    }

    match field.input_type {
        InputKind::Email if !EMAIL_RE.is_match(value) => Some(ViolationKind::InvalidEmail),
        InputKind::Tel if !is_phone(value) => Some(ViolationKind::InvalidPhone),
        InputKind::Select if !field.options.is_empty() && !field.options.iter().any(|o| o == value) => {
            Some(ViolationKind::NotAnOption)
        }
        _ => None,
    }
}

fn is_checked(value: &str) -> bool {
    matches!(value, "true" | "on" | "1")
}

fn is_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}

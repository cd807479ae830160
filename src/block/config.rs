use super::model::{Block, BlockKind, FieldBlock, InputKind, SubmitButtonBlock, TrustBadgeBlock, null_as_default};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;

/// A checkout form configuration as persisted by the configuration editor.
///
/// Keys missing from the stored JSON take the storefront defaults. Only the
/// keys that influence composition or display-boundary text are modeled;
/// styling keys are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub form_blocks: Vec<Block>,
    pub form_title: String,
    pub cta_text: String,
    pub cta_subtitle: Option<String>,
    pub cta_sticky: bool,
    pub success_message: String,
    pub trust_badge_text: String,
    pub show_product_image: bool,
    pub show_price_summary: bool,
    pub show_trust_badges: bool,
    pub country: String,
    pub currency: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            form_blocks: default_blocks(),
            form_title: "Datos de envio".to_string(),
            cta_text: "Completar pedido - {order_total}".to_string(),
            cta_subtitle: None,
            cta_sticky: true,
            success_message: "Tu pedido ha sido recibido con exito.".to_string(),
            trust_badge_text: "Pago seguro contraentrega".to_string(),
            show_product_image: true,
            show_price_summary: true,
            show_trust_badges: true,
            country: "CO".to_string(),
            currency: "COP".to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Parses a stored configuration. Missing keys take storefront defaults,
    /// but an explicitly empty `form_blocks` stays empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Storefront merge: an empty block list is replaced by the default form.
    pub fn merged_with_defaults(mut self) -> Self {
        if self.form_blocks.is_empty() {
            self.form_blocks = default_blocks();
        }
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.form_blocks = blocks;
        self
    }
}

/// The form a new store starts with.
pub fn default_blocks() -> Vec<Block> {
    let fields = [
        FieldBlock::new("customer_first_name", "Nombre")
            .required()
            .with_icon("user"),
        FieldBlock::new("customer_last_name", "Apellido")
            .required()
            .with_icon("user"),
        FieldBlock::new("customer_phone", "Telefono")
            .required()
            .with_icon("phone")
            .with_input(InputKind::Tel),
        FieldBlock::new("address", "Direccion")
            .required()
            .with_icon("map-pin"),
        FieldBlock::new("address_extra", "Complemento direccion").with_icon("map-pin"),
        FieldBlock::new("state", "Departamento")
            .required()
            .with_icon("map-pin"),
        FieldBlock::new("city", "Ciudad").required().with_icon("map-pin"),
        FieldBlock::new("email", "Correo electronico")
            .with_icon("mail")
            .with_input(InputKind::Email),
        FieldBlock::new("notes", "Notas adicionales")
            .with_icon("note")
            .with_input(InputKind::Textarea),
    ];

    let mut blocks = vec![
        Block::new(0, BlockKind::ProductCard),
        Block::new(1, BlockKind::Variants),
        Block::new(2, BlockKind::PriceSummary),
    ];
    blocks.extend(
        fields
            .into_iter()
            .map(BlockKind::Field)
            .zip(3..)
            .map(|(kind, position)| Block::new(position, kind)),
    );
    let next = blocks.len() as i64;
    blocks.push(Block::new(
        next,
        BlockKind::TrustBadge(TrustBadgeBlock::default()),
    ));
    blocks.push(Block::new(
        next + 1,
        BlockKind::SubmitButton(SubmitButtonBlock::default()),
    ));
    blocks
}

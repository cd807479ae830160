//! Common test fixtures for checkout blocks, offers and upsells.
use std::sync::Mutex;
use tally::block::{Block, BlockKind, FieldBlock};
use tally::error::ReporterError;
use tally::offer::{QuantityOffer, QuantityOfferTier};
use tally::pricing::DiscountType;
use tally::upsell::{OrderItemAppend, UpsellDefinition, UpsellProduct, UpsellReporter};
use uuid::Uuid;

/// An optional text field at `position`.
#[allow(dead_code)]
pub fn field(position: i64, key: &str) -> Block {
    Block::new(position, BlockKind::Field(FieldBlock::new(key, key)))
}

#[allow(dead_code)]
pub fn system(position: i64, kind: BlockKind) -> Block {
    Block::new(position, kind)
}

#[allow(dead_code)]
pub fn submit(position: i64) -> Block {
    Block::new(position, BlockKind::SubmitButton(Default::default()))
}

#[allow(dead_code)]
pub fn custom_text(position: i64, text: &str) -> Block {
    Block::new(
        position,
        BlockKind::CustomText(tally::block::CustomTextBlock {
            text: text.to_string(),
            ..Default::default()
        }),
    )
}

/// Tiers `[1 @ 0%, 2 @ 10% (preselected), 3 @ 20%]`.
#[allow(dead_code)]
pub fn tiered_offer() -> QuantityOffer {
    QuantityOffer::new(
        "Lleva mas",
        vec![
            QuantityOfferTier::new(1, 0).with_discount(DiscountType::Percentage, 0.0),
            QuantityOfferTier::new(2, 1)
                .with_discount(DiscountType::Percentage, 10.0)
                .preselected(),
            QuantityOfferTier::new(3, 2).with_discount(DiscountType::Percentage, 20.0),
        ],
    )
}

/// Upsell `n` with a 30 000 product, or with no product when `with_product` is false.
#[allow(dead_code)]
pub fn upsell(n: u128, with_product: bool) -> UpsellDefinition {
    let product = with_product
        .then(|| UpsellProduct::new(Uuid::from_u128(1000 + n), &format!("Producto {}", n), 30000.0));
    UpsellDefinition::new(Uuid::from_u128(n), product)
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Reporter that records every call and optionally fails all of them.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingReporter {
    pub fail: bool,
    pub impressions: Mutex<Vec<Uuid>>,
    pub appends: Mutex<Vec<(Uuid, OrderItemAppend)>>,
}

#[allow(dead_code)]
impl RecordingReporter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn impressions(&self) -> Vec<Uuid> {
        self.impressions.lock().unwrap().clone()
    }

    pub fn appends(&self) -> Vec<(Uuid, OrderItemAppend)> {
        self.appends.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl UpsellReporter for RecordingReporter {
    async fn report_impression(&self, upsell_id: Uuid) -> Result<(), ReporterError> {
        self.impressions.lock().unwrap().push(upsell_id);
        if self.fail {
            return Err(ReporterError::Unavailable("tracking offline".to_string()));
        }
        Ok(())
    }

    async fn append_order_item(
        &self,
        order_id: Uuid,
        item: OrderItemAppend,
    ) -> Result<(), ReporterError> {
        self.appends.lock().unwrap().push((order_id, item));
        if self.fail {
            return Err(ReporterError::Request("500 Internal Server Error".to_string()));
        }
        Ok(())
    }
}

/// A stored configuration as the editor persists it.
#[allow(dead_code)]
pub const CHECKOUT_CONFIG_JSON: &str = r#"{
    "form_title": "Completa tu pedido",
    "cta_text": "Comprar ahora - {order_total}",
    "form_blocks": [
        { "type": "product_card", "position": 0, "enabled": true },
        { "type": "variants", "position": 1 },
        { "type": "price_summary", "position": 5, "enabled": true },
        { "type": "field", "position": 2, "field_key": "customer_first_name", "label": "Nombre", "required": true, "placeholder": null },
        { "type": "field", "position": 3, "field_key": "customer_phone", "label": "Telefono", "input_type": "tel", "required": true },
        { "type": "offers", "position": 4, "enabled": true, "title": "Legacy offers" },
        { "type": "field", "position": 6, "field_key": "notes", "label": "Notas", "input_type": "textarea", "enabled": false },
        { "type": "submit_button", "position": 7, "text": "Finalizar" }
    ]
}"#;

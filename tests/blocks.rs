//! Block model, configuration loading, editing and validation tests.
mod common;
use ahash::AHashMap;
use common::*;
use tally::block::{ConfigIssue, ViolationKind, default_blocks};
use tally::prelude::*;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_stored_config_parses_every_block() {
        let config = CheckoutConfig::from_json(CHECKOUT_CONFIG_JSON).expect("valid config");

        assert_eq!(config.form_title, "Completa tu pedido");
        assert_eq!(config.currency, "COP");
        assert_eq!(config.form_blocks.len(), 8);

        let phone = config
            .form_blocks
            .iter()
            .find_map(|b| b.as_field().filter(|f| f.field_key == "customer_phone"))
            .expect("phone field");
        assert_eq!(phone.input_type, InputKind::Tel);
        assert!(phone.required);

        let first_name = config.form_blocks[3].as_field().expect("first name field");
        assert_eq!(first_name.placeholder, "");
        assert!(config.form_blocks[1].enabled, "enabled defaults to true");
    }

    #[test]
    fn test_legacy_block_round_trips_unchanged() {
        let config = CheckoutConfig::from_json(CHECKOUT_CONFIG_JSON).unwrap();
        let legacy = config
            .form_blocks
            .iter()
            .find(|b| b.block_type() == BlockType::Offers)
            .expect("legacy block");
        assert!(legacy.block_type().is_legacy());
        assert!(!legacy.is_renderable());

        let value = serde_json::to_value(legacy).unwrap();
        assert_eq!(value["type"], "offers");
        assert_eq!(value["title"], "Legacy offers");
        assert_eq!(value["position"], 4);
    }

    #[test]
    fn test_missing_blocks_take_default_form() {
        let config = CheckoutConfig::from_json("{}").unwrap();
        assert_eq!(config.form_blocks, default_blocks());

        let emptied = CheckoutConfig::from_json(r#"{ "form_blocks": [] }"#).unwrap();
        assert!(emptied.form_blocks.is_empty());
        assert_eq!(emptied.merged_with_defaults().form_blocks, default_blocks());
    }

    #[test]
    fn test_default_form_has_system_blocks_and_sequential_positions() {
        let blocks = default_blocks();
        for ty in BlockType::SYSTEM {
            assert!(blocks.iter().any(|b| b.block_type() == ty), "missing {}", ty);
        }
        let positions: Vec<i64> = blocks.iter().map(|b| b.position).collect();
        assert_eq!(positions, (0..blocks.len() as i64).collect::<Vec<_>>());
        assert!(validate_config(&blocks, None).is_empty());
    }

    #[test]
    fn test_editor_quirks_in_stored_blocks() {
        let config = CheckoutConfig::from_json(
            r#"{ "form_blocks": [
                { "type": "spacer", "position": 1.0, "height": null },
                { "type": "spacer", "position": null, "height": 24 }
            ] }"#,
        )
        .expect("lenient block fields");

        assert_eq!(config.form_blocks[0].position, 1);
        assert_eq!(config.form_blocks[0].kind, BlockKind::Spacer(tally::block::SpacerBlock { height: 16 }));
        assert_eq!(config.form_blocks[1].position, 0);
        assert_eq!(config.form_blocks[1].kind, BlockKind::Spacer(tally::block::SpacerBlock { height: 24 }));

        let fractional = CheckoutConfig::from_json(r#"{ "form_blocks": [{ "type": "divider", "position": 1.5 }] }"#);
        assert!(fractional.is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = CheckoutConfig::from_file("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}

#[cfg(test)]
mod editing_tests {
    use super::*;

    fn list() -> BlockList {
        BlockList::new(vec![
            submit(3),
            field(1, "city"),
            system(0, BlockKind::ProductCard),
            field(2, "address"),
        ])
    }

    #[test]
    fn test_new_orders_by_position() {
        let types: Vec<BlockType> = list().blocks().iter().map(Block::block_type).collect();
        assert_eq!(
            types,
            vec![
                BlockType::ProductCard,
                BlockType::Field,
                BlockType::Field,
                BlockType::SubmitButton
            ]
        );
    }

    #[test]
    fn test_system_blocks_cannot_be_removed() {
        let mut blocks = list();
        let err = blocks.remove(0).unwrap_err();
        assert_eq!(
            err,
            BlockEditError::SystemBlockNotDeletable {
                index: 0,
                type_name: "product_card".to_string()
            }
        );
        assert_eq!(blocks.len(), 4);
    }

    #[test]
    fn test_remove_renumbers_positions() {
        let mut blocks = list();
        let removed = blocks.remove(1).unwrap();
        assert_eq!(removed.as_field().unwrap().field_key, "city");

        let positions: Vec<i64> = blocks.blocks().iter().map(|b| b.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_toggle_disables_system_block() {
        let mut blocks = list();
        assert_eq!(blocks.toggle(0), Ok(false));
        assert!(!blocks.blocks()[0].enabled);
        assert_eq!(blocks.toggle(0), Ok(true));
        assert_eq!(
            blocks.toggle(9),
            Err(BlockEditError::IndexOutOfRange { index: 9, len: 4 })
        );
    }

    #[test]
    fn test_push_and_move() {
        let mut blocks = list();
        blocks.push(BlockKind::Divider(Default::default()));
        assert_eq!(blocks.blocks()[4].position, 4);

        blocks.move_block(4, 0).unwrap();
        let first = &blocks.blocks()[0];
        assert_eq!(first.block_type(), BlockType::Divider);
        assert_eq!(first.position, 0);
        assert_eq!(blocks.blocks()[4].block_type(), BlockType::SubmitButton);
        assert_eq!(blocks.blocks()[4].position, 4);
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_config_issues_are_reported_not_raised() {
        let blocks = vec![
            system(0, BlockKind::ProductCard),
            field(1, "city"),
            field(2, "city"),
            field(3, ""),
        ];
        let mut offer = QuantityOffer::new("bad", vec![QuantityOfferTier::new(0, 0)]);
        offer.tiers.push(QuantityOfferTier::new(2, 1).with_discount(DiscountType::Fixed, -5.0));

        let issues = validate_config(&blocks, Some(&offer));

        assert!(issues.contains(&ConfigIssue::MissingSystemBlock(BlockType::SubmitButton)));
        assert!(issues.contains(&ConfigIssue::MissingSystemBlock(BlockType::Variants)));
        assert!(issues.contains(&ConfigIssue::DuplicateFieldKey("city".to_string())));
        assert!(issues.contains(&ConfigIssue::EmptyFieldKey { position: 3 }));
        assert!(issues.contains(&ConfigIssue::NonPositiveTierQuantity {
            tier_position: 0,
            quantity: 0
        }));
        assert!(issues.contains(&ConfigIssue::NegativeDiscount {
            tier_position: 1,
            value: -5.0
        }));

        let empty = QuantityOffer::new("empty", Vec::new());
        assert!(validate_config(&default_blocks(), Some(&empty)).contains(&ConfigIssue::OfferWithoutTiers));
    }

    fn submission(pairs: &[(&str, &str)]) -> AHashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_form_submission() {
        let blocks = default_blocks();
        let values = submission(&[
            ("customer_first_name", "Ana"),
            ("customer_last_name", "Gomez"),
            ("customer_phone", "+57 300 123 4567"),
            ("address", "Calle 1 # 2-3"),
            ("state", "Antioquia"),
            ("city", "Medellin"),
            ("email", "ana@example"),
        ]);

        let violations = validate_submission(&blocks, &values);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_key, "email");
        assert_eq!(violations[0].kind, ViolationKind::InvalidEmail);
        assert_eq!(violations[0].message(), "Correo electronico invalido");
    }

    #[test]
    fn test_violations_follow_position_and_skip_disabled_fields() {
        let mut phone = FieldBlock::new("phone", "Telefono").required().with_input(InputKind::Tel);
        phone.max_length = Some(20);
        let mut size = FieldBlock::new("size", "Talla").required().with_input(InputKind::Select);
        size.options = vec!["S".to_string(), "M".to_string()];

        let blocks = vec![
            Block::new(2, BlockKind::Field(size)),
            Block::new(1, BlockKind::Field(phone)),
            Block::new(0, BlockKind::Field(FieldBlock::new("name", "Nombre").required())).disabled(),
        ];
        let values = submission(&[("phone", "12ab"), ("size", "XL")]);

        let kinds: Vec<(String, ViolationKind)> = validate_submission(&blocks, &values)
            .into_iter()
            .map(|v| (v.field_key, v.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("phone".to_string(), ViolationKind::InvalidPhone),
                ("size".to_string(), ViolationKind::NotAnOption),
            ]
        );
    }

    #[test]
    fn test_length_bounds_and_required_checkbox() {
        let mut code = FieldBlock::new("code", "Codigo");
        code.min_length = Some(4);
        let terms = FieldBlock::new("terms", "Acepto").required().with_input(InputKind::Checkbox);
        let blocks = vec![
            Block::new(0, BlockKind::Field(code)),
            Block::new(1, BlockKind::Field(terms)),
        ];

        let violations = validate_submission(&blocks, &submission(&[("code", "abc"), ("terms", "false")]));
        assert_eq!(violations[0].kind, ViolationKind::TooShort { min: 4 });
        assert_eq!(violations[1].kind, ViolationKind::Required);

        assert!(validate_submission(&blocks, &submission(&[("terms", "on")])).is_empty());
    }
}

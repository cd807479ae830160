use super::group::{RenderGroup, RenderPlan};
use super::view::OfferView;
use crate::block::{Block, BlockKind};

/// Formats render plans into human-readable outlines.
pub struct PlanOutline;

impl PlanOutline {
    /// One line per render group, with nested lines for grouped fields and
    /// offer tiers. Amounts are exact, not currency-formatted.
    pub fn format_plan(plan: &RenderPlan) -> String {
        if plan.is_empty() {
            return "(empty plan)".to_string();
        }

        let mut out = String::new();
        for (i, group) in plan.iter().enumerate() {
            match group {
                RenderGroup::Block(block) => {
                    out.push_str(&format!("[{}] {}\n", i, Self::describe_block(block)));
                }
                RenderGroup::FieldGroup(fields) => {
                    out.push_str(&format!("[{}] field group ({} fields)\n", i, fields.len()));
                    for field in fields {
                        out.push_str(&format!("      - {}\n", Self::describe_block(field)));
                    }
                }
                RenderGroup::QuantityOffer(view) => {
                    out.push_str(&format!("[{}] quantity offer \"{}\"\n", i, view.header_text));
                    Self::format_offer(view, &mut out);
                }
            }
        }
        out
    }

    fn format_offer(view: &OfferView, out: &mut String) {
        for row in &view.rows {
            let marker = if row.selected { "*" } else { "-" };
            let mut line = format!(
                "      {} {} x{}: {}",
                marker,
                row.tier.display_title(),
                row.tier.quantity,
                Self::format_amount(row.totals.total)
            );
            if row.totals.has_discount {
                line.push_str(&format!(
                    " (was {}, saves {})",
                    Self::format_amount(row.totals.original_total),
                    Self::format_amount(row.totals.savings)
                ));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    fn describe_block(block: &Block) -> String {
        match &block.kind {
            BlockKind::Field(field) => {
                let required = if field.required { " (required)" } else { "" };
                format!("{}{}", field.field_key, required)
            }
            BlockKind::CustomText(text) => format!("custom_text \"{}\"", text.text),
            BlockKind::Image(image) => format!("image {}", image.image_url),
            BlockKind::Spacer(spacer) => format!("spacer {}px", spacer.height),
            other => other.block_type().to_string(),
        }
    }

    fn format_amount(amount: f64) -> String {
        if amount.fract() == 0.0 {
            format!("{}", amount as i64)
        } else {
            format!("{:.2}", amount)
        }
    }
}

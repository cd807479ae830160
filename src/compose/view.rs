use crate::offer::{QuantityOffer, QuantityOfferTier};
use crate::pricing::{PriceFormatter, TierTotals, tier_totals};
use uuid::Uuid;

/// A tier as displayed inside the quantity-offer selector.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRow {
    pub tier: QuantityOfferTier,
    pub totals: TierTotals,
    pub selected: bool,
}

/// Everything the quantity-offer selector needs, priced against one base
/// unit price. Tiers appear in ascending `position` order.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferView {
    pub offer_id: Option<Uuid>,
    pub header_text: String,
    pub base_price: f64,
    pub show_savings: bool,
    pub show_per_unit: bool,
    pub hide_product_image: bool,
    pub rows: Vec<TierRow>,
    /// Index into `rows` of the default selection. `None` when no tier is usable.
    pub selected: Option<usize>,
}

impl OfferView {
    pub fn new(offer: &QuantityOffer, base_price: f64) -> Self {
        let selected = offer.default_tier_index();
        let rows = offer
            .sorted_tiers()
            .into_iter()
            .enumerate()
            .map(|(i, tier)| TierRow {
                tier: tier.clone(),
                totals: tier_totals(base_price, tier),
                selected: selected == Some(i),
            })
            .collect();

        Self {
            offer_id: offer.id,
            header_text: offer
                .header_text
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Selecciona la cantidad".to_string()),
            base_price,
            show_savings: offer.show_savings,
            show_per_unit: offer.show_per_unit,
            hide_product_image: offer.hide_product_image,
            rows,
            selected,
        }
    }

    pub fn selected_row(&self) -> Option<&TierRow> {
        self.selected.and_then(|i| self.rows.get(i))
    }

    /// Formats every row at the display boundary.
    pub fn labels(&self, formatter: &dyn PriceFormatter, currency: &str, country: &str) -> Vec<TierLabels> {
        let fmt = |amount: f64| formatter.format_price(amount, currency, country);
        self.rows
            .iter()
            .map(|row| {
                let totals = &row.totals;
                TierLabels {
                    title: row.tier.display_title(),
                    total: fmt(totals.total),
                    compare_at: (totals.has_discount && !row.tier.hide_compare_price)
                        .then(|| fmt(totals.original_total)),
                    per_unit: self.show_per_unit.then(|| format!("{} c/u", fmt(totals.unit.max(0.0)))),
                    savings: (self.show_savings && totals.savings > 0.0)
                        .then(|| format!("Ahorras {}", fmt(totals.savings))),
                    selected: row.selected,
                }
            })
            .collect()
    }
}

/// Display strings for one tier row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierLabels {
    pub title: String,
    pub total: String,
    pub compare_at: Option<String>,
    pub per_unit: Option<String>,
    pub savings: Option<String>,
    pub selected: bool,
}

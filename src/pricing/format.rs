/// The host's locale-aware money formatter.
///
/// Rounding to whole currency units is the formatter's job; the engine only
/// hands it exact amounts.
pub trait PriceFormatter {
    fn format_price(&self, amount: f64, currency: &str, country: &str) -> String;
}

impl<F> PriceFormatter for F
where
    F: Fn(f64, &str, &str) -> String,
{
    fn format_price(&self, amount: f64, currency: &str, country: &str) -> String {
        self(amount, currency, country)
    }
}

/// Substitutes `{order_total}` in a call-to-action text.
pub fn cta_label(
    template: &str,
    order_total: f64,
    currency: &str,
    country: &str,
    formatter: &dyn PriceFormatter,
) -> String {
    if !template.contains("{order_total}") {
        return template.to_string();
    }
    template.replace(
        "{order_total}",
        &formatter.format_price(order_total, currency, country),
    )
}

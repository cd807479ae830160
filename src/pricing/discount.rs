use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// How a discount value is applied to a unit price.
///
/// Unrecognized tags read as [`DiscountType::None`] and serialize back
/// as `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscountType {
    Percentage,
    Fixed,
    #[default]
    None,
}

impl From<String> for DiscountType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "percentage" => DiscountType::Percentage,
            "fixed" => DiscountType::Fixed,
            _ => DiscountType::None,
        }
    }
}

impl From<DiscountType> for String {
    fn from(discount: DiscountType) -> Self {
        discount.to_string()
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
            DiscountType::None => "none",
        })
    }
}

/// Effective unit price after applying one discount to `base_price`.
///
/// A non-positive `discount_value` is a no-op for every discount type.
/// Percentages above 100 are not clamped and yield a non-positive price;
/// aggregates built on top floor at zero. Fixed discounts never go below zero.
pub fn discounted_unit_price(base_price: f64, discount_type: DiscountType, discount_value: f64) -> f64 {
    if discount_value.is_nan() || discount_value <= 0.0 {
        return base_price;
    }
    match discount_type {
        DiscountType::Percentage => base_price * (1.0 - discount_value / 100.0),
        DiscountType::Fixed => (base_price - discount_value).max(0.0),
        DiscountType::None => base_price,
    }
}

/// Reads a monetary amount stored either as a JSON number or a decimal string.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
        Missing(()),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Amount::Missing(()) => Ok(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_reads_as_none() {
        let parsed: DiscountType = serde_json::from_str("\"bogo\"").unwrap();
        assert_eq!(parsed, DiscountType::None);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"none\"");
    }

    #[test]
    fn amount_accepts_decimal_strings() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "lenient_amount")]
            value: f64,
        }
        let h: Holder = serde_json::from_str(r#"{"value": "12.50"}"#).unwrap();
        assert_eq!(h.value, 12.5);
        let h: Holder = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(h.value, 0.0);
    }
}

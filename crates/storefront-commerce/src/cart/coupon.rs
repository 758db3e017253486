//! Coupon types.

use serde::{Deserialize, Serialize};

use crate::catalog::amount;
use crate::ids::CouponId;
use crate::money::Money;

/// What a coupon takes off the order.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponKind {
    /// Percentage of the subtotal (0.0 - 100.0).
    Percentage(f64),
    /// Flat amount.
    Fixed(Money),
    /// A type this client does not understand. Always worth zero.
    Unsupported(String),
}

impl CouponKind {
    /// Wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            CouponKind::Percentage(_) => "percentage",
            CouponKind::Fixed(_) => "fixed",
            CouponKind::Unsupported(name) => name,
        }
    }
}

/// A coupon definition as the API describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CouponRecord", into = "CouponRecord")]
pub struct Coupon {
    /// Coupon identifier, when the API sends one.
    pub id: Option<CouponId>,
    /// Code the customer would type (e.g., "WELCOME10").
    pub code: Option<String>,
    /// Discount rule.
    pub kind: CouponKind,
    /// Upper bound on a percentage discount. Zero means no cap.
    pub max_discount: Option<Money>,
    /// Subtotal below which the coupon is worth nothing. Zero means no floor.
    pub min_order_amount: Option<Money>,
}

impl Coupon {
    /// Create a percentage coupon.
    pub fn percentage(rate: f64) -> Self {
        Self::with_kind(CouponKind::Percentage(rate))
    }

    /// Create a fixed amount coupon.
    pub fn fixed(value: Money) -> Self {
        Self::with_kind(CouponKind::Fixed(value))
    }

    fn with_kind(kind: CouponKind) -> Self {
        Self {
            id: None,
            code: None,
            kind,
            max_discount: None,
            min_order_amount: None,
        }
    }

    /// Set the code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Cap the discount.
    pub fn with_max_discount(mut self, amount: Money) -> Self {
        self.max_discount = Some(amount);
        self
    }

    /// Add a minimum order amount condition.
    pub fn with_minimum_order(mut self, amount: Money) -> Self {
        self.min_order_amount = Some(amount);
        self
    }

    /// Discount this coupon grants on `subtotal`.
    ///
    /// Percentage coupons are capped at `max_discount`; fixed coupons are
    /// worth their face value (the final total is floored separately). Below
    /// `min_order_amount` every coupon is worth zero, and an unsupported type
    /// is always worth zero.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if let Some(minimum) = self.min_order_amount.and_then(Money::positive) {
            if subtotal < minimum {
                return Money::ZERO;
            }
        }

        match &self.kind {
            CouponKind::Percentage(rate) => {
                let discount = subtotal.percentage(*rate);
                match self.max_discount.and_then(Money::positive) {
                    Some(cap) if discount > cap => cap,
                    _ => discount,
                }
            }
            CouponKind::Fixed(value) => *value,
            CouponKind::Unsupported(kind) => {
                tracing::debug!(kind = %kind, "ignoring coupon of unsupported type");
                Money::ZERO
            }
        }
    }
}

/// Flat wire form: `{"type": "percentage", "value": 10, ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CouponRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<CouponId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, with = "amount::decimal")]
    value: Option<f64>,
    #[serde(default, with = "amount::option")]
    max_discount: Option<Money>,
    #[serde(default, with = "amount::option")]
    min_order_amount: Option<Money>,
}

impl From<CouponRecord> for Coupon {
    fn from(record: CouponRecord) -> Self {
        let value = record.value.unwrap_or_default();
        let kind = match record.kind.as_str() {
            "percentage" => CouponKind::Percentage(value),
            "fixed" => CouponKind::Fixed(Money::from_decimal(value)),
            other => CouponKind::Unsupported(other.to_string()),
        };
        Self {
            id: record.id,
            code: record.code,
            kind,
            max_discount: record.max_discount,
            min_order_amount: record.min_order_amount,
        }
    }
}

impl From<Coupon> for CouponRecord {
    fn from(coupon: Coupon) -> Self {
        let value = match &coupon.kind {
            CouponKind::Percentage(rate) => Some(*rate),
            CouponKind::Fixed(value) => Some(value.to_decimal()),
            CouponKind::Unsupported(_) => None,
        };
        Self {
            id: coupon.id,
            code: coupon.code,
            kind: coupon.kind.as_str().to_string(),
            value,
            max_discount: coupon.max_discount,
            min_order_amount: coupon.min_order_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_percentage_capped() {
        let coupon = Coupon::percentage(10.0).with_max_discount(Money::from_major(5));
        assert_eq!(coupon.discount_for(Money::from_major(100)), Money::from_major(5));
        assert_eq!(coupon.discount_for(Money::from_major(30)), Money::from_major(3));
    }

    #[test]
    fn test_zero_cap_means_uncapped() {
        let coupon = Coupon::percentage(10.0).with_max_discount(Money::ZERO);
        assert_eq!(coupon.discount_for(Money::from_major(100)), Money::from_major(10));
    }

    #[test]
    fn test_fixed_discount() {
        let coupon = Coupon::fixed(Money::from_major(15));
        assert_eq!(coupon.discount_for(Money::from_major(100)), Money::from_major(15));
        // Not capped at the subtotal here; the final total floors at zero.
        assert_eq!(coupon.discount_for(Money::from_major(10)), Money::from_major(15));
    }

    #[test]
    fn test_minimum_order_zeroes_any_type() {
        let minimum = Money::from_major(50);
        let subtotal = Money::from_major(40);
        for coupon in [
            Coupon::percentage(10.0).with_minimum_order(minimum),
            Coupon::fixed(Money::from_major(5)).with_minimum_order(minimum),
        ] {
            assert_eq!(coupon.discount_for(subtotal), Money::ZERO);
        }
    }

    #[test]
    fn test_minimum_order_met_exactly() {
        let coupon = Coupon::fixed(Money::from_major(5)).with_minimum_order(Money::from_major(50));
        assert_eq!(coupon.discount_for(Money::from_major(50)), Money::from_major(5));
    }

    #[test]
    fn test_parses_api_coupon() {
        let coupon: Coupon = serde_json::from_value(json!({
            "id": 3,
            "code": "WELCOME",
            "type": "percentage",
            "value": "10",
            "max_discount": 5,
            "min_order_amount": null
        }))
        .unwrap();

        assert_eq!(coupon.kind, CouponKind::Percentage(10.0));
        assert_eq!(coupon.max_discount, Some(Money::from_major(5)));
        assert_eq!(coupon.code.as_deref(), Some("WELCOME"));
    }

    #[test]
    fn test_percentage_keeps_fractional_rate() {
        let coupon: Coupon =
            serde_json::from_value(json!({"type": "percentage", "value": "12.345"})).unwrap();
        assert_eq!(coupon.kind, CouponKind::Percentage(12.345));

        let coupon: Coupon =
            serde_json::from_value(json!({"type": "fixed", "value": "7.50"})).unwrap();
        assert_eq!(coupon.kind, CouponKind::Fixed(Money::new(750)));
    }

    #[test]
    fn test_unknown_type_is_worth_zero() {
        let coupon: Coupon =
            serde_json::from_value(json!({"type": "bogo", "value": 50})).unwrap();
        assert_eq!(coupon.kind, CouponKind::Unsupported("bogo".to_string()));
        assert_eq!(coupon.discount_for(Money::from_major(100)), Money::ZERO);
    }

    #[test]
    fn test_wire_roundtrip() {
        let coupon = Coupon::percentage(12.5)
            .with_code("SPRING")
            .with_max_discount(Money::from_major(20));
        let json = serde_json::to_value(&coupon).unwrap();
        assert_eq!(json["type"], "percentage");
        assert_eq!(json["value"], 12.5);

        let back: Coupon = serde_json::from_value(json).unwrap();
        assert_eq!(back, coupon);
    }
}

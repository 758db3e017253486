//! Cart pricing calculations.
//!
//! Everything here is a pure function of its arguments.

use serde::{Deserialize, Serialize};

use crate::cart::{Coupon, LineItem};
use crate::catalog::{Product, ProductSize};
use crate::ids::LineItemId;
use crate::money::Money;

/// Price actually charged per unit.
///
/// Candidates in order: the size's discounted price, the size's price, the
/// product's discounted price, the product's base price. Zero counts as
/// unset, so a `0` discounted price falls through to the next candidate.
/// With nothing set the unit price is zero.
pub fn effective_unit_price(product: &Product, size: Option<&ProductSize>) -> Money {
    let size_prices = size
        .into_iter()
        .flat_map(|s| [s.price_after_discount, s.price]);
    let product_prices = [product.price_after_discount, product.price];

    size_prices
        .chain(product_prices)
        .flatten()
        .find_map(Money::positive)
        .unwrap_or(Money::ZERO)
}

/// Sum of line totals.
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.total_price).sum()
}

/// Discount an automatic coupon grants on `subtotal`.
///
/// See [`Coupon::discount_for`].
pub fn automatic_discount(coupon: &Coupon, subtotal: Money) -> Money {
    coupon.discount_for(subtotal)
}

/// `subtotal + shipping - discount`, never below zero.
pub fn final_total(subtotal: Money, shipping: Money, discount: Money) -> Money {
    (subtotal + shipping - discount).floor_zero()
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Total discount amount.
    pub discount_total: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Final total (subtotal - discounts + shipping), floored at zero.
    pub grand_total: Money,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Price `items` with optional shipping and automatic coupon.
    pub fn compute(items: &[LineItem], shipping: Option<Money>, coupon: Option<&Coupon>) -> Self {
        let subtotal = subtotal(items);
        let shipping_total = shipping.unwrap_or_default();
        let discount_total = coupon
            .map(|c| automatic_discount(c, subtotal))
            .unwrap_or_default();

        Self {
            subtotal,
            discount_total,
            shipping_total,
            grand_total: final_total(subtotal, shipping_total, discount_total),
            line_items: items.iter().map(LineItemPricing::from).collect(),
        }
    }

    /// Calculate the savings from discounts.
    pub fn savings(&self) -> Money {
        self.discount_total
    }

    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        self.discount_total.is_positive()
    }

    /// Get discount percentage of subtotal.
    pub fn discount_percentage(&self) -> f64 {
        if self.subtotal.is_zero() {
            return 0.0;
        }
        (self.discount_total.amount_cents as f64 / self.subtotal.amount_cents as f64) * 100.0
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line item ID.
    pub line_item_id: LineItemId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Total (unit_price * quantity).
    pub total: Money,
}

impl From<&LineItem> for LineItemPricing {
    fn from(item: &LineItem) -> Self {
        Self {
            line_item_id: item.id,
            unit_price: item.unit_price(),
            quantity: item.quantity,
            total: item.total_price,
        }
    }
}

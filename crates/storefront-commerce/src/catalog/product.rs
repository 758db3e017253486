//! Product and size records.

use serde::{Deserialize, Serialize};

use crate::catalog::amount;
use crate::ids::{ProductId, SizeId};
use crate::money::Money;

/// A product as returned by the catalog API.
///
/// Only the fields the engines reason about are typed. Media and category
/// payloads are carried through untouched for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// URL slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Base price.
    #[serde(default, with = "amount::option")]
    pub price: Option<Money>,
    /// Price after the active discount, if any.
    #[serde(default, with = "amount::option")]
    pub price_after_discount: Option<Money>,
    /// Crossed-out price shown next to a discounted one.
    #[serde(default, with = "amount::option")]
    pub price_before_discount: Option<Money>,
    /// Purchasable sizes; each may override the product's pricing.
    #[serde(default)]
    pub sizes: Vec<ProductSize>,
    /// Primary image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Media attachments.
    #[serde(default)]
    pub files: Vec<serde_json::Value>,
    /// Category, as embedded by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<serde_json::Value>,
}

impl Product {
    /// A bare product with a base price, mostly useful in tests and demos.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            title: title.into(),
            slug: None,
            price: Some(price),
            price_after_discount: None,
            price_before_discount: None,
            sizes: Vec::new(),
            image: None,
            files: Vec::new(),
            category: None,
        }
    }

    /// Set the discounted price.
    pub fn with_discount(mut self, price_after_discount: Money) -> Self {
        self.price_before_discount = self.price;
        self.price_after_discount = Some(price_after_discount);
        self
    }

    /// Add a size option.
    pub fn with_size(mut self, size: ProductSize) -> Self {
        self.sizes.push(size);
        self
    }

    /// Look up a size by ID.
    pub fn size(&self, size_id: SizeId) -> Option<&ProductSize> {
        self.sizes.iter().find(|s| s.id == size_id)
    }

    /// Whether the discounted price undercuts the base price.
    pub fn is_discounted(&self) -> bool {
        match (self.price_after_discount.and_then(Money::positive), self.price) {
            (Some(after), Some(base)) => after < base,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

/// A size option with its own price and stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSize {
    /// Size identifier.
    pub id: SizeId,
    /// Label, e.g. "XL" or "500ml".
    #[serde(default)]
    pub size: String,
    /// Price for this size.
    #[serde(default, with = "amount::option")]
    pub price: Option<Money>,
    /// Discounted price for this size.
    #[serde(default, with = "amount::option")]
    pub price_after_discount: Option<Money>,
    /// Units in stock, when tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductSize {
    /// A size with a price.
    pub fn new(id: SizeId, size: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            size: size.into(),
            price: Some(price),
            price_after_discount: None,
            stock: None,
        }
    }

    /// Set the discounted price.
    pub fn with_discount(mut self, price_after_discount: Money) -> Self {
        self.price_after_discount = Some(price_after_discount);
        self
    }

    /// Whether the size can be ordered. Untracked stock counts as available.
    pub fn in_stock(&self) -> bool {
        self.stock.map_or(true, |s| s > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_record() -> serde_json::Value {
        json!({
            "id": 12,
            "title": "Linen Shirt",
            "price": "450.00",
            "price_after_discount": 399,
            "price_before_discount": "450",
            "sizes": [
                {"id": 1, "size": "M", "price": 450, "price_after_discount": "", "stock": 3},
                {"id": 2, "size": "L", "price": "470.5", "stock": 0}
            ],
            "files": [{"id": 5, "url": "/img/shirt.jpg"}],
            "category": {"id": 2, "title": "Shirts"}
        })
    }

    #[test]
    fn test_parses_api_record() {
        let product: Product = serde_json::from_value(api_record()).unwrap();
        assert_eq!(product.id, ProductId::new(12));
        assert_eq!(product.price, Some(Money::from_major(450)));
        assert_eq!(product.price_after_discount, Some(Money::from_major(399)));
        assert_eq!(product.sizes.len(), 2);
        assert_eq!(product.sizes[0].price_after_discount, None);
        assert_eq!(product.sizes[1].price, Some(Money::new(47050)));
        assert_eq!(product.files.len(), 1);
        assert!(product.is_discounted());
    }

    #[test]
    fn test_minimal_record() {
        let product: Product = serde_json::from_value(json!({"id": 7, "price": 20})).unwrap();
        assert_eq!(product.title, "");
        assert!(product.sizes.is_empty());
        assert!(!product.is_discounted());
    }

    #[test]
    fn test_size_lookup_and_stock() {
        let product: Product = serde_json::from_value(api_record()).unwrap();
        assert!(product.size(SizeId::new(1)).unwrap().in_stock());
        assert!(!product.size(SizeId::new(2)).unwrap().in_stock());
        assert!(product.size(SizeId::new(3)).is_none());
    }

    #[test]
    fn test_survives_store_roundtrip() {
        let product: Product = serde_json::from_value(api_record()).unwrap();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }
}

//! Cart engine and line item types.

use serde::{Deserialize, Serialize};
use storefront_kv::Store;
use tokio::sync::watch;

use crate::cart::pricing::{self, CartPricing};
use crate::cart::Coupon;
use crate::catalog::{Product, ProductSize};
use crate::ids::{LineItemId, ProductId};
use crate::money::Money;
use crate::observable::Observable;
use crate::slots::CART_SLOT;

/// One row in the cart.
///
/// The product is a snapshot taken when it was first added; later catalog
/// changes do not reach it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, never below 1.
    pub quantity: i64,
    /// Product snapshot.
    pub product: Product,
    /// Size chosen when the line was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<ProductSize>,
    /// Unit price times quantity.
    #[serde(with = "crate::catalog::amount::required")]
    pub total_price: Money,
}

impl LineItem {
    /// Create a line item with quantity 1.
    pub fn new(product: Product, selected_size: Option<ProductSize>) -> Self {
        let mut item = Self {
            id: LineItemId::generate(),
            product_id: product.id,
            quantity: 1,
            product,
            selected_size,
            total_price: Money::ZERO,
        };
        item.update_total();
        item
    }

    /// Effective unit price of the snapshot.
    pub fn unit_price(&self) -> Money {
        pricing::effective_unit_price(&self.product, self.selected_size.as_ref())
    }

    /// Set the quantity, clamped to at least 1, and recompute the total.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity.max(1);
        self.update_total();
    }

    /// Recompute the total from the unit price and quantity.
    pub fn update_total(&mut self) {
        self.total_price = self.unit_price().multiply(self.quantity);
    }
}

/// Owns the cart for one storefront session.
///
/// Every mutation rewrites the `"cart"` slot with the whole collection and
/// then publishes it. A failed write is logged and otherwise ignored: the
/// in-memory cart stays authoritative until the next successful write.
#[derive(Debug)]
pub struct CartEngine {
    store: Store,
    items: Vec<LineItem>,
    updates: Observable<Vec<LineItem>>,
}

impl CartEngine {
    /// Hydrate the cart from `store`.
    pub fn open(store: Store) -> Self {
        let items = load_items(&store);
        tracing::debug!(lines = items.len(), "cart hydrated");
        Self {
            store,
            updates: Observable::new(items.clone()),
            items,
        }
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same product gets its quantity bumped, even
    /// when `size` differs from the size the line was created with; lines
    /// are keyed by product only. Returns the affected line's ID.
    pub fn add_to_cart(&mut self, product: &Product, size: Option<&ProductSize>) -> LineItemId {
        let id = match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(existing) => {
                existing.set_quantity(existing.quantity.saturating_add(1));
                existing.id
            }
            None => {
                let item = LineItem::new(product.clone(), size.cloned());
                let id = item.id;
                self.items.push(item);
                id
            }
        };
        tracing::debug!(product_id = %product.id, line_item_id = %id, "added to cart");
        self.commit();
        id
    }

    /// Change a product's quantity by `delta`, never going below 1.
    ///
    /// Unknown products leave the cart unchanged (it is still republished).
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) {
        if let Some(item) = self.item_for_product_mut(product_id) {
            let quantity = item.quantity.saturating_add(delta);
            item.set_quantity(quantity);
        }
        self.commit();
    }

    /// Set a product's quantity, never going below 1.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if let Some(item) = self.item_for_product_mut(product_id) {
            item.set_quantity(quantity);
        }
        self.commit();
    }

    /// Remove a line by its line item ID. Returns whether a line was removed.
    pub fn remove_item(&mut self, line_item_id: LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id != line_item_id);
        let removed = self.items.len() < len_before;
        self.commit();
        removed
    }

    /// Remove the line holding `product_id`. Returns whether a line was removed.
    pub fn remove_product(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        let removed = self.items.len() < len_before;
        self.commit();
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Reload from the store, picking up writes made by another session.
    pub fn refresh(&mut self) {
        self.items = load_items(&self.store);
        self.updates.publish(self.items.clone());
    }

    /// Whether a line exists for `product_id`.
    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// Number of distinct lines.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get a line by ID.
    pub fn get_item(&self, line_item_id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == line_item_id)
    }

    /// Get the line holding `product_id`.
    pub fn item_for_product(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        pricing::subtotal(&self.items)
    }

    /// Full pricing breakdown with optional shipping and automatic coupon.
    pub fn pricing(&self, shipping: Option<Money>, coupon: Option<&Coupon>) -> CartPricing {
        CartPricing::compute(&self.items, shipping, coupon)
    }

    /// Subscribe to cart changes. The receiver starts at the current cart.
    pub fn subscribe(&self) -> watch::Receiver<Vec<LineItem>> {
        self.updates.subscribe()
    }

    fn item_for_product_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.product_id == product_id)
    }

    /// Persist, then publish.
    fn commit(&self) {
        if let Err(error) = self.store.save_list(CART_SLOT, &self.items) {
            tracing::warn!(%error, lines = self.items.len(), "failed to persist cart");
        }
        self.updates.publish(self.items.clone());
    }
}

/// Read the cart slot. Stored quantities are clamped to at least 1 and
/// totals are recomputed from the snapshot price.
fn load_items(store: &Store) -> Vec<LineItem> {
    let mut items: Vec<LineItem> = store.load_list(CART_SLOT);
    for item in &mut items {
        item.set_quantity(item.quantity);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SizeId;
    use storefront_kv::MemoryBackend;

    fn product(id: u64, price: i64) -> Product {
        Product::new(ProductId::new(id), format!("Product {id}"), Money::from_major(price))
    }

    #[test]
    fn test_cart_creation() {
        let cart = CartEngine::open(Store::in_memory());
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::ZERO);
    }

    #[test]
    fn test_add_item() {
        let mut cart = CartEngine::open(Store::in_memory());
        cart.add_to_cart(&product(1, 10), None);

        assert!(cart.is_in_cart(ProductId::new(1)));
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = CartEngine::open(Store::in_memory());
        let first = cart.add_to_cart(&product(1, 10), None);
        let second = cart.add_to_cart(&product(1, 10), None);

        assert_eq!(first, second);
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal(), Money::from_major(20));
    }

    #[test]
    fn test_different_size_bumps_existing_line() {
        // Lines are keyed by product; the second size is not recorded.
        let small = ProductSize::new(SizeId::new(1), "S", Money::from_major(10));
        let large = ProductSize::new(SizeId::new(2), "L", Money::from_major(14));
        let shirt = product(3, 12).with_size(small.clone()).with_size(large.clone());

        let mut cart = CartEngine::open(Store::in_memory());
        cart.add_to_cart(&shirt, Some(&small));
        cart.add_to_cart(&shirt, Some(&large));

        assert_eq!(cart.count(), 1);
        let line = cart.item_for_product(shirt.id).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.selected_size.as_ref().map(|s| s.id), Some(SizeId::new(1)));
        assert_eq!(line.total_price, Money::from_major(20));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = CartEngine::open(Store::in_memory());
        cart.add_to_cart(&product(1, 10), None);

        cart.update_quantity(ProductId::new(1), 4);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.subtotal(), Money::from_major(50));

        cart.update_quantity(ProductId::new(1), -1000);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_update_quantity_saturates() {
        let mut cart = CartEngine::open(Store::in_memory());
        cart.add_to_cart(&product(1, 10), None);
        cart.update_quantity(ProductId::new(1), i64::MAX);
        cart.update_quantity(ProductId::new(1), i64::MAX);
        assert_eq!(cart.item_count(), i64::MAX);
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = CartEngine::open(Store::in_memory());
        cart.add_to_cart(&product(1, 10), None);

        cart.set_quantity(ProductId::new(1), 7);
        assert_eq!(cart.item_count(), 7);

        cart.set_quantity(ProductId::new(1), 0);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_unknown_product_is_noop() {
        let mut cart = CartEngine::open(Store::in_memory());
        cart.add_to_cart(&product(1, 10), None);
        let before = cart.items().to_vec();

        cart.update_quantity(ProductId::new(99), 3);
        cart.set_quantity(ProductId::new(99), 3);
        assert!(!cart.remove_product(ProductId::new(99)));

        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartEngine::open(Store::in_memory());
        let line_id = cart.add_to_cart(&product(1, 10), None);

        assert!(cart.remove_item(line_id));
        assert!(cart.is_empty());
        assert!(!cart.remove_item(line_id));
    }

    #[test]
    fn test_remove_product() {
        let mut cart = CartEngine::open(Store::in_memory());
        cart.add_to_cart(&product(1, 10), None);
        cart.add_to_cart(&product(2, 10), None);

        assert!(cart.remove_product(ProductId::new(1)));
        assert_eq!(cart.count(), 1);
        assert!(cart.is_in_cart(ProductId::new(2)));
    }

    #[test]
    fn test_mutations_are_persisted() {
        let store = Store::in_memory();
        let mut cart = CartEngine::open(store.clone());
        cart.add_to_cart(&product(1, 10), None);
        cart.add_to_cart(&product(2, 5), None);

        let reopened = CartEngine::open(store);
        assert_eq!(reopened.items(), cart.items());
    }

    #[test]
    fn test_hydrate_repairs_stored_lines() {
        let store = Store::in_memory();
        let stored = serde_json::json!([{
            "id": 1,
            "product_id": 7,
            "quantity": 0,
            "product": {"id": 7, "title": "Mug", "price": 20},
            "total_price": 999
        }]);
        store.set(CART_SLOT, &stored).unwrap();

        let cart = CartEngine::open(store);
        let line = cart.item_for_product(ProductId::new(7)).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.total_price, Money::from_major(20));
        assert_eq!(cart.subtotal(), Money::from_major(20));
    }

    #[test]
    fn test_large_quantity_survives_reopen() {
        let store = Store::in_memory();
        let mut cart = CartEngine::open(store.clone());
        cart.add_to_cart(&Product::new(ProductId::new(1), "Pin", Money::new(101)), None);
        cart.set_quantity(ProductId::new(1), 100_000_000_000_001);

        let reopened = CartEngine::open(store);
        assert_eq!(reopened.items(), cart.items());
        assert_eq!(reopened.subtotal(), Money::new(10_100_000_000_000_101));
    }

    #[test]
    fn test_refresh_picks_up_external_writes() {
        let store = Store::in_memory();
        let mut a = CartEngine::open(store.clone());
        let mut b = CartEngine::open(store);

        a.add_to_cart(&product(1, 10), None);
        assert!(b.is_empty());

        b.refresh();
        assert_eq!(b.count(), 1);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let store = Store::new(MemoryBackend::with_quota(4));
        let mut cart = CartEngine::open(store.clone());

        cart.add_to_cart(&product(1, 10), None);

        assert_eq!(cart.count(), 1);
        assert!(*cart.subscribe().borrow() == cart.items());
        assert!(store.load_list::<LineItem>(CART_SLOT).is_empty());
    }

    #[test]
    fn test_subscribers_receive_every_mutation() {
        let mut cart = CartEngine::open(Store::in_memory());
        let mut rx = cart.subscribe();
        assert!(rx.borrow().is_empty());

        cart.add_to_cart(&product(1, 10), None);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        // Even a no-op republishes.
        cart.update_quantity(ProductId::new(42), 1);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_pricing_breakdown() {
        let mut cart = CartEngine::open(Store::in_memory());
        cart.add_to_cart(&product(1, 10), None);
        cart.update_quantity(ProductId::new(1), 1);
        cart.add_to_cart(&product(2, 20), None);

        let coupon = Coupon::percentage(10.0);
        let pricing = cart.pricing(Some(Money::from_major(5)), Some(&coupon));
        assert_eq!(pricing.subtotal, Money::from_major(40));
        assert_eq!(pricing.discount_total, Money::from_major(4));
        assert_eq!(pricing.grand_total, Money::from_major(41));
        assert_eq!(pricing.line_items.len(), 2);
        assert_eq!(pricing.line_items[0].unit_price, Money::from_major(10));
    }
}

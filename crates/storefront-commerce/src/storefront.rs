//! One storefront session: cart, favorites and the checkout draft over a
//! shared store.

use serde::{Deserialize, Serialize};
use storefront_kv::Store;

use crate::cart::{CartEngine, CartPricing, Coupon};
use crate::checkout::{CheckoutForm, Country, OrderRequest, PaymentMethod, ShippingSelection};
use crate::error::CommerceError;
use crate::favorites::FavoritesEngine;

/// Shipping plus pricing for the current cart and draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutQuote {
    /// Resolved shipment, if the draft names a served city.
    pub shipping: Option<ShippingSelection>,
    /// Cart breakdown including shipping and the automatic discount.
    pub pricing: CartPricing,
}

/// Session facade tying both engines to one [`Store`].
#[derive(Debug)]
pub struct Storefront {
    store: Store,
    cart: CartEngine,
    favorites: FavoritesEngine,
}

impl Storefront {
    /// Hydrate every engine from `store`.
    pub fn open(store: Store) -> Self {
        Self {
            cart: CartEngine::open(store.clone()),
            favorites: FavoritesEngine::open(store.clone()),
            store,
        }
    }

    /// Store shared by every engine.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The cart engine.
    pub fn cart(&self) -> &CartEngine {
        &self.cart
    }

    /// The cart engine, for mutations.
    pub fn cart_mut(&mut self) -> &mut CartEngine {
        &mut self.cart
    }

    /// The favorites engine.
    pub fn favorites(&self) -> &FavoritesEngine {
        &self.favorites
    }

    /// The favorites engine, for mutations.
    pub fn favorites_mut(&mut self) -> &mut FavoritesEngine {
        &mut self.favorites
    }

    /// The saved checkout draft.
    pub fn checkout_form(&self) -> CheckoutForm {
        CheckoutForm::load(&self.store)
    }

    /// Persist the checkout draft.
    pub fn save_checkout_form(&self, form: &CheckoutForm) {
        form.save(&self.store);
    }

    /// Price the cart for `form`'s destination and an optional automatic
    /// coupon.
    pub fn quote(
        &self,
        form: &CheckoutForm,
        countries: &[Country],
        coupon: Option<&Coupon>,
    ) -> CheckoutQuote {
        let shipping = ShippingSelection::resolve(countries, form.country_id, form.city_id);
        let pricing = self.cart.pricing(shipping.map(|s| s.cost), coupon);
        CheckoutQuote { shipping, pricing }
    }

    /// Validate `form` against the cart and build the order body.
    pub fn order_request(
        &self,
        form: &CheckoutForm,
        countries: &[Country],
        payment_method: PaymentMethod,
    ) -> Result<OrderRequest, CommerceError> {
        let shipping = ShippingSelection::resolve(countries, form.country_id, form.city_id);
        OrderRequest::build(form, shipping.as_ref(), self.cart.items(), payment_method)
    }

    /// The order was accepted: empty the cart and forget the draft.
    pub fn complete_order(&mut self) {
        tracing::info!(lines = self.cart.count(), "order completed");
        self.reset_checkout();
    }

    /// Abandon checkout: empty the cart and forget the draft.
    pub fn clear_checkout(&mut self) {
        tracing::info!(lines = self.cart.count(), "checkout cleared");
        self.reset_checkout();
    }

    fn reset_checkout(&mut self) {
        self.cart.clear();
        CheckoutForm::clear(&self.store);
    }
}

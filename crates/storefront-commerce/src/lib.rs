//! Client-side storefront state: cart, favorites, pricing and checkout.
//!
//! - **Cart**: line items keyed by product, quantity floor of 1, persisted
//!   under the `"cart"` slot and published on every change
//! - **Favorites**: a set of product snapshots under `"favorites"`
//! - **Pricing**: effective unit price, subtotal, first-order coupon
//!   discount and final total
//! - **Checkout**: the persisted draft, shipping resolution and the order
//!   payload
//!
//! All state lives in a [`storefront_kv::Store`]; persistence failures are
//! logged and never abort a mutation.
//!
//! # Example
//!
//! ```
//! use storefront_commerce::prelude::*;
//! use storefront_kv::Store;
//!
//! let mut cart = CartEngine::open(Store::in_memory());
//! let shirt = Product::new(ProductId::new(7), "Shirt", Money::from_major(20));
//!
//! cart.add_to_cart(&shirt, None);
//! cart.add_to_cart(&shirt, None);
//!
//! assert_eq!(cart.count(), 1);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.subtotal(), Money::from_major(40));
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod observable;
pub mod slots;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod favorites;
pub mod storefront;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use storefront::{CheckoutQuote, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{unwrap_envelope, Product, ProductSize};

    // Cart
    pub use crate::cart::{CartEngine, CartPricing, Coupon, CouponKind, LineItem, LineItemPricing};

    // Favorites
    pub use crate::favorites::{Favorite, FavoritesEngine};

    // Checkout
    pub use crate::checkout::{
        CheckoutForm, City, Country, FirstOrderCheck, FirstOrderOutcome, OrderItem, OrderRequest,
        PaymentMethod, Shipment, ShippingSelection,
    };

    pub use crate::storefront::{CheckoutQuote, Storefront};
}

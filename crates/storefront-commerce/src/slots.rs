//! Store keys owned by the engines.

/// JSON array of cart line items.
pub const CART_SLOT: &str = "cart";

/// JSON array of favorites.
pub const FAVORITES_SLOT: &str = "favorites";

/// JSON object with the last-entered checkout form.
pub const CHECKOUT_SLOT: &str = "checkoutData";

//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Engine mutations never return these: referential misses are no-ops and
/// persistence failures are logged. They surface from parsing upstream
/// payloads and from checkout validation.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Name, phone or address missing from the checkout form.
    #[error("Checkout incomplete: name, phone and address are required")]
    MissingContactDetails,

    /// Country, city or a shipment for that city missing.
    #[error("Checkout incomplete: select a country and a city with shipping")]
    MissingLocation,

    /// Tried to place an order with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// An upstream payload did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Store error.
    #[error("Store error: {0}")]
    StoreError(#[from] storefront_kv::StoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

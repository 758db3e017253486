//! Checkout: draft form, shipping, first-order coupon and order payload.
//!
//! - [`CheckoutForm`]: the persisted `"checkoutData"` draft
//! - [`ShippingSelection`]: resolving a country/city to a shipment
//! - [`FirstOrderOutcome`]: first-order coupon eligibility
//! - [`OrderRequest`]: validated order submission body

mod first_order;
mod form;
mod order;
mod shipping;

pub use first_order::{FirstOrderCheck, FirstOrderOutcome};
pub use form::CheckoutForm;
pub use order::{OrderItem, OrderRequest, PaymentMethod};
pub use shipping::{City, Country, Shipment, ShippingSelection};

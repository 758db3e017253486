//! Shopping cart module.
//!
//! Contains the cart engine, line items, pricing and coupons.

mod cart;
mod coupon;
pub mod pricing;

pub use cart::{CartEngine, LineItem};
pub use coupon::{Coupon, CouponKind};
pub use pricing::{CartPricing, LineItemPricing};

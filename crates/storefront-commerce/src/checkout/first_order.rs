//! First-order coupon eligibility.

use serde::{Deserialize, Serialize};

use crate::cart::Coupon;
use crate::catalog::unwrap_envelope;
use crate::error::CommerceError;

/// Answer of the "check first order" endpoint for a phone number.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FirstOrderCheck {
    #[serde(default)]
    pub is_first_order: bool,
    #[serde(default)]
    pub coupon: Option<Coupon>,
}

impl FirstOrderCheck {
    /// Parse an enveloped response such as `{"data": {...}}`.
    pub fn from_response(response: serde_json::Value) -> Result<Self, CommerceError> {
        unwrap_envelope(response)
    }

    /// Classify the answer.
    pub fn outcome(self) -> FirstOrderOutcome {
        match (self.is_first_order, self.coupon) {
            (true, Some(coupon)) => FirstOrderOutcome::Eligible(coupon),
            (true, None) => FirstOrderOutcome::EligibleWithoutCoupon,
            (false, _) => FirstOrderOutcome::NotFirstOrder,
        }
    }
}

/// What a first-order check means for checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum FirstOrderOutcome {
    /// First order, and the store grants this coupon automatically.
    Eligible(Coupon),
    /// First order, but no coupon is on offer.
    EligibleWithoutCoupon,
    /// The phone number has ordered before.
    NotFirstOrder,
}

impl FirstOrderOutcome {
    /// The coupon to apply automatically, if any.
    pub fn automatic_coupon(&self) -> Option<&Coupon> {
        match self {
            FirstOrderOutcome::Eligible(coupon) => Some(coupon),
            _ => None,
        }
    }

    /// Short name used in logs and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FirstOrderOutcome::Eligible(_) => "eligible",
            FirstOrderOutcome::EligibleWithoutCoupon => "eligible_without_coupon",
            FirstOrderOutcome::NotFirstOrder => "not_first_order",
        }
    }
}

//! Order submission payload.

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::checkout::{CheckoutForm, ShippingSelection};
use crate::error::CommerceError;
use crate::ids::{ProductId, ShipmentId};

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    #[default]
    CashOnDelivery,
    /// Card payment.
    Credit,
}

impl PaymentMethod {
    /// Wire name sent to the order endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
            PaymentMethod::Credit => "credit",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on delivery",
            PaymentMethod::Credit => "Credit card",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash_on_delivery" | "cod" => Ok(PaymentMethod::CashOnDelivery),
            "credit" => Ok(PaymentMethod::Credit),
            other => Err(CommerceError::UnexpectedResponse(format!(
                "unknown payment method: {other}"
            ))),
        }
    }
}

/// One ordered product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

/// Body of the "create order" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub name: String,
    pub phone: String,
    /// `null` when left blank.
    pub email: Option<String>,
    pub address: String,
    pub shipment_id: ShipmentId,
    /// `null` when left blank.
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    /// Validate the checkout state and build the request.
    ///
    /// Checks run in order: contact details, then location and shipment,
    /// then a non-empty cart. The first failure is returned.
    pub fn build(
        form: &CheckoutForm,
        shipping: Option<&ShippingSelection>,
        items: &[LineItem],
        payment_method: PaymentMethod,
    ) -> Result<Self, CommerceError> {
        if !form.has_contact_details() {
            return Err(CommerceError::MissingContactDetails);
        }

        let shipment_id = match (form.country_id, form.city_id, shipping) {
            (Some(_), Some(_), Some(selection)) => selection.shipment_id,
            _ => return Err(CommerceError::MissingLocation),
        };

        if items.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        Ok(Self {
            name: form.name.clone(),
            phone: form.phone.clone(),
            email: non_blank(&form.email),
            address: form.address.clone(),
            shipment_id,
            coupon_code: non_blank(&form.coupon_code),
            payment_method,
            items: items.iter().map(OrderItem::from).collect(),
        })
    }

    /// Total units ordered.
    pub fn unit_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

//! Checkout form draft.

use serde::{Deserialize, Serialize};
use storefront_kv::Store;

use crate::ids::{lenient_id, CityId, CountryId};
use crate::slots::CHECKOUT_SLOT;

/// The last-entered checkout form, persisted so a reload keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub country_id: Option<CountryId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub city_id: Option<CityId>,
    #[serde(default)]
    pub coupon_code: String,
}

impl CheckoutForm {
    /// Load the saved draft; missing or unreadable drafts load empty.
    pub fn load(store: &Store) -> Self {
        store.load_or_default(CHECKOUT_SLOT)
    }

    /// Save the draft. Failures are logged, matching the engines.
    pub fn save(&self, store: &Store) {
        if let Err(error) = store.set(CHECKOUT_SLOT, self) {
            tracing::warn!(%error, "failed to persist checkout form");
        }
    }

    /// Drop the saved draft.
    pub fn clear(store: &Store) {
        if let Err(error) = store.delete(CHECKOUT_SLOT) {
            tracing::warn!(%error, "failed to clear checkout form");
        }
    }

    /// Choose a country. A different country invalidates the chosen city.
    pub fn select_country(&mut self, country_id: Option<CountryId>) {
        if self.country_id != country_id {
            self.city_id = None;
        }
        self.country_id = country_id;
    }

    /// Choose a city.
    pub fn select_city(&mut self, city_id: Option<CityId>) {
        self.city_id = city_id;
    }

    /// Whether name, phone and address are all filled in.
    pub fn has_contact_details(&self) -> bool {
        [&self.name, &self.phone, &self.address]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

//! Shipping destinations and rates.

use serde::{Deserialize, Serialize};

use crate::catalog::amount;
use crate::ids::{CityId, CountryId, ShipmentId};
use crate::money::Money;

/// A country with the cities the store ships to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    /// Unique identifier.
    pub id: CountryId,
    /// Display name.
    #[serde(default, alias = "name")]
    pub title: String,
    /// Cities in this country.
    #[serde(default)]
    pub cities: Vec<City>,
}

impl Country {
    /// Look up a city by ID.
    pub fn city(&self, city_id: CityId) -> Option<&City> {
        self.cities.iter().find(|c| c.id == city_id)
    }
}

/// A city and the shipment that serves it, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    /// Unique identifier.
    pub id: CityId,
    /// Display name.
    #[serde(default, alias = "name")]
    pub title: String,
    /// Shipment option for the city.
    #[serde(default)]
    pub shipment: Option<Shipment>,
}

/// A shipment option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipment {
    /// Unique identifier.
    pub id: ShipmentId,
    /// Shipping price.
    #[serde(default, with = "amount::required")]
    pub cost: Money,
}

/// A resolved shipment for the chosen destination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShippingSelection {
    /// Selected shipment ID.
    pub shipment_id: ShipmentId,
    /// Shipping cost.
    pub cost: Money,
}

impl ShippingSelection {
    /// Resolve the shipment for a country/city pair.
    ///
    /// `None` when either is unselected, unknown, or the city has no
    /// shipment; callers then charge no shipping and cannot place an order.
    pub fn resolve(
        countries: &[Country],
        country_id: Option<CountryId>,
        city_id: Option<CityId>,
    ) -> Option<Self> {
        let country = countries.iter().find(|c| Some(c.id) == country_id)?;
        let shipment = country.city(city_id?)?.shipment.as_ref()?;
        Some(Self {
            shipment_id: shipment.id,
            cost: shipment.cost,
        })
    }
}

//! Favorites engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_kv::Store;
use tokio::sync::watch;

use crate::catalog::{amount, Product};
use crate::ids::ProductId;
use crate::money::Money;
use crate::observable::Observable;
use crate::slots::FAVORITES_SLOT;

/// The slice of a product kept for the favorites page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Discounted price at the time it was saved.
    #[serde(default, with = "amount::option")]
    pub price_after_discount: Option<Money>,
    /// Crossed-out price at the time it was saved.
    #[serde(default, with = "amount::option")]
    pub price_before_discount: Option<Money>,
    /// Primary image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Media attachments.
    #[serde(default)]
    pub files: Vec<serde_json::Value>,
    /// URL slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Category, as embedded by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<serde_json::Value>,
    /// When the product was favorited.
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
}

impl Favorite {
    /// Snapshot `product` as favorited at `date_added`.
    pub fn from_product(product: &Product, date_added: DateTime<Utc>) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price_after_discount: product.price_after_discount,
            price_before_discount: product.price_before_discount,
            image: product.image.clone(),
            files: product.files.clone(),
            slug: product.slug.clone(),
            category: product.category.clone(),
            date_added,
        }
    }
}

/// Owns the favorites set for one storefront session.
///
/// Same persistence discipline as the cart: rewrite the `"favorites"` slot,
/// then publish; write failures are logged.
#[derive(Debug)]
pub struct FavoritesEngine {
    store: Store,
    favorites: Vec<Favorite>,
    updates: Observable<Vec<Favorite>>,
}

impl FavoritesEngine {
    /// Hydrate favorites from `store`.
    pub fn open(store: Store) -> Self {
        let favorites: Vec<Favorite> = store.load_list(FAVORITES_SLOT);
        tracing::debug!(favorites = favorites.len(), "favorites hydrated");
        Self {
            store,
            updates: Observable::new(favorites.clone()),
            favorites,
        }
    }

    /// Favorite `product`. Returns `false` if it already was.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.is_favorite(product.id) {
            return false;
        }
        self.favorites.push(Favorite::from_product(product, Utc::now()));
        self.commit();
        true
    }

    /// Unfavorite `product_id`. Returns `false` if it was not favorited.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let Some(index) = self.favorites.iter().position(|f| f.id == product_id) else {
            return false;
        };
        self.favorites.remove(index);
        self.commit();
        true
    }

    /// Flip membership of `product`; returns whether it is now a favorite.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.is_favorite(product.id) {
            self.remove(product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    /// Whether `product_id` is favorited.
    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.favorites.iter().any(|f| f.id == product_id)
    }

    /// Number of favorites.
    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Favorites in the order they were added.
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Remove every favorite.
    pub fn clear(&mut self) {
        self.favorites.clear();
        self.commit();
    }

    /// Reload from the store.
    pub fn refresh(&mut self) {
        self.favorites = self.store.load_list(FAVORITES_SLOT);
        self.updates.publish(self.favorites.clone());
    }

    /// Subscribe to favorites changes. The receiver starts at the current set.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Favorite>> {
        self.updates.subscribe()
    }

    fn commit(&self) {
        if let Err(error) = self.store.save_list(FAVORITES_SLOT, &self.favorites) {
            tracing::warn!(%error, favorites = self.favorites.len(), "failed to persist favorites");
        }
        self.updates.publish(self.favorites.clone());
    }
}

//! Favorited products.

mod favorites;

pub use favorites::{Favorite, FavoritesEngine};

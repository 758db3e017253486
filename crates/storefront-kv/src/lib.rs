//! Durable JSON key-value slots for the storefront state engine.
//!
//! A [`Store`] is a cheap, cloneable handle over a [`Backend`] that keeps raw
//! bytes under string keys. Values go in and out as JSON.
//!
//! Two families of accessors are provided:
//!
//! - [`Store::get`] / [`Store::set`] propagate every failure to the caller.
//! - [`Store::load_list`] / [`Store::load_or_default`] never fail: missing or
//!   malformed data is logged and replaced by an empty value.
//!
//! # Example
//!
//! ```
//! use storefront_kv::Store;
//!
//! let store = Store::in_memory();
//! store.save_list("cart", &[1u32, 2, 3]).unwrap();
//!
//! let cart: Vec<u32> = store.load_list("cart");
//! assert_eq!(cart, vec![1, 2, 3]);
//!
//! // Nothing stored yet: an empty list, not an error.
//! let favorites: Vec<u32> = store.load_list("favorites");
//! assert!(favorites.is_empty());
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Backend, FileBackend, MemoryBackend, Store, StoreError};
}

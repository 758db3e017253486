//! Catalog records as delivered by the commerce API.
//!
//! The engines never fetch these; callers hand over already-resolved records.

pub mod amount;
mod envelope;
mod product;

pub use envelope::unwrap_envelope;
pub use product::{Product, ProductSize};

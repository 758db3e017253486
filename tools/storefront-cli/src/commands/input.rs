//! Reading catalog records from files and flags.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_commerce::catalog::{unwrap_envelope, Product};
use storefront_commerce::checkout::{Country, FirstOrderCheck, FirstOrderOutcome};
use storefront_commerce::{Money, ProductId};

use super::ProductArgs;

/// Read a JSON file.
pub fn read_json(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Decode `value` directly when `is_bare` says it is the payload itself,
/// otherwise as a single-key envelope.
fn bare_or_enveloped<T: DeserializeOwned>(value: Value, is_bare: fn(&Value) -> bool) -> Result<T> {
    if is_bare(&value) {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(unwrap_envelope(value)?)
    }
}

/// Product from a catalog file or from inline flags.
pub fn product(args: &ProductArgs) -> Result<Product> {
    if let Some(path) = &args.file {
        return bare_or_enveloped(read_json(path)?, |v| v.get("id").is_some())
            .with_context(|| format!("No product record in {}", path));
    }

    let Some(id) = args.id else {
        bail!("Either --file or --id is required");
    };
    let price = parse_amount("--price", args.price.as_deref())?;
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| format!("Product {}", id));

    let mut product = Product::new(ProductId::new(id), title, price.unwrap_or_default());
    product.price = price;
    product.price_after_discount = parse_amount("--discount", args.discount.as_deref())?;
    Ok(product)
}

/// Countries from a file holding a bare array or an enveloped one.
pub fn countries(path: &str) -> Result<Vec<Country>> {
    bare_or_enveloped(read_json(path)?, Value::is_array)
        .with_context(|| format!("No country list in {}", path))
}

/// Classify a saved first-order check response.
pub fn first_order(path: &str) -> Result<FirstOrderOutcome> {
    let check: FirstOrderCheck =
        bare_or_enveloped(read_json(path)?, |v| v.get("is_first_order").is_some())
            .with_context(|| format!("No first-order answer in {}", path))?;
    Ok(check.outcome())
}

fn parse_amount(flag: &str, raw: Option<&str>) -> Result<Option<Money>> {
    raw.map(|s| {
        s.parse::<Money>()
            .with_context(|| format!("Invalid amount for {}: {}", flag, s))
    })
    .transpose()
}

/// Parse an optional numeric ID; an empty string means "none".
pub fn optional_id<T>(flag: &str, raw: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .with_context(|| format!("Invalid ID for {}: {}", flag, raw))
}

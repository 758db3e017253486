//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use storefront_commerce::catalog::{Product, ProductSize};
use storefront_commerce::cart::LineItem;
use storefront_commerce::{LineItemId, ProductId, SizeId, Storefront};

use super::{input, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;

    match args.command {
        CartCommand::Add { product, size } => {
            let product = input::product(&product)?;
            let size = pick_size(&product, size)?;

            let line_item_id = shop.cart_mut().add_to_cart(&product, size.as_ref());
            let quantity = shop
                .cart()
                .get_item(line_item_id)
                .map(|item| item.quantity)
                .unwrap_or_default();
            ctx.output.success(&format!(
                "Added {} (line {}, quantity {})",
                product.title, line_item_id, quantity
            ));
        }
        CartCommand::List => {}
        CartCommand::Qty { product_id, delta } => {
            let product_id = ProductId::new(product_id);
            require_in_cart(&shop, product_id)?;
            shop.cart_mut().update_quantity(product_id, delta);
        }
        CartCommand::Set {
            product_id,
            quantity,
        } => {
            let product_id = ProductId::new(product_id);
            require_in_cart(&shop, product_id)?;
            shop.cart_mut().set_quantity(product_id, quantity);
        }
        CartCommand::Remove { line_item_id } => {
            if shop.cart_mut().remove_item(LineItemId::new(line_item_id)) {
                ctx.output.success(&format!("Removed line {}", line_item_id));
            } else {
                ctx.output.warn(&format!("No line {} in the cart", line_item_id));
            }
        }
        CartCommand::RemoveProduct { product_id } => {
            if shop.cart_mut().remove_product(ProductId::new(product_id)) {
                ctx.output.success(&format!("Removed product {}", product_id));
            } else {
                ctx.output.warn(&format!("Product {} is not in the cart", product_id));
            }
        }
        CartCommand::Clear { yes } => {
            if shop.cart().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} lines from the cart?", shop.cart().count()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }
            shop.cart_mut().clear();
            ctx.output.success("Cart cleared");
        }
    }

    show_cart(&shop, ctx);
    Ok(())
}

/// The requested size, which must exist and be in stock.
fn pick_size(product: &Product, size_id: Option<u64>) -> Result<Option<ProductSize>> {
    let Some(id) = size_id else {
        return Ok(None);
    };
    match product.size(SizeId::new(id)) {
        Some(size) if size.in_stock() => Ok(Some(size.clone())),
        Some(size) => bail!("Size {} of {} is out of stock", size.size, product.title),
        None => bail!("Product {} has no size {}", product.id, id),
    }
}

fn line_title(item: &LineItem) -> String {
    let mut title = item.product.title.clone();
    if let Some(size) = &item.selected_size {
        title = format!("{} ({})", title, size.size);
    }
    if item.product.is_discounted() {
        title.push_str(" *");
    }
    title
}

fn require_in_cart(shop: &Storefront, product_id: ProductId) -> Result<()> {
    if !shop.cart().is_in_cart(product_id) {
        bail!("Product {} is not in the cart", product_id);
    }
    Ok(())
}

/// Print the cart, as a table or as JSON.
pub fn show_cart(shop: &Storefront, ctx: &Context) {
    let cart = shop.cart();
    let pricing = cart.pricing(None, None);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "count": cart.count(),
            "item_count": cart.item_count(),
            "pricing": pricing,
        }));
        return;
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [14, 8, 28, 6, 10, 10];
    ctx.output
        .table_row(&["LINE", "PRODUCT", "TITLE", "QTY", "UNIT", "TOTAL"], &widths);
    for line in &pricing.line_items {
        let Some(item) = cart.get_item(line.line_item_id) else {
            continue;
        };
        let title = line_title(item);
        let line_id = line.line_item_id.to_string();
        let product_id = item.product_id.to_string();
        let title = truncate(&title, 28);
        let quantity = line.quantity.to_string();
        let unit = ctx.output.money(line.unit_price);
        let total = ctx.output.money(line.total);
        ctx.output.table_row(
            &[
                line_id.as_str(),
                product_id.as_str(),
                title.as_str(),
                quantity.as_str(),
                unit.as_str(),
                total.as_str(),
            ],
            &widths,
        );
    }

    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("subtotal", &ctx.output.money(pricing.subtotal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::Money;

    fn shirt() -> Product {
        let mut sold_out = ProductSize::new(SizeId::new(2), "L", Money::from_major(14));
        sold_out.stock = Some(0);
        Product::new(ProductId::new(3), "Shirt", Money::from_major(12))
            .with_size(ProductSize::new(SizeId::new(1), "S", Money::from_major(10)))
            .with_size(sold_out)
    }

    #[test]
    fn test_pick_size() {
        let shirt = shirt();
        assert_eq!(pick_size(&shirt, None).unwrap(), None);
        assert_eq!(pick_size(&shirt, Some(1)).unwrap().map(|s| s.id), Some(SizeId::new(1)));
        assert!(pick_size(&shirt, Some(9)).is_err());
    }

    #[test]
    fn test_pick_size_refuses_sold_out() {
        let err = pick_size(&shirt(), Some(2)).unwrap_err();
        assert!(err.to_string().contains("out of stock"));
    }

    #[test]
    fn test_line_title_marks_size_and_discount() {
        let mut product = shirt();
        product.price_after_discount = Some(Money::from_major(9));
        let size = product.size(SizeId::new(1)).cloned();
        let item = LineItem::new(product, size);
        assert_eq!(line_title(&item), "Shirt (S) *");
    }
}

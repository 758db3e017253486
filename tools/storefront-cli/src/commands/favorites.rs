//! Favorites commands.

use anyhow::Result;
use chrono::Local;
use dialoguer::Confirm;
use storefront_commerce::{ProductId, Storefront};

use super::{input, FavoritesArgs, FavoritesCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the favorites command.
pub async fn run(args: FavoritesArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;

    match args.command {
        FavoritesCommand::Add { product } => {
            let product = input::product(&product)?;
            if shop.favorites_mut().add(&product) {
                ctx.output.success(&format!("Added {} to favorites", product.title));
            } else {
                ctx.output.info(&format!("{} is already a favorite", product.title));
            }
        }
        FavoritesCommand::Remove { product_id } => {
            if shop.favorites_mut().remove(ProductId::new(product_id)) {
                ctx.output.success(&format!("Removed product {} from favorites", product_id));
            } else {
                ctx.output.warn(&format!("Product {} is not a favorite", product_id));
            }
        }
        FavoritesCommand::Toggle { product } => {
            let product = input::product(&product)?;
            if shop.favorites_mut().toggle(&product) {
                ctx.output.success(&format!("Added {} to favorites", product.title));
            } else {
                ctx.output.success(&format!("Removed {} from favorites", product.title));
            }
        }
        FavoritesCommand::List => {}
        FavoritesCommand::Clear { yes } => {
            if shop.favorites().count() == 0 {
                ctx.output.info("No favorites to clear");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} favorites?", shop.favorites().count()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }
            shop.favorites_mut().clear();
            ctx.output.success("Favorites cleared");
        }
    }

    show_favorites(&shop, ctx);
    Ok(())
}

fn show_favorites(shop: &Storefront, ctx: &Context) {
    let favorites = shop.favorites().favorites();

    if ctx.output.is_json() {
        ctx.output.json(&favorites);
        return;
    }

    ctx.output.header("Favorites");
    if favorites.is_empty() {
        ctx.output.info("No favorites yet");
        return;
    }

    let widths = [8, 28, 10, 16];
    ctx.output.table_row(&["PRODUCT", "TITLE", "PRICE", "ADDED"], &widths);
    for favorite in favorites {
        let price = favorite
            .price_after_discount
            .or(favorite.price_before_discount)
            .map(|p| ctx.output.money(p))
            .unwrap_or_else(|| "-".to_string());
        let added = favorite
            .date_added
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let id = favorite.id.to_string();
        let title = truncate(&favorite.title, 28);
        ctx.output
            .table_row(&[id.as_str(), title.as_str(), price.as_str(), added.as_str()], &widths);
    }
}

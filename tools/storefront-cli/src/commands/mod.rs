//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod favorites;
mod input;

use clap::{Args, Subcommand};

/// A product given either as a catalog JSON file or inline.
#[derive(Args, Debug, Clone)]
pub struct ProductArgs {
    /// Catalog JSON file with the product record (bare or enveloped).
    #[arg(short, long, conflicts_with_all = ["id", "title", "price", "discount"])]
    pub file: Option<String>,

    /// Product ID.
    #[arg(long, required_unless_present = "file")]
    pub id: Option<u64>,

    /// Product title.
    #[arg(long)]
    pub title: Option<String>,

    /// Base price, e.g. 19.99.
    #[arg(long)]
    pub price: Option<String>,

    /// Discounted price.
    #[arg(long)]
    pub discount: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add {
        #[command(flatten)]
        product: ProductArgs,
        /// Size ID to select from the product's sizes.
        #[arg(short, long)]
        size: Option<u64>,
    },
    /// List the cart with totals.
    List,
    /// Change a product's quantity by a delta (never below 1).
    Qty {
        /// Product ID.
        product_id: u64,
        /// Amount to add; negative to subtract.
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Set a product's quantity (never below 1).
    Set {
        /// Product ID.
        product_id: u64,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a line item.
    Remove {
        /// Line item ID.
        line_item_id: u64,
    },
    /// Remove the line for a product.
    RemoveProduct {
        /// Product ID.
        product_id: u64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the favorites command.
#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// Favorite a product.
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Unfavorite a product.
    Remove {
        /// Product ID.
        product_id: u64,
    },
    /// Flip a product's favorite state.
    Toggle {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// List favorites.
    List,
    /// Remove every favorite.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Checkout draft fields. Omitted flags keep their saved value; an empty
/// string clears a field.
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Country ID. Changing it clears the city.
    #[arg(long)]
    pub country: Option<String>,

    /// City ID.
    #[arg(long)]
    pub city: Option<String>,

    /// Coupon code.
    #[arg(long)]
    pub coupon: Option<String>,
}

/// Files describing destinations and the first-order answer.
#[derive(Args, Debug)]
pub struct ShippingArgs {
    /// Countries JSON file (bare array or enveloped).
    #[arg(long)]
    pub countries: String,

    /// First-order check response JSON file.
    #[arg(long)]
    pub first_order: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    pub command: CheckoutCommand,
}

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Show or update the saved checkout form.
    Form(FormArgs),
    /// Price the cart for the saved destination.
    Quote(ShippingArgs),
    /// Validate and print the order request body.
    Order {
        #[command(flatten)]
        shipping: ShippingArgs,
        /// Payment method: cash_on_delivery or credit.
        #[arg(short, long, default_value = "cash_on_delivery")]
        payment: String,
    },
    /// Mark the order as placed: clears the cart and the form.
    Complete,
    /// Abandon checkout: clears the cart and the form.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

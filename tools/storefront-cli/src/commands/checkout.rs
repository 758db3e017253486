//! Checkout commands.

use anyhow::Result;
use dialoguer::Confirm;
use storefront_commerce::checkout::{CheckoutForm, FirstOrderOutcome, PaymentMethod};
use storefront_commerce::{CheckoutQuote, Storefront};

use super::{input, CheckoutArgs, CheckoutCommand, FormArgs, ShippingArgs};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;

    match args.command {
        CheckoutCommand::Form(form_args) => update_form(&shop, form_args, ctx),
        CheckoutCommand::Quote(shipping) => {
            let (quote, outcome) = quote(&shop, &shipping)?;
            if ctx.output.is_json() {
                ctx.output.json(&quote);
                return Ok(());
            }
            if let Some(outcome) = &outcome {
                show_outcome(outcome, ctx);
            }
            show_quote(&quote, ctx);
            Ok(())
        }
        CheckoutCommand::Order { shipping, payment } => {
            let payment_method: PaymentMethod = payment.parse()?;
            let countries = input::countries(&shipping.countries)?;
            let form = shop.checkout_form();
            let request = shop.order_request(&form, &countries, payment_method)?;

            if !ctx.output.is_json() {
                let (quote, _) = quote(&shop, &shipping)?;
                show_quote(&quote, ctx);
                ctx.output.kv("payment", payment_method.display_name());
                ctx.output.header("Order request");
            }
            ctx.output.json(&request);
            Ok(())
        }
        CheckoutCommand::Complete => {
            shop.complete_order();
            report_reset(&shop, "completed", ctx);
            ctx.output.success("Order completed; cart and checkout form cleared");
            Ok(())
        }
        CheckoutCommand::Clear { yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Clear the cart and the saved checkout form?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }
            shop.clear_checkout();
            report_reset(&shop, "cleared", ctx);
            ctx.output.success("Cart and checkout form cleared");
            Ok(())
        }
    }
}

/// In JSON mode, print the session state left after a reset.
fn report_reset(shop: &Storefront, status: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&reset_summary(shop, status));
    }
}

fn reset_summary(shop: &Storefront, status: &str) -> serde_json::Value {
    serde_json::json!({
        "status": status,
        "cart_lines": shop.cart().count(),
        "checkout_form": shop.checkout_form(),
    })
}

fn update_form(shop: &Storefront, args: FormArgs, ctx: &Context) -> Result<()> {
    let mut form = shop.checkout_form();
    let changed = apply_form_args(&mut form, args)?;
    if changed {
        shop.save_checkout_form(&form);
        ctx.output.success("Checkout form saved");
    }

    if ctx.output.is_json() {
        ctx.output.json(&form);
        return Ok(());
    }

    ctx.output.header("Checkout form");
    let id_or_dash = |id: Option<String>| id.unwrap_or_else(|| "-".to_string());
    ctx.output.kv("name", &form.name);
    ctx.output.kv("email", &form.email);
    ctx.output.kv("phone", &form.phone);
    ctx.output.kv("address", &form.address);
    ctx.output
        .kv("country", &id_or_dash(form.country_id.map(|id| id.to_string())));
    ctx.output
        .kv("city", &id_or_dash(form.city_id.map(|id| id.to_string())));
    ctx.output.kv("coupon", &form.coupon_code);
    if !form.has_contact_details() {
        ctx.output.warn("Name, phone and address are required to place an order");
    }
    Ok(())
}

/// Apply the given flags to `form`; returns whether anything was set.
fn apply_form_args(form: &mut CheckoutForm, args: FormArgs) -> Result<bool> {
    let mut changed = false;

    for (field, value) in [
        (&mut form.name, args.name),
        (&mut form.email, args.email),
        (&mut form.phone, args.phone),
        (&mut form.address, args.address),
        (&mut form.coupon_code, args.coupon),
    ] {
        if let Some(value) = value {
            *field = value;
            changed = true;
        }
    }

    if let Some(raw) = args.country {
        form.select_country(input::optional_id("--country", &raw)?);
        changed = true;
    }
    if let Some(raw) = args.city {
        form.select_city(input::optional_id("--city", &raw)?);
        changed = true;
    }

    Ok(changed)
}

fn quote(
    shop: &Storefront,
    shipping: &ShippingArgs,
) -> Result<(CheckoutQuote, Option<FirstOrderOutcome>)> {
    let countries = input::countries(&shipping.countries)?;
    let outcome = shipping
        .first_order
        .as_deref()
        .map(input::first_order)
        .transpose()?;

    let coupon = outcome.as_ref().and_then(FirstOrderOutcome::automatic_coupon);
    let quote = shop.quote(&shop.checkout_form(), &countries, coupon);
    Ok((quote, outcome))
}

fn show_outcome(outcome: &FirstOrderOutcome, ctx: &Context) {
    match outcome {
        FirstOrderOutcome::Eligible(coupon) => ctx.output.success(&format!(
            "First order: {} coupon applied automatically",
            coupon.kind.as_str()
        )),
        FirstOrderOutcome::EligibleWithoutCoupon => {
            ctx.output.info("First order, but no coupon is available")
        }
        FirstOrderOutcome::NotFirstOrder => ctx.output.info("Not a first order"),
    }
}

fn show_quote(quote: &CheckoutQuote, ctx: &Context) {
    let pricing = &quote.pricing;
    ctx.output.header("Order summary");
    ctx.output.kv("subtotal", &ctx.output.money(pricing.subtotal));
    if pricing.has_discounts() {
        ctx.output.kv(
            "discount",
            &format!(
                "-{} ({:.1}%)",
                ctx.output.money(pricing.savings()),
                pricing.discount_percentage()
            ),
        );
    }
    match &quote.shipping {
        Some(selection) => ctx.output.kv("shipping", &ctx.output.money(selection.cost)),
        None => ctx.output.kv("shipping", "select a country and city"),
    }
    ctx.output.kv("total", &ctx.output.money(pricing.grand_total));
}

//! End-to-end session flows over a shared store.

use serde_json::json;
use storefront_commerce::prelude::*;
use storefront_commerce::slots::{CART_SLOT, CHECKOUT_SLOT};
use storefront_kv::{MemoryBackend, Store};

fn countries() -> Vec<Country> {
    unwrap_envelope(json!({
        "data": [{
            "id": 1,
            "title": "Egypt",
            "cities": [
                {"id": 10, "title": "Cairo", "shipment": {"id": 100, "cost": "30.00"}},
                {"id": 11, "title": "Siwa"}
            ]
        }]
    }))
    .unwrap()
}

#[test]
fn add_bump_remove_scenario() {
    let mut cart = CartEngine::open(Store::in_memory());
    assert!(cart.is_empty());

    let product = Product::new(ProductId::new(7), "Shirt", Money::from_major(20));
    let line = cart.add_to_cart(&product, None);
    assert_eq!(cart.count(), 1);
    assert_eq!(cart.subtotal(), Money::from_major(20));

    cart.update_quantity(ProductId::new(7), 2);
    assert_eq!(cart.get_item(line).unwrap().quantity, 3);
    assert_eq!(cart.subtotal(), Money::from_major(60));

    assert!(cart.remove_item(line));
    assert_eq!(cart.count(), 0);
}

#[test]
fn catalog_payload_with_string_prices() {
    let product: Product = unwrap_envelope(json!({
        "product": {
            "id": 9,
            "title": "Dress",
            "price": "120.00",
            "price_after_discount": "99.50",
            "sizes": [{"id": 1, "size": "M", "price": "130", "price_after_discount": null, "stock": 4}],
            "files": [],
            "category": {"id": 2, "title": "Women"}
        }
    }))
    .unwrap();

    let mut cart = CartEngine::open(Store::in_memory());
    cart.add_to_cart(&product, product.size(SizeId::new(1)));
    assert_eq!(cart.subtotal(), Money::new(13000));

    let mut plain = CartEngine::open(Store::in_memory());
    plain.add_to_cart(&product, None);
    assert_eq!(plain.subtotal(), Money::new(9950));
}

#[test]
fn first_order_checkout_flow() {
    let store = Store::in_memory();
    let mut shop = Storefront::open(store.clone());
    shop.cart_mut()
        .add_to_cart(&Product::new(ProductId::new(1), "Shirt", Money::from_major(100)), None);

    let mut form = shop.checkout_form();
    form.name = "Omar".to_string();
    form.phone = "0100".to_string();
    form.address = "Street 1".to_string();
    form.select_country(Some(CountryId::new(1)));
    form.select_city(Some(CityId::new(10)));
    shop.save_checkout_form(&form);

    let outcome = FirstOrderCheck::from_response(json!({
        "data": {"is_first_order": true, "coupon": {"type": "percentage", "value": 10, "max_discount": 5}}
    }))
    .unwrap()
    .outcome();

    let quote = shop.quote(&form, &countries(), outcome.automatic_coupon());
    assert_eq!(quote.pricing.subtotal, Money::from_major(100));
    assert_eq!(quote.pricing.discount_total, Money::from_major(5));
    assert_eq!(quote.pricing.shipping_total, Money::from_major(30));
    assert_eq!(quote.pricing.grand_total, Money::from_major(125));

    let request = shop
        .order_request(&form, &countries(), PaymentMethod::CashOnDelivery)
        .unwrap();
    assert_eq!(request.shipment_id, ShipmentId::new(100));
    assert_eq!(request.items, vec![OrderItem { product_id: ProductId::new(1), quantity: 1 }]);

    shop.complete_order();
    assert!(Storefront::open(store.clone()).cart().is_empty());
    assert!(!store.exists(CHECKOUT_SLOT).unwrap());
}

#[test]
fn city_without_shipping_blocks_order() {
    let mut shop = Storefront::open(Store::in_memory());
    shop.cart_mut()
        .add_to_cart(&Product::new(ProductId::new(1), "Shirt", Money::from_major(100)), None);

    let form = CheckoutForm {
        name: "Omar".to_string(),
        phone: "0100".to_string(),
        address: "Street 1".to_string(),
        country_id: Some(CountryId::new(1)),
        city_id: Some(CityId::new(11)),
        ..Default::default()
    };

    let quote = shop.quote(&form, &countries(), None);
    assert_eq!(quote.pricing.grand_total, Money::from_major(100));

    let err = shop
        .order_request(&form, &countries(), PaymentMethod::default())
        .unwrap_err();
    assert!(matches!(err, CommerceError::MissingLocation));
}

#[test]
fn corrupt_slots_load_empty() {
    let store = Store::in_memory();
    store.set(CART_SLOT, &json!({"not": "a list"})).unwrap();
    store.set(CHECKOUT_SLOT, &json!([1, 2, 3])).unwrap();

    let shop = Storefront::open(store);
    assert!(shop.cart().is_empty());
    assert_eq!(shop.checkout_form(), CheckoutForm::default());
}

#[test]
fn full_store_keeps_session_usable() {
    let mut shop = Storefront::open(Store::new(MemoryBackend::with_quota(8)));
    let product = Product::new(ProductId::new(1), "Shirt", Money::from_major(10));

    shop.cart_mut().add_to_cart(&product, None);
    shop.favorites_mut().add(&product);

    assert_eq!(shop.cart().count(), 1);
    assert!(shop.favorites().is_favorite(ProductId::new(1)));
}

#[tokio::test]
async fn subscribers_see_every_commit() {
    let mut cart = CartEngine::open(Store::in_memory());
    let mut rx = cart.subscribe();
    assert!(rx.borrow().is_empty());

    let task = tokio::spawn(async move {
        rx.changed().await.unwrap();
        rx.borrow_and_update().len()
    });

    cart.add_to_cart(&Product::new(ProductId::new(1), "Shirt", Money::from_major(10)), None);
    assert_eq!(task.await.unwrap(), 1);
}

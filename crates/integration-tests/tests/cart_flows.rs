//! Integration tests for cart behaviour across page reloads.
//!
//! Each "reload" drops the `PageState` and opens a new one over the same
//! storage, the way a browser page would restore from local storage.

use std::sync::Arc;

use highflight_core::CurrencyCode;
use highflight_integration_tests::open_page;
use highflight_storefront::cart::{decode_items, encode_items};
use highflight_storefront::{CartError, CartTotals, KeyValueStore, MemoryStore};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// =============================================================================
// Totals Scenarios
// =============================================================================

#[test]
fn test_pizza_scenario_survives_reload() {
    let storage = Arc::new(MemoryStore::new());
    {
        let mut page = open_page(&storage);
        page.cart_mut()
            .add_item("pizza", "Pizza Margherita", dec("12.50"))
            .unwrap();
    }

    let page = open_page(&storage);
    let totals = page.cart().calculate_totals();
    assert_eq!(totals.subtotal, dec("12.50"));
    assert_eq!(totals.tax, dec("1.25"));
    assert_eq!(totals.total, dec("18.75"));

    let formatted = totals.formatted(CurrencyCode::USD);
    assert_eq!(formatted.total, "$18.75");
}

#[test]
fn test_mixed_quantities_scenario() {
    let storage = Arc::new(MemoryStore::new());
    let mut page = open_page(&storage);

    page.cart_mut().add_item("a", "A", dec("10")).unwrap();
    page.cart_mut()
        .add_item_with_quantity("b", "B", dec("20"), 2)
        .unwrap();

    assert_eq!(page.cart().calculate_totals().subtotal, dec("50"));
    assert_eq!(page.cart().item_count(), 3);
}

#[test]
fn test_operation_sequence_keeps_one_line_per_id() {
    let storage = Arc::new(MemoryStore::new());
    let mut page = open_page(&storage);
    let cart = page.cart_mut();

    cart.add_item("a", "A", dec("1")).unwrap();
    cart.add_item("b", "B", dec("2")).unwrap();
    cart.add_item("a", "A", dec("1")).unwrap();
    cart.update_quantity("b", 5);
    cart.remove_item("c");
    cart.add_item_with_quantity("b", "B", dec("2"), 3).unwrap();
    cart.update_quantity("a", 0);
    cart.add_item("a", "A again", dec("7")).unwrap();

    let ids: Vec<&str> = cart.items().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(cart.get("b").unwrap().quantity, 8);

    // "a" was removed, so the re-add takes the new price.
    assert_eq!(cart.get("a").unwrap().price, dec("7"));

    let expected: Decimal = cart.items().map(|i| i.price * Decimal::from(i.quantity)).sum();
    assert_eq!(cart.calculate_totals().subtotal, expected);
}

#[test]
fn test_remove_unknown_leaves_cart_unchanged() {
    let storage = Arc::new(MemoryStore::new());
    let mut page = open_page(&storage);
    page.cart_mut().add_item("a", "A", dec("3")).unwrap();
    let raw_before = storage.get("highflight-cart").unwrap();
    let totals_before = page.cart().calculate_totals();

    page.cart_mut().remove_item("never-added");

    assert_eq!(storage.get("highflight-cart").unwrap(), raw_before);
    assert_eq!(page.cart().calculate_totals(), totals_before);
}

// =============================================================================
// Persistence Format
// =============================================================================

#[test]
fn test_encode_decode_roundtrip() {
    let storage = Arc::new(MemoryStore::new());
    let mut page = open_page(&storage);
    page.cart_mut().add_item("x", "X", dec("0.99")).unwrap();
    page.cart_mut()
        .add_item_with_quantity("y", "Y", dec("149.5"), 4)
        .unwrap();

    let snapshot = page.cart().snapshot();
    let decoded = decode_items(&encode_items(&snapshot.items).unwrap()).unwrap();
    assert_eq!(decoded, snapshot.items);
}

#[test]
fn test_legacy_wrapped_cart_is_restored() {
    let legacy = r#"{"items":[{"id":"tacos","name":"Tacos","price":8.5,"quantity":3,"image":"tacos.jpg"}],"total":25.5}"#;
    let storage = Arc::new(MemoryStore::with_entries([("highflight-cart", legacy)]));

    let page = open_page(&storage);
    assert_eq!(page.cart().item_count(), 3);
    assert_eq!(page.cart().calculate_totals().subtotal, dec("25.5"));
}

#[test]
fn test_malformed_cart_resets_to_empty() {
    let storage = Arc::new(MemoryStore::with_entries([("highflight-cart", "{not json")]));

    let mut page = open_page(&storage);
    assert!(page.cart().is_empty());
    assert_eq!(page.cart().calculate_totals(), CartTotals::ZERO);

    // The next mutation overwrites the bad value.
    page.cart_mut().add_item("a", "A", dec("1")).unwrap();
    let raw = storage.get("highflight-cart").unwrap().unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

// =============================================================================
// Checkout
// =============================================================================

#[test]
fn test_checkout_then_reload() {
    let storage = Arc::new(MemoryStore::new());
    let order_number = {
        let mut page = open_page(&storage);
        page.cart_mut().add_item("pizza", "Pizza", dec("12.50")).unwrap();
        page.cart_mut()
            .confirm_order(Some("Singapore - Emirates".to_owned()))
            .unwrap()
            .order_number
    };

    let page = open_page(&storage);
    assert!(page.cart().is_empty());

    let last = page.cart().last_order().unwrap();
    assert_eq!(last.order_number, order_number);
    assert_eq!(last.totals.total, dec("18.75"));
}

#[test]
fn test_last_order_uses_camel_case_keys() {
    let storage = Arc::new(MemoryStore::new());
    let mut page = open_page(&storage);
    page.cart_mut().add_item("a", "A", dec("1")).unwrap();
    page.cart_mut().confirm_order(None).unwrap();

    let raw = storage.get("highflight-last-order").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for key in ["orderNumber", "items", "totals", "timestamp", "flight"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_checkout_rejects_empty_cart() {
    let storage = Arc::new(MemoryStore::new());
    let mut page = open_page(&storage);
    assert_eq!(page.cart_mut().confirm_order(None), Err(CartError::EmptyCart));
}

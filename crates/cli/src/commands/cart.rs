//! Cart commands.

use highflight_core::Price;
use highflight_storefront::order::OrderRecord;
use highflight_storefront::{CartError, PageState};
use rust_decimal::Decimal;

/// Print cart lines followed by the totals.
#[allow(clippy::print_stdout)]
pub fn show(page: &PageState) {
    let currency = page.config().currency;
    let snapshot = page.cart().snapshot();

    if snapshot.items.is_empty() {
        println!("Cart is empty");
        return;
    }

    let money = |amount| Price::new(amount, currency).display();
    for item in &snapshot.items {
        println!(
            "{:<16} {:<28} {:>4} x {:>10} = {:>10}",
            item.id,
            item.name,
            item.quantity,
            money(item.price),
            item.line_total().map_or_else(|| "-".to_owned(), money),
        );
    }

    let totals = snapshot.totals.formatted(currency);
    println!("Items:    {}", snapshot.item_count);
    println!("Subtotal: {}", totals.subtotal);
    println!("Service:  {}", totals.service);
    println!("Tax:      {}", totals.tax);
    println!("Total:    {}", totals.total);
}

/// Add an item.
///
/// # Errors
///
/// Returns `CartError` if the price is negative or the quantity is zero.
pub fn add(
    page: &mut PageState,
    id: &str,
    name: &str,
    price: Decimal,
    quantity: u32,
) -> Result<(), CartError> {
    page.cart_mut()
        .add_item_with_quantity(id, name, price, quantity)?;
    show(page);
    Ok(())
}

pub fn remove(page: &mut PageState, id: &str) {
    page.cart_mut().remove_item(id);
    show(page);
}

pub fn update(page: &mut PageState, id: &str, quantity: i64) {
    page.cart_mut().update_quantity(id, quantity);
    show(page);
}

pub fn clear(page: &mut PageState) {
    page.cart_mut().clear();
}

/// Confirm the cart as an order and print the record.
///
/// # Errors
///
/// Returns `CartError::EmptyCart` if there is nothing to order.
pub fn checkout(page: &mut PageState, flight: Option<String>) -> Result<(), CartError> {
    let record = page.cart_mut().confirm_order(flight)?;
    print_order(page, &record);
    Ok(())
}

/// Print the last confirmed order, if any.
#[allow(clippy::print_stdout)]
pub fn last_order(page: &PageState) {
    match page.cart().last_order() {
        Some(record) => print_order(page, &record),
        None => println!("No orders yet"),
    }
}

#[allow(clippy::print_stdout)]
fn print_order(page: &PageState, record: &OrderRecord) {
    let totals = record.totals.formatted(page.config().currency);
    println!("Order {}", record.order_number);
    println!("Placed: {}", record.timestamp.to_rfc3339());
    if let Some(flight) = &record.flight {
        println!("Flight: {flight}");
    }
    for item in &record.items {
        println!("  {} x {}", item.quantity, item.name);
    }
    println!("Total: {}", totals.total);
}

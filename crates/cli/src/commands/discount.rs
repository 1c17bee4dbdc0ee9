//! Discount code command.

use highflight_core::{CurrencyCode, Price};
use highflight_storefront::discount::{DiscountError, apply_discount_code};
use rust_decimal::Decimal;

/// Apply `code` to `total` and print the result in `currency`.
///
/// # Errors
///
/// Returns `DiscountError::UnknownCode` if the code is not recognised.
#[allow(clippy::print_stdout)]
pub fn apply(code: &str, total: Decimal, currency: CurrencyCode) -> Result<(), DiscountError> {
    let applied = apply_discount_code(code, total)?;
    let money = |amount| Price::new(amount, currency).display();

    println!("{}", applied.message());
    println!("Discount:  {}", money(applied.amount));
    println!("New total: {}", money(applied.new_total));
    Ok(())
}

//! Promotional discount codes for hotel bookings.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    #[error("invalid discount code: {0}")]
    UnknownCode(String),
}

/// Codes currently honoured by the booking pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountCode {
    /// Early booking, 15%.
    Early15,
    /// Stays of seven nights or more, 20%.
    Stay7,
    /// First booking, 10%.
    Welcome10,
    /// Honeymoon packages, 25%.
    Honeymoon,
}

impl DiscountCode {
    pub const ALL: [Self; 4] = [Self::Early15, Self::Stay7, Self::Welcome10, Self::Honeymoon];

    /// Fraction taken off the total.
    #[must_use]
    pub fn rate(self) -> Decimal {
        match self {
            Self::Early15 => Decimal::new(15, 2),
            Self::Stay7 => Decimal::new(20, 2),
            Self::Welcome10 => Decimal::new(10, 2),
            Self::Honeymoon => Decimal::new(25, 2),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Early15 => "EARLY15",
            Self::Stay7 => "STAY7",
            Self::Welcome10 => "WELCOME10",
            Self::Honeymoon => "HONEYMOON",
        }
    }
}

impl std::fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DiscountCode {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| DiscountError::UnknownCode(s.to_owned()))
    }
}

/// Result of applying a code to a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDiscount {
    pub code: DiscountCode,
    pub rate: Decimal,
    pub amount: Decimal,
    pub new_total: Decimal,
}

impl AppliedDiscount {
    /// Confirmation text, e.g. `"Discount applied: 15%"`.
    #[must_use]
    pub fn message(&self) -> String {
        let percent = (self.rate * Decimal::ONE_HUNDRED).normalize();
        format!("Discount applied: {percent}%")
    }
}

/// Apply a discount code (case-insensitive) to `total`.
///
/// # Errors
///
/// Returns `DiscountError::UnknownCode` if the code is not recognised.
pub fn apply_discount_code(code: &str, total: Decimal) -> Result<AppliedDiscount, DiscountError> {
    let code: DiscountCode = code.parse()?;
    let rate = code.rate();
    let amount = total * rate;
    Ok(AppliedDiscount {
        code,
        rate,
        amount,
        new_total: total - amount,
    })
}

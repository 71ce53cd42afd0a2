//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount string was not a valid decimal number.
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),
    /// The currency code was not recognized.
    #[error("unsupported currency code: {0}")]
    UnsupportedCurrency(String),
}

/// A price with currency information.
///
/// Amounts are held as [`Decimal`] in the currency's standard unit
/// (dollars, not cents), matching how the upstream API serializes money
/// (decimal strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a price from the upstream API's decimal-string form.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::InvalidAmount` if the amount is not a decimal
    /// number and `PriceError::UnsupportedCurrency` for unknown codes.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(amount)
            .map_err(|_| PriceError::InvalidAmount(amount.to_owned()))?;
        let currency_code = CurrencyCode::from_str(currency_code)?;
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Format for display, e.g. `$19.99` or `€7.50`.
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// ISO 4217 currency codes the storefront sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The currency's display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            other => Err(PriceError::UnsupportedCurrency(other.to_owned())),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_strings() {
        let price = Price::parse("19.99", "USD").unwrap();
        assert_eq!(price.display(), "$19.99");
    }

    #[test]
    fn rounds_to_two_places_for_display() {
        let price = Price::parse("7.5", "EUR").unwrap();
        assert_eq!(price.display(), "\u{20ac}7.50");
    }

    #[test]
    fn rejects_bad_amount() {
        assert!(matches!(
            Price::parse("nineteen", "USD"),
            Err(PriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_unknown_currency() {
        assert!(matches!(
            Price::parse("1.00", "JPY"),
            Err(PriceError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn preserves_precision() {
        let price = Price::parse("10.10", "USD").unwrap();
        assert_eq!(price.amount.to_string(), "10.10");
    }
}

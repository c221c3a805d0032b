//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of fee amounts using
//! rust_decimal, so challan totals never pick up floating-point drift.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub, Mul, Neg};
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    PKR,
    INR,
    BDT,
    AED,
    SAR,
    KWD,
    USD,
    GBP,
    EUR,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::KWD => 3,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::PKR => "Rs",
            Currency::INR => "₹",
            Currency::BDT => "৳",
            Currency::AED => "AED",
            Currency::SAR => "SAR",
            Currency::KWD => "KWD",
            Currency::USD => "$",
            Currency::GBP => "£",
            Currency::EUR => "€",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::PKR => "PKR",
            Currency::INR => "INR",
            Currency::BDT => "BDT",
            Currency::AED => "AED",
            Currency::SAR => "SAR",
            Currency::KWD => "KWD",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::EUR => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PKR" => Ok(Currency::PKR),
            "INR" => Ok(Currency::INR),
            "BDT" => Ok(Currency::BDT),
            "AED" => Ok(Currency::AED),
            "SAR" => Ok(Currency::SAR),
            "KWD" => Ok(Currency::KWD),
            "USD" => Ok(Currency::USD),
            "GBP" => Ok(Currency::GBP),
            "EUR" => Ok(Currency::EUR),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount with associated currency
///
/// Amounts are stored with 4 decimal places internally; use
/// [`Money::round_to_currency`] to get the billable minor-unit amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Creates Money from an integer amount in minor units (e.g., paisa)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        let divisor = Decimal::new(10_i64.pow(currency.decimal_places()), 0);
        Self::new(Decimal::new(minor_units, 0) / divisor, currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Rounds to the currency's standard decimal places
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self.amount.round_dp(self.currency.decimal_places()),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiplies by a factor, failing instead of panicking on overflow
    pub fn checked_multiply(&self, factor: Decimal) -> Result<Money, MoneyError> {
        let amount = self.amount.checked_mul(factor).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// True if the amount carries digits below the currency's minor unit
    pub fn has_sub_minor_units(&self) -> bool {
        self.amount != self.amount.round_dp(self.currency.decimal_places())
    }

    /// Multiplies by a scalar (e.g., months per installment)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// Returns the smaller of two amounts in the same currency
    pub fn min(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(if other.amount < self.amount { *other } else { *self })
    }

    /// Sums a sequence of amounts, all of which must be in `currency`
    pub fn sum<'a, I>(currency: Currency, items: I) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        items
            .into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

/// A percentage rate such as a sibling discount or a late-fee surcharge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.10 for 10%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.10 for 10%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 10 for 10%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(1500.50), Currency::PKR);
        assert_eq!(m.amount(), dec!(1500.50));
        assert_eq!(m.currency(), Currency::PKR);
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(150050, Currency::PKR);
        assert_eq!(m.amount(), dec!(1500.50));

        let kwd = Money::from_minor(12345, Currency::KWD);
        assert_eq!(kwd.amount(), dec!(12.345));
    }

    #[test]
    fn test_currency_mismatch() {
        let pkr = Money::new(dec!(100.00), Currency::PKR);
        let usd = Money::new(dec!(100.00), Currency::USD);

        let result = pkr.checked_add(&usd);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_checked_multiply_overflow() {
        let huge = Money::new(Decimal::MAX, Currency::PKR);
        assert_eq!(huge.checked_multiply(dec!(3)), Err(MoneyError::Overflow));
        assert_eq!(huge.checked_add(&huge), Err(MoneyError::Overflow));

        let fee = Money::new(dec!(1800), Currency::PKR);
        assert_eq!(fee.checked_multiply(dec!(3)).unwrap().amount(), dec!(5400));
    }

    #[test]
    fn test_sub_minor_units() {
        assert!(Money::new(dec!(1000.005), Currency::PKR).has_sub_minor_units());
        assert!(!Money::new(dec!(1000.50), Currency::PKR).has_sub_minor_units());
        assert!(!Money::new(dec!(1.005), Currency::KWD).has_sub_minor_units());
    }

    #[test]
    fn test_money_min() {
        let a = Money::new(dec!(300), Currency::PKR);
        let b = Money::new(dec!(250), Currency::PKR);
        assert_eq!(a.min(&b).unwrap(), b);
        assert_eq!(b.min(&a).unwrap(), b);
    }

    #[test]
    fn test_money_sum() {
        let items = vec![
            Money::new(dec!(1000), Currency::PKR),
            Money::new(dec!(250.25), Currency::PKR),
        ];
        let total = Money::sum(Currency::PKR, &items).unwrap();
        assert_eq!(total.amount(), dec!(1250.25));

        let mixed = vec![Money::new(dec!(1), Currency::USD)];
        assert!(Money::sum(Currency::PKR, &mixed).is_err());
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("pkr".parse::<Currency>().unwrap(), Currency::PKR);
        assert_eq!(" INR ".parse::<Currency>().unwrap(), Currency::INR);
        assert!(matches!(
            "XYZ".parse::<Currency>(),
            Err(MoneyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(10));
        let fee = Money::new(dec!(2000.00), Currency::PKR);

        assert_eq!(rate.apply(&fee).amount(), dec!(200.00));
        assert_eq!(rate.as_percentage(), dec!(10));
    }
}

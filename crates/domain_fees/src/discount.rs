//! Fee discounts
//!
//! A discount is expressed per month and applied to the monthly fee before
//! it is multiplied out over an installment's months.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Money, Rate};

use crate::error::FeeError;

/// Kind of discount granted on the monthly fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// No discount; the value is ignored
    #[default]
    None,
    /// Value is a percentage in 0-100 (not 0-1)
    Percentage,
    /// Value is a fixed amount off each month
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::None => "none",
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(DiscountType::None),
            "percentage" => Ok(DiscountType::Percentage),
            "fixed" => Ok(DiscountType::Fixed),
            other => Err(FeeError::invalid(
                "discount_type",
                format!("unknown discount type '{}'", other),
            )),
        }
    }
}

/// A discount rule on the monthly fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Discount {
    pub discount_type: DiscountType,
    pub value: Decimal,
}

impl Discount {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn percentage(value: Decimal) -> Self {
        Self {
            discount_type: DiscountType::Percentage,
            value,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self {
            discount_type: DiscountType::Fixed,
            value,
        }
    }

    /// Checks the value is non-negative and a percentage is at most 100
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.value < Decimal::ZERO {
            return Err(FeeError::invalid(
                "discount_value",
                format!("must not be negative, got {}", self.value),
            ));
        }
        if self.discount_type == DiscountType::Percentage && self.value > dec!(100) {
            return Err(FeeError::invalid(
                "discount_value",
                format!("percentage must be between 0 and 100, got {}", self.value),
            ));
        }
        Ok(())
    }

    /// Monthly discount amount on `monthly_fee`, rounded to the currency
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an out-of-range value and
    /// `NegativeFinalFee` when the discount would exceed the fee.
    pub fn amount(&self, monthly_fee: &Money) -> Result<Money, FeeError> {
        self.validate()?;

        let discount = match self.discount_type {
            DiscountType::None => Money::zero(monthly_fee.currency()),
            DiscountType::Percentage => Rate::from_percentage(self.value)
                .apply(monthly_fee)
                .round_to_currency(),
            DiscountType::Fixed => Money::new(self.value, monthly_fee.currency()).round_to_currency(),
        };

        if discount.amount() > monthly_fee.amount() {
            return Err(FeeError::NegativeFinalFee {
                monthly_fee: monthly_fee.amount(),
                discount: discount.amount(),
            });
        }

        Ok(discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn fee(amount: Decimal) -> Money {
        Money::new(amount, Currency::PKR)
    }

    #[test]
    fn test_no_discount() {
        let d = Discount::none().amount(&fee(dec!(1000))).unwrap();
        assert!(d.is_zero());
    }

    #[test]
    fn test_none_ignores_value() {
        let d = Discount { discount_type: DiscountType::None, value: dec!(5000) };
        assert!(d.amount(&fee(dec!(1000))).unwrap().is_zero());
    }

    #[test]
    fn test_percentage_is_zero_to_hundred() {
        let d = Discount::percentage(dec!(10)).amount(&fee(dec!(2000))).unwrap();
        assert_eq!(d.amount(), dec!(200));

        let full = Discount::percentage(dec!(100)).amount(&fee(dec!(2000))).unwrap();
        assert_eq!(full.amount(), dec!(2000));
    }

    #[test]
    fn test_percentage_rounds_to_currency() {
        let d = Discount::percentage(dec!(33.333)).amount(&fee(dec!(1500))).unwrap();
        // 1500 * 0.33333 = 499.995
        assert_eq!(d.amount(), dec!(500.00));
    }

    #[test]
    fn test_fixed_discount() {
        let d = Discount::fixed(dec!(250)).amount(&fee(dec!(1000))).unwrap();
        assert_eq!(d.amount(), dec!(250));
    }

    #[test]
    fn test_fixed_discount_above_fee_is_rejected() {
        let err = Discount::fixed(dec!(1200)).amount(&fee(dec!(1000))).unwrap_err();
        assert!(matches!(
            err,
            FeeError::NegativeFinalFee { monthly_fee, discount }
                if monthly_fee == dec!(1000) && discount == dec!(1200)
        ));
    }

    #[test]
    fn test_percentage_above_hundred_is_rejected() {
        let err = Discount::percentage(dec!(101)).amount(&fee(dec!(1000))).unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_negative_value_is_rejected() {
        let err = Discount::fixed(dec!(-1)).amount(&fee(dec!(1000))).unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_parse_discount_type() {
        assert_eq!("".parse::<DiscountType>().unwrap(), DiscountType::None);
        assert_eq!("Percentage".parse::<DiscountType>().unwrap(), DiscountType::Percentage);
        assert_eq!("fixed".parse::<DiscountType>().unwrap(), DiscountType::Fixed);
        assert!("percent".parse::<DiscountType>().is_err());
    }
}

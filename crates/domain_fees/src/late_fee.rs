//! Late-fee calculation
//!
//! A late fee is charged on an installment's outstanding balance once the
//! grace period after its due date has passed. The calculation is pure and
//! is evaluated "as of" a caller-supplied date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};

use crate::error::FeeError;
use crate::installment::Installment;

/// How a late fee accrues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LateFeeRule {
    /// Never charge
    #[default]
    None,
    /// Amount per chargeable day
    Daily(Decimal),
    /// Amount per started week of chargeable days
    Weekly(Decimal),
    /// One-time percentage (0-100) of the outstanding balance
    Percentage(Decimal),
    /// One-time flat amount
    Fixed(Decimal),
}

impl LateFeeRule {
    fn value(&self) -> Decimal {
        match self {
            LateFeeRule::None => Decimal::ZERO,
            LateFeeRule::Daily(v)
            | LateFeeRule::Weekly(v)
            | LateFeeRule::Percentage(v)
            | LateFeeRule::Fixed(v) => *v,
        }
    }
}

/// A school's late-fee policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LateFeePolicy {
    pub rule: LateFeeRule,
    /// Days after the due date before anything accrues
    #[serde(default)]
    pub grace_days: u32,
    /// Upper bound on the fee for one installment
    #[serde(default)]
    pub cap: Option<Decimal>,
}

impl LateFeePolicy {
    pub fn new(rule: LateFeeRule) -> Self {
        Self {
            rule,
            grace_days: 0,
            cap: None,
        }
    }

    pub fn with_grace_days(mut self, grace_days: u32) -> Self {
        self.grace_days = grace_days;
        self
    }

    pub fn with_cap(mut self, cap: Decimal) -> Self {
        self.cap = Some(cap);
        self
    }

    pub fn validate(&self) -> Result<(), FeeError> {
        if self.rule.value() < Decimal::ZERO {
            return Err(FeeError::invalid("late_fee.rule", "value must not be negative"));
        }
        if matches!(self.rule, LateFeeRule::Percentage(p) if p > dec!(100)) {
            return Err(FeeError::invalid("late_fee.rule", "percentage must be between 0 and 100"));
        }
        if matches!(self.cap, Some(cap) if cap < Decimal::ZERO) {
            return Err(FeeError::invalid("late_fee.cap", "cap must not be negative"));
        }
        Ok(())
    }

    /// Days past due beyond the grace period
    pub fn chargeable_days(&self, due_date: NaiveDate, as_of: NaiveDate) -> u32 {
        let late = (as_of - due_date).num_days() - i64::from(self.grace_days);
        if late > 0 { late as u32 } else { 0 }
    }

    /// Late fee on `balance` for a due date, evaluated on `as_of`
    pub fn calculate(
        &self,
        balance: &Money,
        due_date: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<Money, FeeError> {
        self.validate()?;

        let currency = balance.currency();
        let days = self.chargeable_days(due_date, as_of);
        if days == 0 || !balance.is_positive() {
            return Ok(Money::zero(currency));
        }

        let fee = match self.rule {
            LateFeeRule::None => Money::zero(currency),
            LateFeeRule::Daily(amount) => accrue(amount, days, balance)?,
            LateFeeRule::Weekly(amount) => accrue(amount, days.div_ceil(7), balance)?,
            LateFeeRule::Percentage(pct) => Rate::from_percentage(pct).apply(balance),
            LateFeeRule::Fixed(amount) => Money::new(amount, currency),
        };

        let fee = match self.cap {
            Some(cap) => fee.min(&Money::new(cap, currency))?,
            None => fee,
        };

        Ok(fee.round_to_currency())
    }

    /// Late fee on an installment's remaining balance
    pub fn for_installment(&self, installment: &Installment, as_of: NaiveDate) -> Result<Money, FeeError> {
        self.calculate(&installment.balance_amount, installment.due_date, as_of)
    }
}

fn accrue(per_period: Decimal, periods: u32, balance: &Money) -> Result<Money, FeeError> {
    Money::new(per_period, balance.currency())
        .checked_multiply(Decimal::from(periods))
        .map_err(|_| {
            FeeError::invalid(
                "late_fee.rule",
                format!("{} over {} periods is too large", per_period, periods),
            )
        })
}

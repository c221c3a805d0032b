//! Installment planning
//!
//! Expands one enrollment's fee configuration into the installments of a
//! 12-month cycle. Planning is pure: no clock, no randomness, no I/O, so the
//! same terms always produce the same installments.
//!
//! # Example
//!
//! ```rust
//! use domain_fees::{compute_installments, DiscountType, FeePlan};
//! use rust_decimal_macros::dec;
//!
//! let plan = compute_installments(
//!     dec!(2000), DiscountType::Percentage, dec!(10), FeePlan::Quarterly, 1, 2025,
//! ).unwrap();
//!
//! assert_eq!(plan.len(), 4);
//! assert_eq!(plan[0].period_label, "Q1 (January-March) 2025");
//! assert_eq!(plan[0].total_amount.amount(), dec!(5400));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{BillingMonth, Currency, Money};

use crate::discount::{Discount, DiscountType};
use crate::error::FeeError;
use crate::fee_plan::FeePlan;
use crate::installment::{Installment, InstallmentStatus};

/// Day of the month on which an installment falls due
pub const DEFAULT_DUE_DAY: u32 = 10;

/// Highest due day that exists in every month
pub const MAX_DUE_DAY: u32 = 28;

/// The fee inputs the planner works from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTerms {
    pub monthly_fee: Money,
    pub discount: Discount,
    pub fee_plan: FeePlan,
    /// First billed month of the cycle
    pub start: BillingMonth,
}

impl FeeTerms {
    /// Monthly discount, validated against the fee
    pub fn discount_amount(&self) -> Result<Money, FeeError> {
        self.discount.amount(&self.monthly_fee)
    }

    /// Monthly fee after discount; never negative
    pub fn final_monthly_fee(&self) -> Result<Money, FeeError> {
        let discount = self.discount_amount()?;
        Ok(self.monthly_fee.checked_sub(&discount)?)
    }

    /// Amount billed over the whole cycle
    pub fn cycle_total(&self) -> Result<Money, FeeError> {
        self.final_monthly_fee()?
            .checked_multiply(Decimal::from(crate::fee_plan::CYCLE_MONTHS))
            .map_err(|_| too_large(&self.monthly_fee))
    }
}

fn too_large(monthly_fee: &Money) -> FeeError {
    FeeError::invalid(
        "monthly_fee",
        format!("{} is too large to bill over a cycle", monthly_fee.amount()),
    )
}

/// Expands fee terms into installments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentPlanner {
    currency: Currency,
    due_day: u32,
}

impl Default for InstallmentPlanner {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl InstallmentPlanner {
    /// Creates a planner billing in `currency`, due on the 10th
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            due_day: DEFAULT_DUE_DAY,
        }
    }

    /// Sets the due day of the month (1-28)
    pub fn with_due_day(mut self, due_day: u32) -> Result<Self, FeeError> {
        if !(1..=MAX_DUE_DAY).contains(&due_day) {
            return Err(FeeError::invalid(
                "due_day",
                format!("must be between 1 and {}, got {}", MAX_DUE_DAY, due_day),
            ));
        }
        self.due_day = due_day;
        Ok(self)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn due_day(&self) -> u32 {
        self.due_day
    }

    /// Plans from raw values, validating each one
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for a negative fee, a bad discount value, or a
    /// start month/year out of range; `NegativeFinalFee` when the discount
    /// exceeds the fee.
    pub fn plan(
        &self,
        monthly_fee: Decimal,
        discount: Discount,
        fee_plan: FeePlan,
        start_month: u32,
        start_year: i32,
    ) -> Result<Vec<Installment>, FeeError> {
        let start = BillingMonth::new(start_year, start_month).map_err(|e| {
            let field = if (1..=12).contains(&start_month) { "start_year" } else { "start_month" };
            FeeError::invalid(field, e.to_string())
        })?;

        let terms = FeeTerms {
            monthly_fee: Money::new(monthly_fee, self.currency),
            discount,
            fee_plan,
            start,
        };
        self.compute_installments(&terms)
    }

    /// Expands `terms` into its installments, ascending by number
    pub fn compute_installments(&self, terms: &FeeTerms) -> Result<Vec<Installment>, FeeError> {
        if terms.monthly_fee.currency() != self.currency {
            return Err(FeeError::invalid(
                "monthly_fee",
                format!(
                    "fee is in {} but the planner bills in {}",
                    terms.monthly_fee.currency(),
                    self.currency
                ),
            ));
        }
        if terms.monthly_fee.is_negative() {
            return Err(FeeError::invalid(
                "monthly_fee",
                format!("must not be negative, got {}", terms.monthly_fee.amount()),
            ));
        }
        if terms.monthly_fee.has_sub_minor_units() {
            return Err(FeeError::invalid(
                "monthly_fee",
                format!(
                    "{} has more than {} decimal places",
                    terms.monthly_fee.amount(),
                    self.currency.decimal_places()
                ),
            ));
        }

        let discount = terms.discount_amount()?;
        let final_monthly_fee = terms.monthly_fee.checked_sub(&discount)?;

        let count = terms.fee_plan.installment_count();
        let months_each = terms.fee_plan.months_per_installment();
        let factor = Decimal::from(months_each);

        let installment_amount = final_monthly_fee
            .checked_multiply(factor)
            .map_err(|_| too_large(&terms.monthly_fee))?;
        let discount_amount = discount
            .checked_multiply(factor)
            .map_err(|_| too_large(&terms.monthly_fee))?;
        let base_amount = installment_amount
            .checked_add(&discount_amount)
            .map_err(|_| too_large(&terms.monthly_fee))?;

        let mut installments = Vec::with_capacity(count as usize);
        let mut cursor = terms.start;

        for number in 1..=count {
            let first = cursor;
            let last = first.plus_months(months_each - 1);
            cursor = first.plus_months(months_each);

            installments.push(Installment {
                installment_number: number,
                period_label: terms.fee_plan.period_label(number, first, last),
                months_covered: first.iter(months_each).map(|m| m.name().to_string()).collect(),
                base_amount,
                discount_amount,
                total_amount: installment_amount,
                paid_amount: Money::zero(self.currency),
                balance_amount: installment_amount,
                due_date: first.day(self.due_day)?,
                status: InstallmentStatus::Pending,
            });
        }

        debug!(
            fee_plan = %terms.fee_plan,
            start = %terms.start,
            installments = installments.len(),
            installment_amount = %installment_amount,
            "Planned fee installments"
        );

        Ok(installments)
    }
}

/// Plans installments with the default planner (PKR, due on the 10th)
///
/// `monthly_fee` must be non-negative; callers enrolling a student should
/// additionally require it to be positive. `discount_value` is a 0-100
/// percentage for [`DiscountType::Percentage`] and an amount for
/// [`DiscountType::Fixed`].
pub fn compute_installments(
    monthly_fee: Decimal,
    discount_type: DiscountType,
    discount_value: Decimal,
    fee_plan: FeePlan,
    start_month: u32,
    start_year: i32,
) -> Result<Vec<Installment>, FeeError> {
    InstallmentPlanner::default().plan(
        monthly_fee,
        Discount {
            discount_type,
            value: discount_value,
        },
        fee_plan,
        start_month,
        start_year,
    )
}

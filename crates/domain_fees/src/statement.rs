//! Fee statements
//!
//! Summarises an enrollment's installments as of a date: what was billed,
//! what was paid, what is outstanding and the late fees accrued so far.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, SessionId, StudentId};

use crate::error::FeeError;
use crate::installment::{Installment, InstallmentStatus};
use crate::late_fee::LateFeePolicy;

/// One installment's row on a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    pub installment_number: u32,
    pub period_label: String,
    pub due_date: NaiveDate,
    pub total: Money,
    pub paid: Money,
    pub balance: Money,
    pub late_fee: Money,
    pub status: InstallmentStatus,
    pub overdue: bool,
}

/// Account summary for one student in one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStatement {
    pub student_id: StudentId,
    pub session_id: SessionId,
    pub as_of: NaiveDate,
    pub billed: Money,
    pub discount: Money,
    pub paid: Money,
    pub outstanding: Money,
    pub late_fees: Money,
    pub overdue_installments: u32,
    pub lines: Vec<StatementLine>,
}

impl FeeStatement {
    /// Builds a statement from stored installments
    pub fn build(
        student_id: StudentId,
        session_id: SessionId,
        currency: Currency,
        installments: &[Installment],
        as_of: NaiveDate,
        policy: &LateFeePolicy,
    ) -> Result<Self, FeeError> {
        let mut statement = Self {
            student_id,
            session_id,
            as_of,
            billed: Money::zero(currency),
            discount: Money::zero(currency),
            paid: Money::zero(currency),
            outstanding: Money::zero(currency),
            late_fees: Money::zero(currency),
            overdue_installments: 0,
            lines: Vec::with_capacity(installments.len()),
        };

        for installment in installments {
            let late_fee = policy.for_installment(installment, as_of)?;
            let overdue = installment.is_overdue(as_of);

            statement.billed = statement.billed.checked_add(&installment.total_amount)?;
            statement.discount = statement.discount.checked_add(&installment.discount_amount)?;
            statement.paid = statement.paid.checked_add(&installment.paid_amount)?;
            statement.outstanding = statement.outstanding.checked_add(&installment.balance_amount)?;
            statement.late_fees = statement.late_fees.checked_add(&late_fee)?;
            if overdue {
                statement.overdue_installments += 1;
            }

            statement.lines.push(StatementLine {
                installment_number: installment.installment_number,
                period_label: installment.period_label.clone(),
                due_date: installment.due_date,
                total: installment.total_amount,
                paid: installment.paid_amount,
                balance: installment.balance_amount,
                late_fee,
                status: installment.status,
                overdue,
            });
        }

        Ok(statement)
    }

    /// Outstanding balance plus accrued late fees
    pub fn amount_due(&self) -> Result<Money, FeeError> {
        Ok(self.outstanding.checked_add(&self.late_fees)?)
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::discount::DiscountType;
    use crate::fee_plan::FeePlan;
    use crate::late_fee::LateFeeRule;
    use crate::planner::compute_installments;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_statement_totals() {
        let mut plan = compute_installments(dec!(2000), DiscountType::Percentage, dec!(10), FeePlan::Quarterly, 1, 2025).unwrap();
        plan[0].record_payment(Money::new(dec!(5400), Currency::PKR)).unwrap();
        plan[1].record_payment(Money::new(dec!(1000), Currency::PKR)).unwrap();

        let policy = LateFeePolicy::new(LateFeeRule::Fixed(dec!(300))).with_grace_days(5);
        let statement = FeeStatement::build(
            StudentId::new(),
            SessionId::new(),
            Currency::PKR,
            &plan,
            date(2025, 5, 1),
            &policy,
        )
        .unwrap();

        assert_eq!(statement.billed.amount(), dec!(21600));
        assert_eq!(statement.discount.amount(), dec!(2400));
        assert_eq!(statement.paid.amount(), dec!(6400));
        assert_eq!(statement.outstanding.amount(), dec!(15200));
        // Only Q2 (due April 10) is past due and past grace.
        assert_eq!(statement.overdue_installments, 1);
        assert_eq!(statement.late_fees.amount(), dec!(300));
        assert_eq!(statement.amount_due().unwrap().amount(), dec!(15500));
        assert_eq!(statement.lines.len(), 4);
        assert!(statement.lines[1].overdue);
        assert!(!statement.lines[0].overdue);
        assert!(!statement.is_settled());
    }

    #[test]
    fn test_empty_statement_is_settled() {
        let statement = FeeStatement::build(
            StudentId::new(),
            SessionId::new(),
            Currency::PKR,
            &[],
            date(2025, 5, 1),
            &LateFeePolicy::default(),
        )
        .unwrap();
        assert!(statement.is_settled());
        assert!(statement.billed.is_zero());
    }
}

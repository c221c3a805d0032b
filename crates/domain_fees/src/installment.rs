//! Installments and payment recording
//!
//! An installment is one billable period of an enrollment. It is created by
//! the planner and afterwards only changes when a payment is recorded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PaymentId};

use crate::error::FeeError;

/// Payment state of an installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Nothing paid yet
    Pending,
    /// Some, but not all, of the total has been paid
    Partial,
    /// Balance is zero
    Paid,
}

/// One billable period of a fee enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based, sequential within the enrollment
    pub installment_number: u32,
    /// Covered span, e.g. "Q1 (January-March) 2025"
    pub period_label: String,
    /// Month names covered, in order
    pub months_covered: Vec<String>,
    /// Undiscounted amount for the covered months
    pub base_amount: Money,
    /// Discount for the covered months
    pub discount_amount: Money,
    /// Amount billed (base minus discount)
    pub total_amount: Money,
    pub paid_amount: Money,
    pub balance_amount: Money,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
}

impl Installment {
    /// Records a payment against this installment
    ///
    /// # Errors
    ///
    /// * `InstallmentAlreadyPaid` if the balance is already zero
    /// * `InvalidPayment` for a non-positive amount or a currency mismatch
    /// * `Overpayment` if the amount exceeds the balance
    pub fn record_payment(&mut self, amount: Money) -> Result<(), FeeError> {
        if self.status == InstallmentStatus::Paid {
            return Err(FeeError::InstallmentAlreadyPaid {
                number: self.installment_number,
            });
        }
        if amount.currency() != self.total_amount.currency() {
            return Err(FeeError::InvalidPayment(format!(
                "payment in {} for an installment billed in {}",
                amount.currency(),
                self.total_amount.currency()
            )));
        }
        if !amount.is_positive() {
            return Err(FeeError::InvalidPayment(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        if amount.has_sub_minor_units() {
            return Err(FeeError::InvalidPayment(format!(
                "amount {} is finer than the {} minor unit",
                amount.amount(),
                amount.currency()
            )));
        }
        if amount.amount() > self.balance_amount.amount() {
            return Err(FeeError::Overpayment {
                number: self.installment_number,
                amount: amount.amount(),
                balance: self.balance_amount.amount(),
            });
        }

        self.paid_amount = self.paid_amount.checked_add(&amount)?;
        self.balance_amount = self.balance_amount.checked_sub(&amount)?;
        self.status = if self.balance_amount.is_zero() {
            InstallmentStatus::Paid
        } else {
            InstallmentStatus::Partial
        };

        Ok(())
    }

    /// True when a balance remains after the due date
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        as_of > self.due_date && !self.balance_amount.is_zero()
    }

    /// Whole days past the due date, zero if not yet due
    pub fn days_past_due(&self, as_of: NaiveDate) -> u32 {
        let days = (as_of - self.due_date).num_days();
        if days > 0 { days as u32 } else { 0 }
    }
}

/// A payment received against one installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPayment {
    pub id: PaymentId,
    pub installment_number: u32,
    pub amount: Money,
    pub paid_on: NaiveDate,
    /// Bank or receipt reference printed on the challan counterfoil
    pub reference: Option<String>,
}

impl InstallmentPayment {
    pub fn new(installment_number: u32, amount: Money, paid_on: NaiveDate) -> Self {
        Self {
            id: PaymentId::new_v7(),
            installment_number,
            amount,
            paid_on,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

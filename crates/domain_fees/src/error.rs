//! Fee domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{MoneyError, PortError, TemporalError};

/// Errors that can occur in the fee domain
#[derive(Debug, Error)]
pub enum FeeError {
    /// Input that can never produce a meaningful installment plan
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfiguration {
        field: String,
        message: String,
    },

    /// The discount exceeds the monthly fee
    #[error("Discount {discount} exceeds monthly fee {monthly_fee}")]
    NegativeFinalFee {
        monthly_fee: Decimal,
        discount: Decimal,
    },

    /// Installments already exist for this student and session
    #[error("Student {student} is already enrolled for session {session}")]
    DuplicateEnrollment {
        student: String,
        session: String,
    },

    /// Student exists but is no longer active
    #[error("Student is inactive: {0}")]
    StudentInactive(String),

    /// Session exists but is closed for enrollment
    #[error("Session is inactive: {0}")]
    SessionInactive(String),

    /// No installment with the given number
    #[error("Installment {number} not found")]
    InstallmentNotFound {
        number: u32,
    },

    /// Installment has no balance left
    #[error("Installment {number} is already paid")]
    InstallmentAlreadyPaid {
        number: u32,
    },

    /// Payment larger than the outstanding balance
    #[error("Payment {amount} exceeds balance {balance} on installment {number}")]
    Overpayment {
        number: u32,
        amount: Decimal,
        balance: Decimal,
    },

    /// Payment amount is zero, negative, or in the wrong currency
    #[error("Invalid payment: {0}")]
    InvalidPayment(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Calendar error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Port error: {0}")]
    Port(#[from] PortError),
}

impl FeeError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        FeeError::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error was caused by caller input rather than state
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FeeError::InvalidConfiguration { .. }
                | FeeError::NegativeFinalFee { .. }
                | FeeError::InvalidPayment(_)
                | FeeError::Overpayment { .. }
                | FeeError::Temporal(_)
        )
    }
}

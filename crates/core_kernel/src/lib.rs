//! Core Kernel - Foundational types for the school fee system
//!
//! This crate provides the building blocks shared by the fee domain and its
//! front ends:
//! - Money types with precise decimal arithmetic
//! - Billing months and the fixed month-name table
//! - Strongly-typed identifiers for students, sessions and classes
//! - Port error type and the explicitly injected session context

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{BillingMonth, TemporalError, MONTH_NAMES, max_billing_year, month_name};
pub use identifiers::{
    StudentId, SessionId, ClassId, PaymentId, UserId,
};
pub use ports::{PortError, DomainPort, SessionContext};

//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the fee
//! system test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for enrollments and fee terms
//! - `harness`: An `EnrollmentService` wired to seeded in-memory ports
//! - `assertions`: Custom assertion helpers for money and installment plans
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod harness;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use harness::*;
pub use assertions::*;
pub use generators::*;

//! Fee Domain - Installment Planning
//!
//! This crate turns a student's fee enrollment into the challans billed over
//! one 12-month academic cycle, and tracks payments and late fees against
//! them.
//!
//! # Fee Plans
//!
//! | Plan          | Installments | Months each |
//! |---------------|--------------|-------------|
//! | `monthly`     | 12           | 1           |
//! | `quarterly`   | 4            | 3           |
//! | `semi-annual` | 2            | 6           |
//! | `annual`      | 1            | 12          |
//!
//! Each installment bills `final monthly fee × months`, where the final fee
//! is the monthly fee minus a percentage or fixed discount. Installments are
//! due on the 10th of their first month.
//!
//! # Layers
//!
//! - [`planner`]: the pure planner, independent of storage
//! - [`enrollment`]: validation of raw enrollment input
//! - [`installment`], [`late_fee`], [`statement`]: payments and reporting
//! - [`ports`], [`adapters`], [`services`]: data access and orchestration
//!
//! # Example
//!
//! ```rust
//! use domain_fees::{compute_installments, DiscountType, FeePlan};
//! use rust_decimal_macros::dec;
//!
//! let plan = compute_installments(
//!     dec!(1500), DiscountType::None, dec!(0), FeePlan::Monthly, 11, 2025,
//! ).unwrap();
//!
//! assert_eq!(plan[2].period_label, "January 2026");
//! ```

pub mod fee_plan;
pub mod discount;
pub mod installment;
pub mod planner;
pub mod enrollment;
pub mod late_fee;
pub mod statement;
pub mod ports;
pub mod adapters;
pub mod services;
pub mod error;

pub use fee_plan::{FeePlan, CYCLE_MONTHS};
pub use discount::{Discount, DiscountType};
pub use installment::{Installment, InstallmentPayment, InstallmentStatus};
pub use planner::{compute_installments, FeeTerms, InstallmentPlanner, DEFAULT_DUE_DAY};
pub use enrollment::{EnrollmentRequest, FeeEnrollment};
pub use late_fee::{LateFeePolicy, LateFeeRule};
pub use statement::{FeeStatement, StatementLine};
pub use ports::{AcademicSession, InstallmentPort, SessionPort, Student, StudentPort};
pub use adapters::{InMemoryInstallmentPort, InMemorySessionPort, InMemoryStudentPort};
pub use services::EnrollmentService;
pub use error::FeeError;

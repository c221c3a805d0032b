//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for students, sessions and fee amounts. Values are
//! fixed so assertions can be written against exact numbers.

use chrono::NaiveDate;
use core_kernel::{BillingMonth, ClassId, Currency, Money, SessionContext, SessionId, StudentId, UserId};
use domain_fees::{AcademicSession, Student};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard monthly tuition fee
    pub fn monthly_fee() -> Money {
        Money::new(dec!(2000.00), Currency::PKR)
    }
}

/// Fixture for calendar test data
pub struct CalendarFixtures;

impl CalendarFixtures {
    /// April start, typical for South Asian academic sessions
    pub fn session_start() -> BillingMonth {
        BillingMonth::new(2025, 4).expect("valid month")
    }

    /// November start, so the cycle straddles a year boundary early
    pub fn november_2025() -> BillingMonth {
        BillingMonth::new(2025, 11).expect("valid month")
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }
}

/// Fixture for deterministic identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn student_id() -> StudentId {
        StudentId::from_uuid(Uuid::from_u128(0x5750_0000_0000_0000_0000_0000_0000_0001))
    }

    pub fn session_id() -> SessionId {
        SessionId::from_uuid(Uuid::from_u128(0x5e55_0000_0000_0000_0000_0000_0000_0001))
    }

    pub fn withdrawn_student_id() -> StudentId {
        StudentId::from_uuid(Uuid::from_u128(0x5750_0000_0000_0000_0000_0000_0000_0002))
    }

    pub fn closed_session_id() -> SessionId {
        SessionId::from_uuid(Uuid::from_u128(0x5e55_0000_0000_0000_0000_0000_0000_0002))
    }

    pub fn class_id() -> ClassId {
        ClassId::from_uuid(Uuid::from_u128(0xc1a5_0000_0000_0000_0000_0000_0000_0001))
    }

    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0005_e000_0000_0000_0000_0000_0000_0001))
    }
}

/// Fixture for students, sessions and request contexts
pub struct EntityFixtures;

impl EntityFixtures {
    /// Active student in the fixture class
    pub fn student() -> Student {
        Student {
            id: IdFixtures::student_id(),
            full_name: "Ayesha Khan".to_string(),
            class_id: IdFixtures::class_id(),
            is_active: true,
        }
    }

    /// Student who has left the school
    pub fn withdrawn_student() -> Student {
        Student {
            id: IdFixtures::withdrawn_student_id(),
            full_name: "Bilal Ahmed".to_string(),
            class_id: IdFixtures::class_id(),
            is_active: false,
        }
    }

    /// Active 2025-2026 session starting in April
    pub fn session() -> AcademicSession {
        AcademicSession {
            id: IdFixtures::session_id(),
            name: "2025-2026".to_string(),
            start_month: 4,
            start_year: 2025,
            is_active: true,
        }
    }

    /// Closed 2024-2025 session
    pub fn closed_session() -> AcademicSession {
        AcademicSession {
            id: IdFixtures::closed_session_id(),
            name: "2024-2025".to_string(),
            start_month: 4,
            start_year: 2024,
            is_active: false,
        }
    }

    /// Context of the accountant operating the fee desk
    pub fn context() -> SessionContext {
        SessionContext::new(IdFixtures::user_id())
            .with_correlation_id("test-request")
            .with_school("Main Campus")
    }
}

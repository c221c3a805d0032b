//! Test Data Builders
//!
//! Builder patterns for fee terms, enrollments and raw enrollment requests.
//! Tests set only the fields they care about and take defaults for the rest.

use core_kernel::{BillingMonth, ClassId, Currency, Money, SessionId, StudentId};
use domain_fees::{Discount, EnrollmentRequest, FeeEnrollment, FeePlan, FeeTerms};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{CalendarFixtures, IdFixtures, MoneyFixtures};

/// Builder for [`FeeTerms`] and [`FeeEnrollment`]
///
/// Defaults to the fixture student and session, PKR 2,000 a month on a
/// monthly plan starting April 2025 with no discount.
#[derive(Debug, Clone)]
pub struct FeeEnrollmentBuilder {
    student_id: StudentId,
    session_id: SessionId,
    class_id: ClassId,
    monthly_fee: Money,
    discount: Discount,
    fee_plan: FeePlan,
    start: BillingMonth,
}

impl Default for FeeEnrollmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeeEnrollmentBuilder {
    pub fn new() -> Self {
        Self {
            student_id: IdFixtures::student_id(),
            session_id: IdFixtures::session_id(),
            class_id: IdFixtures::class_id(),
            monthly_fee: MoneyFixtures::monthly_fee(),
            discount: Discount::none(),
            fee_plan: FeePlan::Monthly,
            start: CalendarFixtures::session_start(),
        }
    }

    pub fn with_student(mut self, id: StudentId) -> Self {
        self.student_id = id;
        self
    }

    pub fn with_session(mut self, id: SessionId) -> Self {
        self.session_id = id;
        self
    }

    /// Sets the monthly fee in PKR
    pub fn with_monthly_fee(mut self, amount: Decimal) -> Self {
        self.monthly_fee = Money::new(amount, Currency::PKR);
        self
    }

    pub fn with_fee(mut self, fee: Money) -> Self {
        self.monthly_fee = fee;
        self
    }

    pub fn with_plan(mut self, plan: FeePlan) -> Self {
        self.fee_plan = plan;
        self
    }

    /// Sets the first billed month
    ///
    /// # Panics
    ///
    /// Panics if the month is outside 1-12.
    pub fn starting(mut self, month: u32, year: i32) -> Self {
        self.start = BillingMonth::new(year, month).expect("valid start month");
        self
    }

    pub fn terms(&self) -> FeeTerms {
        FeeTerms {
            monthly_fee: self.monthly_fee,
            discount: self.discount,
            fee_plan: self.fee_plan,
            start: self.start,
        }
    }

    pub fn build(self) -> FeeEnrollment {
        let terms = self.terms();
        FeeEnrollment::new(self.student_id, self.session_id, self.class_id, terms)
    }
}

/// Builder for raw [`EnrollmentRequest`] input
#[derive(Debug, Clone)]
pub struct EnrollmentRequestBuilder {
    request: EnrollmentRequest,
}

impl Default for EnrollmentRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrollmentRequestBuilder {
    /// A valid quarterly request for the fixture student and session
    pub fn new() -> Self {
        Self {
            request: EnrollmentRequest {
                student_id: IdFixtures::student_id(),
                session_id: IdFixtures::session_id(),
                class_id: IdFixtures::class_id(),
                fee_plan: "quarterly".to_string(),
                monthly_fee: dec!(2000),
                discount_type: String::new(),
                discount_value: Decimal::ZERO,
                start_month: 4,
                start_year: 2025,
            },
        }
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.request.fee_plan = plan.into();
        self
    }

    pub fn with_monthly_fee(mut self, fee: Decimal) -> Self {
        self.request.monthly_fee = fee;
        self
    }

    pub fn with_discount(mut self, discount_type: impl Into<String>, value: Decimal) -> Self {
        self.request.discount_type = discount_type.into();
        self.request.discount_value = value;
        self
    }

    pub fn starting(mut self, month: u32, year: i32) -> Self {
        self.request.start_month = month;
        self.request.start_year = year;
        self
    }

    pub fn build(self) -> EnrollmentRequest {
        self.request
    }
}

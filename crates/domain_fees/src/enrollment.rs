//! Fee enrollments and input validation
//!
//! [`EnrollmentRequest`] is the untrusted form input. Converting it into a
//! [`FeeEnrollment`] is the validation layer: every enum is parsed strictly
//! and every range is checked before the planner sees the values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{BillingMonth, ClassId, Currency, Money, SessionId, StudentId};

use crate::discount::{Discount, DiscountType};
use crate::error::FeeError;
use crate::fee_plan::FeePlan;
use crate::planner::FeeTerms;

/// A student's commitment to a fee plan for one academic session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEnrollment {
    pub student_id: StudentId,
    pub session_id: SessionId,
    pub class_id: ClassId,
    pub terms: FeeTerms,
}

impl FeeEnrollment {
    pub fn new(
        student_id: StudentId,
        session_id: SessionId,
        class_id: ClassId,
        terms: FeeTerms,
    ) -> Self {
        Self {
            student_id,
            session_id,
            class_id,
            terms,
        }
    }

    /// Checks the enrollment is billable
    ///
    /// The fee must be positive, whole in the currency's minor unit, and the
    /// discount must leave a non-negative final fee.
    pub fn validate(&self) -> Result<(), FeeError> {
        if !self.terms.monthly_fee.is_positive() {
            return Err(FeeError::invalid(
                "monthly_fee",
                format!("must be greater than zero, got {}", self.terms.monthly_fee.amount()),
            ));
        }
        if self.terms.monthly_fee.has_sub_minor_units() {
            return Err(FeeError::invalid(
                "monthly_fee",
                format!("{} is finer than the currency's minor unit", self.terms.monthly_fee.amount()),
            ));
        }
        self.terms.final_monthly_fee().map(|_| ())
    }
}

/// Raw enrollment input as submitted by the fee form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnrollmentRequest {
    pub student_id: StudentId,
    pub session_id: SessionId,
    pub class_id: ClassId,
    #[validate(length(min = 1, message = "fee plan is required"))]
    pub fee_plan: String,
    pub monthly_fee: Decimal,
    #[serde(default)]
    pub discount_type: String,
    #[serde(default)]
    pub discount_value: Decimal,
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub start_month: u32,
    #[validate(range(min = 1, max = 9999, message = "year must be between 1 and 9999"))]
    pub start_year: i32,
}

impl EnrollmentRequest {
    /// Order in which field errors are reported, matching the form layout
    const FIELD_ORDER: [&'static str; 3] = ["fee_plan", "start_month", "start_year"];

    /// Validates the request and builds a typed enrollment in `currency`
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` naming the first offending field, or
    /// `NegativeFinalFee` when the discount exceeds the fee.
    pub fn into_enrollment(self, currency: Currency) -> Result<FeeEnrollment, FeeError> {
        if let Err(errors) = self.validate() {
            let failed = errors.field_errors();
            let field = Self::FIELD_ORDER
                .iter()
                .find(|name| failed.contains_key(*name))
                .map(|name| name.to_string())
                .or_else(|| failed.keys().min().map(|name| name.to_string()))
                .unwrap_or_else(|| "request".to_string());
            return Err(FeeError::invalid(field, errors.to_string()));
        }

        let fee_plan: FeePlan = self.fee_plan.parse()?;
        let discount_type: DiscountType = self.discount_type.parse()?;

        let enrollment = FeeEnrollment::new(
            self.student_id,
            self.session_id,
            self.class_id,
            FeeTerms {
                monthly_fee: Money::new(self.monthly_fee, currency),
                discount: Discount {
                    discount_type,
                    value: self.discount_value,
                },
                fee_plan,
                start: BillingMonth::new(self.start_year, self.start_month)?,
            },
        );
        enrollment.validate()?;
        Ok(enrollment)
    }
}

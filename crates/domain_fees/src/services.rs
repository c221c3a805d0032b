//! Fee domain services
//!
//! [`EnrollmentService`] orchestrates the ports around the pure planner:
//! validate the enrollment, check the student and session, refuse a second
//! enrollment for the same pair, plan, then persist.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use core_kernel::{PortError, SessionContext, SessionId, StudentId};

use crate::enrollment::{EnrollmentRequest, FeeEnrollment};
use crate::error::FeeError;
use crate::installment::{Installment, InstallmentPayment};
use crate::late_fee::LateFeePolicy;
use crate::planner::InstallmentPlanner;
use crate::ports::{InstallmentPort, SessionPort, StudentPort};
use crate::statement::FeeStatement;

/// Enrolls students on fee plans and tracks their installments
pub struct EnrollmentService {
    students: Arc<dyn StudentPort>,
    sessions: Arc<dyn SessionPort>,
    installments: Arc<dyn InstallmentPort>,
    planner: InstallmentPlanner,
}

impl EnrollmentService {
    pub fn new(
        students: Arc<dyn StudentPort>,
        sessions: Arc<dyn SessionPort>,
        installments: Arc<dyn InstallmentPort>,
        planner: InstallmentPlanner,
    ) -> Self {
        Self {
            students,
            sessions,
            installments,
            planner,
        }
    }

    pub fn planner(&self) -> &InstallmentPlanner {
        &self.planner
    }

    /// Validates a raw request and enrolls it
    pub async fn enroll_request(
        &self,
        ctx: &SessionContext,
        request: EnrollmentRequest,
    ) -> Result<Vec<Installment>, FeeError> {
        let enrollment = request.into_enrollment(self.planner.currency()).map_err(|e| {
            warn!(user = %ctx.user_id, correlation_id = ctx.correlation(), error = %e, "Rejected enrollment request");
            e
        })?;
        self.enroll(ctx, &enrollment).await
    }

    /// Plans and stores the installments for an enrollment
    ///
    /// # Errors
    ///
    /// * validation errors from [`FeeEnrollment::validate`]
    /// * `StudentInactive` / `SessionInactive`
    /// * `DuplicateEnrollment` if installments already exist for the pair
    /// * `Port` for lookup or persistence failures
    pub async fn enroll(
        &self,
        ctx: &SessionContext,
        enrollment: &FeeEnrollment,
    ) -> Result<Vec<Installment>, FeeError> {
        enrollment.validate()?;

        let student = self.students.get_student(ctx, enrollment.student_id).await?;
        if !student.is_active {
            warn!(student = %student.id, "Enrollment for inactive student");
            return Err(FeeError::StudentInactive(student.id.to_string()));
        }
        if student.class_id != enrollment.class_id {
            warn!(
                student = %student.id,
                student_class = %student.class_id,
                enrollment_class = %enrollment.class_id,
                "Enrollment class differs from the student's current class"
            );
        }

        let session = self.sessions.get_session(ctx, enrollment.session_id).await?;
        if !session.is_active {
            return Err(FeeError::SessionInactive(session.name));
        }

        let existing = self
            .installments
            .list_installments(ctx, enrollment.student_id, enrollment.session_id)
            .await?;
        if !existing.is_empty() {
            return Err(self.duplicate(enrollment));
        }

        let installments = self.planner.compute_installments(&enrollment.terms)?;

        self.installments
            .insert_installments(ctx, enrollment.student_id, enrollment.session_id, &installments)
            .await
            .map_err(|e| match e {
                PortError::Conflict { .. } => self.duplicate(enrollment),
                other => FeeError::Port(other),
            })?;

        info!(
            user = %ctx.user_id,
            correlation_id = ctx.correlation(),
            student = %enrollment.student_id,
            session = %session.name,
            fee_plan = %enrollment.terms.fee_plan,
            installments = installments.len(),
            "Student enrolled on fee plan"
        );

        Ok(installments)
    }

    /// Records a payment and returns the updated installment
    ///
    /// The balance check and the write happen inside the installment port,
    /// so concurrent payments against one installment are serialised.
    pub async fn record_payment(
        &self,
        ctx: &SessionContext,
        student: StudentId,
        session: SessionId,
        payment: &InstallmentPayment,
    ) -> Result<Installment, FeeError> {
        let installment = self
            .installments
            .apply_payment(ctx, student, session, payment)
            .await
            .map_err(|e| {
                warn!(
                    correlation_id = ctx.correlation(),
                    %student,
                    installment = payment.installment_number,
                    error = %e,
                    "Rejected installment payment"
                );
                e
            })?;

        info!(
            user = %ctx.user_id,
            correlation_id = ctx.correlation(),
            %student,
            installment = installment.installment_number,
            amount = %payment.amount,
            paid_on = %payment.paid_on,
            reference = payment.reference.as_deref().unwrap_or("-"),
            status = ?installment.status,
            "Recorded installment payment"
        );

        Ok(installment)
    }

    /// Statement for one enrollment as of a date
    pub async fn statement(
        &self,
        ctx: &SessionContext,
        student: StudentId,
        session: SessionId,
        as_of: NaiveDate,
        policy: &LateFeePolicy,
    ) -> Result<FeeStatement, FeeError> {
        let installments = self.installments.list_installments(ctx, student, session).await?;
        if installments.is_empty() {
            return Err(PortError::not_found("Enrollment", format!("{}/{}", student, session)).into());
        }

        FeeStatement::build(
            student,
            session,
            self.planner.currency(),
            &installments,
            as_of,
            policy,
        )
    }

    fn duplicate(&self, enrollment: &FeeEnrollment) -> FeeError {
        warn!(
            student = %enrollment.student_id,
            session = %enrollment.session_id,
            "Duplicate enrollment rejected"
        );
        FeeError::DuplicateEnrollment {
            student: enrollment.student_id.to_string(),
            session: enrollment.session_id.to_string(),
        }
    }
}

//! In-memory adapters
//!
//! Back the fee ports with `HashMap`s behind `tokio::sync::RwLock`. Used by
//! tests and by tooling that plans fees without a backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{DomainPort, PortError, SessionContext, SessionId, StudentId};

use crate::error::FeeError;
use crate::installment::{Installment, InstallmentPayment};
use crate::ports::{AcademicSession, InstallmentPort, SessionPort, Student, StudentPort};

/// In-memory student directory
#[derive(Debug, Default, Clone)]
pub struct InMemoryStudentPort {
    students: Arc<RwLock<HashMap<StudentId, Student>>>,
}

impl InMemoryStudentPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates with students
    pub async fn with_students(students: Vec<Student>) -> Self {
        let port = Self::new();
        for student in students {
            port.upsert(student).await;
        }
        port
    }

    pub async fn upsert(&self, student: Student) {
        self.students.write().await.insert(student.id, student);
    }
}

impl DomainPort for InMemoryStudentPort {}

#[async_trait]
impl StudentPort for InMemoryStudentPort {
    async fn get_student(&self, _ctx: &SessionContext, id: StudentId) -> Result<Student, PortError> {
        self.students
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Student", id))
    }
}

/// In-memory academic sessions
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionPort {
    sessions: Arc<RwLock<HashMap<SessionId, AcademicSession>>>,
}

impl InMemorySessionPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_sessions(sessions: Vec<AcademicSession>) -> Self {
        let port = Self::new();
        for session in sessions {
            port.upsert(session).await;
        }
        port
    }

    pub async fn upsert(&self, session: AcademicSession) {
        self.sessions.write().await.insert(session.id, session);
    }
}

impl DomainPort for InMemorySessionPort {}

#[async_trait]
impl SessionPort for InMemorySessionPort {
    async fn get_session(&self, _ctx: &SessionContext, id: SessionId) -> Result<AcademicSession, PortError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("AcademicSession", id))
    }
}

type EnrollmentKey = (StudentId, SessionId);

/// In-memory installment store keyed by `(student, session)`
#[derive(Debug, Default, Clone)]
pub struct InMemoryInstallmentPort {
    installments: Arc<RwLock<HashMap<EnrollmentKey, Vec<Installment>>>>,
}

impl InMemoryInstallmentPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enrollments with stored installments
    pub async fn enrollment_count(&self) -> usize {
        self.installments.read().await.len()
    }
}

impl DomainPort for InMemoryInstallmentPort {}

#[async_trait]
impl InstallmentPort for InMemoryInstallmentPort {
    async fn insert_installments(
        &self,
        ctx: &SessionContext,
        student: StudentId,
        session: SessionId,
        installments: &[Installment],
    ) -> Result<(), PortError> {
        let mut numbers: Vec<u32> = installments.iter().map(|i| i.installment_number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        if numbers.len() != installments.len() {
            return Err(PortError::validation_field(
                "duplicate installment numbers in batch",
                "installment_number",
            ));
        }

        // Check and insert under one write lock so concurrent enrollments
        // for the same pair cannot both succeed.
        let mut store = self.installments.write().await;
        if store.contains_key(&(student, session)) {
            return Err(PortError::conflict(format!(
                "installments already exist for {} in {}",
                student, session
            )));
        }

        let mut rows = installments.to_vec();
        rows.sort_by_key(|i| i.installment_number);
        store.insert((student, session), rows);

        debug!(
            user = %ctx.user_id,
            correlation_id = ctx.correlation(),
            %student,
            %session,
            count = installments.len(),
            "Stored installments"
        );
        Ok(())
    }

    async fn list_installments(
        &self,
        _ctx: &SessionContext,
        student: StudentId,
        session: SessionId,
    ) -> Result<Vec<Installment>, PortError> {
        Ok(self
            .installments
            .read()
            .await
            .get(&(student, session))
            .cloned()
            .unwrap_or_default())
    }

    async fn apply_payment(
        &self,
        ctx: &SessionContext,
        student: StudentId,
        session: SessionId,
        payment: &InstallmentPayment,
    ) -> Result<Installment, FeeError> {
        let mut store = self.installments.write().await;
        let slot = store
            .get_mut(&(student, session))
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|row| row.installment_number == payment.installment_number)
            })
            .ok_or(FeeError::InstallmentNotFound {
                number: payment.installment_number,
            })?;

        // Work on a copy so a rejected payment leaves the stored row untouched
        let mut updated = slot.clone();
        updated.record_payment(payment.amount)?;
        *slot = updated.clone();

        debug!(
            user = %ctx.user_id,
            correlation_id = ctx.correlation(),
            %student,
            %session,
            installment = updated.installment_number,
            "Applied payment"
        );
        Ok(updated)
    }
}

//! Fee Domain Ports
//!
//! Typed data-access interfaces for the entities the fee domain reads and
//! writes. The planner itself never touches a port; only
//! [`EnrollmentService`](crate::services::EnrollmentService) does.
//!
//! - [`StudentPort`]: read-only student lookup
//! - [`SessionPort`]: read-only academic session lookup
//! - [`InstallmentPort`]: installment persistence keyed by
//!   `(student, session, installment number)`
//!
//! All methods take the caller's [`SessionContext`] so adapters can apply
//! row-level rules or audit fields without reading ambient state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{ClassId, DomainPort, PortError, SessionContext, SessionId, StudentId};

use crate::error::FeeError;
use crate::installment::{Installment, InstallmentPayment};

/// Student as seen by the fee domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
    pub class_id: ClassId,
    pub is_active: bool,
}

impl Student {
    pub fn new(full_name: impl Into<String>, class_id: ClassId) -> Self {
        Self {
            id: StudentId::new_v7(),
            full_name: full_name.into(),
            class_id,
            is_active: true,
        }
    }
}

/// An academic session such as "2025-2026"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicSession {
    pub id: SessionId,
    pub name: String,
    pub start_month: u32,
    pub start_year: i32,
    pub is_active: bool,
}

impl AcademicSession {
    pub fn new(name: impl Into<String>, start_month: u32, start_year: i32) -> Self {
        Self {
            id: SessionId::new_v7(),
            name: name.into(),
            start_month,
            start_year,
            is_active: true,
        }
    }
}

/// Student lookup
#[async_trait]
pub trait StudentPort: DomainPort {
    /// Returns the student or `PortError::NotFound`
    async fn get_student(&self, ctx: &SessionContext, id: StudentId) -> Result<Student, PortError>;
}

/// Academic session lookup
#[async_trait]
pub trait SessionPort: DomainPort {
    /// Returns the session or `PortError::NotFound`
    async fn get_session(&self, ctx: &SessionContext, id: SessionId) -> Result<AcademicSession, PortError>;
}

/// Installment persistence
#[async_trait]
pub trait InstallmentPort: DomainPort {
    /// Stores a freshly planned set of installments
    ///
    /// Fails with `PortError::Conflict` if any installment already exists for
    /// the `(student, session)` pair; nothing is written in that case.
    async fn insert_installments(
        &self,
        ctx: &SessionContext,
        student: StudentId,
        session: SessionId,
        installments: &[Installment],
    ) -> Result<(), PortError>;

    /// All installments for the pair, ascending by number
    async fn list_installments(
        &self,
        ctx: &SessionContext,
        student: StudentId,
        session: SessionId,
    ) -> Result<Vec<Installment>, PortError>;

    /// Applies a payment to one stored installment (matched by number) and
    /// returns the updated row
    ///
    /// Lookup, balance check and write happen atomically, so two payments
    /// against the same installment cannot both pass the overpayment check.
    async fn apply_payment(
        &self,
        ctx: &SessionContext,
        student: StudentId,
        session: SessionId,
        payment: &InstallmentPayment,
    ) -> Result<Installment, FeeError>;
}

//! Service Harness
//!
//! Wires an [`EnrollmentService`] to in-memory ports seeded with the fixture
//! student and session. Tests keep handles on the ports to inspect or seed
//! them further.

use std::sync::Arc;

use domain_fees::{
    AcademicSession, EnrollmentService, InMemoryInstallmentPort, InMemorySessionPort,
    InMemoryStudentPort, InstallmentPlanner, Student,
};

use crate::fixtures::EntityFixtures;

/// An enrollment service over seeded in-memory ports
pub struct ServiceHarness {
    pub service: EnrollmentService,
    pub students: InMemoryStudentPort,
    pub sessions: InMemorySessionPort,
    pub installments: InMemoryInstallmentPort,
}

impl ServiceHarness {
    /// Harness with the fixture student and session and the default planner
    pub async fn new() -> Self {
        Self::with_planner(InstallmentPlanner::default()).await
    }

    pub async fn with_planner(planner: InstallmentPlanner) -> Self {
        Self::seeded(
            vec![EntityFixtures::student(), EntityFixtures::withdrawn_student()],
            vec![EntityFixtures::session(), EntityFixtures::closed_session()],
            planner,
        )
        .await
    }

    /// Harness over exactly the given students and sessions
    pub async fn seeded(
        students: Vec<Student>,
        sessions: Vec<AcademicSession>,
        planner: InstallmentPlanner,
    ) -> Self {
        let students = InMemoryStudentPort::with_students(students).await;
        let sessions = InMemorySessionPort::with_sessions(sessions).await;
        let installments = InMemoryInstallmentPort::new();

        let service = EnrollmentService::new(
            Arc::new(students.clone()),
            Arc::new(sessions.clone()),
            Arc::new(installments.clone()),
            planner,
        );

        Self {
            service,
            students,
            sessions,
            installments,
        }
    }
}

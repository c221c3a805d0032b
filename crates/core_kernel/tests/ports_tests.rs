//! Integration tests for port errors and the session context

use core_kernel::{PortError, SessionContext, UserId};

mod port_error {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(PortError::not_found("Student", "STU-1").is_not_found());
        assert!(PortError::conflict("duplicate").is_conflict());
        assert!(PortError::connection("store unavailable").is_transient());
        assert!(!PortError::internal("bug").is_transient());
        assert!(!PortError::validation("bad").is_conflict());
    }

    #[test]
    fn test_validation_field_is_kept() {
        match PortError::validation_field("must be unique", "installment_number") {
            PortError::Validation { field, message } => {
                assert_eq!(field.as_deref(), Some("installment_number"));
                assert_eq!(message, "must be unique");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_messages_name_the_entity() {
        let err = PortError::not_found("AcademicSession", "SES-42");
        assert_eq!(err.to_string(), "Not found: AcademicSession with id SES-42");
    }
}

mod session_context {
    use super::*;

    #[test]
    fn test_builder_fields() {
        let user = UserId::new();
        let ctx = SessionContext::new(user)
            .with_correlation_id("req-7")
            .with_school("North Campus")
            .with_context("terminal", "fee-desk-2");

        assert_eq!(ctx.user_id, user);
        assert_eq!(ctx.correlation(), "req-7");
        assert_eq!(ctx.school_name.as_deref(), Some("North Campus"));
        assert_eq!(ctx.context.get("terminal").map(String::as_str), Some("fee-desk-2"));
    }

    #[test]
    fn test_system_context() {
        let ctx = SessionContext::system();
        assert!(ctx.user_id.as_uuid().is_nil());
        assert_eq!(ctx.correlation(), "-");
    }
}

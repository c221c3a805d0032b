//! Ports and Adapters Infrastructure
//!
//! Domain crates define port traits for the data they read and write
//! (students, sessions, installments). Adapters implement those traits
//! against a hosted backend or in memory, so domain logic can be tested
//! without a live database.
//!
//! ```text
//!   EnrollmentService ──► StudentPort / SessionPort / InstallmentPort
//!                                   ▲
//!                     ┌─────────────┴─────────────┐
//!               in-memory adapter          hosted backend adapter
//! ```
//!
//! Every port call receives a [`SessionContext`] describing who is acting.
//! The context is passed explicitly; nothing reads it from ambient state.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

use crate::identifiers::UserId;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data (e.g. duplicate key)
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared behind `Arc<dyn ...>` across async tasks.
pub trait DomainPort: Send + Sync + 'static {}

/// The acting user and request metadata for one operation
///
/// Built by the caller (from whatever the hosted auth service returned) and
/// handed to every service and port call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// The staff member performing the operation
    pub user_id: UserId,
    /// Correlation ID for tracing a request across log lines
    pub correlation_id: Option<String>,
    /// School or campus the user is acting for
    pub school_name: Option<String>,
    /// Additional context as key-value pairs
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl SessionContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            school_name: None,
            context: HashMap::new(),
        }
    }

    /// Context for batch jobs and tooling that act without a signed-in user
    pub fn system() -> Self {
        Self::new(UserId::from_uuid(uuid::Uuid::nil()))
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn with_school(mut self, school_name: impl Into<String>) -> Self {
        self.school_name = Some(school_name.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Correlation id for log fields, `-` when absent
    pub fn correlation(&self) -> &str {
        self.correlation_id.as_deref().unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Student", "123");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Student"));
        assert!(error.to_string().contains("123"));
    }

    #[test]
    fn test_port_error_conflict() {
        let error = PortError::conflict("installments already exist");
        assert!(error.is_conflict());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_port_error_transient() {
        assert!(PortError::connection("backend unreachable").is_transient());
        assert!(!PortError::validation("bad month").is_transient());
    }

    #[test]
    fn test_session_context() {
        let user = UserId::new();
        let ctx = SessionContext::new(user)
            .with_correlation_id("req-123")
            .with_school("Main Campus")
            .with_context("role", "accountant");

        assert_eq!(ctx.user_id, user);
        assert_eq!(ctx.correlation(), "req-123");
        assert_eq!(ctx.school_name.as_deref(), Some("Main Campus"));
        assert_eq!(ctx.context.get("role"), Some(&"accountant".to_string()));
    }

    #[test]
    fn test_system_context_has_no_correlation() {
        let ctx = SessionContext::system();
        assert_eq!(ctx.correlation(), "-");
        assert!(ctx.user_id.as_uuid().is_nil());
    }
}

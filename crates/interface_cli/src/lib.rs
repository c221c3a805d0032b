//! Command-line Fee Planner
//!
//! Reads an enrollment request as JSON, validates it, plans it and renders
//! the installments as JSON. The `fee-planner` binary wraps [`plan_document`]
//! with configuration loading and logging.
//!
//! # Example
//!
//! ```rust,ignore
//! let config = PlannerConfig::from_env()?;
//! let output = plan_document(&input, &config)?;
//! println!("{output}");
//! ```

pub mod config;
pub mod error;

use tracing::{debug, info};

use domain_fees::{EnrollmentRequest, Installment};

use crate::config::PlannerConfig;
use crate::error::CliError;

/// Validates and plans one request, returning its installments
pub fn plan_request(request: &str, config: &PlannerConfig) -> Result<Vec<Installment>, CliError> {
    let planner = config.planner()?;
    let request: EnrollmentRequest = serde_json::from_str(request)?;
    debug!(
        student = %request.student_id,
        fee_plan = %request.fee_plan,
        "Parsed enrollment request"
    );

    let enrollment = request.into_enrollment(planner.currency())?;
    let installments = planner.compute_installments(&enrollment.terms)?;

    info!(
        student = %enrollment.student_id,
        session = %enrollment.session_id,
        fee_plan = %enrollment.terms.fee_plan,
        installments = installments.len(),
        "Planned installments"
    );
    Ok(installments)
}

/// Plans a request document and renders the installments as pretty JSON
pub fn plan_document(request: &str, config: &PlannerConfig) -> Result<String, CliError> {
    let installments = plan_request(request, config)?;
    Ok(serde_json::to_string_pretty(&installments)?)
}

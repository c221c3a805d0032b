//! CLI error handling

use thiserror::Error;

use domain_fees::FeeError;

/// Errors from planning a request document
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Malformed request: {0}")]
    Input(#[from] serde_json::Error),

    #[error(transparent)]
    Fee(#[from] FeeError),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 78,
            CliError::Input(_) => 65,
            CliError::Fee(e) if e.is_validation() => 65,
            CliError::Fee(_) => 70,
        }
    }
}

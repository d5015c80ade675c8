use thiserror::Error;

/// Result type for sandbox operations
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Errors raised while setting up the sandbox.
///
/// Execution itself never errors: every outcome, including refusal and
/// timeout, is reported as an `ExecutionResult`.
#[derive(Error, Debug)]
pub enum SandboxError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SandboxError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

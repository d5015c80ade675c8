use crate::error::{Result, SandboxError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding the interpreter binary
pub const INTERPRETER_ENV: &str = "SNIPPET_SANDBOX_PYTHON";

const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
const DEFAULT_INTERPRETER: &str = "python3";

/// Configuration for sandboxed execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Wall-clock budget per execution, in seconds
    pub timeout_secs: f64,

    /// Interpreter binary used for the isolated child process
    pub interpreter: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            interpreter: DEFAULT_INTERPRETER.to_string(),
        }
    }
}

impl SandboxConfig {
    /// Builder: set the execution budget
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs_f64();
        self
    }

    /// Apply `SNIPPET_SANDBOX_PYTHON` when it is set and non-empty
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        let raw = std::env::var(INTERPRETER_ENV).ok();
        self.interpreter = parse_interpreter(raw.as_deref(), &self.interpreter);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::ZERO)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(SandboxError::invalid_config(format!(
                "timeout_secs must be a positive number, got {}",
                self.timeout_secs
            )));
        }

        if let Err(e) = Duration::try_from_secs_f64(self.timeout_secs) {
            return Err(SandboxError::invalid_config(format!(
                "timeout_secs {} is out of range: {e}",
                self.timeout_secs
            )));
        }

        if self.interpreter.trim().is_empty() {
            return Err(SandboxError::invalid_config("interpreter must not be empty"));
        }

        Ok(())
    }
}

fn parse_interpreter(raw: Option<&str>, fallback: &str) -> String {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Error text reported when static vetting refuses a snippet
pub const ERROR_UNSAFE: &str = "unsafe";

/// Error text reported when execution exceeds its budget
pub const ERROR_TIMED_OUT: &str = "timed out";

/// Terminal state of one execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    /// Refused by the safety analyzer; nothing was started
    Rejected,
    /// Ran to completion without raising
    Completed,
    /// Raised during execution, or the interpreter could not run it
    RuntimeFailed,
    /// Still running when the budget ran out
    TimedOut,
}

/// Outcome of running a snippet in the sandbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,

    /// Captured standard output (partial when timed out or failed)
    pub output: String,

    /// Empty on success; otherwise `unsafe`, `timed out`, or the exception
    /// type, message and traceback
    pub error: String,

    /// Wall-clock time, zero when rejected and the budget when timed out
    #[serde(serialize_with = "serialize_secs", deserialize_with = "deserialize_secs")]
    pub elapsed: Duration,

    pub state: ExecutionState,
}

impl ExecutionResult {
    pub fn rejected() -> Self {
        Self {
            success: false,
            output: String::new(),
            error: ERROR_UNSAFE.to_string(),
            elapsed: Duration::ZERO,
            state: ExecutionState::Rejected,
        }
    }

    pub fn completed(output: String, elapsed: Duration) -> Self {
        Self {
            success: true,
            output,
            error: String::new(),
            elapsed,
            state: ExecutionState::Completed,
        }
    }

    pub fn runtime_failed(output: String, error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            success: false,
            output,
            error: error.into(),
            elapsed,
            state: ExecutionState::RuntimeFailed,
        }
    }

    pub fn timed_out(output: String, timeout: Duration) -> Self {
        Self {
            success: false,
            output,
            error: ERROR_TIMED_OUT.to_string(),
            elapsed: timeout,
            state: ExecutionState::TimedOut,
        }
    }
}

fn serialize_secs<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    let millis = (value.as_secs_f64() * 1000.0).round() / 1000.0;
    serializer.serialize_f64(millis)
}

fn deserialize_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejected_result_has_zero_elapsed_and_no_output() {
        let result = ExecutionResult::rejected();
        assert!(!result.success);
        assert_eq!(result.output, "");
        assert_eq!(result.error, "unsafe");
        assert_eq!(result.elapsed, Duration::ZERO);
    }

    #[test]
    fn elapsed_serializes_as_rounded_seconds() {
        let result = ExecutionResult::completed("4\n".into(), Duration::from_micros(1_234_567));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["elapsed"], serde_json::json!(1.235));
        assert_eq!(json["state"], serde_json::json!("completed"));

        let back: ExecutionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.output, "4\n");
        assert!((back.elapsed.as_secs_f64() - 1.235).abs() < 1e-6);
    }
}

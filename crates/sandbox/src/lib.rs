//! # Snippet Sandbox
//!
//! Static vetting and time-boxed execution of Python snippets.
//!
//! ```text
//! Snippet
//!     │
//!     ├──> SafetyAnalyzer (allowlist walk over the syntax tree)
//!     │      └─> Unsafe ──> { success: false, error: "unsafe", elapsed: 0 }
//!     │
//!     └──> SandboxExecutor
//!            ├─> worker thread owns an isolated interpreter process
//!            ├─> stdout pumped into a shared buffer
//!            └─> one-slot channel, parent waits at most `timeout`
//!                 ├─> Completed / RuntimeFailed (measured elapsed)
//!                 └─> TimedOut (partial output, elapsed = timeout)
//! ```
//!
//! The allowlist is a best-effort filter, not a defense against a determined
//! adversary. Isolation comes from running the code in a separate process
//! with a cleared environment that can be killed when the budget runs out.
//!
//! ## Example
//!
//! ```no_run
//! use snippet_sandbox::{SandboxConfig, SandboxExecutor};
//!
//! let executor = SandboxExecutor::new(SandboxConfig::default()).unwrap();
//! let result = executor.execute("print(sum(range(5)))");
//! assert_eq!(result.output, "10\n");
//! ```

mod config;
mod error;
mod executor;
pub mod policy;
mod runner;
mod safety;
mod types;

pub use config::{SandboxConfig, INTERPRETER_ENV};
pub use error::{Result, SandboxError};
pub use executor::SandboxExecutor;
pub use safety::{SafetyAnalyzer, SafetyVerdict, Violation};
pub use types::{ExecutionResult, ExecutionState, ERROR_TIMED_OUT, ERROR_UNSAFE};

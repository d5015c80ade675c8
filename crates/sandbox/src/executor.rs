use crate::config::SandboxConfig;
use crate::error::Result;
use crate::runner::runner_program;
use crate::safety::SafetyAnalyzer;
use crate::types::ExecutionResult;
use std::io::{BufReader, Read, Write};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, SyncSender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// What the worker hands back through the one-slot channel
enum WorkerReport {
    Exited { success: bool, report: String },
    Failed(String),
}

/// Runs vetted snippets in an isolated interpreter process under a
/// wall-clock budget.
///
/// Each call spawns one worker thread that owns the child process and pumps
/// its stdout into a shared buffer. The caller waits on a single-slot channel
/// for at most the configured timeout. Past the budget the caller returns at
/// once and flags the worker, which kills the child on its next poll; the
/// worker thread is never joined.
pub struct SandboxExecutor {
    config: SandboxConfig,
    analyzer: SafetyAnalyzer,
}

impl SandboxExecutor {
    /// Create an executor with a validated configuration
    pub fn new(config: SandboxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            analyzer: SafetyAnalyzer::new(),
        })
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    /// Vet and run `code`
    pub fn execute(&self, code: &str) -> ExecutionResult {
        let verdict = self.analyzer.check(code);
        if let Some(violation) = verdict.violation() {
            log::info!("Refusing to execute snippet: {violation}");
            return ExecutionResult::rejected();
        }

        let timeout = self.timeout();
        let output = Arc::new(Mutex::new(Vec::new()));
        let cancel = Arc::new(AtomicBool::new(false));
        let (slot, receiver) = mpsc::sync_channel(1);

        let command = self.interpreter_command();
        let source = code.to_string();
        let worker_output = Arc::clone(&output);
        let worker_cancel = Arc::clone(&cancel);

        let start = Instant::now();
        let spawned = thread::Builder::new()
            .name("snippet-sandbox".to_string())
            .spawn(move || supervise(command, source, worker_output, worker_cancel, slot));
        if let Err(e) = spawned {
            return ExecutionResult::runtime_failed(
                String::new(),
                format!("failed to start sandbox worker: {e}"),
                start.elapsed(),
            );
        }

        match receiver.recv_timeout(timeout) {
            Ok(WorkerReport::Exited { success: true, .. }) => {
                ExecutionResult::completed(snapshot(&output), start.elapsed())
            }
            Ok(WorkerReport::Exited { success: false, report }) => {
                let error = if report.trim().is_empty() {
                    "interpreter exited with a failure status".to_string()
                } else {
                    report.trim_end().to_string()
                };
                ExecutionResult::runtime_failed(snapshot(&output), error, start.elapsed())
            }
            Ok(WorkerReport::Failed(error)) => {
                log::warn!("Sandbox interpreter failed: {error}");
                ExecutionResult::runtime_failed(snapshot(&output), error, start.elapsed())
            }
            Err(RecvTimeoutError::Timeout) => {
                cancel.store(true, Ordering::SeqCst);
                log::warn!(
                    "Snippet exceeded its {:.1}s budget; abandoning worker",
                    timeout.as_secs_f64()
                );
                ExecutionResult::timed_out(snapshot(&output), timeout)
            }
            Err(RecvTimeoutError::Disconnected) => ExecutionResult::runtime_failed(
                snapshot(&output),
                "sandbox worker exited without reporting",
                start.elapsed(),
            ),
        }
    }

    fn interpreter_command(&self) -> Command {
        let mut command = Command::new(&self.config.interpreter);
        command
            .args(["-I", "-u", "-c"])
            .arg(runner_program())
            .env_clear()
            .current_dir(std::env::temp_dir())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

/// Worker body: run the child to completion or until cancelled
fn supervise(
    mut command: Command,
    source: String,
    output: Arc<Mutex<Vec<u8>>>,
    cancel: Arc<AtomicBool>,
    slot: SyncSender<WorkerReport>,
) {
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            let _ = slot.send(WorkerReport::Failed(format!(
                "failed to start interpreter: {e}"
            )));
            return;
        }
    };

    // Fed from its own thread so a child that never drains stdin cannot
    // keep the cancel poll below from running
    let feeder = child.stdin.take().map(|mut stdin| {
        thread::spawn(move || {
            if let Err(e) = stdin.write_all(source.as_bytes()) {
                log::debug!("Failed to hand snippet to interpreter: {e}");
            }
        })
    });

    let stdout_pump = child
        .stdout
        .take()
        .map(|stdout| thread::spawn(move || pump(stdout, &output)));
    let stderr_pump = child.stderr.take().map(|stderr| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = BufReader::new(stderr).read_to_end(&mut buf);
            buf
        })
    });

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if cancel.load(Ordering::SeqCst) {
                    let _ = child.kill();
                    let _ = child.wait();
                    log::debug!("Killed timed-out sandbox child");
                    return;
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = slot.send(WorkerReport::Failed(format!(
                    "failed to wait for interpreter: {e}"
                )));
                return;
            }
        }
    };

    if let Some(handle) = feeder {
        let _ = handle.join();
    }
    if let Some(handle) = stdout_pump {
        let _ = handle.join();
    }
    let report = stderr_pump
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();

    // The caller may already have given up on us
    let _ = slot.send(WorkerReport::Exited {
        success: status.success(),
        report,
    });
}

fn pump(stream: impl Read, output: &Mutex<Vec<u8>>) {
    let mut reader = BufReader::new(stream);
    let mut chunk = [0u8; 4096];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => output
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(&chunk[..n]),
        }
    }
}

fn snapshot(output: &Mutex<Vec<u8>>) -> String {
    let bytes = output.lock().unwrap_or_else(PoisonError::into_inner);
    String::from_utf8_lossy(&bytes).into_owned()
}

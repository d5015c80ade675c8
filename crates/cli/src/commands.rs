use crate::config::AppConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use snippet_placement::{Placement, SnippetIntegrator};
use snippet_sandbox::{SafetyAnalyzer, SafetyVerdict, SandboxExecutor};
use snippet_syntax::Language;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Summary printed after `apply`
#[derive(Debug, Serialize)]
struct ApplyOutput {
    applied: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_content: Option<String>,
}

pub fn run_check(source: &Path) -> Result<ExitCode> {
    let code = read_snippet(source)?;
    match SafetyAnalyzer::new().check(&code) {
        SafetyVerdict::Safe => {
            print_stdout("safe")?;
            Ok(ExitCode::SUCCESS)
        }
        SafetyVerdict::Unsafe(violation) => {
            print_stdout(&format!("unsafe: {violation}"))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn run_exec(source: &Path, timeout_secs: Option<f64>, config: AppConfig) -> Result<ExitCode> {
    let code = read_snippet(source)?;
    let mut sandbox = config.sandbox;
    if let Some(secs) = timeout_secs {
        sandbox.timeout_secs = secs;
    }

    let executor = SandboxExecutor::new(sandbox).context("Invalid sandbox settings")?;
    let result = executor.execute(&code);
    print_stdout(&serde_json::to_string_pretty(&result)?)?;

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn run_locate(source: &Path, dir: &Path, config: AppConfig) -> Result<ExitCode> {
    let snippet = read_snippet(source)?;
    let integrator = SnippetIntegrator::new(config.ranker)?;
    let placements = integrator
        .locate(&snippet, dir)
        .with_context(|| format!("Failed to rank files in {}", dir.display()))?;

    print_stdout(&serde_json::to_string_pretty(&placements)?)?;
    Ok(ExitCode::SUCCESS)
}

pub fn run_apply(
    source: &Path,
    dir: &Path,
    pick: usize,
    dry_run: bool,
    config: AppConfig,
) -> Result<ExitCode> {
    let snippet = read_snippet(source)?;
    let integrator = SnippetIntegrator::new(config.ranker)?;
    let selected = integrator
        .select(&snippet, dir, pick)
        .with_context(|| format!("Failed to rank files in {}", dir.display()))?;

    let Some(placement) = selected else {
        log::warn!("No file in {} cleared the confidence threshold", dir.display());
        let output = ApplyOutput {
            applied: false,
            dry_run,
            placement: None,
            backup_path: None,
            new_content: None,
        };
        print_stdout(&serde_json::to_string_pretty(&output)?)?;
        return Ok(ExitCode::FAILURE);
    };

    let output = if dry_run {
        let tx = integrator
            .preview(&snippet, &placement)
            .with_context(|| format!("Failed to preview {}", placement.file_path.display()))?;
        ApplyOutput {
            applied: false,
            dry_run,
            placement: Some(placement),
            backup_path: None,
            new_content: Some(tx.new_content),
        }
    } else {
        let tx = integrator
            .apply(&snippet, &placement)
            .with_context(|| format!("Failed to patch {}", placement.file_path.display()))?;
        ApplyOutput {
            applied: true,
            dry_run,
            placement: Some(placement),
            backup_path: Some(tx.backup_path),
            new_content: None,
        }
    };

    print_stdout(&serde_json::to_string_pretty(&output)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Read a snippet from a file, or from stdin when the path is `-`
fn read_snippet(source: &Path) -> Result<String> {
    if source.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read snippet from stdin")?;
        return Ok(buffer);
    }

    if !Language::from_path(source).supports_ast() {
        log::debug!("{} has no Python extension, reading anyway", source.display());
    }
    fs::read_to_string(source).with_context(|| format!("Failed to read {}", source.display()))
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

//! External command execution
//!
//! Every provider call (precondition query, create, open-port) goes through
//! a [`CommandExecutor`]. Failures are data, never errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::Command;

/// Outcome of one external command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,

    /// stdout on success, stderr (or the launch error) on failure
    pub info: String,
}

impl ExecutionResult {
    pub fn ok(info: impl Into<String>) -> Self {
        Self {
            success: true,
            info: info.into(),
        }
    }

    pub fn failed(info: impl Into<String>) -> Self {
        Self {
            success: false,
            info: info.into(),
        }
    }
}

/// Flags whose value never appears in logs
const SECRET_FLAGS: [&str; 1] = ["--admin-password"];

/// `argv` joined for display, with secret flag values masked.
pub fn command_line(argv: &[String]) -> String {
    let mut masked = Vec::with_capacity(argv.len());
    let mut hide_next = false;
    for arg in argv {
        if hide_next {
            masked.push("****");
        } else {
            masked.push(arg.as_str());
        }
        hide_next = SECRET_FLAGS.contains(&arg.as_str());
    }
    masked.join(" ")
}

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `argv` to completion.
    ///
    /// When `log` is set the result is reported at info level (create
    /// commands); read-only queries pass `false` and only show up in debug
    /// output.
    async fn execute(&self, argv: &[String], log: bool) -> ExecutionResult;
}

/// Runs commands as child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, argv: &[String], log: bool) -> ExecutionResult {
        let Some((program, args)) = argv.split_first() else {
            return ExecutionResult::failed("empty command");
        };

        tracing::debug!("Running: {}", command_line(argv));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let result = match output {
            Ok(output) if output.status.success() => {
                ExecutionResult::ok(String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => ExecutionResult::failed(String::from_utf8_lossy(&output.stderr)),
            Err(e) => ExecutionResult::failed(format!("failed to run {}: {}", program, e)),
        };

        if log {
            if result.success {
                tracing::info!("Command executed successfully: {}", result.info);
            } else {
                tracing::error!("Error executing command = {}", result.info);
            }
        } else {
            tracing::debug!(success = result.success, "{}", result.info.trim_end());
        }

        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_success_captures_stdout() {
        let result = ProcessExecutor::new()
            .execute(&argv(&["sh", "-c", "echo hello; echo noise >&2"]), false)
            .await;

        assert!(result.success);
        assert_eq!(result.info, "hello\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_captures_stderr() {
        let result = ProcessExecutor::new()
            .execute(&argv(&["sh", "-c", "echo out; echo boom >&2; exit 3"]), true)
            .await;

        assert!(!result.success);
        assert_eq!(result.info, "boom\n");
    }

    #[tokio::test]
    async fn test_missing_binary_is_failure() {
        let result = ProcessExecutor::new()
            .execute(&argv(&["vmflow-definitely-not-installed"]), false)
            .await;

        assert!(!result.success);
        assert!(result.info.contains("vmflow-definitely-not-installed"));
    }

    #[test]
    fn test_command_line_masks_password() {
        let line = command_line(&argv(&[
            "az",
            "vm",
            "create",
            "--admin-password",
            "s3cret!",
            "--output",
            "table",
        ]));
        assert_eq!(line, "az vm create --admin-password **** --output table");
        assert!(!line.contains("s3cret!"));
    }

    #[tokio::test]
    async fn test_empty_argv() {
        let result = ProcessExecutor::new().execute(&[], false).await;
        assert_eq!(result, ExecutionResult::failed("empty command"));
    }
}

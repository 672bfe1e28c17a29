//! Synchronous child-process helpers shared by the adapters.

use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Failure of a child-process invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The binary could not be launched at all.
    #[error("could not run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child ran and exited non-zero; its output went to the terminal.
    #[error("{command} failed: {status}")]
    Failed { command: String, status: ExitStatus },

    /// The child ran and exited non-zero; `output` is its combined stdout
    /// and stderr.
    #[error("{command} failed: {status}\n{output}")]
    FailedWithOutput {
        command: String,
        status: ExitStatus,
        output: String,
    },
}

/// Render a command line for log and error messages.
pub fn describe(cmd: &Command) -> String {
    let mut out = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        out.push(' ');
        out.push_str(&arg.to_string_lossy());
    }
    out
}

/// Run a command with the parent's stdio, blocking until it exits.
pub fn run_streamed(cmd: &mut Command) -> Result<(), CommandError> {
    let command = describe(cmd);
    let status = cmd.status().map_err(|source| CommandError::Spawn {
        command: command.clone(),
        source,
    })?;
    if !status.success() {
        return Err(CommandError::Failed { command, status });
    }
    Ok(())
}

/// Run a command capturing its output, blocking until it exits.
///
/// Returns the combined stdout and stderr, trimmed. On non-zero exit the
/// combined output is carried inside the error so callers can surface it.
pub fn run_captured(cmd: &mut Command) -> Result<String, CommandError> {
    let command = describe(cmd);
    let out = cmd.output().map_err(|source| CommandError::Spawn {
        command: command.clone(),
        source,
    })?;
    let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&out.stderr));
    let text = text.trim().to_string();
    if !out.status.success() {
        return Err(CommandError::FailedWithOutput {
            command,
            status: out.status,
            output: text,
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_includes_program_and_args() {
        let mut cmd = Command::new("git");
        cmd.args(["clone", "--depth=1"]);
        assert_eq!(describe(&cmd), "git clone --depth=1");
    }

    #[test]
    fn run_captured_collects_output() {
        let mut cmd = Command::new("git");
        cmd.arg("--version");
        let out = run_captured(&mut cmd).expect("git --version");
        assert!(out.contains("git version"), "unexpected output: {out}");
    }

    #[test]
    fn run_captured_carries_failure_output() {
        let mut cmd = Command::new("git");
        cmd.arg("no-such-subcommand-for-tests");
        let err = run_captured(&mut cmd).expect_err("bogus subcommand");
        let msg = err.to_string();
        assert!(msg.contains("git no-such-subcommand-for-tests"));
        assert!(msg.contains("failed:"));
        assert!(msg.contains("no-such-subcommand-for-tests'"), "missing child output: {msg}");
    }

    #[test]
    fn spawn_failure_names_the_command() {
        let mut cmd = Command::new("pagegen-no-such-binary-xyz");
        let err = run_streamed(&mut cmd).expect_err("missing binary");
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert!(err.to_string().contains("pagegen-no-such-binary-xyz"));
    }

    #[test]
    fn run_streamed_reports_exit_status() {
        let mut cmd = Command::new("git");
        cmd.arg("no-such-subcommand-for-tests");
        let err = run_streamed(&mut cmd).expect_err("bogus subcommand");
        assert!(matches!(err, CommandError::Failed { .. }));
    }
}

//! External command execution.
//!
//! Commands are spawned directly (program + argument vector), never
//! through a shell, so package names and URLs are passed verbatim.

use crate::error::{InstallerError, Result};
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Combined stdout and stderr, for error reporting.
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.trim_end().to_string();
        let err = self.stderr.trim_end();
        if !err.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(err);
        }
        out
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture both output streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
        }
    }
}

/// Output line from command execution.
#[derive(Debug, Clone)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Callback for streaming output.
pub type OutputCallback = Box<dyn Fn(OutputLine) + Send>;

/// Render a program and its arguments as a single display string.
pub fn display_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Execute a command and wait for it to finish.
///
/// A command that cannot be spawned at all is reported as
/// [`InstallerError::SpawnFailed`] carrying the io error. A command that runs
/// and exits non-zero is returned as an unsuccessful [`CommandResult`].
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let shown = display_command(program, args);
    tracing::debug!("Running: {}", shown);

    let mut cmd = Command::new(program);
    cmd.args(args);

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|source| InstallerError::SpawnFailed {
        command: shown.clone(),
        source,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        shown,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a command with streaming output.
///
/// Both streams are always piped: they are captured in the result and also
/// handed line by line to `callback` as they arrive.
pub fn execute_streaming(
    program: &str,
    args: &[String],
    callback: OutputCallback,
) -> Result<CommandResult> {
    let start = Instant::now();
    let shown = display_command(program, args);
    tracing::debug!("Running (streaming): {}", shown);

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let spawn_failed = |source: std::io::Error| InstallerError::SpawnFailed {
        command: shown.clone(),
        source,
    };
    let pipe_missing = || spawn_failed(std::io::Error::other("output pipe was not created"));

    let mut child = cmd.spawn().map_err(spawn_failed)?;

    let stdout = child.stdout.take().ok_or_else(pipe_missing)?;
    let stderr = child.stderr.take().ok_or_else(pipe_missing)?;

    let (tx, rx) = mpsc::channel();
    let tx_stdout = tx.clone();
    let tx_stderr = tx;

    let stdout_handle = thread::spawn(move || {
        let reader = BufReader::new(stdout);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
            let _ = tx_stdout.send(OutputLine::Stdout(line));
        }
        output
    });

    let stderr_handle = thread::spawn(move || {
        let reader = BufReader::new(stderr);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
            let _ = tx_stderr.send(OutputLine::Stderr(line));
        }
        output
    });

    for line in rx {
        callback(line);
    }

    let stdout_output = stdout_handle.join().unwrap_or_default();
    let stderr_output = stderr_handle.join().unwrap_or_default();

    let status = child.wait().map_err(spawn_failed)?;

    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(
            stdout_output,
            stderr_output,
            duration,
        ))
    } else {
        Ok(CommandResult::failure(
            status.code(),
            stdout_output,
            stderr_output,
            duration,
        ))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn execute_successful_command() {
        let result = execute("echo", &args(&["hello"]), &CommandOptions::captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("sh", &args(&["-c", "exit 3"]), &CommandOptions::captured()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_missing_program_reports_spawn_reason() {
        let err = execute(
            "this-command-does-not-exist-12345",
            &[],
            &CommandOptions::captured(),
        )
        .unwrap_err();

        match &err {
            InstallerError::SpawnFailed { command, source } => {
                assert_eq!(command, "this-command-does-not-exist-12345");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("Failed to start"));
    }

    #[test]
    fn streaming_missing_program_reports_spawn_reason() {
        let err = execute_streaming(
            "this-command-does-not-exist-12345",
            &args(&["--version"]),
            Box::new(|_| {}),
        )
        .unwrap_err();

        assert!(matches!(err, InstallerError::SpawnFailed { .. }));
        assert!(err
            .to_string()
            .contains("this-command-does-not-exist-12345 --version"));
    }

    #[test]
    fn arguments_are_not_shell_interpreted() {
        let result = execute("echo", &args(&["$HOME;ls"]), &CommandOptions::captured()).unwrap();
        assert!(result.stdout.contains("$HOME;ls"));
    }

    #[test]
    fn combined_output_joins_streams() {
        let result = CommandResult::failure(
            Some(1),
            "out\n".to_string(),
            "err\n".to_string(),
            Duration::ZERO,
        );
        assert_eq!(result.combined_output(), "out\nerr");
    }

    #[test]
    fn display_command_joins_args() {
        assert_eq!(
            display_command("apt-get", &args(&["install", "-y", "git"])),
            "apt-get install -y git"
        );
        assert_eq!(display_command("true", &[]), "true");
    }

    #[test]
    fn execute_streaming_captures_both_streams() {
        use std::sync::{Arc, Mutex};

        let lines = Arc::new(Mutex::new(Vec::new()));
        let lines_clone = Arc::clone(&lines);

        let callback: OutputCallback = Box::new(move |line| {
            lines_clone.lock().unwrap().push(line);
        });

        let result = execute_streaming(
            "sh",
            &args(&["-c", "echo line1; echo line2 >&2"]),
            callback,
        )
        .unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("line1"));
        assert!(result.stderr.contains("line2"));

        let captured = lines.lock().unwrap();
        assert!(captured.iter().any(|l| matches!(l, OutputLine::Stdout(_))));
        assert!(captured.iter().any(|l| matches!(l, OutputLine::Stderr(_))));
    }
}

//! Host access seam.
//!
//! Everything the installer asks of the host system (privilege, PATH
//! lookups, running external programs) goes through [`HostContext`], so
//! the pipeline can be driven against fakes in tests.

use std::path::PathBuf;

use crate::error::Result;
use crate::ui::OutputMode;

use super::command::{execute, execute_streaming, CommandOptions, CommandResult, OutputLine};

/// Check whether the process runs as root.
pub type ElevationCheck = Box<dyn Fn() -> bool>;

/// Resolve a command name to its path on PATH.
pub type CommandLookup = Box<dyn Fn(&str) -> Option<PathBuf>>;

/// Run a program with arguments to completion.
pub type CommandRunner = Box<dyn Fn(&str, &[String]) -> Result<CommandResult>>;

/// Mockable host dependencies.
pub struct HostContext {
    pub is_elevated: ElevationCheck,
    pub find_command: CommandLookup,
    pub run_command: CommandRunner,
}

impl HostContext {
    /// Build the production context.
    ///
    /// In verbose mode child output is echoed line by line as it arrives;
    /// otherwise it is captured and only surfaced when a command fails.
    pub fn system(mode: OutputMode) -> Self {
        let stream = mode.shows_command_output();

        Self {
            is_elevated: Box::new(super::platform::is_elevated),
            find_command: Box::new(crate::requirements::probe::find_command),
            run_command: Box::new(move |program: &str, args: &[String]| {
                if stream {
                    execute_streaming(program, args, Box::new(echo_line))
                } else {
                    execute(program, args, &CommandOptions::captured())
                }
            }),
        }
    }

    /// Check whether the process runs as root.
    pub fn is_elevated(&self) -> bool {
        (self.is_elevated)()
    }

    /// Resolve a command on PATH.
    pub fn find_command(&self, command: &str) -> Option<PathBuf> {
        (self.find_command)(command)
    }

    /// Run a program to completion.
    pub fn run(&self, program: &str, args: &[String]) -> Result<CommandResult> {
        (self.run_command)(program, args)
    }
}

fn echo_line(line: OutputLine) {
    match line {
        OutputLine::Stdout(text) => println!("  │ {}", text),
        OutputLine::Stderr(text) => eprintln!("  │ {}", text),
    }
}

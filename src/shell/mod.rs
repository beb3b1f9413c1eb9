//! External command execution, host access and platform queries.

pub mod command;
pub mod host;
pub mod platform;

pub use command::{
    display_command, execute, execute_streaming, CommandOptions, CommandResult,
    OutputCallback, OutputLine,
};
pub use host::HostContext;
pub use platform::{is_ci, is_elevated};

//! Non-interactive UI for CI/headless environments.

use super::spinner::LineSpinner;
use super::theme::InstallerTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Prints plain lines instead of animated spinners so output stays
/// readable in logs. Errors always go to stderr.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_details() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(LineSpinner::start(message, InstallerTheme::plain()))
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}\n", title);
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_details() {
            println!("{}", InstallerTheme::plain().format_hint(hint));
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_details() {
            println!("[{}/{}]", current, total);
        }
    }
}

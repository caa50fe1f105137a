use std::{
    fmt,
    io::Write,
    sync::{Mutex, OnceLock},
};

use anstyle::*;

const ERROR: Style = AnsiColor::Red.on_default().bold();
const WARN: Style = AnsiColor::Yellow.on_default().bold();
const NOTE: Style = AnsiColor::Cyan.on_default().bold();
const STATUS: Style = AnsiColor::Green.on_default().bold();

static SHELL: OnceLock<Shell> = OnceLock::new();

pub fn shell() -> &'static Shell {
    SHELL.get_or_init(Shell::new)
}

/// User-facing output of the `pose` binary. Everything goes to stderr so
/// that rendered pages can be piped from stdout.
pub struct Shell {
    stderr: Mutex<anstream::Stderr>,
    quiet: OnceLock<bool>,
}

impl Shell {
    fn new() -> Self {
        Self {
            stderr: Mutex::new(anstream::stderr()),
            quiet: OnceLock::new(),
        }
    }

    /// Silences status and note lines. Can only be set once.
    pub fn set_quiet(&self, quiet: bool) {
        let _ = self.quiet.set(quiet);
    }

    fn is_quiet(&self) -> bool {
        self.quiet.get().copied().unwrap_or(false)
    }

    pub fn print(
        &self,
        style: Style,
        status: impl fmt::Display,
        message: impl fmt::Display,
        justified: bool,
    ) {
        let log = create_log(style, status, message, justified);
        let mut stderr = self.stderr.lock().unwrap();
        writeln!(stderr, "{log}").expect("failed to write to stderr");
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.print(ERROR, "error", message, false);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.print(WARN, "warning", message, false);
    }

    pub fn note(&self, message: impl fmt::Display) {
        if !self.is_quiet() {
            self.print(NOTE, "note", message, false);
        }
    }

    pub fn status(&self, status: impl fmt::Display, message: impl fmt::Display) {
        if !self.is_quiet() {
            self.print(STATUS, status, message, true);
        }
    }
}

fn create_log(
    style: Style,
    status: impl fmt::Display,
    message: impl fmt::Display,
    justified: bool,
) -> String {
    if justified {
        format!("{style}{status:>12}{style:#} {message}")
    } else {
        let bold = if style.get_effects().contains(Effects::BOLD) {
            Style::new().bold()
        } else {
            Style::new()
        };
        format!("{style}{status}{style:#}{bold}:{bold:#} {message}")
    }
}

#[cfg(test)]
mod tests {
    use anstyle::Style;

    use super::create_log;

    #[test]
    fn status_is_right_aligned() {
        let log = create_log(Style::new(), "Rendered", "2 elements", true);
        assert_eq!(log, "    Rendered 2 elements");
    }

    #[test]
    fn labels_are_followed_by_a_colon() {
        let log = create_log(Style::new(), "warning", "unused config key: foo", false);
        assert_eq!(log, "warning: unused config key: foo");
    }

    #[test]
    fn notes_use_a_plain_label() {
        let log = create_log(Style::new(), "note", "using defaults", false);
        assert_eq!(log, "note: using defaults");
    }
}

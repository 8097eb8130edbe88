//! Message formatting and display.
//!
//! Informational output goes to stdout and is silenced by quiet mode.
//! Warnings and errors go to stderr and are always shown.
//!
//! # Examples
//!
//! ```
//! use pdfdeck::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Processing files...");
//! formatter.success("Operation completed");
//! formatter.error("Something went wrong");
//! ```

use std::io::{self, IsTerminal, Write};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m", // Green
            Self::Warning => "\x1b[33m", // Yellow
            Self::Error => "\x1b[31m",   // Red
            Self::Debug => "\x1b[36m",   // Cyan
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// Quiet wins over verbose when both are set.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose: verbose && !quiet,
            colored: Self::should_use_color(),
        }
    }

    /// Create a quiet formatter (only warnings and errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Disable ANSI colors regardless of the terminal.
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message. Always displayed.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message. Always displayed.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a debug message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    /// Format a message the way it would be printed.
    pub fn render(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        let color = level.color();
        if self.colored && !color.is_empty() {
            format!("{color}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        let line = self.render(level, message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a labelled value. Only shown in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a progress indicator. Suppressed in quiet mode.
    pub fn progress(&self, current: usize, total: usize, message: Option<&str>) {
        if !self.quiet {
            let msg = message.unwrap_or("");
            print!("\r  [{current}/{total}] {msg}");
            io::stdout().flush().ok();

            if current == total {
                println!();
            }
        }
    }

    /// Print a numbered list item. Suppressed in quiet mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// Print raw text (JSON and the like) even in quiet mode.
    pub fn raw(&self, text: &str) {
        println!("{text}");
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_formatter() {
        let formatter = OutputFormatter::new(false, false);
        assert!(!formatter.is_quiet());
        assert!(!formatter.is_verbose());
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let formatter = OutputFormatter::new(true, true);
        assert!(formatter.is_quiet());
        assert!(!formatter.is_verbose());
    }

    #[test]
    fn test_verbose_formatter() {
        let formatter = OutputFormatter::verbose();
        assert!(!formatter.is_quiet());
        assert!(formatter.is_verbose());
    }

    #[rstest]
    #[case(MessageLevel::Info, "done")]
    #[case(MessageLevel::Success, "✓ done")]
    #[case(MessageLevel::Warning, "⚠ done")]
    #[case(MessageLevel::Error, "✗ done")]
    #[case(MessageLevel::Debug, "→ done")]
    fn test_render_plain(#[case] level: MessageLevel, #[case] expected: &str) {
        let formatter = OutputFormatter::default().without_color();
        assert_eq!(formatter.render(level, "done"), expected);
    }

    #[test]
    fn test_render_colored() {
        let mut formatter = OutputFormatter::default();
        formatter.colored = true;

        assert_eq!(
            formatter.render(MessageLevel::Error, "bad"),
            "\x1b[31m✗ bad\x1b[0m"
        );
        assert_eq!(formatter.render(MessageLevel::Info, "plain"), "plain");
    }

    #[test]
    fn test_stream_selection() {
        assert!(MessageLevel::Warning.to_stderr());
        assert!(MessageLevel::Error.to_stderr());
        assert!(!MessageLevel::Success.to_stderr());
    }
}

//! Colored terminal output.

use colored::Colorize;

/// Prints progress, tool output and results for a packaging run.
///
/// Progress goes to stdout; errors go to stderr and are never suppressed.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager. `quiet` hides everything but errors and
    /// success lines.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Whether non-essential output is suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Section header, preceded by a blank line.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", format!("=== {title} ===").bold().cyan());
        }
    }

    /// Progress line.
    pub fn progress(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "→".blue(), message);
        }
    }

    /// Indented line, used for tool output.
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            println!("  {message}");
        }
    }

    /// Success line.
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    /// Error line.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    /// Follow-up hint for an error.
    pub fn hint(&self, message: &str) {
        eprintln!("  {} {}", "hint:".yellow(), message);
    }
}

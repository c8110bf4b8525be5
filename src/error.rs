//! Top-level error types.
//!
//! Wraps packaging and CLI errors and attaches recovery suggestions shown
//! after the error message.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type returned by the CLI
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Packaging errors
    #[error("{0}")]
    Packaging(#[from] crate::packager::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl PackagerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::packager::Error;

        match self {
            Self::Packaging(Error::ToolNotFound { tool }) if tool.contains("create-dmg") => vec![
                "Install create-dmg: brew install create-dmg".to_string(),
            ],
            Self::Packaging(Error::ToolNotFound { tool }) if tool.contains("xcodebuild") => vec![
                "Install Xcode, then run: xcode-select --install".to_string(),
            ],
            Self::Packaging(Error::ToolNotFound { .. }) => vec![
                "Check the [tools] section of the settings file".to_string(),
            ],
            Self::Packaging(Error::ToolFailed { step, .. }) if step == "build" => vec![
                "Scroll up for the xcodebuild output".to_string(),
                "Check project.scheme and project.configuration".to_string(),
            ],
            Self::Packaging(Error::MissingAppBundle { .. }) => vec![
                "Set project.app_name if the product name differs from the scheme".to_string(),
            ],
            Self::Packaging(Error::InvalidSettings { .. }) => vec![
                "Fix the settings file and run again, or use --dry-run to inspect the plan"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

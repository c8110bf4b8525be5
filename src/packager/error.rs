//! Error types for packaging operations.
//!
//! Every failure mode of a packaging run maps to one variant here, and every
//! variant renders a message a user can act on.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while planning or executing a packaging run.
#[derive(Error, Debug)]
pub enum Error {
    /// External tool could not be located or launched
    #[error("{tool} not found: install it or point [tools] at it in the settings file")]
    ToolNotFound {
        /// Program name as configured
        tool: String,
    },

    /// Launching the tool failed for a reason other than it being absent
    #[error("failed to launch {tool}: {source}")]
    Launch {
        /// Program name as configured
        tool: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// External tool ran but reported failure
    #[error("{step} failed: {tool} exited with status {}", display_code(.code))]
    ToolFailed {
        /// Step that ran the tool
        step: String,
        /// Program name as configured
        tool: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// Reading the tool's output pipe failed
    #[error("I/O error while streaming output of {tool}: {source}")]
    OutputStream {
        /// Program name as configured
        tool: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Build succeeded but the expected .app bundle is absent
    #[error("built application not found: {}", .path.display())]
    MissingAppBundle {
        /// Expected bundle location
        path: PathBuf,
    },

    /// A settings field failed validation
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings {
        /// Dotted field name, e.g. `dmg.icon_size`
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Filesystem operation failed
    #[error("{context} {}: {source}", .path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal error
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Error with free-form message
    #[error("{0}")]
    GenericError(String),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown (terminated by signal)".to_string(),
    }
}

/// Turns missing values into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Adds a context message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Filesystem context for raw IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with what was being done and on which path.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}

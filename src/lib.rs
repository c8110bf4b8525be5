//! macOS DMG packaging library
//!
//! Builds an Xcode project and packages the resulting `.app` together with
//! a readme into a drag-to-install disk image.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};

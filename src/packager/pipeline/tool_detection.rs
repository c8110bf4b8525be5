//! External tool detection.
//!
//! Tools are looked up on `PATH` before anything on disk is touched, so a
//! missing `create-dmg` fails the run up front instead of after the build.

use crate::packager::error::{Error, Result};
use std::path::PathBuf;

/// Resolves a configured program to an executable path.
///
/// Accepts bare names (searched on `PATH`) and relative or absolute paths.
pub fn resolve_tool(program: &str) -> Result<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found: {}", program, e);
            Err(Error::ToolNotFound {
                tool: program.to_string(),
            })
        }
    }
}

/// Resolves every program in `programs`, failing on the first missing one.
pub fn ensure_tools<'a>(programs: impl IntoIterator<Item = &'a str>) -> Result<()> {
    for program in programs {
        resolve_tool(program)?;
    }
    Ok(())
}

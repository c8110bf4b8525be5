//! Command line interface for the DMG packager.
//!
//! Parses arguments, loads settings and either prints the plan or runs it.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, Result};
use crate::packager::{Packager, Settings};

/// Main CLI entry point
///
/// Returns the process exit code. Packaging failures are reported as errors
/// so the caller decides how to print them.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime = RuntimeConfig::from(&args);
    let settings = Settings::load(&args.config)?;
    let packager = Packager::new(settings).keep_build_dir(args.keep_build_dir);

    if args.dry_run {
        print_plan(&packager, &runtime);
        return Ok(0);
    }

    let image = packager.package(&runtime).await?;
    runtime.success(&format!("Packaging complete! DMG file: {}", image.path.display()));
    runtime.output().indent(&format!("Size:   {} bytes", image.size));
    runtime.output().indent(&format!("SHA256: {}", image.checksum));

    Ok(0)
}

fn print_plan(packager: &Packager, runtime: &RuntimeConfig) {
    for phase in packager.plan() {
        runtime.section(phase.title);
        for action in &phase.actions {
            runtime.indent(&action.to_string());
        }
    }
}

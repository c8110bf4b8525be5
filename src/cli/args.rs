//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Packages a macOS application into a DMG
#[derive(Parser, Debug)]
#[command(
    name = "dmg_packager",
    version,
    about = "Builds a macOS app with xcodebuild and packages it into a DMG",
    long_about = "Builds a macOS app with xcodebuild and packages it into a drag-to-install DMG.

Runs five steps in order and stops at the first failure:
  1. remove the previous staging directory and image
  2. xcodebuild the configured scheme
  3. stage the .app and the readme
  4. create-dmg from the staging directory
  5. remove the staging and derived data directories

Usage:
  dmg_packager
  dmg_packager --config packaging/imessagebot.toml
  dmg_packager --dry-run

Exit code 0 = image guaranteed to exist at the configured path."
)]
pub struct Args {
    /// Settings file
    #[arg(
        short = 'c',
        long,
        value_name = "PATH",
        env = "DMG_PACKAGER_CONFIG",
        default_value = "dmg-packager.toml"
    )]
    pub config: PathBuf,

    /// Print the planned steps and exit without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Leave the derived data directory in place after packaging
    #[arg(long)]
    pub keep_build_dir: bool,

    /// Only print errors and the final result
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.config.as_os_str().is_empty() {
            return Err("Settings file path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.quiet)
    }
}

impl RuntimeConfig {
    /// Creates a runtime configuration.
    pub fn new(quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message)
    }
}

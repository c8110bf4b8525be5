//! Packaging pipeline.
//!
//! # Module Organization
//!
//! - [`step`] - Pure descriptions of external commands
//! - [`runner`] - Executes steps, streaming their output
//! - [`orchestrator`] - Main [`Packager`] struct and phase planning
//! - [`checksum`] - SHA-256 of the produced image
//! - [`tool_detection`] - External tool lookup

mod checksum;
mod orchestrator;
mod runner;
mod step;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{Action, PackagedImage, Packager, Phase};
pub use runner::StepRunner;
pub use step::{
    SuccessCriteria, Step, build_step, copy_app_step, copy_readme_step, create_dmg_step,
};
pub use tool_detection::{ensure_tools, resolve_tool};

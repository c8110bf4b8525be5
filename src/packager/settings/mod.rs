//! Configuration structures for packaging runs.
//!
//! Settings come from a TOML file ([`SettingsFile`]) or are assembled in
//! code ([`SettingsBuilder`]); both paths end in a validated [`Settings`].

mod builder;
mod core;
mod dmg;
mod file;
mod output;
mod project;
mod tools;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use dmg::{DmgSettings, MAX_ICON_SIZE, MIN_ICON_SIZE};
pub use file::SettingsFile;
pub use output::OutputSettings;
pub use project::ProjectSettings;
pub use tools::ToolSettings;

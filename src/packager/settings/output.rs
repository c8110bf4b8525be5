//! Output locations.

use std::path::PathBuf;

/// Where the staging directory and the final image live.
///
/// Both paths are relative to the project root when not absolute.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Staging directory assembled for the disk-image tool.
    ///
    /// Deleted before and after every run.
    ///
    /// Default: `../{app_name}_Pack`
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,

    /// Output disk image.
    ///
    /// Default: `{app_name}.dmg`
    #[serde(default)]
    pub image: Option<PathBuf>,
}

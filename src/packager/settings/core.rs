//! Core Settings struct and implementations.

use super::{DmgSettings, ToolSettings};
use std::path::{Path, PathBuf};

/// Validated settings for one packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder) or
/// [`Settings::load`](super::Settings::load). All paths are absolute and
/// normalized; the derived paths (app bundle, staging contents) are computed
/// from them and never change during a run.
///
/// # Examples
///
/// ```no_run
/// use dmg_packager::packager::SettingsBuilder;
///
/// # fn example() -> dmg_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("/Users/mac/ai-house/ImessageBot")
///     .scheme("ImessageBot")
///     .readme("README.txt")
///     .build()?;
///
/// assert!(settings.app_bundle_path().ends_with("Build/Products/Debug/ImessageBot.app"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    pub(super) project_dir: PathBuf,
    pub(super) xcodeproj: PathBuf,
    pub(super) scheme: String,
    pub(super) configuration: String,
    pub(super) app_name: String,
    pub(super) readme: PathBuf,
    pub(super) readme_name: String,
    pub(super) build_dir: PathBuf,
    pub(super) staging_dir: PathBuf,
    pub(super) image: PathBuf,
    pub(super) volume_name: String,
    pub(super) dmg: DmgSettings,
    pub(super) tools: ToolSettings,
}

impl Settings {
    /// Returns the project root.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the `.xcodeproj` path.
    pub fn xcodeproj(&self) -> &Path {
        &self.xcodeproj
    }

    /// Returns the Xcode scheme.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the build configuration.
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Returns the product name, without `.app`.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the file name of the app bundle, e.g. `ImessageBot.app`.
    pub fn app_bundle_name(&self) -> String {
        format!("{}.app", self.app_name)
    }

    /// Returns the readme source path.
    pub fn readme_path(&self) -> &Path {
        &self.readme
    }

    /// Returns the readme file name as it appears inside the image.
    pub fn readme_name(&self) -> &str {
        &self.readme_name
    }

    /// Returns the derived data directory handed to the build tool.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns where the build tool leaves the `.app` bundle.
    ///
    /// Layout: `{build_dir}/Build/Products/{configuration}/{app_name}.app`
    pub fn app_bundle_path(&self) -> PathBuf {
        self.build_dir
            .join("Build")
            .join("Products")
            .join(&self.configuration)
            .join(self.app_bundle_name())
    }

    /// Returns the staging directory.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Returns the output image path.
    pub fn image_path(&self) -> &Path {
        &self.image
    }

    /// Returns the mounted volume name.
    pub fn volume_name(&self) -> &str {
        &self.volume_name
    }

    /// Returns the window layout.
    pub fn dmg(&self) -> &DmgSettings {
        &self.dmg
    }

    /// Returns the external tool names.
    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }
}

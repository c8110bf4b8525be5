//! Settings file loading.

use super::{DmgSettings, OutputSettings, ProjectSettings, Settings, SettingsBuilder, ToolSettings};
use crate::packager::error::{Error, ErrorExt, Result};
use std::path::Path;

/// On-disk layout of the settings file.
///
/// # Example
///
/// ```toml
/// [project]
/// root = "ImessageBot"
/// scheme = "ImessageBot"
/// readme = "README_安装必读.txt"
///
/// [output]
/// staging_dir = "../ImessageBot_Pack"
///
/// [dmg]
/// volume_name = "ImessageBot 安装包"
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Xcode project.
    pub project: ProjectSettings,

    /// Output locations.
    #[serde(default)]
    pub output: OutputSettings,

    /// Window layout.
    #[serde(default)]
    pub dmg: DmgSettings,

    /// External tools.
    #[serde(default)]
    pub tools: ToolSettings,
}

impl SettingsFile {
    /// Parses settings from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::GenericError(format!("invalid settings file: {e}")))
    }

    /// Turns the file contents into validated [`Settings`].
    ///
    /// `base_dir` is the directory the settings file lives in.
    pub fn into_settings(self, base_dir: &Path) -> Result<Settings> {
        let project = self.project;

        let mut builder = SettingsBuilder::new()
            .base_dir(base_dir)
            .project_dir(project.root)
            .scheme(project.scheme)
            .configuration(project.configuration)
            .readme(project.readme)
            .derived_data_dir(project.derived_data_dir)
            .dmg(self.dmg)
            .tools(self.tools);

        if let Some(xcodeproj) = project.xcodeproj {
            builder = builder.xcodeproj(xcodeproj);
        }
        if let Some(app_name) = project.app_name {
            builder = builder.app_name(app_name);
        }
        if let Some(staging_dir) = self.output.staging_dir {
            builder = builder.staging_dir(staging_dir);
        }
        if let Some(image) = self.output.image {
            builder = builder.image(image);
        }

        builder.build()
    }
}

impl Settings {
    /// Reads, parses and validates a settings file.
    ///
    /// Relative `project.root` values resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("Loading settings from {}", path.display());

        let text = std::fs::read_to_string(path).fs_context("reading settings file", path)?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir().fs_context("reading current directory", ".")?,
        };

        SettingsFile::parse(&text)?.into_settings(&base_dir)
    }
}

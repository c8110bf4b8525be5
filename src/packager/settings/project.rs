//! Xcode project configuration.

use std::path::PathBuf;

/// Xcode project and build configuration.
///
/// # Configuration
///
/// ```toml
/// [project]
/// root = "ImessageBot"
/// scheme = "ImessageBot"
/// configuration = "Debug"
/// readme = "README_安装必读.txt"
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSettings {
    /// Project root directory.
    ///
    /// Relative paths resolve against the directory containing the settings file.
    pub root: PathBuf,

    /// Path to the `.xcodeproj`, relative to the project root.
    ///
    /// Default: `{scheme}.xcodeproj`
    #[serde(default)]
    pub xcodeproj: Option<PathBuf>,

    /// Xcode scheme to build.
    pub scheme: String,

    /// Build configuration passed to `-configuration`.
    ///
    /// Default: "Debug"
    #[serde(default = "default_configuration")]
    pub configuration: String,

    /// Product name of the built `.app`, without extension.
    ///
    /// Default: the scheme name
    #[serde(default)]
    pub app_name: Option<String>,

    /// Readme shipped next to the app inside the image, relative to the project root.
    pub readme: PathBuf,

    /// Derived data directory passed to `-derivedDataPath`, relative to the project root.
    ///
    /// Removed at the end of a successful run.
    ///
    /// Default: "build"
    #[serde(default = "default_derived_data_dir")]
    pub derived_data_dir: PathBuf,
}

pub(crate) fn default_configuration() -> String {
    "Debug".to_string()
}

pub(crate) fn default_derived_data_dir() -> PathBuf {
    PathBuf::from("build")
}

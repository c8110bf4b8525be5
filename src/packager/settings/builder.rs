//! Builder for constructing Settings.

use super::dmg::{MAX_ICON_SIZE, MIN_ICON_SIZE};
use super::project::{default_configuration, default_derived_data_dir};
use super::{DmgSettings, Settings, ToolSettings};
use crate::packager::error::{Context, Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Component, Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Relative paths are resolved when [`build`](Self::build) runs: the project
/// directory against the base directory (current directory by default), every
/// other path against the project directory.
///
/// # Examples
///
/// ```no_run
/// use dmg_packager::packager::SettingsBuilder;
///
/// # fn example() -> dmg_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("ImessageBot")
///     .scheme("ImessageBot")
///     .configuration("Release")
///     .readme("README.txt")
///     .staging_dir("../ImessageBot_Pack")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    base_dir: Option<PathBuf>,
    project_dir: Option<PathBuf>,
    xcodeproj: Option<PathBuf>,
    scheme: Option<String>,
    configuration: Option<String>,
    app_name: Option<String>,
    readme: Option<PathBuf>,
    derived_data_dir: Option<PathBuf>,
    staging_dir: Option<PathBuf>,
    image: Option<PathBuf>,
    dmg: DmgSettings,
    tools: ToolSettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory a relative project directory resolves against.
    ///
    /// Default: current directory
    pub fn base_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.base_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project root.
    ///
    /// # Required
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the `.xcodeproj` path.
    ///
    /// Default: `{scheme}.xcodeproj`
    pub fn xcodeproj<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.xcodeproj = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the Xcode scheme.
    ///
    /// # Required
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the build configuration.
    ///
    /// Default: "Debug"
    pub fn configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Sets the product name of the built app.
    ///
    /// Default: the scheme
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Sets the readme file.
    ///
    /// # Required
    pub fn readme<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.readme = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the derived data directory.
    ///
    /// Default: "build"
    pub fn derived_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.derived_data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the staging directory.
    ///
    /// Default: `../{app_name}_Pack`
    pub fn staging_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.staging_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output image path.
    ///
    /// Default: `{app_name}.dmg`
    pub fn image<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.image = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the window layout.
    pub fn dmg(mut self, dmg: DmgSettings) -> Self {
        self.dmg = dmg;
        self
    }

    /// Sets the external tool names.
    pub fn tools(mut self, tools: ToolSettings) -> Self {
        self.tools = tools;
        self
    }

    /// Resolves paths, applies defaults and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or any field fails
    /// validation.
    pub fn build(self) -> Result<Settings> {
        let base_dir = match self.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().fs_context("reading current directory", ".")?,
        };
        let project_dir = resolve(
            &self.project_dir.context("project directory is required")?,
            &base_dir,
        )?;

        let scheme = self.scheme.context("scheme is required")?;
        require_name("project.scheme", &scheme)?;

        let configuration = self.configuration.unwrap_or_else(default_configuration);
        require_name("project.configuration", &configuration)?;

        let app_name = self.app_name.unwrap_or_else(|| scheme.clone());
        require_name("project.app_name", &app_name)?;

        let xcodeproj = resolve(
            &self
                .xcodeproj
                .unwrap_or_else(|| PathBuf::from(format!("{scheme}.xcodeproj"))),
            &project_dir,
        )?;

        let readme = self.readme.context("readme is required")?;
        require_file_name("project.readme", &readme)?;
        let readme = resolve(&readme, &project_dir)?;
        let readme_name = readme
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| invalid("project.readme", "must name a file with a UTF-8 name"))?;

        let build_dir = resolve(
            &self.derived_data_dir.unwrap_or_else(default_derived_data_dir),
            &project_dir,
        )?;
        let staging_dir = resolve(
            &self
                .staging_dir
                .unwrap_or_else(|| PathBuf::from(format!("../{app_name}_Pack"))),
            &project_dir,
        )?;
        let image = resolve(
            &self
                .image
                .unwrap_or_else(|| PathBuf::from(format!("{app_name}.dmg"))),
            &project_dir,
        )?;

        // Both directories are deleted recursively
        if project_dir.starts_with(&staging_dir) {
            return Err(invalid(
                "output.staging_dir",
                "must not be the project directory or one of its parents",
            ));
        }
        if project_dir.starts_with(&build_dir) {
            return Err(invalid(
                "project.derived_data_dir",
                "must not be the project directory or one of its parents",
            ));
        }
        if staging_dir == build_dir {
            return Err(invalid(
                "output.staging_dir",
                "must differ from the derived data directory",
            ));
        }
        if image.starts_with(&staging_dir) || image.starts_with(&build_dir) {
            return Err(invalid(
                "output.image",
                "must not be inside the staging or derived data directory",
            ));
        }
        if image.file_name().is_none() {
            return Err(invalid("output.image", "must name a file"));
        }
        // The image is removed in step 1, the directories in step 5
        if readme == image {
            return Err(invalid("project.readme", "must differ from the image path"));
        }
        if readme.starts_with(&staging_dir) || readme.starts_with(&build_dir) {
            return Err(invalid(
                "project.readme",
                "must not be inside the staging or derived data directory",
            ));
        }

        let volume_name = self.dmg.volume_name.clone().unwrap_or_else(|| app_name.clone());
        if volume_name.trim().is_empty() {
            return Err(invalid("dmg.volume_name", "must not be empty"));
        }
        let (width, height) = self.dmg.window_size;
        if width == 0 || height == 0 {
            return Err(invalid("dmg.window_size", "width and height must be non-zero"));
        }
        if !(MIN_ICON_SIZE..=MAX_ICON_SIZE).contains(&self.dmg.icon_size) {
            return Err(invalid(
                "dmg.icon_size",
                &format!("must be between {MIN_ICON_SIZE} and {MAX_ICON_SIZE}"),
            ));
        }

        for (field, tool) in [
            ("tools.xcodebuild", &self.tools.xcodebuild),
            ("tools.copy", &self.tools.copy),
            ("tools.create_dmg", &self.tools.create_dmg),
        ] {
            if tool.trim().is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }

        Ok(Settings {
            project_dir,
            xcodeproj,
            scheme,
            configuration,
            app_name,
            readme,
            readme_name,
            build_dir,
            staging_dir,
            image,
            volume_name,
            dmg: self.dmg,
            tools: self.tools,
        })
    }
}

fn resolve(path: &Path, base: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize_from(base)
        .fs_context("resolving path", path)?
        .into_owned())
}

/// Names end up as path components, so separators and traversal are rejected.
fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    require_file_name(field, Path::new(value))
}

fn require_file_name(field: &str, path: &Path) -> Result<()> {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == path.as_os_str() => Ok(()),
        _ => Err(invalid(field, "must be a single path component")),
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::InvalidSettings {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
            .base_dir("/work")
            .project_dir("ImessageBot")
            .scheme("ImessageBot")
            .readme("README_安装必读.txt")
    }

    fn field_of(err: Error) -> String {
        match err {
            Error::InvalidSettings { field, .. } => field,
            other => panic!("expected InvalidSettings, got {other:?}"),
        }
    }

    #[test]
    fn defaults_follow_the_xcode_layout() {
        let settings = builder().build().unwrap();

        assert_eq!(settings.project_dir(), Path::new("/work/ImessageBot"));
        assert_eq!(
            settings.xcodeproj(),
            Path::new("/work/ImessageBot/ImessageBot.xcodeproj")
        );
        assert_eq!(settings.build_dir(), Path::new("/work/ImessageBot/build"));
        assert_eq!(
            settings.app_bundle_path(),
            Path::new("/work/ImessageBot/build/Build/Products/Debug/ImessageBot.app")
        );
        assert_eq!(settings.staging_dir(), Path::new("/work/ImessageBot_Pack"));
        assert_eq!(settings.image_path(), Path::new("/work/ImessageBot/ImessageBot.dmg"));
        assert_eq!(settings.readme_name(), "README_安装必读.txt");
        assert_eq!(settings.volume_name(), "ImessageBot");
    }

    #[test]
    fn configuration_changes_product_directory() {
        let settings = builder().configuration("Release").app_name("Bot").build().unwrap();
        assert_eq!(
            settings.app_bundle_path(),
            Path::new("/work/ImessageBot/build/Build/Products/Release/Bot.app")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let settings = builder()
            .staging_dir("/tmp/pack")
            .image("/tmp/out/Bot.dmg")
            .build()
            .unwrap();
        assert_eq!(settings.staging_dir(), Path::new("/tmp/pack"));
        assert_eq!(settings.image_path(), Path::new("/tmp/out/Bot.dmg"));
    }

    #[test]
    fn missing_scheme_is_rejected() {
        let err = SettingsBuilder::new()
            .base_dir("/work")
            .project_dir("p")
            .readme("r.txt")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("scheme is required"));
    }

    #[test]
    fn staging_dir_may_not_contain_project() {
        let err = builder().staging_dir("..").build().unwrap_err();
        assert_eq!(field_of(err), "output.staging_dir");

        let err = builder().staging_dir(".").build().unwrap_err();
        assert_eq!(field_of(err), "output.staging_dir");
    }

    #[test]
    fn derived_data_may_not_be_project_root() {
        let err = builder().derived_data_dir(".").build().unwrap_err();
        assert_eq!(field_of(err), "project.derived_data_dir");
    }

    #[test]
    fn staging_and_build_dirs_must_differ() {
        let err = builder()
            .staging_dir("out")
            .derived_data_dir("out")
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "output.staging_dir");
    }

    #[test]
    fn image_inside_staging_is_rejected() {
        let err = builder()
            .staging_dir("/tmp/pack")
            .image("/tmp/pack/Bot.dmg")
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "output.image");
    }

    #[test]
    fn scheme_with_separator_is_rejected() {
        let err = builder().scheme("../evil").build().unwrap_err();
        assert_eq!(field_of(err), "project.scheme");
    }

    #[test]
    fn readme_with_traversal_is_rejected() {
        for readme in [
            "../../etc/passwd",
            "docs/README.txt",
            "/etc/passwd",
            "./README.txt",
            "README.txt/",
        ] {
            let err = builder().readme(readme).build().unwrap_err();
            assert_eq!(field_of(err), "project.readme", "accepted {readme}");
        }
    }

    #[test]
    fn readme_may_not_be_deleted_by_the_pipeline() {
        let err = builder().image("README_安装必读.txt").build().unwrap_err();
        assert_eq!(field_of(err), "project.readme");

        let err = builder()
            .derived_data_dir("README_安装必读.txt")
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "project.readme");
    }

    #[test]
    fn icon_size_out_of_range_is_rejected() {
        let dmg = DmgSettings {
            icon_size: 1024,
            ..Default::default()
        };
        let err = builder().dmg(dmg).build().unwrap_err();
        assert_eq!(field_of(err), "dmg.icon_size");
    }

    #[test]
    fn zero_window_size_is_rejected() {
        let dmg = DmgSettings {
            window_size: (600, 0),
            ..Default::default()
        };
        let err = builder().dmg(dmg).build().unwrap_err();
        assert_eq!(field_of(err), "dmg.window_size");
    }

    #[test]
    fn empty_tool_is_rejected() {
        let tools = ToolSettings {
            copy: " ".into(),
            ..Default::default()
        };
        let err = builder().tools(tools).build().unwrap_err();
        assert_eq!(field_of(err), "tools.copy");
    }
}

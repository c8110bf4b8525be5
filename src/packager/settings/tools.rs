//! External tool names.

/// Programs invoked by the packager.
///
/// Each value is a program name looked up on `PATH`, or a path to an
/// executable.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    /// Build tool. Default: "xcodebuild"
    pub xcodebuild: String,

    /// Copy utility. Default: "cp"
    pub copy: String,

    /// Disk-image tool. Default: "create-dmg"
    pub create_dmg: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            xcodebuild: "xcodebuild".to_string(),
            copy: "cp".to_string(),
            create_dmg: "create-dmg".to_string(),
        }
    }
}

impl ToolSettings {
    /// All configured tools, in the order the pipeline first uses them.
    pub fn all(&self) -> [&str; 3] {
        [&self.xcodebuild, &self.copy, &self.create_dmg]
    }
}

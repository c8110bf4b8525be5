//! DMG window layout configuration.

/// Finder window layout of the produced disk image.
///
/// Coordinates are in points, relative to the screen for the window position
/// and to the window content area for icons.
///
/// # Configuration
///
/// ```toml
/// [dmg]
/// volume_name = "ImessageBot 安装包"
/// window_position = [200, 120]
/// window_size = [600, 400]
/// icon_size = 100
/// app_icon_position = [150, 150]
/// readme_icon_position = [300, 280]
/// app_drop_link = [450, 150]
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DmgSettings {
    /// Mounted volume name.
    ///
    /// Default: the app name
    pub volume_name: Option<String>,

    /// Window origin `(x, y)`.
    pub window_position: (u32, u32),

    /// Window size `(width, height)`.
    pub window_size: (u32, u32),

    /// Icon size in points, 16 to 512.
    pub icon_size: u32,

    /// Position of the `.app` icon.
    pub app_icon_position: (u32, u32),

    /// Position of the readme icon.
    pub readme_icon_position: (u32, u32),

    /// Position of the `/Applications` drop link.
    pub app_drop_link: (u32, u32),

    /// Hide the `.app` extension in Finder.
    pub hide_app_extension: bool,
}

impl Default for DmgSettings {
    fn default() -> Self {
        Self {
            volume_name: None,
            window_position: (200, 120),
            window_size: (600, 400),
            icon_size: 100,
            app_icon_position: (150, 150),
            readme_icon_position: (300, 280),
            app_drop_link: (450, 150),
            hide_app_extension: true,
        }
    }
}

/// Smallest icon size Finder renders.
pub const MIN_ICON_SIZE: u32 = 16;

/// Largest icon size Finder renders.
pub const MAX_ICON_SIZE: u32 = 512;

//! macOS application packaging.
//!
//! Turns an Xcode project into a drag-to-install disk image:
//!
//! 1. Remove the previous staging directory and image
//! 2. Build with `xcodebuild` into a derived data directory
//! 3. Stage the `.app` and the readme
//! 4. Produce the image with `create-dmg`
//! 5. Remove the staging and derived data directories
//!
//! # Example
//!
//! ```no_run
//! use dmg_packager::cli::RuntimeConfig;
//! use dmg_packager::packager::{Packager, SettingsBuilder};
//!
//! # async fn example() -> dmg_packager::packager::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .project_dir("ImessageBot")
//!     .scheme("ImessageBot")
//!     .readme("README.txt")
//!     .build()?;
//!
//! let image = Packager::new(settings)
//!     .package(&RuntimeConfig::new(false))
//!     .await?;
//! println!("SHA256: {}", image.checksum);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod pipeline;
pub mod settings;
pub mod utils;

pub use error::{Error, Result};
pub use pipeline::{PackagedImage, Packager, calculate_sha256};
pub use settings::{DmgSettings, Settings, SettingsBuilder, SettingsFile, ToolSettings};

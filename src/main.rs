//! DMG Packager - builds a macOS app and packages it into a disk image.
//!
//! Exit code 0 means the image exists at the configured path; any failure
//! exits with 1.

use dmg_packager::cli::{self, OutputManager};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let output = OutputManager::new(false);
            output.error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                output.hint(&suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}

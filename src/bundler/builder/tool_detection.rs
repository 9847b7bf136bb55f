//! External tool detection and availability checking.
//!
//! Runs once at startup so a missing WiX install or wine binary is
//! reported before anything is downloaded or extracted.

use crate::bundler::{
    error::{Error, Result},
    settings::WixToolchain,
};

/// WiX executables the pipeline invokes.
pub const WIX_TOOLS: [&str; 3] = ["heat", "candle", "light"];

/// Checks that heat, candle and light exist under `wix_home` and resolves
/// the wine launcher through `PATH`.
///
/// Returns the toolchain with wine replaced by its resolved path.
pub fn verify_toolchain(toolchain: &WixToolchain) -> Result<WixToolchain> {
    for tool in WIX_TOOLS {
        let path = toolchain.tool_path(tool);
        if !path.is_file() {
            return Err(Error::MissingTool {
                tool: format!("{tool}.exe"),
                location: path,
            });
        }
        log::debug!("Found {} at: {}", tool, path.display());
    }

    let wine = match &toolchain.wine {
        Some(wine) => match which::which(wine) {
            Ok(path) => {
                log::debug!("Found wine at: {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::debug!("wine lookup for {} failed: {}", wine.display(), e);
                return Err(Error::MissingTool {
                    tool: "wine".to_string(),
                    location: wine.clone(),
                });
            }
        },
        None => None,
    };

    log::info!("✓ WiX toolset available in {}", toolchain.wix_home().display());

    Ok(WixToolchain {
        wix_home: toolchain.wix_home.clone(),
        wine,
    })
}

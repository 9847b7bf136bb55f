//! WiX toolset location and installer presentation settings.

use std::path::{Path, PathBuf};

/// Default WiX installation used by the Linux build container.
pub const DEFAULT_WIX_HOME: &str = "/home/xclient/wix";

/// Default wine binary on non-Windows hosts (`wine` for a 32-bit prefix).
pub const DEFAULT_WINE: &str = "/usr/bin/wine64";

/// Location of the WiX v3 binaries and the optional wine launcher.
///
/// # Configuration
///
/// ```toml
/// [toolchain]
/// wix_home = "/home/xclient/wix"
/// wine = "/usr/bin/wine64"
/// ```
///
/// Both can also be set with `--wix-home`/`WIX_HOME` and `--wine`/`WINE_CMD`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WixToolchain {
    /// Directory containing `heat.exe`, `candle.exe` and `light.exe`.
    pub wix_home: PathBuf,

    /// Launcher for the Windows executables.
    ///
    /// None runs the tools directly (Windows hosts).
    pub wine: Option<PathBuf>,
}

impl Default for WixToolchain {
    fn default() -> Self {
        Self {
            wix_home: PathBuf::from(DEFAULT_WIX_HOME),
            wine: if cfg!(windows) {
                None
            } else {
                Some(PathBuf::from(DEFAULT_WINE))
            },
        }
    }
}

impl WixToolchain {
    /// Path to one of the WiX executables, e.g. `candle`.
    pub fn tool_path(&self, tool: &str) -> PathBuf {
        self.wix_home.join(format!("{tool}.exe"))
    }

    pub fn wix_home(&self) -> &Path {
        &self.wix_home
    }
}

/// WiX MSI presentation settings.
///
/// # Configuration
///
/// ```toml
/// [wix]
/// cultures = "en-US"
/// license = "LICENSE.rtf"
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WixSettings {
    /// Cultures passed to light as `-cultures:`.
    ///
    /// Default: "en-US"
    pub cultures: String,

    /// License file (.rtf) shown by the installer UI.
    ///
    /// Relative paths resolve against the work directory, where static
    /// resources are copied.
    ///
    /// Default: None (WixUI placeholder license)
    pub license: Option<PathBuf>,

    /// Banner image (493×58 pixels).
    ///
    /// Default: None
    pub banner_path: Option<PathBuf>,

    /// Dialog image (493×312 pixels).
    ///
    /// Default: None
    pub dialog_image_path: Option<PathBuf>,
}

impl Default for WixSettings {
    fn default() -> Self {
        Self {
            cultures: "en-US".to_string(),
            license: None,
            banner_path: None,
            dialog_image_path: None,
        }
    }
}

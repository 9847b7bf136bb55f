//! Core Settings struct and implementations.

use super::{ReleaseIdentity, WixSettings, WixToolchain};
use std::path::{Path, PathBuf};

/// Release archive URL of the standard edition.
pub const STANDARD_RELEASE_URL: &str =
    "https://dl.grafana.com/oss/release/grafana-{version}.windows-amd64.zip";

/// Release archive URL of the enterprise edition.
pub const ENTERPRISE_RELEASE_URL: &str =
    "https://dl.grafana.com/enterprise/release/grafana-enterprise-{version}.windows-amd64.zip";

/// NSSM service wrapper archive URL.
pub const SERVICE_WRAPPER_URL: &str = "https://nssm.cc/release/nssm-{version}.zip";

pub const DEFAULT_SERVICE_WRAPPER_VERSION: &str = "2.24";

/// Filesystem locations used by a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Paths {
    /// Folder holding standard release archives.
    pub dist: PathBuf,
    /// Folder holding enterprise release archives.
    pub enterprise_dist: PathBuf,
    /// Rendered documents, harvested fragment and compiled objects.
    pub scratch: PathBuf,
    /// Extraction directory; light runs here.
    pub work: PathBuf,
    /// Download cache for the service wrapper.
    pub cache: PathBuf,
    /// Where the finished installer is copied.
    pub publish: PathBuf,
    /// Static files (icon, license, banners) copied into the work directory.
    pub resources: Option<PathBuf>,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            dist: PathBuf::from("dist"),
            enterprise_dist: PathBuf::from("enterprise-dist"),
            scratch: PathBuf::from("scratch"),
            work: std::env::temp_dir().join("grafana-msi"),
            cache: dirs::cache_dir()
                .map(|dir| dir.join("grafana-msi"))
                .unwrap_or_else(|| PathBuf::from("cache")),
            publish: PathBuf::from("scratch"),
            resources: None,
        }
    }
}

/// Remote locations, each with a `{version}` placeholder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Urls {
    pub release: String,
    pub enterprise_release: String,
    pub service_wrapper: String,
}

impl Default for Urls {
    fn default() -> Self {
        Self {
            release: STANDARD_RELEASE_URL.to_string(),
            enterprise_release: ENTERPRISE_RELEASE_URL.to_string(),
            service_wrapper: SERVICE_WRAPPER_URL.to_string(),
        }
    }
}

/// Main settings for an installer build.
///
/// Constructed once at startup via [`SettingsBuilder`](super::SettingsBuilder)
/// and passed by reference through the pipeline.
#[derive(Clone, Debug)]
pub struct Settings {
    paths: Paths,
    urls: Urls,
    toolchain: WixToolchain,
    wix: WixSettings,
    service_wrapper_version: String,
}

impl Settings {
    pub(super) fn new(
        paths: Paths,
        urls: Urls,
        toolchain: WixToolchain,
        wix: WixSettings,
        service_wrapper_version: String,
    ) -> Self {
        Self {
            paths,
            urls,
            toolchain,
            wix,
            service_wrapper_version,
        }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn toolchain(&self) -> &WixToolchain {
        &self.toolchain
    }

    /// Replaces the toolchain, e.g. with the one resolved at startup.
    pub fn with_toolchain(mut self, toolchain: WixToolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn wix(&self) -> &WixSettings {
        &self.wix
    }

    /// NSSM version, e.g. "2.24".
    pub fn service_wrapper_version(&self) -> &str {
        &self.service_wrapper_version
    }

    /// Local path of the release archive for `release`.
    pub fn archive_path(&self, release: &ReleaseIdentity) -> PathBuf {
        release.archive_path(&self.paths.dist, &self.paths.enterprise_dist)
    }

    /// Download URL of the release archive for `release`.
    pub fn release_url(&self, release: &ReleaseIdentity) -> String {
        let template = if release.is_enterprise() {
            &self.urls.enterprise_release
        } else {
            &self.urls.release
        };
        template.replace("{version}", release.version())
    }

    /// Download URL of the configured NSSM version.
    pub fn service_wrapper_url(&self) -> String {
        self.urls
            .service_wrapper
            .replace("{version}", &self.service_wrapper_version)
    }

    /// Cached NSSM archive, e.g. `cache/nssm-2.24.zip`.
    pub fn service_wrapper_archive(&self) -> PathBuf {
        self.paths
            .cache
            .join(format!("nssm-{}.zip", self.service_wrapper_version))
    }

    /// Directory name inside the NSSM archive, e.g. `nssm-2.24`.
    pub fn service_wrapper_dir_name(&self) -> String {
        format!("nssm-{}", self.service_wrapper_version)
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.paths.scratch
    }

    pub fn work_dir(&self) -> &Path {
        &self.paths.work
    }

    pub fn publish_dir(&self) -> &Path {
        &self.paths.publish
    }

    pub fn resources_dir(&self) -> Option<&Path> {
        self.paths.resources.as_deref()
    }
}

//! Release identity: which Grafana build is being packaged.

use crate::bundler::error::{Error, Result};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Product edition.
///
/// Only changes which constants and paths are used; the pipeline steps are
/// the same for both.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Edition {
    /// Open-source distribution.
    #[default]
    Standard,
    /// Enterprise distribution.
    Enterprise,
}

impl Edition {
    /// Archive file stem prefix, e.g. `grafana` or `grafana-enterprise`.
    pub fn archive_prefix(self) -> &'static str {
        match self {
            Edition::Standard => "grafana",
            Edition::Enterprise => "grafana-enterprise",
        }
    }

    /// Short identifier used in generated file names.
    pub fn slug(self) -> &'static str {
        match self {
            Edition::Standard => "oss",
            Edition::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edition::Standard => f.write_str("standard"),
            Edition::Enterprise => f.write_str("enterprise"),
        }
    }
}

/// Version, optional build hash and edition of the release being packaged.
///
/// Built once by the version resolver and passed by reference to every
/// downstream step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseIdentity {
    version: String,
    hash: Option<String>,
    edition: Edition,
}

impl ReleaseIdentity {
    /// Creates an identity from a release version string such as `6.0.0` or
    /// `6.0.0-ca0bc2c5pre3`.
    ///
    /// The hash is the suffix after the first `-`, if any, and may only hold
    /// ASCII letters and digits.
    pub fn new(version: impl Into<String>, edition: Edition) -> Result<Self> {
        let version = version.into();
        let version = version.trim().to_string();
        if version.is_empty() {
            return Err(Error::InvalidVersion {
                version,
                reason: "version is empty".into(),
            });
        }

        // Reject early so a bad --build never reaches the downloader.
        msi_version(&version)?;

        // The suffix becomes part of archive file names.
        let hash = match version.split_once('-') {
            None => None,
            Some((_, suffix))
                if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Some(suffix.to_string())
            }
            Some(_) => {
                return Err(Error::InvalidVersion {
                    version,
                    reason: "suffix after '-' must be ASCII letters and digits".into(),
                });
            }
        };

        Ok(Self {
            version,
            hash,
            edition,
        })
    }

    /// Full release version, including any pre-release suffix.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Build hash embedded in the version, if any.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    pub fn is_enterprise(&self) -> bool {
        self.edition == Edition::Enterprise
    }

    /// Numeric-only version for the MSI `Product/@Version` field.
    pub fn msi_version(&self) -> Result<String> {
        msi_version(&self.version)
    }

    /// Archive file name, e.g. `grafana-6.0.0.windows-amd64.zip`.
    pub fn archive_name(&self) -> String {
        format!(
            "{}-{}.windows-amd64.zip",
            self.edition.archive_prefix(),
            self.version
        )
    }

    /// Local archive path below the edition's distribution folder.
    pub fn archive_path(&self, dist: &Path, enterprise_dist: &Path) -> PathBuf {
        match self.edition {
            Edition::Standard => dist.join(self.archive_name()),
            Edition::Enterprise => enterprise_dist.join(self.archive_name()),
        }
    }
}

/// Reduces a release version to the numeric form Windows Installer accepts.
///
/// Everything from the first `-` is dropped. The remainder must be one to
/// four dot-separated numbers; further components are truncated.
///
/// - `6.0.0-abc123pre3` -> `6.0.0`
/// - `5.4.3` -> `5.4.3`
/// - `1.2.3.4.5` -> `1.2.3.4`
pub fn msi_version(version: &str) -> Result<String> {
    let numeric = version.split('-').next().unwrap_or_default();
    let parts: Vec<&str> = numeric.split('.').collect();

    let invalid = |reason: &str| Error::InvalidVersion {
        version: version.to_string(),
        reason: reason.to_string(),
    };

    if parts.iter().any(|p| p.is_empty()) {
        return Err(invalid("empty version component"));
    }
    for part in &parts {
        // MSI major/minor are limited to 255 and build to 65535; the
        // toolchain reports those limits itself.
        part.parse::<u32>()
            .map_err(|_| invalid("version components must be numeric"))?;
    }

    Ok(parts
        .into_iter()
        .take(4)
        .collect::<Vec<_>>()
        .join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msi_version_strips_prerelease_suffix() {
        assert_eq!(msi_version("6.0.0-abc123pre3").unwrap(), "6.0.0");
        assert_eq!(msi_version("5.4.3").unwrap(), "5.4.3");
    }

    #[test]
    fn msi_version_truncates_to_four_parts() {
        assert_eq!(msi_version("1.2.3.4.5").unwrap(), "1.2.3.4");
    }

    #[test]
    fn msi_version_rejects_non_numeric() {
        assert!(msi_version("v6.0.0").is_err());
        assert!(msi_version("6..0").is_err());
        assert!(msi_version("").is_err());
    }

    #[test]
    fn identity_extracts_hash() {
        let id = ReleaseIdentity::new("6.0.0-ca0bc2c5pre3", Edition::Standard).unwrap();
        assert_eq!(id.version(), "6.0.0-ca0bc2c5pre3");
        assert_eq!(id.hash(), Some("ca0bc2c5pre3"));
        assert_eq!(id.msi_version().unwrap(), "6.0.0");

        let plain = ReleaseIdentity::new("6.0.0", Edition::Standard).unwrap();
        assert_eq!(plain.hash(), None);
    }

    #[test]
    fn archive_paths_follow_edition_naming() {
        let dist = Path::new("dist");
        let enterprise = Path::new("enterprise-dist");

        let std_id = ReleaseIdentity::new("6.0.0", Edition::Standard).unwrap();
        assert_eq!(
            std_id.archive_path(dist, enterprise),
            Path::new("dist/grafana-6.0.0.windows-amd64.zip")
        );

        let ent_id = ReleaseIdentity::new("6.0.0", Edition::Enterprise).unwrap();
        assert_eq!(
            ent_id.archive_path(dist, enterprise),
            Path::new("enterprise-dist/grafana-enterprise-6.0.0.windows-amd64.zip")
        );
    }

    #[test]
    fn identity_rejects_bad_build() {
        assert!(ReleaseIdentity::new("latest", Edition::Standard).is_err());
        assert!(ReleaseIdentity::new("  ", Edition::Standard).is_err());
    }

    #[test]
    fn identity_rejects_path_like_suffix() {
        for build in ["6.0.0-../../../etc/evil", "6.0.0-a/b", "6.0.0-", "6.0.0-beta.1"] {
            let err = ReleaseIdentity::new(build, Edition::Standard).unwrap_err();
            assert!(matches!(err, Error::InvalidVersion { .. }), "{build}: {err}");
        }
    }
}

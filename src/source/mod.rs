//! Release version resolution.
//!
//! A release comes either from an explicit `--build` argument or from
//! archives already present in the distribution folders, named
//! `grafana-<version>.windows-amd64.zip` or
//! `grafana-enterprise-<version>.windows-amd64.zip`.

use crate::bundler::{
    Edition, Error, ReleaseIdentity, Result, Settings,
    error::Context,
};
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

static STANDARD_ARCHIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^grafana-(\d+(?:\.\d+)*(?:-[0-9A-Za-z]+)?)\.windows-amd64\.zip$")
        .expect("archive name pattern is valid")
});

static ENTERPRISE_ARCHIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^grafana-enterprise-(\d+(?:\.\d+)*(?:-[0-9A-Za-z]+)?)\.windows-amd64\.zip$")
        .expect("archive name pattern is valid")
});

/// Where the release to package comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReleaseSource {
    /// Version named on the command line.
    Explicit { build: String, edition: Edition },
    /// Scan the distribution folders. `only` restricts the scan to one edition.
    Detect { only: Option<Edition> },
}

impl ReleaseSource {
    /// Builds the source from the `--build` and `--enterprise` flags.
    pub fn parse(build: Option<&str>, enterprise: bool) -> Self {
        let edition = if enterprise {
            Edition::Enterprise
        } else {
            Edition::Standard
        };

        match build {
            Some(build) => Self::Explicit {
                build: build.to_string(),
                edition,
            },
            None => Self::Detect {
                only: enterprise.then_some(Edition::Enterprise),
            },
        }
    }

    /// Resolves the release identity.
    ///
    /// # Errors
    ///
    /// [`Error::VersionNotFound`] when detecting and no archive matches;
    /// [`Error::InvalidVersion`] when the build is not a usable version.
    pub fn resolve(&self, settings: &Settings) -> Result<ReleaseIdentity> {
        match self {
            Self::Explicit { build, edition } => ReleaseIdentity::new(build.as_str(), *edition),
            Self::Detect { only } => detect_release(
                &settings.paths().dist,
                &settings.paths().enterprise_dist,
                *only,
            ),
        }
    }
}

/// Scans the distribution folders for release archives.
///
/// The highest numeric version wins; on equal versions the standard
/// edition is preferred.
pub fn detect_release(
    dist: &Path,
    enterprise_dist: &Path,
    only: Option<Edition>,
) -> Result<ReleaseIdentity> {
    let mut searched = Vec::new();
    let mut candidates = Vec::new();

    for (edition, dir, pattern) in [
        (Edition::Standard, dist, &*STANDARD_ARCHIVE),
        (Edition::Enterprise, enterprise_dist, &*ENTERPRISE_ARCHIVE),
    ] {
        if only.is_some_and(|wanted| wanted != edition) {
            continue;
        }
        searched.push(dir.to_path_buf());

        for path in archives_in(dir, edition)? {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(version) = pattern.captures(name).and_then(|c| c.get(1)) else {
                log::debug!("Ignoring {}: name does not match", path.display());
                continue;
            };
            match ReleaseIdentity::new(version.as_str(), edition) {
                Ok(identity) => candidates.push(identity),
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            }
        }
    }

    candidates
        .into_iter()
        .max_by(|a, b| {
            numeric_key(a)
                .cmp(&numeric_key(b))
                // A final release outranks its pre-releases.
                .then_with(|| b.hash().is_some().cmp(&a.hash().is_some()))
                // Standard sorts after enterprise so it wins ties.
                .then_with(|| b.is_enterprise().cmp(&a.is_enterprise()))
                .then_with(|| a.version().cmp(b.version()))
        })
        .ok_or(Error::VersionNotFound { searched })
}

fn archives_in(dir: &Path, edition: Edition) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(format!("{}-*.windows-amd64.zip", edition.archive_prefix()));
    let pattern = pattern
        .to_str()
        .context("distribution folder path contains invalid UTF-8")?;

    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        paths.push(entry?);
    }
    paths.sort();
    Ok(paths)
}

fn numeric_key(identity: &ReleaseIdentity) -> Vec<u64> {
    identity
        .version()
        .split('-')
        .next()
        .unwrap_or_default()
        .split('.')
        .filter_map(|part| part.parse().ok())
        .collect()
}

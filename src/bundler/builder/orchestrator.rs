//! Main bundler orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the MSI
//! pipeline for one release and reports the published installer.

use super::checksum::calculate_sha256;
use crate::bundler::{
    Result, Settings,
    error::ErrorExt,
    platform::windows::msi::{self, ToolRunner},
    settings::ReleaseIdentity,
};
use std::path::PathBuf;

/// The installer as placed in the publish directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublishedArtifact {
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256.
    pub checksum: String,
}

/// Main bundler orchestrator.
///
/// Owns the resolved settings and the runner every external tool call goes
/// through.
///
/// # Examples
///
/// ```no_run
/// use grafana_msi::bundler::{Bundler, Edition, ProcessRunner, ReleaseIdentity, Settings};
///
/// # async fn example(settings: Settings) -> grafana_msi::bundler::Result<()> {
/// let bundler = Bundler::new(settings, ProcessRunner);
/// let release = ReleaseIdentity::new("6.0.0", Edition::Enterprise)?;
/// let artifact = bundler.bundle(&release).await?;
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R> {
    settings: Settings,
    runner: R,
}

impl<R: ToolRunner> Bundler<R> {
    pub fn new(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Builds and publishes the installer for `release`.
    pub async fn bundle(&self, release: &ReleaseIdentity) -> Result<PublishedArtifact> {
        let path = msi::bundle_project(&self.runner, &self.settings, release).await?;

        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;

        log::info!("SHA256 {}  {}", checksum, path.display());

        Ok(PublishedArtifact {
            path,
            size,
            checksum,
        })
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

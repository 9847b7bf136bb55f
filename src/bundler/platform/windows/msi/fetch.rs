//! Release and service-wrapper archive acquisition.

use crate::bundler::{
    error::{Context, Result},
    settings::{ReleaseIdentity, Settings},
    utils::http,
};
use std::path::PathBuf;

/// Archives the rest of the pipeline works from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchedArchives {
    pub release: PathBuf,
    pub service_wrapper: PathBuf,
}

/// Ensures the release archive and the NSSM archive exist locally.
///
/// Existing files are used as-is. Missing ones are downloaded once; a
/// failed download aborts the run.
pub async fn fetch_archives(release: &ReleaseIdentity, settings: &Settings) -> Result<FetchedArchives> {
    let archive = settings.archive_path(release);
    log::info!("ZipFile: {}", archive.display());

    if archive.is_file() {
        log::debug!("Release archive already present");
    } else {
        http::download_to_file(&settings.release_url(release), &archive)
            .await
            .with_context(|| format!("fetching {} release {}", release.edition(), release.version()))?;
        log::info!("✓ Downloaded {}", archive.display());
    }

    let service_wrapper = settings.service_wrapper_archive();
    if service_wrapper.is_file() {
        log::debug!("NSSM {} already cached", settings.service_wrapper_version());
    } else {
        http::download_to_file(&settings.service_wrapper_url(), &service_wrapper)
            .await
            .context("fetching NSSM service wrapper")?;
        log::info!("✓ Downloaded {}", service_wrapper.display());
    }

    Ok(FetchedArchives {
        release: archive,
        service_wrapper,
    })
}

//! Windows MSI installer creation with the WiX v3 toolset.
//!
//! # Module Organization
//!
//! - `fetch` - release and NSSM archive acquisition
//! - `harvest` - heat over the extracted release tree
//! - `template` - WiX source template constants
//! - `wxs` - firewall, service and product document rendering
//! - `build` - candle and light execution
//! - `toolset` - external tool invocation

mod build;
mod fetch;
mod harvest;
mod template;
pub mod toolset;
mod wxs;

pub use fetch::{FetchedArchives, fetch_archives};
pub use harvest::fragment_name;
pub use toolset::{ProcessRunner, ToolCommand, ToolOutput, ToolRunner};
pub use wxs::RenderedDocuments;

use crate::bundler::{
    error::{Context, Result},
    settings::{ProductConfig, ReleaseIdentity, Settings},
    utils::{archive, fs},
};
use std::path::PathBuf;

/// Builds the installer for `release` and copies it to the publish
/// directory.
///
/// # Process
///
/// 1. Fetch the release and NSSM archives when missing
/// 2. Recreate the work directory and extract the release into it
/// 3. Harvest the extracted tree with heat
/// 4. Extract NSSM into `<work>/nssm`
/// 5. Render the firewall, service and product documents
/// 6. Copy static resources into the work directory
/// 7. Compile service, firewall, fragment and product with candle
/// 8. Relocate NSSM and link with light
/// 9. Copy the installer to the publish directory
///
/// Any failing step aborts the build.
///
/// # Returns
///
/// Path of the published installer.
pub async fn bundle_project<R: ToolRunner>(
    runner: &R,
    settings: &Settings,
    release: &ReleaseIdentity,
) -> Result<PathBuf> {
    let config = ProductConfig::for_release(release);
    log::info!(
        "Building {} {} installer",
        config.product_name(),
        config.version()
    );

    let archives = fetch_archives(release, settings).await?;

    let work = settings.work_dir();
    // heat harvests everything here, so leftovers from an earlier run must go.
    fs::create_dir_all(work, true).await?;
    fs::create_dir_all(settings.scratch_dir(), false).await?;

    archive::extract_zip(&archives.release, work).await?;
    let harvested = harvest::harvest(runner, settings, release.edition()).await?;
    archive::extract_zip(&archives.service_wrapper, &work.join("nssm")).await?;

    let documents = wxs::write_documents(settings, release, &config, &harvested).await?;
    log::info!("GENERATE COMPLETE");

    if let Some(resources) = settings.resources_dir() {
        fs::copy_dir(resources, work)
            .await
            .context("copying static resources")?;
        log::info!("COPY STATIC COMPLETE");
    }

    let objects = build::compile(
        runner,
        settings,
        &[
            documents.service.as_path(),
            documents.firewall.as_path(),
            harvested.fragment.as_path(),
            documents.product.as_path(),
        ],
    )
    .await?;

    build::relocate_service_wrapper(settings).await?;
    let installer = build::link(runner, settings, &objects, config.installer_name()).await?;

    let published = settings.publish_dir().join(config.installer_name());
    fs::copy_file(&installer, &published)
        .await
        .context("publishing installer")?;
    log::info!("✓ Published {}", published.display());

    Ok(published)
}

//! HTTP utilities for downloading release and tool archives.
//!
//! Provides a single-attempt download that streams to disk.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Downloads `url` to `dest`, creating parent directories.
///
/// The body is streamed to `<dest>.part` and renamed on completion. An
/// interrupted transfer removes the partial file and never leaves one at
/// `dest`. Non-success HTTP
/// statuses are reported as [`Error::Download`]; there is no retry.
///
/// Used by:
/// - Release archive fetch
/// - NSSM service wrapper fetch
pub async fn download_to_file(url: &str, dest: &Path) -> Result<()> {
    log::info!("Downloading {}", url);

    let parsed = url::Url::parse(url)?;

    let download_error = |reason: String| Error::Download {
        url: url.to_string(),
        reason,
    };

    let mut response = reqwest::get(parsed)
        .await
        .map_err(|e| download_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(download_error(format!("server responded with {status}")));
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating download directory", parent)?;
    }

    let mut partial = dest.as_os_str().to_owned();
    partial.push(".part");
    let partial = std::path::PathBuf::from(partial);

    let written = match write_body(&mut response, &partial, &download_error).await {
        Ok(written) => written,
        Err(e) => {
            match tokio::fs::remove_file(&partial).await {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == std::io::ErrorKind::NotFound => {}
                Err(cleanup) => {
                    log::warn!("Could not remove {}: {}", partial.display(), cleanup)
                }
            }
            return Err(e);
        }
    };

    tokio::fs::rename(&partial, dest)
        .await
        .fs_context("moving download into place", dest)?;

    log::debug!("Downloaded {} bytes to {}", written, dest.display());
    Ok(())
}

async fn write_body(
    response: &mut reqwest::Response,
    partial: &Path,
    download_error: impl Fn(String) -> Error,
) -> Result<u64> {
    let mut file = tokio::fs::File::create(partial)
        .await
        .fs_context("creating download file", partial)?;

    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| download_error(format!("failed to read response: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .fs_context("writing download file", partial)?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .fs_context("flushing download file", partial)?;

    Ok(written)
}

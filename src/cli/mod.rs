//! Command line interface for the installer builder.

mod args;

pub use args::Args;

use crate::{
    bundler::{Bundler, ProcessRunner, verify_toolchain},
    error::{CliError, Result},
    source::ReleaseSource,
};

/// Main CLI entry point
///
/// Resolves the release, checks the toolchain and runs the build. Returns
/// the process exit code.
pub async fn run(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let settings = args.settings()?;

    let release = ReleaseSource::parse(args.build.as_deref(), args.enterprise).resolve(&settings)?;
    log::info!("Version: {}", release.version());
    if let Some(hash) = release.hash() {
        log::info!("Hash: {}", hash);
    }
    log::info!("Enterprise: {}", release.is_enterprise());

    if args.premium {
        log::warn!(
            "--premium has no effect; building the {} edition",
            release.edition()
        );
    }

    let toolchain = verify_toolchain(settings.toolchain())?;
    let bundler = Bundler::new(settings.with_toolchain(toolchain), ProcessRunner);

    let artifact = bundler.bundle(&release).await?;
    log::info!(
        "✓ Created installer: {} ({} bytes)",
        artifact.path.display(),
        artifact.size
    );

    Ok(0)
}

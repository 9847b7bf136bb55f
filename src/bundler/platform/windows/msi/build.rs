//! candle and light execution.

use super::toolset::{COMMON_EXTENSIONS, ToolCommand, ToolRunner, UI_EXTENSION};
use crate::bundler::{
    error::{Context, Error, Result},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Compiles each document with candle from the scratch directory.
///
/// Documents are compiled in the given order and each `.wixobj` is copied
/// into the work directory. Returns the object file names, in order, as
/// light expects them relative to the work directory.
pub async fn compile<R: ToolRunner>(
    runner: &R,
    settings: &Settings,
    documents: &[&Path],
) -> Result<Vec<PathBuf>> {
    let scratch = settings.scratch_dir();
    let work = settings.work_dir();
    let mut objects = Vec::with_capacity(documents.len());

    for document in documents {
        let file_name = document
            .file_name()
            .with_context(|| format!("{} has no file name", document.display()))?;

        let command = ToolCommand::wix(
            settings.toolchain(),
            "candle",
            file_name.to_string_lossy(),
            scratch,
        )
        .extensions(COMMON_EXTENSIONS)
        .args(["-v", "-arch", "x64"])
        .arg(file_name);
        runner.run(&command).await?;

        let object = PathBuf::from(file_name).with_extension("wixobj");
        let compiled = scratch.join(&object);
        if !compiled.is_file() {
            return Err(Error::Toolchain {
                tool: command.tool.to_string(),
                target: command.target,
                status: "exit status: 0".to_string(),
                output: format!("{} was not produced", compiled.display()),
            });
        }
        fs::copy_file(&compiled, &work.join(&object)).await?;
        log::info!("✓ Compiled {}", object.display());

        objects.push(object);
    }

    Ok(objects)
}

/// Copies `nssm/nssm-<version>` to the work directory root so the service
/// document's relative `Source` path resolves when linking.
pub async fn relocate_service_wrapper(settings: &Settings) -> Result<PathBuf> {
    let name = settings.service_wrapper_dir_name();
    let work = settings.work_dir();
    let dest = work.join(&name);

    fs::copy_dir(&work.join("nssm").join(&name), &dest)
        .await
        .with_context(|| format!("relocating {name}"))?;

    Ok(dest)
}

/// Links the compiled objects into `installer_name` inside the work
/// directory.
pub async fn link<R: ToolRunner>(
    runner: &R,
    settings: &Settings,
    objects: &[PathBuf],
    installer_name: &str,
) -> Result<PathBuf> {
    let work = settings.work_dir();

    let command = ToolCommand::wix(settings.toolchain(), "light", installer_name, work)
        .arg(format!("-cultures:{}", settings.wix().cultures))
        .extensions([UI_EXTENSION])
        .extensions(COMMON_EXTENSIONS)
        .args(["-v", "-sval", "-spdb"])
        .args(objects)
        .arg("-out")
        .arg(installer_name);
    runner.run(&command).await?;

    let installer = work.join(installer_name);
    if !installer.is_file() {
        return Err(Error::Toolchain {
            tool: command.tool.to_string(),
            target: command.target,
            status: "exit status: 0".to_string(),
            output: format!("{} was not produced", installer.display()),
        });
    }

    log::info!("✓ Linked {}", installer.display());
    Ok(installer)
}

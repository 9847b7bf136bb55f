//! File system utilities for the installer build.
//!
//! Provides copy operations with automatic directory creation and
//! overwrite semantics, so every step can be re-run over a populated
//! scratch or work directory.

use crate::{
    bail,
    bundler::error::{Error, ErrorExt, Result},
};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        match fs::remove_dir_all(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).fs_context("removing directory", path),
        }
    }

    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Overwrites the destination. Fails if the source path is a directory or
/// doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        bail!("{from:?} does not exist");
    }
    if !from.is_file() {
        bail!("{from:?} is not a file");
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Merges into an existing destination, overwriting files of the same name.
/// Symlinks are followed and copied as regular files, since the WiX tools
/// read the tree through wine.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        bail!("{from:?} does not exist");
    }
    if !from.is_dir() {
        bail!("{from:?} is not a Directory");
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        std::fs::create_dir_all(&to).fs_context("creating directory", &to)?;

        for entry in walkdir::WalkDir::new(&from).follow_links(true) {
            let entry = entry?;
            debug_assert!(entry.path().starts_with(&from));
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_file_creates_parents_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("grafana.msi");
        std::fs::write(&src, "new").unwrap();

        let dest = tmp.path().join("publish/grafana.msi");
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, "old").unwrap();

        copy_file(&src, &dest).await.unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "new");
    }

    #[tokio::test]
    async fn copy_file_rejects_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let err = copy_file(&tmp.path().join("nope"), &tmp.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GenericError(_)));
        assert!(err.to_string().contains("does not exist"));
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn copy_dir_rejects_file_source() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("LICENSE.rtf");
        std::fs::write(&file, "license").unwrap();
        let err = copy_dir(&file, &tmp.path().join("out")).await.unwrap_err();
        assert!(err.to_string().contains("LICENSE.rtf"));
        assert!(err.to_string().contains("is not a Directory"));
    }

    #[tokio::test]
    async fn copy_dir_merges_into_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("nssm/nssm-2.24");
        std::fs::create_dir_all(src.join("win64")).unwrap();
        std::fs::write(src.join("win64/nssm.exe"), "nssm").unwrap();

        let dest = tmp.path().join("work/nssm-2.24");
        std::fs::create_dir_all(dest.join("win64")).unwrap();
        std::fs::write(dest.join("win64/nssm.exe"), "stale").unwrap();
        std::fs::write(dest.join("keep.txt"), "keep").unwrap();

        copy_dir(&src, &dest).await.unwrap();
        assert_eq!(std::fs::read_to_string(dest.join("win64/nssm.exe")).unwrap(), "nssm");
        assert!(dest.join("keep.txt").exists());
    }

    #[tokio::test]
    async fn create_dir_all_can_erase() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("scratch");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("old.wixobj"), "x").unwrap();

        create_dir_all(&dir, true).await.unwrap();
        assert!(dir.exists());
        assert!(!dir.join("old.wixobj").exists());
    }
}

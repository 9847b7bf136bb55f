//! ZIP extraction.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;

/// Extracts every entry of the ZIP archive at `archive` into `dest`.
///
/// Creates `dest` if needed. Existing files are overwritten, so re-running
/// against a populated directory yields the same tree as a fresh
/// extraction. Archives with an entry whose name would escape `dest`
/// (absolute, or climbing out through `..`) are rejected before anything
/// is written.
///
/// Used by:
/// - Release archive extraction into the work directory
/// - NSSM archive extraction into `<work>/nssm`
pub async fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    log::info!("Extracting {} to {}", archive.display(), dest.display());

    tokio::fs::create_dir_all(dest)
        .await
        .fs_context("creating extraction directory", dest)?;

    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();

    // zip is synchronous; keep it off the async workers
    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = std::fs::File::open(&archive).fs_context("opening archive", &archive)?;

        let extraction_error = |reason: String| Error::Extraction {
            archive: archive.clone(),
            reason,
        };

        let mut zip =
            zip::ZipArchive::new(file).map_err(|e| extraction_error(e.to_string()))?;
        log::debug!("{} entries in {}", zip.len(), archive.display());

        for index in 0..zip.len() {
            let entry = zip
                .by_index_raw(index)
                .map_err(|e| extraction_error(e.to_string()))?;
            if entry.enclosed_name().is_none() {
                return Err(extraction_error(format!(
                    "entry {:?} escapes the destination",
                    entry.name()
                )));
            }
        }

        zip.extract(&dest)
            .map_err(|e| extraction_error(e.to_string()))?;

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Extraction task panicked: {}", e)))?
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::{io::Write, path::Path};
    use zip::write::SimpleFileOptions;

    /// Writes a ZIP archive with the given `(name, contents)` entries.
    pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::write_zip;
    use super::*;

    fn snapshot(dir: &Path) -> Vec<(String, String)> {
        let mut files: Vec<_> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                (
                    e.path().strip_prefix(dir).unwrap().display().to_string(),
                    std::fs::read_to_string(e.path()).unwrap(),
                )
            })
            .collect();
        files.sort();
        files
    }

    #[tokio::test]
    async fn extracts_nested_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("grafana.zip");
        write_zip(
            &archive,
            &[
                ("grafana-6.0.0/bin/grafana-server.exe", "server"),
                ("grafana-6.0.0/conf/defaults.ini", "[server]"),
            ],
        );

        let dest = tmp.path().join("out");
        extract_zip(&archive, &dest).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("grafana-6.0.0/bin/grafana-server.exe")).unwrap(),
            "server"
        );
    }

    #[tokio::test]
    async fn re_extraction_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("grafana.zip");
        write_zip(&archive, &[("a/one.txt", "1"), ("a/two.txt", "2")]);

        let fresh = tmp.path().join("fresh");
        extract_zip(&archive, &fresh).await.unwrap();

        let rerun = tmp.path().join("rerun");
        extract_zip(&archive, &rerun).await.unwrap();
        std::fs::write(rerun.join("a/one.txt"), "stale").unwrap();
        extract_zip(&archive, &rerun).await.unwrap();

        assert_eq!(snapshot(&fresh), snapshot(&rerun));
    }

    #[tokio::test]
    async fn escaping_entry_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("evil.zip");
        write_zip(&archive, &[("ok.txt", "fine"), ("../evil.txt", "gotcha")]);

        let dest = tmp.path().join("out");
        let err = extract_zip(&archive, &dest).await.unwrap_err();

        assert!(matches!(err, Error::Extraction { .. }), "got {err}");
        assert!(!tmp.path().join("evil.txt").exists());
        assert!(!dest.join("ok.txt").exists());
    }

    #[tokio::test]
    async fn malformed_archive_is_extraction_error() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("broken.zip");
        std::fs::write(&archive, b"definitely not a zip").unwrap();

        let err = extract_zip(&archive, &tmp.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }), "got {err}");
    }
}

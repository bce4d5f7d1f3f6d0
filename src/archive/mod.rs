use fs_err as fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::augment::{layout_content, required_paths};
use crate::errors::{Result, SiteGenError};
use crate::wire::{ApplicationCategory, FileSet};

/// Public URL prefix archives are served under.
pub const DOWNLOADS_ROUTE: &str = "/downloads";

#[derive(Debug, Clone)]
pub struct BuiltArchive {
    pub path: PathBuf,
    pub file_name: String,
    /// Caller-facing location, e.g. `/downloads/project-1700000000000.zip`.
    pub download_path: String,
    pub bytes: u64,
}

pub fn archive_name(stamp_ms: i64) -> String {
    format!("project-{stamp_ms}.zip")
}

pub struct ArchiveBuilder {
    dir: PathBuf,
}

impl ArchiveBuilder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the category's layout from `files` into `project-<stamp_ms>.zip`.
    /// Missing layout members get their defaults. Older archives are never
    /// touched; an existing archive with the same name is an error.
    pub fn build(
        &self,
        files: &FileSet,
        category: ApplicationCategory,
        stamp_ms: i64,
    ) -> Result<BuiltArchive> {
        fs::create_dir_all(&self.dir)?;

        let file_name = archive_name(stamp_ms);
        let target = self.dir.join(&file_name);
        if target.exists() {
            return Err(SiteGenError::Persistence(format!(
                "archive {} already exists",
                target.display()
            )));
        }

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut zip = ZipWriter::new(tmp.as_file_mut());
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644);
            for &path in required_paths(category) {
                let content = layout_content(files, path);
                zip.start_file(path, options)?;
                zip.write_all(content.as_bytes())?;
            }
            zip.finish()?;
        }
        let bytes = tmp.as_file().metadata()?.len();
        tmp.persist_noclobber(&target)?;

        log::debug!("archive written: {} ({} bytes)", target.display(), bytes);

        Ok(BuiltArchive {
            path: target,
            download_path: format!("{DOWNLOADS_ROUTE}/{file_name}"),
            file_name,
            bytes,
        })
    }
}

//! Copying package attachments next to the generated documents.

use crate::error::NoteError;
use crate::mindmap::RESOURCES_DIR;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy `{package_dir}/resources` recursively into `dest`.
///
/// Directories are created as needed and existing files are overwritten.
/// A package without resources is not an error: a warning is logged and
/// nothing is copied. Returns the copied files, in walk order.
pub fn copy_resources(
    package_dir: impl AsRef<Path>,
    dest: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, NoteError> {
    let source = package_dir.as_ref().join(RESOURCES_DIR);
    let dest = dest.as_ref();

    if !source.is_dir() {
        log::warn!("No resources directory at {}", source.display());
        return Ok(Vec::new());
    }

    fs::create_dir_all(dest).map_err(|e| NoteError::io(dest, e))?;

    let mut copied = Vec::new();
    for entry in WalkDir::new(&source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&source).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            NoteError::io(path, source)
        })?;

        let relative = entry
            .path()
            .strip_prefix(&source)
            .unwrap_or_else(|_| entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| NoteError::io(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| NoteError::io(&target, e))?;
            copied.push(target);
        }
    }

    log::info!("Copied {} resource file(s) to {}", copied.len(), dest.display());
    Ok(copied)
}

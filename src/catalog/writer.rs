//! Crash-safe catalog persistence.
//!
//! A catalog is never rewritten in place. The writer encodes the whole catalog
//! into a sibling temporary file, closes it, deletes the original, and renames
//! the temporary file onto the original path. Until the rename succeeds the
//! original bytes stay authoritative.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::catalog::codec;
use crate::core::entry::Catalog;
use crate::error::{CatalogError, WriteStep};

/// Writes catalogs with the temp-file / delete / rename protocol
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogWriter {
    fault: Option<WriteStep>,
}

impl CatalogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that fails with an I/O error when it reaches `step`.
    ///
    /// Used to exercise the rollback paths of callers; the failure happens
    /// just before the real operation for that step would run.
    #[must_use]
    pub fn failing_at(step: WriteStep) -> Self {
        Self { fault: Some(step) }
    }

    /// Temporary path used while writing `target`: `<stem>-<ext>.tmp` next to it
    #[must_use]
    pub fn temp_path(target: &Path) -> PathBuf {
        let stem = target
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match target.extension() {
            Some(ext) => format!("{stem}-{}.tmp", ext.to_string_lossy()),
            None => format!("{stem}.tmp"),
        };
        target.with_file_name(name)
    }

    /// Persist `catalog` to `path`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidInput` if an entry holds a line break or
    /// other control character, `CatalogError::Permission` if an existing target
    /// cannot be made writable, and `CatalogError::Write` naming the failed step
    /// otherwise. In every error case the target file holds its previous bytes.
    pub fn write(&self, path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
        if let Some(entry) = codec::find_unencodable(catalog) {
            return Err(CatalogError::InvalidInput(format!(
                "entry {} for {} contains control characters and cannot be written to {}",
                entry.component,
                entry.element,
                path.display()
            )));
        }
        ensure_writable(path)?;

        let temp = Self::temp_path(path);
        if temp.exists() {
            debug!("Removing stale temporary file {}", temp.display());
            self.inject(WriteStep::RemoveStaleTemp)
                .and_then(|()| fs::remove_file(&temp))
                .map_err(|source| write_error(WriteStep::RemoveStaleTemp, &temp, source))?;
        }

        self.write_temp(&temp, catalog)?;
        self.replace(path, &temp)?;

        info!("Wrote {} entries to {}", catalog.len(), path.display());
        Ok(())
    }

    fn write_temp(&self, temp: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
        let file = self
            .inject(WriteStep::CreateTemp)
            .and_then(|()| File::create(temp))
            .map_err(|source| write_error(WriteStep::CreateTemp, temp, source))?;

        let result = self.inject(WriteStep::WriteTemp).and_then(|()| {
            let mut writer = BufWriter::new(file);
            writer.write_all(codec::encode(catalog).as_bytes())?;
            let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
            file.sync_all()
        });

        if let Err(source) = result {
            // An incomplete temp file is useless; the next run would delete it anyway
            let _ = fs::remove_file(temp);
            return Err(write_error(WriteStep::WriteTemp, temp, source));
        }

        debug!("Wrote temporary catalog {}", temp.display());
        Ok(())
    }

    fn replace(&self, path: &Path, temp: &Path) -> Result<(), CatalogError> {
        let original = if path.exists() {
            let bytes = fs::read(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            self.inject(WriteStep::RemoveOriginal)
                .and_then(|()| fs::remove_file(path))
                .map_err(|source| write_error(WriteStep::RemoveOriginal, path, source))?;
            Some(bytes)
        } else {
            None
        };

        let renamed = self
            .inject(WriteStep::Rename)
            .and_then(|()| fs::rename(temp, path));

        if let Err(source) = renamed {
            if let Some(bytes) = original {
                if let Err(e) = fs::write(path, bytes) {
                    error!(
                        "Could not restore {} after failed rename: {}",
                        path.display(),
                        e
                    );
                }
            }
            return Err(write_error(WriteStep::Rename, path, source));
        }

        Ok(())
    }

    fn inject(&self, step: WriteStep) -> io::Result<()> {
        if self.fault == Some(step) {
            return Err(io::Error::other(format!("injected fault while {step}")));
        }
        Ok(())
    }
}

fn write_error(step: WriteStep, path: &Path, source: io::Error) -> CatalogError {
    error!("Catalog write failed while {}: {}", step, path.display());
    CatalogError::Write {
        step,
        path: path.to_path_buf(),
        source,
    }
}

/// Make an existing read-only target writable before anything else is touched
fn ensure_writable(path: &Path) -> Result<(), CatalogError> {
    let Ok(metadata) = fs::metadata(path) else {
        return Ok(());
    };
    let mut permissions = metadata.permissions();
    if !permissions.readonly() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }
    #[cfg(not(unix))]
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);

    debug!("Making {} writable", path.display());
    fs::set_permissions(path, permissions).map_err(|source| CatalogError::Permission {
        path: path.to_path_buf(),
        source,
    })
}

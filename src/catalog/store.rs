use std::path::Path;
use tracing::debug;

use crate::catalog::codec;
use crate::core::entry::Catalog;
use crate::error::CatalogError;

/// A catalog read from disk, together with whether the file was there
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub existed: bool,
}

/// Load the catalog at `path`, seeded with the bootstrap entries.
///
/// A missing file is not an error: the result is the bootstrap catalog.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file exists but cannot be read, or
/// `CatalogError::Format` for the first malformed line. Nothing is merged in
/// that case.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    Ok(load_with_status(path)?.catalog)
}

/// Like [`load`], but also reports whether the file existed
///
/// # Errors
///
/// See [`load`].
pub fn load_with_status(path: &Path) -> Result<LoadedCatalog, CatalogError> {
    if !path.exists() {
        debug!("Catalog {} does not exist, using bootstrap entries", path.display());
        return Ok(LoadedCatalog {
            catalog: Catalog::bootstrap(),
            existed: false,
        });
    }

    let mut catalog = read_entries(path)?;
    catalog.seed_bootstrap();
    debug!("Loaded {} entries from {}", catalog.len(), path.display());

    Ok(LoadedCatalog {
        catalog,
        existed: true,
    })
}

/// Read exactly the entries stored in a catalog file, without bootstrap seeding
///
/// # Errors
///
/// Returns `CatalogError::Io` or `CatalogError::Format`.
pub fn read_entries(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    codec::decode(&content).map_err(|e| CatalogError::Format {
        path: path.to_path_buf(),
        line: e.line,
        content: e.content,
        reason: e.reason,
    })
}

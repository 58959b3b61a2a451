//! Mapping from a reaction-source path to its catalog path.
//!
//! | Reaction source   | Catalog                                   |
//! |-------------------|-------------------------------------------|
//! | `thermo.bin`      | `thermo.elb`                              |
//! | `thermo.dat`      | `thermo.elt`, or `thermo.ele` if only that exists |
//! | `thermo.elt`      | error: already a catalog                  |

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::prompt::Prompter;

/// Primary catalog extension for text reaction sources
pub const CATALOG_EXTENSION: &str = "elt";

/// Extension used by older catalogs of text reaction sources
pub const LEGACY_CATALOG_EXTENSION: &str = "ele";

/// Catalog extension for binary reaction sources
pub const BINARY_CATALOG_EXTENSION: &str = "elb";

/// Extension of binary reaction sources
pub const BINARY_SOURCE_EXTENSION: &str = "bin";

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Whether `path` names a catalog file rather than a reaction source
#[must_use]
pub fn is_catalog_path(path: &Path) -> bool {
    matches!(
        extension_of(path).as_deref(),
        Some(CATALOG_EXTENSION | LEGACY_CATALOG_EXTENSION | BINARY_CATALOG_EXTENSION)
    )
}

/// Whether `path` names a binary-encoded reaction source
#[must_use]
pub fn is_binary_source(path: &Path) -> bool {
    extension_of(path).as_deref() == Some(BINARY_SOURCE_EXTENSION)
}

/// Find the catalog file that belongs to a reaction source.
///
/// Returns `Ok(None)` when there is nothing to resolve (empty path) or when
/// the prompter declines to pick the primary file while a legacy file with
/// the same stem also exists.
///
/// # Errors
///
/// Returns `CatalogError::InvalidInput` if `source` is itself a catalog path.
pub fn resolve(
    source: &Path,
    prompter: &mut dyn Prompter,
) -> Result<Option<PathBuf>, CatalogError> {
    if source.as_os_str().is_empty() {
        return Ok(None);
    }

    if is_catalog_path(source) {
        return Err(CatalogError::InvalidInput(format!(
            "{} is a catalog file, not a reaction source",
            source.display()
        )));
    }

    if is_binary_source(source) {
        let path = source.with_extension(BINARY_CATALOG_EXTENSION);
        debug!("Binary source {} uses {}", source.display(), path.display());
        return Ok(Some(path));
    }

    let primary = source.with_extension(CATALOG_EXTENSION);
    let legacy = source.with_extension(LEGACY_CATALOG_EXTENSION);

    let resolved = match (primary.exists(), legacy.exists()) {
        (true, true) => {
            warn!(
                "Both {} and {} exist",
                primary.display(),
                legacy.display()
            );
            let message = format!(
                "Both {} and {} exist for {}. Continue with {}?",
                primary.display(),
                legacy.display(),
                source.display(),
                primary.display()
            );
            if !prompter.confirm(&message) {
                return Ok(None);
            }
            primary
        }
        (false, true) => legacy,
        _ => primary,
    };

    debug!("Source {} uses {}", source.display(), resolved.display());
    Ok(Some(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{AssumeNo, AssumeYes};

    #[test]
    fn test_empty_source() {
        assert_eq!(resolve(Path::new(""), &mut AssumeYes).unwrap(), None);
    }

    #[test]
    fn test_catalog_extension_rejected() {
        for name in ["thermo.elt", "thermo.ELE", "thermo.elb"] {
            assert!(matches!(
                resolve(Path::new(name), &mut AssumeYes),
                Err(CatalogError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_binary_source() {
        let resolved = resolve(Path::new("/db/thermo.bin"), &mut AssumeYes).unwrap();
        assert_eq!(resolved, Some(PathBuf::from("/db/thermo.elb")));
    }

    #[test]
    fn test_text_source_defaults_to_primary() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("thermo.dat");

        let resolved = resolve(&source, &mut AssumeNo).unwrap();
        assert_eq!(resolved, Some(dir.path().join("thermo.elt")));
    }

    #[test]
    fn test_text_source_falls_back_to_legacy() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("thermo.dat");
        std::fs::write(dir.path().join("thermo.ele"), "").unwrap();

        let resolved = resolve(&source, &mut AssumeNo).unwrap();
        assert_eq!(resolved, Some(dir.path().join("thermo.ele")));
    }

    #[test]
    fn test_both_files_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("thermo.dat");
        std::fs::write(dir.path().join("thermo.elt"), "").unwrap();
        std::fs::write(dir.path().join("thermo.ele"), "").unwrap();

        assert_eq!(resolve(&source, &mut AssumeNo).unwrap(), None);
        assert_eq!(
            resolve(&source, &mut AssumeYes).unwrap(),
            Some(dir.path().join("thermo.elt"))
        );
    }
}

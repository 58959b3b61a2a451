use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::entry::Catalog;

/// Step of the atomic replace protocol at which a write failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    RemoveStaleTemp,
    CreateTemp,
    WriteTemp,
    RemoveOriginal,
    Rename,
}

impl fmt::Display for WriteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveStaleTemp => write!(f, "removing stale temporary file"),
            Self::CreateTemp => write!(f, "creating temporary file"),
            Self::WriteTemp => write!(f, "writing temporary file"),
            Self::RemoveOriginal => write!(f, "removing original catalog"),
            Self::Rename => write!(f, "renaming temporary file onto catalog"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed catalog {} at line {line}: {reason} (content: '{content}')", path.display())]
    Format {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Catalog {} is not writable", path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed {step} ({}): {source}", path.display())]
    Write {
        step: WriteStep,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reaction source {} line {line}: {message}", path.display())]
    Reconcile {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// New components were merged in memory but the catalog file could not be updated.
    /// The merged catalog is handed back so the caller can retry the write.
    #[error("Merged {} new component(s) but could not persist the catalog: {source}", added.len())]
    NotPersisted {
        merged: Box<Catalog>,
        added: Vec<String>,
        #[source]
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    /// The write step that failed, if this is (or wraps) a write failure
    #[must_use]
    pub fn write_step(&self) -> Option<WriteStep> {
        match self {
            Self::Write { step, .. } => Some(*step),
            Self::NotPersisted { source, .. } => source.write_step(),
            _ => None,
        }
    }
}

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::catalog::registry::ComponentLookup;
use crate::catalog::store;
use crate::catalog::writer::CatalogWriter;
use crate::core::entry::{sort_formulas, Catalog};
use crate::error::CatalogError;
use crate::parsing::reaction::ReactionParser;
use crate::prompt::Prompter;

/// Lines consisting only of one of these keywords are section headers, not reactions
pub const HEADER_KEYWORDS: &[&str] = &["SPECIES", "REACTIONS", "END"];

/// Lines starting with this marker are comments
pub const COMMENT_MARKER: char = '#';

/// Result of a successful reconciliation
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The catalog as it now stands on disk
    pub catalog: Catalog,

    /// Formulas merged from the registry, sorted case-insensitively
    pub added: Vec<String>,

    /// Referenced formulas missing from both the catalog and the registry
    pub unresolved: Vec<String>,

    /// Whether the catalog file was created by this call
    pub created: bool,
}

/// Brings a catalog up to date with the components its reaction source references
pub struct Reconciler<'a> {
    parser: &'a dyn ReactionParser,
    registry: &'a dyn ComponentLookup,
    writer: CatalogWriter,
}

impl<'a> Reconciler<'a> {
    pub fn new(parser: &'a dyn ReactionParser, registry: &'a dyn ComponentLookup) -> Self {
        Self {
            parser,
            registry,
            writer: CatalogWriter::new(),
        }
    }

    #[must_use]
    pub fn with_writer(mut self, writer: CatalogWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn writer(&self) -> &CatalogWriter {
        &self.writer
    }

    /// Load the catalog, merge in components referenced by `source` and persist if anything changed.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Io`/`Format` if the catalog cannot be loaded
    /// - `CatalogError::Write`/`Permission` if a new catalog's bootstrap cannot be written
    /// - `CatalogError::Reconcile` on the first unreadable or unparsable source line
    /// - `CatalogError::NotPersisted` if components were merged but the write failed;
    ///   the merged catalog is carried in the error and the file is unchanged
    pub fn reconcile(
        &self,
        source: &Path,
        catalog_path: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<Reconciliation, CatalogError> {
        let loaded = store::load_with_status(catalog_path)?;
        let mut catalog = loaded.catalog;
        let created = !loaded.existed;

        if created {
            info!("Creating catalog {}", catalog_path.display());
            self.writer.write(catalog_path, &catalog)?;
        }

        if source.as_os_str().is_empty() || !source.exists() {
            debug!("No reaction source at {}, nothing to reconcile", source.display());
            return Ok(Reconciliation {
                catalog,
                added: Vec::new(),
                unresolved: Vec::new(),
                created,
            });
        }

        let merge = self.merge_missing(&mut catalog, source)?;

        if merge.added.is_empty() {
            debug!("Catalog {} is up to date", catalog_path.display());
            return Ok(Reconciliation {
                catalog,
                added: merge.added,
                unresolved: merge.unresolved,
                created,
            });
        }

        prompter.report_new_components(&merge.added);

        if let Err(e) = self.writer.write(catalog_path, &catalog) {
            return Err(CatalogError::NotPersisted {
                merged: Box::new(catalog),
                added: merge.added,
                source: Box::new(e),
            });
        }

        Ok(Reconciliation {
            catalog,
            added: merge.added,
            unresolved: merge.unresolved,
            created,
        })
    }

    /// Scan `source` and append registry entries for every referenced component
    /// missing from `catalog`. Nothing is written.
    ///
    /// On error the catalog may hold the entries merged before the failing line;
    /// [`Reconciler::reconcile`] only ever exposes it through a successful result.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Reconcile` with the 1-based line number of the
    /// first line that cannot be read or parsed.
    pub fn merge_missing(&self, catalog: &mut Catalog, source: &Path) -> Result<Merge, CatalogError> {
        let fail = |line: usize, message: String| CatalogError::Reconcile {
            path: source.to_path_buf(),
            line,
            message,
        };

        let file = File::open(source).map_err(|e| fail(0, e.to_string()))?;
        let reader = BufReader::new(file);

        let mut known: HashSet<String> = catalog.iter().map(|e| e.component.clone()).collect();
        let mut added: Vec<String> = Vec::new();
        let mut unresolved: HashSet<String> = HashSet::new();

        for (i, line) in reader.lines().enumerate() {
            let line_num = i + 1;
            let line = line.map_err(|e| fail(line_num, e.to_string()))?;
            let trimmed = line.trim();
            if is_skipped(trimmed) {
                continue;
            }

            let record = self
                .parser
                .parse_line(trimmed)
                .map_err(|e| fail(line_num, e.to_string()))?;

            for formula in record.references() {
                if known.contains(formula) || unresolved.contains(formula) {
                    continue;
                }

                let found = self.registry.lookup(formula);
                if found.is_empty() {
                    warn!(
                        "Component {} (line {}) is not in the registry",
                        formula, line_num
                    );
                    unresolved.insert(formula.to_string());
                    continue;
                }

                debug!(
                    "Adding {} under {} element(s) from registry",
                    formula,
                    found.len()
                );
                for entry in found {
                    catalog.push(entry);
                }
                known.insert(formula.to_string());
                added.push(formula.to_string());
            }
        }

        sort_formulas(&mut added);
        let mut unresolved: Vec<String> = unresolved.into_iter().collect();
        sort_formulas(&mut unresolved);

        if !added.is_empty() {
            info!("Merged {} new component(s) from {}", added.len(), source.display());
        }

        Ok(Merge { added, unresolved })
    }
}

/// Formulas touched by [`Reconciler::merge_missing`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merge {
    pub added: Vec<String>,
    pub unresolved: Vec<String>,
}

fn is_skipped(line: &str) -> bool {
    line.is_empty()
        || line.starts_with(COMMENT_MARKER)
        || HEADER_KEYWORDS.iter().any(|k| line.eq_ignore_ascii_case(k))
}

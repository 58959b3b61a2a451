use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::entry::{Catalog, CatalogEntry};
use crate::error::CatalogError;
use crate::prompt::Prompter;
use crate::sync::reconcile::Reconciler;
use crate::utils::validation::{parse_linked_elements, validate_description, validate_formula};

/// A component to add to (or replace in) a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDraft {
    pub formula: String,

    /// Comma-separated element symbols, e.g. `"C, N"`
    pub linked_elements: String,

    pub description: Option<String>,
}

impl ComponentDraft {
    pub fn new(formula: impl Into<String>, linked_elements: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            linked_elements: linked_elements.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Add, replace, and delete components of one catalog file.
///
/// Every edit mutates the caller's catalog, persists it, and restores the
/// previous in-memory state if persisting fails.
pub struct ComponentEditor<'r> {
    reconciler: &'r Reconciler<'r>,
    catalog_path: PathBuf,
}

impl<'r> ComponentEditor<'r> {
    pub fn new(reconciler: &'r Reconciler<'r>, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            reconciler,
            catalog_path: catalog_path.into(),
        }
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Remove every entry for `formula` and persist. Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidInput` for an empty formula, or the write
    /// error. On a write error the removed entries are back in `catalog`.
    pub fn delete(&self, catalog: &mut Catalog, formula: &str) -> Result<usize, CatalogError> {
        let formula = formula.trim();
        if formula.is_empty() {
            return Err(CatalogError::InvalidInput(
                "no component given to delete".to_string(),
            ));
        }

        let removed = catalog.remove_component(formula);
        if removed.is_empty() {
            return Ok(0);
        }
        let count = removed.len();

        if let Err(e) = self.reconciler.writer().write(&self.catalog_path, catalog) {
            warn!("Restoring {} after failed delete", formula);
            catalog.restore(removed);
            return Err(e);
        }

        info!("Deleted {} ({} entries)", formula, count);
        Ok(count)
    }

    /// Add `draft` to the catalog, replacing any existing entries for its formula.
    ///
    /// The catalog is first reconciled against `source`, so `catalog` is
    /// replaced by the freshly reconciled one. Returns `Ok(false)` if the
    /// prompter declines the add or replace.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidInput` for a bad formula, element list, or
    /// multi-line description, any reconciliation error, or the write error. On a write error `catalog`
    /// is the reconciled catalog, without the draft applied.
    pub fn save(
        &self,
        catalog: &mut Catalog,
        draft: &ComponentDraft,
        source: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<bool, CatalogError> {
        let formula =
            validate_formula(&draft.formula).map_err(|e| CatalogError::InvalidInput(e.to_string()))?;
        let elements = parse_linked_elements(&draft.linked_elements)
            .map_err(|e| CatalogError::InvalidInput(e.to_string()))?;
        let description = validate_description(draft.description.as_deref().unwrap_or(""))
            .map_err(|e| CatalogError::InvalidInput(e.to_string()))?;

        let reconciled = self
            .reconciler
            .reconcile(source, &self.catalog_path, prompter)?;
        *catalog = reconciled.catalog;

        let existing = catalog.elements_for(formula);
        let message = if existing.is_empty() {
            format!("Add {} linked to {}?", formula, elements.join(", "))
        } else {
            format!(
                "{} is already linked to {}. Replace with {}?",
                formula,
                existing.join(", "),
                elements.join(", ")
            )
        };
        if !prompter.confirm(&message) {
            return Ok(false);
        }

        let snapshot = catalog.clone();
        catalog.remove_component(formula);
        for element in &elements {
            catalog.push(CatalogEntry::new(element.as_str(), formula).with_description(description));
        }

        if let Err(e) = self.reconciler.writer().write(&self.catalog_path, catalog) {
            warn!("Restoring catalog after failed save of {}", formula);
            *catalog = snapshot;
            return Err(e);
        }

        info!("Saved {} linked to {}", formula, elements.join(", "));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store;
    use crate::catalog::writer::CatalogWriter;
    use crate::error::WriteStep;
    use crate::parsing::reaction::TextReactionParser;
    use crate::prompt::{AssumeNo, AssumeYes};

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("thermo.dat");
        let catalog_path = dir.path().join("thermo.elt");
        std::fs::write(&catalog_path, "C, 1 ,\"CN-\",\"cyanide\",\nN, 1 ,\"CN-\",\"cyanide\",\n")
            .unwrap();
        (dir, source, catalog_path)
    }

    #[test]
    fn test_delete_persists() {
        let (_dir, _source, catalog_path) = setup();
        let registry: Vec<CatalogEntry> = Vec::new();
        let reconciler = Reconciler::new(&TextReactionParser, &registry);
        let editor = ComponentEditor::new(&reconciler, &catalog_path);

        let mut catalog = store::load(&catalog_path).unwrap();
        assert_eq!(editor.delete(&mut catalog, "CN-").unwrap(), 2);
        assert_eq!(editor.delete(&mut catalog, "CN-").unwrap(), 0);

        assert!(!store::load(&catalog_path).unwrap().contains_component("CN-"));
    }

    #[test]
    fn test_delete_rollback_on_write_failure() {
        let (_dir, _source, catalog_path) = setup();
        let registry: Vec<CatalogEntry> = Vec::new();
        let reconciler = Reconciler::new(&TextReactionParser, &registry)
            .with_writer(CatalogWriter::failing_at(WriteStep::Rename));
        let editor = ComponentEditor::new(&reconciler, &catalog_path);

        let mut catalog = store::load(&catalog_path).unwrap();
        let before = catalog.clone();

        assert!(editor.delete(&mut catalog, "CN-").is_err());
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_delete_empty_formula() {
        let (_dir, _source, catalog_path) = setup();
        let registry: Vec<CatalogEntry> = Vec::new();
        let reconciler = Reconciler::new(&TextReactionParser, &registry);
        let editor = ComponentEditor::new(&reconciler, &catalog_path);

        let mut catalog = Catalog::bootstrap();
        assert!(matches!(
            editor.delete(&mut catalog, "  "),
            Err(CatalogError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_save_adds_and_replaces() {
        let (_dir, source, catalog_path) = setup();
        let registry: Vec<CatalogEntry> = Vec::new();
        let reconciler = Reconciler::new(&TextReactionParser, &registry);
        let editor = ComponentEditor::new(&reconciler, &catalog_path);
        let mut catalog = Catalog::new();

        let draft = ComponentDraft::new("SCN-", "N, S").with_description("thiocyanate");
        assert!(editor.save(&mut catalog, &draft, &source, &mut AssumeYes).unwrap());
        assert_eq!(catalog.elements_for("SCN-"), vec!["N", "S"]);

        let draft = ComponentDraft::new("CN-", "C");
        assert!(editor.save(&mut catalog, &draft, &source, &mut AssumeYes).unwrap());
        assert_eq!(catalog.elements_for("CN-"), vec!["C"]);

        let on_disk = store::load(&catalog_path).unwrap();
        assert_eq!(on_disk.elements_for("CN-"), vec!["C"]);
        assert_eq!(on_disk.elements_for("SCN-"), vec!["N", "S"]);
    }

    #[test]
    fn test_save_declined_is_noop() {
        let (_dir, source, catalog_path) = setup();
        let before = std::fs::read(&catalog_path).unwrap();
        let registry: Vec<CatalogEntry> = Vec::new();
        let reconciler = Reconciler::new(&TextReactionParser, &registry);
        let editor = ComponentEditor::new(&reconciler, &catalog_path);
        let mut catalog = Catalog::new();

        let draft = ComponentDraft::new("CN-", "N");
        assert!(!editor.save(&mut catalog, &draft, &source, &mut AssumeNo).unwrap());
        assert_eq!(catalog.elements_for("CN-"), vec!["C", "N"]);
        assert_eq!(std::fs::read(&catalog_path).unwrap(), before);
    }

    #[test]
    fn test_save_rollback_on_write_failure() {
        let (_dir, source, catalog_path) = setup();
        let registry: Vec<CatalogEntry> = Vec::new();
        let reconciler = Reconciler::new(&TextReactionParser, &registry)
            .with_writer(CatalogWriter::failing_at(WriteStep::WriteTemp));
        let editor = ComponentEditor::new(&reconciler, &catalog_path);
        let mut catalog = Catalog::new();

        let draft = ComponentDraft::new("CN-", "N");
        assert!(editor.save(&mut catalog, &draft, &source, &mut AssumeYes).is_err());

        assert_eq!(catalog, store::load(&catalog_path).unwrap());
        assert_eq!(catalog.elements_for("CN-"), vec!["C", "N"]);
    }

    #[test]
    fn test_save_rejects_bad_input() {
        let (_dir, source, catalog_path) = setup();
        let registry: Vec<CatalogEntry> = Vec::new();
        let reconciler = Reconciler::new(&TextReactionParser, &registry);
        let editor = ComponentEditor::new(&reconciler, &catalog_path);
        let mut catalog = Catalog::new();

        for draft in [
            ComponentDraft::new("", "C"),
            ComponentDraft::new("CN-", ""),
            ComponentDraft::new("CN-", "C,Qq"),
            ComponentDraft::new("SCN-", "N").with_description("thio\ncyanate"),
        ] {
            assert!(matches!(
                editor.save(&mut catalog, &draft, &source, &mut AssumeYes),
                Err(CatalogError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_save_multiline_description_leaves_catalog_readable() {
        let (_dir, source, catalog_path) = setup();
        let before = std::fs::read(&catalog_path).unwrap();
        let registry: Vec<CatalogEntry> = Vec::new();
        let reconciler = Reconciler::new(&TextReactionParser, &registry);
        let editor = ComponentEditor::new(&reconciler, &catalog_path);
        let mut catalog = Catalog::new();

        let draft = ComponentDraft::new("SCN-", "N").with_description("thio\ncyanate");
        assert!(matches!(
            editor.save(&mut catalog, &draft, &source, &mut AssumeYes),
            Err(CatalogError::InvalidInput(_))
        ));

        assert_eq!(std::fs::read(&catalog_path).unwrap(), before);
        assert_eq!(store::load(&catalog_path).unwrap().elements_for("CN-"), vec!["C", "N"]);
    }
}

use serde::{Deserialize, Serialize};

use crate::core::element::{ELECTRON, UNCLASSIFIED};

/// One association between an element and a component formula
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Element symbol, `e-`, or `XX`
    pub element: String,

    /// Component formula (e.g. "CN-")
    pub component: String,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogEntry {
    pub fn new(element: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            component: component.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }
}

/// Entries removed from a catalog, remembered with their positions so they can be put back
#[derive(Debug, Clone, Default)]
pub struct Removed {
    slots: Vec<(usize, CatalogEntry)>,
}

impl Removed {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// An ordered collection of catalog entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog (no bootstrap entries)
    pub fn new() -> Self {
        Self::default()
    }

    /// The implicit entries every loaded catalog carries
    #[must_use]
    pub fn bootstrap_entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new(UNCLASSIFIED, "H2O").with_description("water"),
            CatalogEntry::new("H", "H+").with_description("hydrogen ion"),
            CatalogEntry::new(ELECTRON, "e-").with_description("electron"),
        ]
    }

    /// A catalog holding only the bootstrap entries
    #[must_use]
    pub fn bootstrap() -> Self {
        Self {
            entries: Self::bootstrap_entries(),
        }
    }

    /// Insert any bootstrap component missing from this catalog, ahead of the existing entries
    pub fn seed_bootstrap(&mut self) {
        let missing: Vec<CatalogEntry> = Self::bootstrap_entries()
            .into_iter()
            .filter(|b| !self.contains_component(&b.component))
            .collect();
        if !missing.is_empty() {
            self.entries.splice(0..0, missing);
        }
    }

    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry carries this component formula
    pub fn contains_component(&self, formula: &str) -> bool {
        self.entries.iter().any(|e| e.component == formula)
    }

    /// Elements a component is currently linked to, in catalog order
    pub fn elements_for(&self, formula: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.component == formula)
            .map(|e| e.element.as_str())
            .collect()
    }

    /// Entries grouped under one element symbol, in catalog order
    pub fn entries_for_element<'a>(
        &'a self,
        element: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |e| e.element == element)
    }

    /// Entries in a fixed order, for comparing catalogs as multisets
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<&CatalogEntry> = self.entries.iter().collect();
        entries.sort();
        entries
    }

    /// Distinct component formulas, sorted case-insensitively
    #[must_use]
    pub fn components(&self) -> Vec<&str> {
        let mut formulas: Vec<&str> = self.entries.iter().map(|e| e.component.as_str()).collect();
        sort_formulas(&mut formulas);
        formulas.dedup();
        formulas
    }

    /// Remove every entry for `formula`, returning them with their original positions
    pub fn remove_component(&mut self, formula: &str) -> Removed {
        let mut slots = Vec::new();
        let mut index = 0;
        self.entries.retain(|e| {
            let keep = e.component != formula;
            if !keep {
                slots.push((index, e.clone()));
            }
            index += 1;
            keep
        });
        Removed { slots }
    }

    /// Put back entries taken out by [`Catalog::remove_component`]
    pub fn restore(&mut self, removed: Removed) {
        for (position, entry) in removed.slots {
            let position = position.min(self.entries.len());
            self.entries.insert(position, entry);
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sort formulas case-insensitively, ties broken by exact text so the order is total
pub fn sort_formulas<S: AsRef<str>>(formulas: &mut [S]) {
    formulas.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_catalog() -> Catalog {
        let mut catalog = Catalog::bootstrap();
        catalog.push(CatalogEntry::new("C", "CN-").with_description("cyanide"));
        catalog.push(CatalogEntry::new("Ca", "Ca+2"));
        catalog.push(CatalogEntry::new("N", "CN-").with_description("cyanide"));
        catalog
    }

    #[test]
    fn test_bootstrap_entries() {
        let catalog = Catalog::bootstrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.elements_for("H2O"), vec![UNCLASSIFIED]);
        assert_eq!(catalog.elements_for("H+"), vec!["H"]);
        assert_eq!(catalog.elements_for("e-"), vec![ELECTRON]);
    }

    #[test]
    fn test_empty_description_is_none() {
        let entry = CatalogEntry::new("C", "CO3-2").with_description("");
        assert!(entry.description.is_none());
    }

    #[test]
    fn test_elements_for_multi_element_component() {
        let catalog = make_catalog();
        assert_eq!(catalog.elements_for("CN-"), vec!["C", "N"]);
        assert!(catalog.elements_for("SCN-").is_empty());
    }

    #[test]
    fn test_remove_and_restore_positions() {
        let original = make_catalog();
        let mut catalog = original.clone();

        let removed = catalog.remove_component("CN-");
        assert_eq!(removed.len(), 2);
        assert!(!catalog.contains_component("CN-"));
        assert_eq!(catalog.len(), 4);

        catalog.restore(removed);
        assert_eq!(catalog, original);
    }

    #[test]
    fn test_seed_bootstrap_only_adds_missing() {
        let mut catalog = Catalog::new();
        catalog.push(CatalogEntry::new("H", "H+").with_description("proton"));
        catalog.seed_bootstrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries[0].component, "H2O");
        assert_eq!(catalog.entries[1].component, "e-");
        // Existing entry keeps its own description
        assert_eq!(catalog.entries[2].description.as_deref(), Some("proton"));
    }

    #[test]
    fn test_components_sorted_case_insensitive() {
        let mut catalog = Catalog::new();
        catalog.push(CatalogEntry::new("S", "so4-2"));
        catalog.push(CatalogEntry::new("C", "CN-"));
        catalog.push(CatalogEntry::new("N", "CN-"));
        catalog.push(CatalogEntry::new("Ca", "Ca+2"));

        assert_eq!(catalog.components(), vec!["Ca+2", "CN-", "so4-2"]);
    }
}

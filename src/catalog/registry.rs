use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::catalog::store;
use crate::core::entry::{Catalog, CatalogEntry};
use crate::error::CatalogError;

/// An (element, component, description) association known to some open reaction database
pub type RegistryEntry = CatalogEntry;

/// Read-only query interface over the master component registry
pub trait ComponentLookup {
    /// Every registry entry whose component is exactly `formula`
    fn lookup(&self, formula: &str) -> Vec<RegistryEntry>;
}

impl ComponentLookup for [RegistryEntry] {
    fn lookup(&self, formula: &str) -> Vec<RegistryEntry> {
        self.iter()
            .filter(|e| e.component == formula)
            .cloned()
            .collect()
    }
}

impl ComponentLookup for Vec<RegistryEntry> {
    fn lookup(&self, formula: &str) -> Vec<RegistryEntry> {
        self.as_slice().lookup(formula)
    }
}

/// All components known across a set of reaction databases, indexed by formula
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: Vec<RegistryEntry>,

    /// Index: component formula -> indices in entries
    by_component: HashMap<String, Vec<usize>>,

    /// (element, component) pairs already present
    seen: HashSet<(String, String)>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            registry.add_entry(entry);
        }
        registry
    }

    /// Add one association; a repeated (element, component) pair is ignored
    pub fn add_entry(&mut self, entry: RegistryEntry) -> bool {
        let key = (entry.element.clone(), entry.component.clone());
        if !self.seen.insert(key) {
            return false;
        }
        let index = self.entries.len();
        self.by_component
            .entry(entry.component.clone())
            .or_default()
            .push(index);
        self.entries.push(entry);
        true
    }

    /// Add every entry of another database's catalog
    pub fn add_catalog(&mut self, catalog: &Catalog) -> usize {
        catalog
            .iter()
            .filter(|e| self.add_entry((*e).clone()))
            .count()
    }

    /// Add the entries of a registry file.
    ///
    /// `.json` files hold an array of `{element, component, description}`
    /// objects; anything else is read as a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or
    /// `CatalogError::Format` if its content is malformed.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let entries: Vec<RegistryEntry> =
                serde_json::from_str(&content).map_err(|e| CatalogError::Format {
                    path: path.to_path_buf(),
                    line: e.line(),
                    content: String::new(),
                    reason: e.to_string(),
                })?;
            Catalog { entries }
        } else {
            store::read_entries(path)?
        };

        let added = self.add_catalog(&catalog);
        debug!("Registry: {} new entries from {}", added, path.display());
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ComponentLookup for ComponentRegistry {
    fn lookup(&self, formula: &str) -> Vec<RegistryEntry> {
        self.by_component
            .get(formula)
            .map(|indices| indices.iter().map(|&i| self.entries[i].clone()).collect())
            .unwrap_or_default()
    }
}

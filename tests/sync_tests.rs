//! End-to-end catalog synchronization tests
//!
//! These drive resolution, reconciliation, editing, and persistence together
//! against real files in a scratch directory.

use std::path::{Path, PathBuf};

use elt_sync::catalog::{codec, resolver, store};
use elt_sync::parsing::reaction::TextReactionParser;
use elt_sync::prompt::{AssumeNo, AssumeYes, Prompter};
use elt_sync::{
    Catalog, CatalogEntry, CatalogError, CatalogWriter, ComponentEditor, ComponentRegistry,
    Reconciler, WriteStep,
};

/// Prompter that records everything it is asked and answers from a script
#[derive(Default)]
struct RecordingPrompter {
    answer: bool,
    questions: Vec<String>,
    reports: Vec<Vec<String>>,
}

impl Prompter for RecordingPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answer
    }

    fn report_new_components(&mut self, formulas: &[String]) {
        self.reports.push(formulas.to_vec());
    }
}

fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).expect("Failed to write test file");
}

fn cyanide_setup(dir: &Path) -> (PathBuf, PathBuf) {
    let source = dir.join("thermo.dat");
    let catalog_path = dir.join("thermo.elt");
    write_file(&catalog_path, "C, 1 ,\"CN-\",\"cyanide\",\n");
    write_file(
        &source,
        "REACTIONS\n# cyanide complexes\n\"HCN\", 2, 1.0, \"H+\", 1.0, \"CN-\"\n\"CN-SCN\", 2, 1.0, \"CN-\", 1.0, \"SCN-\"\nEND\n",
    );
    (source, catalog_path)
}

fn thiocyanate_registry() -> ComponentRegistry {
    ComponentRegistry::from_entries([CatalogEntry::new("N", "SCN-").with_description("thiocyanate")])
}

#[test]
fn test_reconcile_adds_only_missing_component() {
    let dir = tempfile::tempdir().unwrap();
    let (source, catalog_path) = cyanide_setup(dir.path());
    let registry = thiocyanate_registry();
    let reconciler = Reconciler::new(&TextReactionParser, &registry);
    let mut prompter = RecordingPrompter::default();

    let result = reconciler
        .reconcile(&source, &catalog_path, &mut prompter)
        .unwrap();

    assert_eq!(result.added, vec!["SCN-"]);
    assert_eq!(prompter.reports, vec![vec!["SCN-".to_string()]]);
    assert!(!result.created);

    // Exactly one new entry, CN- untouched
    assert_eq!(result.catalog.len(), 5);
    assert_eq!(result.catalog.elements_for("SCN-"), vec!["N"]);
    assert_eq!(result.catalog.elements_for("CN-"), vec!["C"]);

    let on_disk = store::load(&catalog_path).unwrap();
    assert_eq!(on_disk.sorted_entries(), result.catalog.sorted_entries());
    assert!(on_disk
        .iter()
        .any(|e| e == &CatalogEntry::new("N", "SCN-").with_description("thiocyanate")));
}

#[test]
fn test_reconcile_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let (source, catalog_path) = cyanide_setup(dir.path());
    let registry = thiocyanate_registry();
    let reconciler = Reconciler::new(&TextReactionParser, &registry);

    let first = reconciler
        .reconcile(&source, &catalog_path, &mut AssumeYes)
        .unwrap();
    let modified = std::fs::metadata(&catalog_path).unwrap().modified().unwrap();
    let bytes = std::fs::read(&catalog_path).unwrap();

    let mut prompter = RecordingPrompter::default();
    let second = reconciler
        .reconcile(&source, &catalog_path, &mut prompter)
        .unwrap();

    assert!(second.added.is_empty());
    assert!(prompter.reports.is_empty());
    assert_eq!(second.catalog.sorted_entries(), first.catalog.sorted_entries());
    assert_eq!(
        std::fs::metadata(&catalog_path).unwrap().modified().unwrap(),
        modified
    );
    assert_eq!(std::fs::read(&catalog_path).unwrap(), bytes);
}

#[test]
fn test_reconcile_write_failure_keeps_file_and_returns_merge() {
    let dir = tempfile::tempdir().unwrap();
    let (source, catalog_path) = cyanide_setup(dir.path());
    let before = std::fs::read(&catalog_path).unwrap();
    let registry = thiocyanate_registry();
    let reconciler = Reconciler::new(&TextReactionParser, &registry)
        .with_writer(CatalogWriter::failing_at(WriteStep::Rename));

    let err = reconciler
        .reconcile(&source, &catalog_path, &mut AssumeYes)
        .unwrap_err();

    assert_eq!(err.write_step(), Some(WriteStep::Rename));
    match err {
        CatalogError::NotPersisted { merged, added, .. } => {
            assert_eq!(added, vec!["SCN-"]);
            assert!(merged.contains_component("SCN-"));
        }
        other => panic!("expected NotPersisted, got {other:?}"),
    }
    assert_eq!(std::fs::read(&catalog_path).unwrap(), before);
}

#[test]
fn test_multiline_registry_description_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let (source, catalog_path) = cyanide_setup(dir.path());
    let before = std::fs::read(&catalog_path).unwrap();
    let registry = ComponentRegistry::from_entries([
        CatalogEntry::new("N", "SCN-").with_description("thio\ncyanate")
    ]);
    let reconciler = Reconciler::new(&TextReactionParser, &registry);

    let err = reconciler
        .reconcile(&source, &catalog_path, &mut AssumeYes)
        .unwrap_err();

    match err {
        CatalogError::NotPersisted { merged, source: cause, .. } => {
            assert!(merged.contains_component("SCN-"));
            assert!(matches!(*cause, CatalogError::InvalidInput(_)));
        }
        other => panic!("expected NotPersisted, got {other:?}"),
    }
    assert_eq!(std::fs::read(&catalog_path).unwrap(), before);
    assert!(store::load(&catalog_path).is_ok());
}

#[test]
fn test_huge_term_count_fails_reconcile_at_its_line() {
    let dir = tempfile::tempdir().unwrap();
    let (source, catalog_path) = cyanide_setup(dir.path());
    write_file(
        &source,
        "REACTIONS\n\"HCN\", 2, 1.0, \"H+\", 1.0, \"CN-\"\n\"X\", 9223372036854775808, 1.0, \"A\"\n",
    );
    let before = std::fs::read(&catalog_path).unwrap();
    let registry = thiocyanate_registry();
    let reconciler = Reconciler::new(&TextReactionParser, &registry);

    let err = reconciler
        .reconcile(&source, &catalog_path, &mut AssumeYes)
        .unwrap_err();

    assert!(matches!(err, CatalogError::Reconcile { line: 3, .. }));
    assert_eq!(std::fs::read(&catalog_path).unwrap(), before);
}

#[test]
fn test_atomic_replace_survives_fault_and_cleans_up_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("thermo.elt");
    write_file(&catalog_path, "C, 1 ,\"CN-\",\"cyanide\",\n");
    let before = std::fs::read(&catalog_path).unwrap();

    let mut catalog = store::load(&catalog_path).unwrap();
    catalog.push(CatalogEntry::new("N", "SCN-"));

    for step in [WriteStep::RemoveOriginal, WriteStep::Rename] {
        let result = CatalogWriter::failing_at(step).write(&catalog_path, &catalog);
        assert!(result.is_err());
        assert_eq!(std::fs::read(&catalog_path).unwrap(), before);
    }

    // The temp file from the failed run is still there; a clean run replaces it
    let temp = CatalogWriter::temp_path(&catalog_path);
    assert!(temp.exists());

    CatalogWriter::new().write(&catalog_path, &catalog).unwrap();

    assert!(!temp.exists());
    assert!(store::load(&catalog_path).unwrap().contains_component("SCN-"));
}

#[test]
fn test_new_catalog_gets_bootstrap_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("fresh.elt");

    assert_eq!(store::load(&catalog_path).unwrap(), Catalog::bootstrap());
    assert!(!catalog_path.exists());

    let registry: Vec<CatalogEntry> = Vec::new();
    let reconciler = Reconciler::new(&TextReactionParser, &registry);
    let result = reconciler
        .reconcile(Path::new(""), &catalog_path, &mut AssumeNo)
        .unwrap();

    assert!(result.created);
    let text = std::fs::read_to_string(&catalog_path).unwrap();
    assert_eq!(text, codec::encode(&Catalog::bootstrap()));
}

#[test]
fn test_delete_with_failed_write_restores_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let (_source, catalog_path) = cyanide_setup(dir.path());
    let before_bytes = std::fs::read(&catalog_path).unwrap();

    let registry: Vec<CatalogEntry> = Vec::new();
    let reconciler = Reconciler::new(&TextReactionParser, &registry)
        .with_writer(CatalogWriter::failing_at(WriteStep::CreateTemp));
    let editor = ComponentEditor::new(&reconciler, &catalog_path);

    let mut catalog = store::load(&catalog_path).unwrap();
    let before = catalog.clone();

    let err = editor.delete(&mut catalog, "CN-").unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Write {
            step: WriteStep::CreateTemp,
            ..
        }
    ));
    assert_eq!(catalog, before);
    assert_eq!(std::fs::read(&catalog_path).unwrap(), before_bytes);
}

#[test]
fn test_save_reconciles_then_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let (source, catalog_path) = cyanide_setup(dir.path());
    let registry = thiocyanate_registry();
    let reconciler = Reconciler::new(&TextReactionParser, &registry);
    let editor = ComponentEditor::new(&reconciler, &catalog_path);

    let mut catalog = Catalog::new();
    let mut prompter = RecordingPrompter {
        answer: true,
        ..Default::default()
    };

    let draft = elt_sync::ComponentDraft::new("CN-", "C, N").with_description("cyanide");
    assert!(editor
        .save(&mut catalog, &draft, &source, &mut prompter)
        .unwrap());

    // Reconciliation ran first and the replace question named the old link
    assert_eq!(prompter.reports, vec![vec!["SCN-".to_string()]]);
    assert_eq!(prompter.questions.len(), 1);
    assert!(prompter.questions[0].contains("already linked to C"));

    let on_disk = store::load(&catalog_path).unwrap();
    assert_eq!(on_disk.elements_for("CN-"), vec!["C", "N"]);
    assert_eq!(on_disk.elements_for("SCN-"), vec!["N"]);
}

#[test]
fn test_resolver_rejects_catalog_extension() {
    let result = resolver::resolve(Path::new("/data/thermo.elt"), &mut AssumeYes);
    assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
}

#[test]
fn test_resolver_ambiguous_declined_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("thermo.dat");
    let primary = dir.path().join("thermo.elt");
    let legacy = dir.path().join("thermo.ele");
    write_file(&primary, "C, 1 ,\"CN-\",\"cyanide\",\n");
    write_file(&legacy, "N, 1 ,\"CN-\",\"cyanide\",\n");

    let mut prompter = RecordingPrompter::default();
    assert_eq!(resolver::resolve(&source, &mut prompter).unwrap(), None);
    assert_eq!(prompter.questions.len(), 1);

    assert_eq!(
        std::fs::read_to_string(&primary).unwrap(),
        "C, 1 ,\"CN-\",\"cyanide\",\n"
    );
    assert_eq!(
        std::fs::read_to_string(&legacy).unwrap(),
        "N, 1 ,\"CN-\",\"cyanide\",\n"
    );
    assert!(!CatalogWriter::temp_path(&primary).exists());
}

#[test]
fn test_roundtrip_through_disk_with_extra_entries() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("thermo.elt");

    let mut catalog = Catalog::bootstrap();
    for (element, component) in [
        ("C", "CN-"),
        ("N", "CN-"),
        ("C", "cit-3"),
        ("Ca", "Ca+2"),
        ("U", "UO2+2"),
        ("XX", "O2(aq)"),
    ] {
        catalog.push(CatalogEntry::new(element, component));
    }

    CatalogWriter::new().write(&catalog_path, &catalog).unwrap();
    let loaded = store::load(&catalog_path).unwrap();

    assert_eq!(loaded.sorted_entries(), catalog.sorted_entries());
    let carbon: Vec<&str> = loaded
        .entries_for_element("C")
        .map(|e| e.component.as_str())
        .collect();
    assert_eq!(carbon, vec!["CN-", "cit-3"]);
}

//! # elt-sync
//!
//! A library for keeping component catalogs consistent with the reaction
//! databases that reference them.
//!
//! A reaction database (for example `thermo.dat`) is accompanied by a catalog
//! file (`thermo.elt`) mapping each chemical element to the components built
//! from it. When reactions start referencing components the catalog does not
//! know about, the catalog has to be brought up to date from the registry of
//! components known across all open databases, without ever leaving a
//! truncated or half-merged file behind.
//!
//! ## Features
//!
//! - **Reconciliation**: Finds referenced components missing from the catalog
//!   and merges them from the registry
//! - **Atomic writes**: Catalogs are persisted through a temp file, delete, and rename
//! - **Rollback**: Failed edits restore the in-memory catalog
//! - **Legacy files**: Resolves older catalog extensions and flags ambiguous pairs
//!
//! ## Example
//!
//! ```rust,no_run
//! use elt_sync::{CatalogEntry, ComponentRegistry, Reconciler};
//! use elt_sync::parsing::reaction::TextReactionParser;
//! use elt_sync::prompt::AssumeYes;
//! use std::path::Path;
//!
//! let registry = ComponentRegistry::from_entries([
//!     CatalogEntry::new("N", "SCN-").with_description("thiocyanate"),
//! ]);
//!
//! let reconciler = Reconciler::new(&TextReactionParser, &registry);
//! let result = reconciler
//!     .reconcile(Path::new("thermo.dat"), Path::new("thermo.elt"), &mut AssumeYes)
//!     .unwrap();
//!
//! for formula in &result.added {
//!     println!("added {formula}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog file resolution, loading, encoding, and writing
//! - [`core`]: Catalog entries and the element table
//! - [`sync`]: Reconciliation and component editing
//! - [`parsing`]: Reaction-line parsing
//! - [`prompt`]: User decision points
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod error;
pub mod parsing;
pub mod prompt;
pub mod sync;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::registry::{ComponentLookup, ComponentRegistry, RegistryEntry};
pub use catalog::writer::CatalogWriter;
pub use core::entry::{Catalog, CatalogEntry};
pub use error::{CatalogError, WriteStep};
pub use sync::{ComponentDraft, ComponentEditor, Reconciler, Reconciliation};

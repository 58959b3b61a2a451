//! Keeping a catalog consistent with its reaction source.
//!
//! - [`reconcile`]: find components a reaction source references but the
//!   catalog lacks, resolve them through the registry, merge and persist
//! - [`editor`]: add, replace, and delete components with rollback on failure
//!
//! Each operation works on one catalog at a time and either persists the new
//! state or leaves both the file and the caller's catalog as they were:
//!
//! ```text
//! Loaded -> Mutated -> Persisted
//!                   \-> RolledBack
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use elt_sync::catalog::registry::ComponentRegistry;
//! use elt_sync::parsing::reaction::TextReactionParser;
//! use elt_sync::prompt::AssumeYes;
//! use elt_sync::sync::Reconciler;
//! use std::path::Path;
//!
//! let mut registry = ComponentRegistry::new();
//! registry.load_file(Path::new("other_database.elt")).unwrap();
//!
//! let reconciler = Reconciler::new(&TextReactionParser, &registry);
//! let result = reconciler
//!     .reconcile(Path::new("thermo.dat"), Path::new("thermo.elt"), &mut AssumeYes)
//!     .unwrap();
//! println!("added: {:?}", result.added);
//! ```

pub mod editor;
pub mod reconcile;

pub use editor::{ComponentDraft, ComponentEditor};
pub use reconcile::{Merge, Reconciler, Reconciliation};

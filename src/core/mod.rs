//! Core data types for component catalogs.
//!
//! - [`CatalogEntry`]: one (element, component, description) association
//! - [`Catalog`]: the ordered entries of one catalog file
//! - [`element`]: the canonical element table and the `XX` sentinel
//!
//! A component may be linked to several elements, so the same formula can
//! appear in more than one entry:
//!
//! | Element | Component | Description |
//! |---------|-----------|-------------|
//! | C       | CN-       | cyanide     |
//! | N       | CN-       | cyanide     |
//! | XX      | H2O       | water       |

pub mod element;
pub mod entry;

pub use entry::{sort_formulas, Catalog, CatalogEntry, Removed};

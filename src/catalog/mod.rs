//! Component catalog files.
//!
//! A catalog maps chemical elements to the components (reactant formulas)
//! built from them. It lives next to its reaction source, one line per element:
//!
//! ```text
//! e-, 1 ,"e-","electron",
//! H , 1 ,"H+","hydrogen ion",
//! C , 1 ,"CN-","cyanide",
//! XX, 1 ,"H2O","water",
//! ```
//!
//! - [`resolver`]: which catalog file belongs to a reaction source
//! - [`store`]: loading, with the water / hydrogen ion / electron bootstrap entries
//! - [`codec`]: the text format
//! - [`writer`]: crash-safe persistence
//! - [`registry`]: components known across all open databases
//!
//! ## Example
//!
//! ```rust,no_run
//! use elt_sync::catalog::{resolver, store};
//! use elt_sync::prompt::AssumeNo;
//! use std::path::Path;
//!
//! if let Some(path) = resolver::resolve(Path::new("thermo.dat"), &mut AssumeNo).unwrap() {
//!     let catalog = store::load(&path).unwrap();
//!     for entry in &catalog {
//!         println!("{}\t{}", entry.element, entry.component);
//!     }
//! }
//! ```

pub mod codec;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod writer;

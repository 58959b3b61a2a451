//! Command-line interface for elt-sync.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **resolve**: Print the catalog file that belongs to a reaction source
//! - **sync**: Merge components referenced by a reaction source into its catalog
//! - **list**: Show catalog entries
//! - **add**: Add or replace a component
//! - **delete**: Remove a component
//!
//! ## Usage
//!
//! ```text
//! # Which catalog goes with thermo.dat?
//! elt-sync resolve thermo.dat
//!
//! # Bring thermo.elt up to date, resolving new components from other databases
//! elt-sync sync thermo.dat --registry llnl.elt --registry minteq.elt
//!
//! # Link SCN- to nitrogen and sulfur without prompting
//! elt-sync --yes add thermo.dat --component SCN- --elements N,S
//! ```

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::registry::ComponentRegistry;
use crate::catalog::resolver;
use crate::prompt::Prompter;

pub mod component;
pub mod resolve;
pub mod sync;

#[derive(Parser)]
#[command(name = "elt-sync")]
#[command(version)]
#[command(about = "Keep component/element catalogs in sync with reaction databases")]
#[command(
    long_about = "elt-sync maintains the element catalog (.elt) that accompanies a reaction database.\n\nIt finds components referenced by reactions but missing from the catalog, resolves them against catalogs of other databases, and rewrites the catalog atomically:\n- New catalogs start with water, hydrogen ion and electron\n- Writes go through a temporary file, so the catalog is never left half written\n- Failed edits leave both the file and the loaded catalog untouched"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the catalog path for a reaction source
    Resolve(resolve::ResolveArgs),

    /// Merge missing components into the catalog
    Sync(sync::SyncArgs),

    /// List catalog entries
    List(component::ListArgs),

    /// Add or replace a component
    Add(component::AddArgs),

    /// Delete a component
    Delete(component::DeleteArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Prompter that asks on the terminal, or answers yes when `--yes` was given
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    #[must_use]
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{message} [y/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn report_new_components(&mut self, formulas: &[String]) {
        eprintln!("New components added to the catalog:");
        for formula in formulas {
            eprintln!("  {formula}");
        }
    }
}

/// Catalog path from `--catalog`, or resolved from the reaction source
pub(crate) fn catalog_path_for(
    source: &Path,
    catalog: Option<&PathBuf>,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = catalog {
        return Ok(path.clone());
    }
    resolver::resolve(source, prompter)?
        .ok_or_else(|| anyhow::anyhow!("No catalog selected for {}", source.display()))
}

/// Build a registry from `--registry` files
pub(crate) fn load_registry(paths: &[PathBuf]) -> anyhow::Result<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    for path in paths {
        registry.load_file(path)?;
    }
    Ok(registry)
}

use std::path::PathBuf;

use clap::Args;

use crate::cli::{catalog_path_for, load_registry, OutputFormat, TerminalPrompter};
use crate::parsing::reaction::TextReactionParser;
use crate::sync::{Reconciler, Reconciliation};

#[derive(Args)]
pub struct SyncArgs {
    /// Reaction source file
    #[arg(required = true)]
    pub source: PathBuf,

    /// Catalog file (defaults to the one resolved from the source)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Registry file(s): catalogs of other databases, or JSON entry lists
    #[arg(short, long = "registry", num_args = 1..)]
    pub registries: Vec<PathBuf>,
}

pub fn run(
    args: SyncArgs,
    format: OutputFormat,
    prompter: &mut TerminalPrompter,
) -> anyhow::Result<()> {
    let catalog_path = catalog_path_for(&args.source, args.catalog.as_ref(), prompter)?;
    let registry = load_registry(&args.registries)?;

    let reconciler = Reconciler::new(&TextReactionParser, &registry);
    let result = reconciler.reconcile(&args.source, &catalog_path, prompter)?;

    match format {
        OutputFormat::Text => print_text(&catalog_path, &result),
        OutputFormat::Json => print_json(&catalog_path, &result)?,
        OutputFormat::Tsv => print_tsv(&result),
    }

    Ok(())
}

fn print_text(catalog_path: &std::path::Path, result: &Reconciliation) {
    println!("Catalog: {}", catalog_path.display());
    if result.created {
        println!("  Created new catalog");
    }
    println!("  Entries: {}", result.catalog.len());

    if result.added.is_empty() {
        println!("  Up to date");
    } else {
        println!("  Added: {}", result.added.join(", "));
    }
    if !result.unresolved.is_empty() {
        println!("  Not in registry: {}", result.unresolved.join(", "));
    }
}

fn print_json(catalog_path: &std::path::Path, result: &Reconciliation) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "catalog": catalog_path.display().to_string(),
        "created": result.created,
        "entries": result.catalog.len(),
        "added": result.added,
        "unresolved": result.unresolved,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(result: &Reconciliation) {
    println!("status\tcomponent");
    for formula in &result.added {
        println!("added\t{formula}");
    }
    for formula in &result.unresolved {
        println!("unresolved\t{formula}");
    }
}

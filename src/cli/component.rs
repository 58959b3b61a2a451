use std::path::PathBuf;

use clap::Args;

use crate::catalog::store;
use crate::cli::{catalog_path_for, load_registry, OutputFormat, TerminalPrompter};
use crate::core::entry::CatalogEntry;
use crate::parsing::reaction::TextReactionParser;
use crate::sync::{ComponentDraft, ComponentEditor, Reconciler};

#[derive(Args)]
pub struct ListArgs {
    /// Reaction source file
    #[arg(required = true)]
    pub source: PathBuf,

    /// Catalog file (defaults to the one resolved from the source)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Only show entries for this component
    #[arg(long)]
    pub component: Option<String>,

    /// Only show entries linked to this element
    #[arg(long)]
    pub element: Option<String>,

    /// List distinct component formulas instead of entries
    #[arg(long, conflicts_with_all = ["component", "element"])]
    pub components: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Reaction source file
    #[arg(required = true)]
    pub source: PathBuf,

    /// Component formula (e.g. "SCN-")
    #[arg(long, required = true)]
    pub component: String,

    /// Comma-separated element symbols the component is linked to (e.g. "N,S")
    #[arg(long, required = true)]
    pub elements: String,

    /// Description text
    #[arg(long)]
    pub description: Option<String>,

    /// Catalog file (defaults to the one resolved from the source)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Registry file(s) used to reconcile the catalog first
    #[arg(short, long = "registry", num_args = 1..)]
    pub registries: Vec<PathBuf>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Reaction source file
    #[arg(required = true)]
    pub source: PathBuf,

    /// Component formula to remove
    #[arg(long, required = true)]
    pub component: String,

    /// Catalog file (defaults to the one resolved from the source)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

pub fn run_list(
    args: ListArgs,
    format: OutputFormat,
    prompter: &mut TerminalPrompter,
) -> anyhow::Result<()> {
    let catalog_path = catalog_path_for(&args.source, args.catalog.as_ref(), prompter)?;
    let catalog = store::load(&catalog_path)?;

    if args.components {
        print_components(&catalog.components(), format)?;
        return Ok(());
    }

    let entries: Vec<&CatalogEntry> = catalog
        .iter()
        .filter(|e| args.component.as_ref().map_or(true, |c| &e.component == c))
        .filter(|e| args.element.as_ref().map_or(true, |el| &e.element == el))
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{:<4} {:<24} DESCRIPTION", "EL", "COMPONENT");
            for entry in &entries {
                println!(
                    "{:<4} {:<24} {}",
                    entry.element,
                    entry.component,
                    entry.description.as_deref().unwrap_or("-")
                );
            }
            println!("\nTotal: {} entries", entries.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Tsv => {
            println!("element\tcomponent\tdescription");
            for entry in &entries {
                println!(
                    "{}\t{}\t{}",
                    entry.element,
                    entry.component,
                    entry.description.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

fn print_components(formulas: &[&str], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for formula in formulas {
                println!("{formula}");
            }
            println!("\nTotal: {} components", formulas.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(formulas)?);
        }
        OutputFormat::Tsv => {
            println!("component");
            for formula in formulas {
                println!("{formula}");
            }
        }
    }
    Ok(())
}

pub fn run_add(
    args: AddArgs,
    format: OutputFormat,
    prompter: &mut TerminalPrompter,
) -> anyhow::Result<()> {
    let catalog_path = catalog_path_for(&args.source, args.catalog.as_ref(), prompter)?;
    let registry = load_registry(&args.registries)?;

    let reconciler = Reconciler::new(&TextReactionParser, &registry);
    let editor = ComponentEditor::new(&reconciler, &catalog_path);

    let mut draft = ComponentDraft::new(args.component.trim(), &args.elements);
    if let Some(description) = &args.description {
        draft = draft.with_description(description);
    }

    let mut catalog = store::load(&catalog_path)?;
    let saved = editor.save(&mut catalog, &draft, &args.source, prompter)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "catalog": catalog_path.display().to_string(),
                "component": draft.formula,
                "saved": saved,
                "elements": catalog.elements_for(&draft.formula),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            if saved {
                println!(
                    "Saved {} linked to {}",
                    draft.formula,
                    catalog.elements_for(&draft.formula).join(", ")
                );
            } else {
                println!("Cancelled, {} unchanged", catalog_path.display());
            }
        }
    }

    Ok(())
}

pub fn run_delete(
    args: DeleteArgs,
    format: OutputFormat,
    prompter: &mut TerminalPrompter,
) -> anyhow::Result<()> {
    let catalog_path = catalog_path_for(&args.source, args.catalog.as_ref(), prompter)?;
    if !catalog_path.exists() {
        anyhow::bail!("Catalog {} does not exist", catalog_path.display());
    }

    let registry: Vec<CatalogEntry> = Vec::new();
    let reconciler = Reconciler::new(&TextReactionParser, &registry);
    let editor = ComponentEditor::new(&reconciler, &catalog_path);

    let mut catalog = store::load(&catalog_path)?;
    let removed = editor.delete(&mut catalog, &args.component)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "catalog": catalog_path.display().to_string(),
                "component": args.component,
                "removed": removed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            if removed == 0 {
                println!("{} is not in {}", args.component, catalog_path.display());
            } else {
                println!("Deleted {} ({} entries)", args.component, removed);
            }
        }
    }

    Ok(())
}

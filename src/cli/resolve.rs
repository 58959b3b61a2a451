use std::path::PathBuf;

use clap::Args;

use crate::catalog::resolver;
use crate::cli::{OutputFormat, TerminalPrompter};

#[derive(Args)]
pub struct ResolveArgs {
    /// Reaction source file
    #[arg(required = true)]
    pub source: PathBuf,
}

pub fn run(
    args: ResolveArgs,
    format: OutputFormat,
    prompter: &mut TerminalPrompter,
) -> anyhow::Result<()> {
    let resolved = resolver::resolve(&args.source, prompter)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "source": args.source.display().to_string(),
                "catalog": resolved.as_ref().map(|p| p.display().to_string()),
                "exists": resolved.as_ref().is_some_and(|p| p.exists()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => match resolved {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No catalog selected for {}", args.source.display()),
        },
    }

    Ok(())
}

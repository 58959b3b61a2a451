use clap::Parser;
use tracing_subscriber::EnvFilter;

use elt_sync::cli::{self, TerminalPrompter};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("elt_sync=debug,info")
    } else {
        EnvFilter::new("elt_sync=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let mut prompter = TerminalPrompter::new(cli.yes);

    match cli.command {
        cli::Commands::Resolve(args) => {
            cli::resolve::run(args, cli.format, &mut prompter)?;
        }
        cli::Commands::Sync(args) => {
            cli::sync::run(args, cli.format, &mut prompter)?;
        }
        cli::Commands::List(args) => {
            cli::component::run_list(args, cli.format, &mut prompter)?;
        }
        cli::Commands::Add(args) => {
            cli::component::run_add(args, cli.format, &mut prompter)?;
        }
        cli::Commands::Delete(args) => {
            cli::component::run_delete(args, cli.format, &mut prompter)?;
        }
    }

    Ok(())
}

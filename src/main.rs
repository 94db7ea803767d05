//! bpselect - Main Entry Point
//!
//! Survey cleaning and windowed best-subset model selection for the
//! blood-pressure study, as a CLI.

use bpselect::cli::{cmd_info, cmd_search, Cli, Commands};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bpselect=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            data,
            target,
            model,
            criterion,
            test_split,
            seed,
            drop,
            max_depth,
            n_estimators,
            model_seed,
            verbosity,
            output,
        } => {
            cmd_search(
                &data,
                &target,
                &model,
                &criterion,
                test_split,
                seed,
                &drop,
                max_depth,
                n_estimators,
                model_seed,
                verbosity,
                output.as_deref(),
            )?;
        }
        Commands::Info { data } => {
            cmd_info(&data)?;
        }
    }

    Ok(())
}

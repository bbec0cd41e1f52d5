//! Command implementations

mod catalogue;
mod chart;
mod config;
mod observe;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(cli.config.as_deref(), cli.overrides())?;
    tracing::debug!(
        catalogue = %config.catalogue_path.value.display(),
        lang = %config.lang.value,
        limiting_magnitude = config.limiting_magnitude.value,
        "Resolved configuration"
    );

    match cli.command {
        Commands::Chart(args) => chart::execute(args, &config, &output).await,
        Commands::Observe(args) => observe::execute(args, &config, &output),
        Commands::Catalogue(args) => catalogue::execute(args, &config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}

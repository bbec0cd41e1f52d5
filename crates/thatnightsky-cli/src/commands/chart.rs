//! Chart command implementation

use super::observe::{show_sky, write_json};
use crate::cli::ChartArgs;
use crate::output::OutputWriter;
use crate::output_types::ChartOutput;
use anyhow::{Context, Result};
use thatnightsky_astro::SkySettings;
use thatnightsky_core::config::{LayeredConfig, Secrets};
use thatnightsky_core::models::QueryInput;
use thatnightsky_pipeline::{ChartPlan, NightSkyPipeline};

pub async fn execute(args: ChartArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let lang = config.lang.value;
    let secrets = Secrets::from_env();

    let pipeline = NightSkyPipeline::from_config(config, &secrets, lang)
        .context("Failed to prepare the chart pipeline")?;

    if args.narrative && !pipeline.has_narrator() {
        output.warning("ANTHROPIC_API_KEY is not set, the narrative falls back to a short line");
    }

    let plan = ChartPlan::new(QueryInput::new(&args.address, &args.when))
        .with_lang(lang)
        .with_narrative(args.narrative)
        .with_settings(SkySettings::from_config(config));

    let result = pipeline
        .execute(&plan)
        .await
        .with_context(|| format!("Failed to chart '{}' at '{}'", args.address, args.when))?;

    let written_to = match &args.output {
        Some(path) => {
            write_json(path, &result)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    if output.is_json() {
        output.result(ChartOutput {
            summary: result.summary(),
            constellations: result.sky.constellation_positions().to_vec(),
            narrative: result.narrative.clone(),
            written_to,
        })?;
        return Ok(());
    }

    show_sky(&result.sky, output);

    if let Some(narrative) = &result.narrative {
        output.section("That Night");
        output.text(narrative);
    }

    if let Some(path) = written_to {
        output.success(format!("Wrote chart data to {}", path));
    }

    Ok(())
}

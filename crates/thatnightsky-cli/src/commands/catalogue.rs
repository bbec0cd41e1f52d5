//! Catalogue command implementation

use crate::cli::{CatalogueArgs, CatalogueCommand, ConvertArgs};
use crate::output::OutputWriter;
use crate::output_types::{CatalogueOutput, ConvertOutput};
use anyhow::{Context, Result};
use thatnightsky_catalogue::{convert_hipparcos, load_catalogue, CataloguePaths, CatalogueSummary};
use thatnightsky_core::config::LayeredConfig;

pub fn execute(args: CatalogueArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    match args.command {
        CatalogueCommand::Inspect => inspect(config, output),
        CatalogueCommand::Convert(args) => convert(args, output),
    }
}

fn inspect(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let paths = CataloguePaths::from_config(config);
    let catalogue = load_catalogue(&paths).context("Failed to load the star catalogue")?;
    let summary = CatalogueSummary::from_catalogue(&catalogue);

    if output.is_json() {
        return output.result(CatalogueOutput {
            catalogue_path: paths.stars.display().to_string(),
            catalogue_format: format!("{:?}", paths.format),
            constellation_path: paths.constellations.display().to_string(),
            summary,
        });
    }

    output.section("Catalogue");
    output.kv("Stars file", paths.stars.display());
    output.kv("Format", format!("{:?}", paths.format));
    output.kv("Constellation file", paths.constellations.display());

    output.section("Contents");
    output.kv("Stars", summary.stars);
    output.kv("With magnitude", summary.stars_with_magnitude);
    output.kv(
        format!("Naked eye (mag <= {})", CatalogueSummary::NAKED_EYE_LIMIT),
        summary.naked_eye_stars,
    );
    output.kv("Constellations", summary.constellations);
    output.kv("Lines", summary.lines);

    if summary.dropped_lines > 0 {
        output.warning(format!(
            "{} constellation lines reference stars missing from the catalogue",
            summary.dropped_lines
        ));
    }

    Ok(())
}

fn convert(args: ConvertArgs, output: &OutputWriter) -> Result<()> {
    let stars = convert_hipparcos(&args.src, &args.dst)
        .with_context(|| format!("Failed to convert {}", args.src.display()))?;

    if output.is_json() {
        return output.result(ConvertOutput {
            src: args.src.display().to_string(),
            dst: args.dst.display().to_string(),
            stars,
        });
    }

    output.success(format!(
        "Converted {} stars from {} to {}",
        stars,
        args.src.display(),
        args.dst.display()
    ));
    Ok(())
}

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use thatnightsky_core::config::{parse_catalogue_format, CatalogueFormat, CliConfigOverrides};
use thatnightsky_core::models::Lang;

/// ThatNightSky - The night sky over a place and moment
#[derive(Parser, Debug)]
#[command(name = "thatnightsky")]
#[command(about = "Compute the night sky over a place and moment", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub resources: ResourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Catalogue resource overrides shared by every command
#[derive(Args, Debug, Default)]
pub struct ResourceArgs {
    /// Star catalogue file
    #[arg(long, global = true, value_name = "PATH")]
    pub catalogue: Option<PathBuf>,

    /// Star catalogue format (binary or hipparcos)
    #[arg(long, global = true, value_parser = parse_catalogue_format)]
    pub catalogue_format: Option<CatalogueFormat>,

    /// Constellation line file
    #[arg(long, global = true, value_name = "PATH")]
    pub constellations: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chart the sky over an address at a local time
    Chart(ChartArgs),

    /// Chart the sky for explicit coordinates and a UTC instant
    Observe(ObserveArgs),

    /// Inspect or convert the star catalogue
    Catalogue(CatalogueArgs),

    /// Show the resolved configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct ChartArgs {
    /// Free-text address (e.g. "부산광역시 가야동")
    pub address: String,

    /// Local date and time (e.g. "1995-01-15 00:00")
    #[arg(long)]
    pub when: String,

    /// Ask for a short narrative paragraph
    #[arg(long)]
    pub narrative: bool,

    /// Language for geocoding and narrative (ko or en)
    #[arg(long)]
    pub lang: Option<Lang>,

    /// Faintest magnitude to include
    #[arg(long, allow_hyphen_values = true)]
    pub limiting_magnitude: Option<f64>,

    /// Write the full result as JSON to this file
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ObserveArgs {
    /// Latitude in decimal degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Observation instant (RFC 3339, e.g. 1995-01-14T15:00:00Z)
    #[arg(long)]
    pub at: DateTime<Utc>,

    /// Faintest magnitude to include
    #[arg(long, allow_hyphen_values = true)]
    pub limiting_magnitude: Option<f64>,

    /// Write the sky as JSON to this file
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CatalogueArgs {
    #[command(subcommand)]
    pub command: CatalogueCommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogueCommand {
    /// Load the catalogue and show its contents
    Inspect,

    /// Convert a Hipparcos main catalogue text file to the binary format
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Hipparcos text file (hip_main.dat)
    pub src: PathBuf,

    /// Binary catalogue to write
    pub dst: PathBuf,
}

impl Cli {
    /// Configuration overrides given on the command line
    pub fn overrides(&self) -> CliConfigOverrides {
        let (limiting_magnitude, lang) = match &self.command {
            Commands::Chart(args) => (args.limiting_magnitude, args.lang),
            Commands::Observe(args) => (args.limiting_magnitude, None),
            _ => (None, None),
        };

        CliConfigOverrides {
            catalogue_path: self.resources.catalogue.clone(),
            catalogue_format: self.resources.catalogue_format,
            constellation_path: self.resources.constellations.clone(),
            limiting_magnitude,
            lang,
        }
    }
}

use console::style;
use std::fmt;
use thatnightsky_core::error::NightSkyError;

/// Error report with suggestions, shown when a command fails
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    /// Build a report from a command failure
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let base = Self::new(err.to_string());
        let base = match err.chain().nth(1) {
            Some(cause) => base.with_context(cause.to_string()),
            None => base,
        };

        match err.chain().find_map(|e| e.downcast_ref::<NightSkyError>()) {
            Some(cause) => add_suggestions(base, cause),
            None => base,
        }
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn add_suggestions(error: CliError, cause: &NightSkyError) -> CliError {
    match cause {
        NightSkyError::CatalogueLoad { .. } => error
            .with_suggestion(
                "Check --catalogue and --constellations (or THATNIGHTSKY_CATALOGUE_PATH)",
            )
            .with_suggestion(concat!(
                "Convert the Hipparcos text catalogue with ",
                "'thatnightsky catalogue convert hip_main.dat hip_main.bin'"
            ))
            .with_help("thatnightsky catalogue --help"),
        NightSkyError::InvalidTime { .. } => error
            .with_suggestion("Use a local time like \"1995-01-15 00:00\"")
            .with_suggestion("Set THATNIGHTSKY_UTC_OFFSET if the place is outside UTC+09:00"),
        NightSkyError::Geocode { .. } => error
            .with_suggestion("Try a fuller address, including the city")
            .with_suggestion("Set VWORLD_API_KEY for Korean road and parcel addresses")
            .with_suggestion("Use 'thatnightsky observe --lat --lon --at' with known coordinates"),
        NightSkyError::InvalidObserver { .. } => error
            .with_suggestion("Latitude must be within [-90, 90] and longitude within [-180, 180]"),
        NightSkyError::ConfigInvalid { .. } | NightSkyError::ConfigMissing { .. } => {
            error.with_help("thatnightsky config")
        }
        _ => error,
    }
}

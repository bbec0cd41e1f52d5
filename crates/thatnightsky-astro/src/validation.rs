use crate::compute::SkySettings;
use thatnightsky_core::error::{NightSkyError, Result};
use thatnightsky_core::models::{CatalogueStar, ObserverContext};

/// Reason a single star was left out of a computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarIssue {
    /// RA or Dec is NaN or infinite
    NonFiniteInput,
    /// The transform or projection produced NaN or infinity
    NonFiniteResult,
}

impl std::fmt::Display for StarIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StarIssue::NonFiniteInput => write!(f, "non-finite equatorial coordinates"),
            StarIssue::NonFiniteResult => write!(f, "non-finite computed position"),
        }
    }
}

/// Fail fast on an observer that cannot be computed
pub fn validate_observer(observer: &ObserverContext) -> Result<()> {
    observer.validate()
}

/// Check computation settings
pub fn validate_settings(settings: &SkySettings) -> Result<()> {
    if settings.limiting_magnitude.is_nan() {
        return Err(NightSkyError::ConfigInvalid {
            key: "limiting_magnitude".to_string(),
            reason: "Limiting magnitude must be a number".to_string(),
        });
    }

    if !settings.chart_radius.is_finite() || settings.chart_radius <= 0.0 {
        return Err(NightSkyError::ConfigInvalid {
            key: "chart_radius".to_string(),
            reason: format!("Chart radius must be positive, got {}", settings.chart_radius),
        });
    }

    Ok(())
}

/// Check a catalogue star before transforming it
pub fn check_star(star: &CatalogueStar) -> std::result::Result<(), StarIssue> {
    if star.ra_deg.is_finite() && star.dec_deg.is_finite() {
        Ok(())
    } else {
        Err(StarIssue::NonFiniteInput)
    }
}

/// Check computed values before emitting them
pub fn check_result(values: &[f64]) -> std::result::Result<(), StarIssue> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(StarIssue::NonFiniteResult)
    }
}

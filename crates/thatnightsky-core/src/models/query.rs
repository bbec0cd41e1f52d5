use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NightSkyError, Result};

/// Raw user input. Not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInput {
    /// Free-text address ("부산광역시 가야동")
    pub address: String,

    /// Local date-time string ("1995-01-15 00:00")
    pub when: String,
}

impl QueryInput {
    /// Create a new query
    pub fn new(address: impl Into<String>, when: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            when: when.into(),
        }
    }
}

/// Language used for user-facing text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ko,
    En,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Ko => "ko",
            Lang::En => "en",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = NightSkyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "kor" | "korean" => Ok(Lang::Ko),
            "en" | "eng" | "english" => Ok(Lang::En),
            _ => Err(NightSkyError::ConfigInvalid {
                key: "lang".to_string(),
                reason: format!("Unsupported language: {}. Use ko or en", s),
            }),
        }
    }
}

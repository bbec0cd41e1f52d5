//! Reader for Stellarium `constellationship.fab` line files
//!
//! Each line is `ABBR N id1 id2 id3 id4 ...`, where consecutive identifiers
//! form `N` segments.

use std::fs;
use std::path::Path;
use thatnightsky_core::error::{NightSkyError, Result};
use thatnightsky_core::models::ConstellationLine;

/// Read a constellation line file from disk
pub fn read_constellationship(path: &Path) -> Result<Vec<ConstellationLine>> {
    let text = fs::read_to_string(path).map_err(|e| NightSkyError::catalogue(path, e.to_string()))?;
    parse_constellationship(&text, path)
}

/// Parse constellation segments in file order
pub fn parse_constellationship(text: &str, path: &Path) -> Result<Vec<ConstellationLine>> {
    let mut lines = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let content = raw.split('#').next().unwrap_or_default();
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.len() < 4 {
            continue;
        }

        let name = tokens[0];
        let declared: usize = parse_token(tokens[1], line_no, path)?;
        let ids = tokens[2..]
            .iter()
            .map(|token| parse_token::<u32>(token, line_no, path))
            .collect::<Result<Vec<_>>>()?;

        let available = ids.len() / 2;
        if declared != available || ids.len() % 2 != 0 {
            tracing::warn!(
                constellation = name,
                line = line_no,
                declared,
                available,
                "Segment count mismatch, using the pairs present"
            );
        }

        lines.extend(
            ids.chunks_exact(2)
                .map(|pair| ConstellationLine::new(name, pair[0], pair[1])),
        );
    }

    Ok(lines)
}

fn parse_token<T: std::str::FromStr>(token: &str, line_no: usize, path: &Path) -> Result<T> {
    token.parse().map_err(|_| {
        NightSkyError::catalogue(path, format!("line {}: '{}' is not an integer", line_no, token))
    })
}

//! Reader for the Hipparcos main catalogue (`hip_main.dat`)

use std::fs;
use std::path::Path;
use thatnightsky_core::error::{NightSkyError, Result};
use thatnightsky_core::models::CatalogueStar;

const FIELD_HIP: usize = 1;
const FIELD_VMAG: usize = 5;
const FIELD_RA_DEG: usize = 8;
const FIELD_DEC_DEG: usize = 9;

/// Read `hip_main.dat` from disk
pub fn read_hipparcos(path: &Path) -> Result<Vec<CatalogueStar>> {
    let text = fs::read_to_string(path).map_err(|e| NightSkyError::catalogue(path, e.to_string()))?;
    parse_hipparcos(&text, path)
}

/// Parse the `|`-separated Hipparcos records
///
/// Entries without RA/Dec are skipped. A blank V magnitude becomes NaN so the
/// star never passes a magnitude filter.
pub fn parse_hipparcos(text: &str, path: &Path) -> Result<Vec<CatalogueStar>> {
    let mut stars = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        if fields.len() <= FIELD_DEC_DEG {
            return Err(NightSkyError::catalogue(
                path,
                format!("line {}: expected at least 10 fields, found {}", line_no, fields.len()),
            ));
        }

        let ra = fields[FIELD_RA_DEG];
        let dec = fields[FIELD_DEC_DEG];
        if ra.is_empty() || dec.is_empty() {
            skipped += 1;
            continue;
        }

        let id: u32 = parse_field(fields[FIELD_HIP], "HIP", line_no, path)?;
        let ra_deg: f64 = parse_field(ra, "RAdeg", line_no, path)?;
        let dec_deg: f64 = parse_field(dec, "DEdeg", line_no, path)?;
        let magnitude = match fields[FIELD_VMAG] {
            "" => f64::NAN,
            vmag => parse_field(vmag, "Vmag", line_no, path)?,
        };

        stars.push(CatalogueStar::new(id, ra_deg, dec_deg, magnitude));
    }

    if skipped > 0 {
        tracing::debug!(
            skipped,
            path = %path.display(),
            "Skipped Hipparcos entries without position"
        );
    }

    Ok(stars)
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    name: &str,
    line_no: usize,
    path: &Path,
) -> Result<T> {
    value.parse().map_err(|_| {
        NightSkyError::catalogue(
            path,
            format!("line {}: invalid {} value '{}'", line_no, name, value),
        )
    })
}

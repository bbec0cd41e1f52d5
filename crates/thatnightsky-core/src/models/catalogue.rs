use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Catalogue identifier (Hipparcos number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(pub u32);

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HIP {}", self.0)
    }
}

/// Static catalogue data for a single star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogueStar {
    /// Catalogue identifier
    pub id: StarId,

    /// Right ascension (degrees, J2000)
    pub ra_deg: f64,

    /// Declination (degrees, J2000)
    pub dec_deg: f64,

    /// Apparent visual magnitude (NaN when the catalogue has none)
    pub magnitude: f64,
}

impl CatalogueStar {
    pub fn new(id: u32, ra_deg: f64, dec_deg: f64, magnitude: f64) -> Self {
        Self {
            id: StarId(id),
            ra_deg,
            dec_deg,
            magnitude,
        }
    }
}

/// A single constellation line segment between two catalogue stars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstellationLine {
    /// IAU abbreviation ("Ori", "UMa", ...)
    pub constellation: String,

    /// Starting star
    pub from: StarId,

    /// Ending star
    pub to: StarId,
}

impl ConstellationLine {
    pub fn new(constellation: impl Into<String>, from: u32, to: u32) -> Self {
        Self {
            constellation: constellation.into(),
            from: StarId(from),
            to: StarId(to),
        }
    }
}

/// In-memory star catalogue with constellation segments
///
/// Stars keep their file order. Segments always reference stars present in
/// the catalogue.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    stars: Vec<CatalogueStar>,
    index: HashMap<StarId, usize>,
    lines: Vec<ConstellationLine>,
    dropped_lines: usize,
}

impl Catalogue {
    /// Build a catalogue, dropping segments that reference unknown stars
    pub fn new(stars: Vec<CatalogueStar>, lines: Vec<ConstellationLine>) -> Self {
        let mut index = HashMap::with_capacity(stars.len());
        for (position, star) in stars.iter().enumerate() {
            if index.contains_key(&star.id) {
                tracing::warn!(
                    id = star.id.0,
                    "Duplicate catalogue identifier, keeping the first entry"
                );
                continue;
            }
            index.insert(star.id, position);
        }

        let total = lines.len();
        let lines: Vec<ConstellationLine> = lines
            .into_iter()
            .filter(|line| {
                let known = index.contains_key(&line.from) && index.contains_key(&line.to);
                if !known {
                    tracing::warn!(
                        constellation = %line.constellation,
                        from = line.from.0,
                        to = line.to.0,
                        "Dropping constellation segment with unknown star"
                    );
                }
                known
            })
            .collect();
        let dropped_lines = total - lines.len();

        Self {
            stars,
            index,
            lines,
            dropped_lines,
        }
    }

    /// All stars in catalogue order
    pub fn stars(&self) -> &[CatalogueStar] {
        &self.stars
    }

    /// Valid constellation segments
    pub fn lines(&self) -> &[ConstellationLine] {
        &self.lines
    }

    /// Look up a star by identifier
    pub fn get(&self, id: StarId) -> Option<&CatalogueStar> {
        self.index.get(&id).map(|&position| &self.stars[position])
    }

    pub fn contains(&self, id: StarId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Number of segments dropped at construction because of unknown stars
    pub fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }

    /// Number of distinct constellations with at least one segment
    pub fn constellation_count(&self) -> usize {
        let mut names: Vec<&str> = self.lines.iter().map(|l| l.constellation.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}

use std::fmt::{self, Display};

use geo::{Coord, Point};
use serde::Serialize;
use tracing::warn;

/// A coordinate the way the AIP prints it: `DDMMSS` north and `DDDMMSS` east.
///
/// Both halves stay strings until they are needed in decimal degrees, since the
/// source text is not always well-formed.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct DmsCoordinate {
    pub n: String,
    pub e: String,
}

fn parse_part(part: Option<&str>) -> Option<f64> {
    match part? {
        "" => Some(0.0),
        part => part.parse().ok(),
    }
}

impl DmsCoordinate {
    pub fn new(n: impl Into<String>, e: impl Into<String>) -> Self {
        Self {
            n: n.into(),
            e: e.into(),
        }
    }

    /// Converts to decimal degrees (`x` = longitude, `y` = latitude).
    ///
    /// Returns `None` for fields shorter than five characters or non-numeric parts.
    /// A dot right after the minutes means decimal minutes, and a six character
    /// east field only carries two degree digits.
    pub fn to_decimal(&self) -> Option<Coord> {
        let (n, e) = (self.n.as_str(), self.e.as_str());
        if n.len() < 5 || e.len() < 5 {
            warn!("misformatted coordinate {self}");
            return None;
        }

        let ndeg = parse_part(n.get(0..2))?;
        let (nmin, nsec) = if n.as_bytes()[4] == b'.' {
            (parse_part(n.get(2..))?, 0.0)
        } else {
            (parse_part(n.get(2..4))?, parse_part(n.get(4..))?)
        };

        let (edeg, emin, esec) = if e.len() == 6 {
            (
                parse_part(e.get(0..2))?,
                parse_part(e.get(2..4))?,
                parse_part(e.get(4..))?,
            )
        } else if e.as_bytes().get(5) == Some(&b'.') {
            (parse_part(e.get(0..3))?, parse_part(e.get(3..))?, 0.0)
        } else {
            (
                parse_part(e.get(0..3))?,
                parse_part(e.get(3..5))?,
                parse_part(e.get(5..))?,
            )
        };

        Some(Coord {
            x: edeg + emin / 60.0 + esec / 3600.0,
            y: ndeg + nmin / 60.0 + nsec / 3600.0,
        })
    }

    pub fn from_decimal(coord: Coord) -> Self {
        coord.to_dms()
    }

    /// `DD:MM:SS N  DDD:MM:SS E`
    pub fn openair_fmt(&self) -> String {
        let n = |range: std::ops::Range<usize>| self.n.get(range).unwrap_or_default();
        let e = |range: std::ops::Range<usize>| self.e.get(range).unwrap_or_default();
        format!(
            "{}:{}:{} N  {}:{}:{} E",
            n(0..2),
            n(2..4),
            self.n.get(4..).unwrap_or_default(),
            e(0..3),
            e(3..5),
            self.e.get(5..).unwrap_or_default()
        )
    }
}

impl Display for DmsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}N {}E", self.n, self.e)
    }
}

/// Splits a decimal angle into whole degrees, minutes and seconds, rounding to
/// the nearest second and carrying into minutes and degrees.
fn deg_min_sec(decimal: f64) -> (u32, u32, u32) {
    let total = (decimal.abs() * 3600.0).round() as u32;
    (total / 3600, total % 3600 / 60, total % 60)
}

pub trait DegMinSecExt {
    fn lat_deg_min_sec_fmt(&self) -> String;
    fn lng_deg_min_sec_fmt(&self) -> String;
    fn to_dms(&self) -> DmsCoordinate {
        DmsCoordinate::new(self.lat_deg_min_sec_fmt(), self.lng_deg_min_sec_fmt())
    }
}

impl DegMinSecExt for Coord {
    fn lat_deg_min_sec_fmt(&self) -> String {
        let (deg, min, sec) = deg_min_sec(self.y);
        format!("{deg:02}{min:02}{sec:02}")
    }

    fn lng_deg_min_sec_fmt(&self) -> String {
        let (deg, min, sec) = deg_min_sec(self.x);
        format!("{deg:03}{min:02}{sec:02}")
    }
}

impl DegMinSecExt for Point {
    fn lat_deg_min_sec_fmt(&self) -> String {
        self.0.lat_deg_min_sec_fmt()
    }

    fn lng_deg_min_sec_fmt(&self) -> String {
        self.0.lng_deg_min_sec_fmt()
    }
}

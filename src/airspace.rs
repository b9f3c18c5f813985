use std::fmt::{self, Display};

use geo::Coord;
use serde::ser::SerializeMap as _;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::coordinate::DmsCoordinate;
use crate::document::Country;
use crate::polygon;
use crate::units::{fl2ft, ft2m};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AirspaceClass {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    /// Danger area.
    Q,
    /// Restricted area.
    R,
    /// Prohibited area.
    P,
    /// Air sport box, activated on request.
    Luftsport,
}

impl AirspaceClass {
    /// Class letter as written next to `Class:` in the text.
    pub fn from_marker(marker: &str) -> Option<Self> {
        Some(match marker {
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            "D" => Self::D,
            "E" => Self::E,
            "F" => Self::F,
            "G" => Self::G,
            "Q" => Self::Q,
            "R" => Self::R,
            "P" => Self::P,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::Q => "Q",
            Self::R => "R",
            Self::P => "P",
            Self::Luftsport => "Luftsport",
        }
    }
}

impl Display for AirspaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AirspaceClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Vertical limit in feet AMSL, remembering the flight level it was given as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Altitude {
    pub feet: i64,
    pub flight_level: Option<u32>,
}

impl Altitude {
    pub const GROUND: Self = Self::feet(0);
    pub const UNLIMITED: Self = Self::feet(999_999);

    pub const fn feet(feet: i64) -> Self {
        Self {
            feet,
            flight_level: None,
        }
    }

    pub fn flight_level(fl: u32) -> Self {
        Self {
            feet: fl2ft(fl),
            flight_level: Some(fl),
        }
    }

    pub fn meters(&self) -> i64 {
        ft2m(self.feet)
    }
}

/// Temporary validity, one entry per activation window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Period {
    pub dates_from: Vec<String>,
    pub dates_until: Vec<String>,
    pub time_from: Option<String>,
    pub time_until: Option<String>,
}

impl Period {
    pub fn is_empty(&self) -> bool {
        self.dates_from.is_empty()
            && self.dates_until.is_empty()
            && self.time_from.is_none()
            && self.time_until.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AirspaceProperties {
    pub name: String,
    pub class: AirspaceClass,
    pub floor: Altitude,
    pub ceiling: Altitude,
    pub source: String,
    pub country: Country,
    pub notam_only: bool,
    pub amc_only: bool,
    pub temporary: bool,
    pub frequency: Option<String>,
    pub period: Period,
}

impl Serialize for AirspaceProperties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("class", &self.class)?;
        map.serialize_entry("from (ft amsl)", &self.floor.feet)?;
        map.serialize_entry("to (ft amsl)", &self.ceiling.feet)?;
        map.serialize_entry("from (m amsl)", &self.floor.meters())?;
        map.serialize_entry("to (m amsl)", &self.ceiling.meters())?;
        if let Some(fl) = self.floor.flight_level {
            map.serialize_entry("from (fl)", &fl)?;
        }
        if let Some(fl) = self.ceiling.flight_level {
            map.serialize_entry("to (fl)", &fl)?;
        }
        map.serialize_entry("source_href", &self.source)?;
        map.serialize_entry("country", &self.country)?;
        if self.notam_only {
            map.serialize_entry("notam_only", &true)?;
        }
        if self.amc_only {
            map.serialize_entry("amc_only", &true)?;
        }
        if self.temporary {
            map.serialize_entry("temporary", &true)?;
        }
        if let Some(frequency) = &self.frequency {
            map.serialize_entry("frequency", frequency)?;
        }
        if !self.period.dates_from.is_empty() {
            map.serialize_entry("Date from", &self.period.dates_from)?;
        }
        if !self.period.dates_until.is_empty() {
            map.serialize_entry("Date until", &self.period.dates_until)?;
        }
        if let Some(time) = &self.period.time_from {
            map.serialize_entry("Time from (UTC)", time)?;
        }
        if let Some(time) = &self.period.time_until {
            map.serialize_entry("Time until (UTC)", time)?;
        }
        map.end()
    }
}

impl AirspaceProperties {
    pub fn to_json(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// A finalized airspace with its ring in both DMS and decimal degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Airspace {
    pub properties: AirspaceProperties,
    pub geometry: Vec<DmsCoordinate>,
    pub geometry_ll: Vec<Coord>,
    pub area: f64,
}

impl Airspace {
    pub fn new(properties: AirspaceProperties, geometry: Vec<DmsCoordinate>) -> Self {
        let geometry_ll: Vec<_> = geometry.iter().filter_map(DmsCoordinate::to_decimal).collect();
        let area = polygon::area(&geometry_ll);
        Self {
            properties,
            geometry,
            geometry_ll,
            area,
        }
    }

    pub fn name(&self) -> &str {
        &self.properties.name
    }

    /// Decimal ring with the first point repeated at the end.
    pub fn closed_ring(&self) -> Vec<Coord> {
        let mut ring = self.geometry_ll.clone();
        if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
            if first != last {
                ring.push(first);
            }
        }
        ring
    }
}

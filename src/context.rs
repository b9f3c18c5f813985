use tracing::{debug, info, warn};

use crate::airspace::{AirspaceClass, Altitude, Period};
use crate::border::Border;
use crate::coordinate::DmsCoordinate;
use crate::document::Document;
use crate::geometry::GeometryGenerator;
use crate::polygon::{self, PolygonError};

/// Properties collected for the feature under construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingProperties {
    pub class: Option<AirspaceClass>,
    pub floor: Option<Altitude>,
    pub ceiling: Option<Altitude>,
    pub frequency: Option<String>,
    pub temporary: bool,
    pub period: Period,
}

/// A feature taken out of the context for finalizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingFeature {
    pub name: Option<String>,
    pub properties: PendingProperties,
    pub ring: Vec<DmsCoordinate>,
}

/// Parser state for one source document.
#[derive(Debug)]
pub struct ParsingContext<'a> {
    pub document: Document,
    pub border: &'a Border,
    pub generator: GeometryGenerator,
    pub properties: PendingProperties,
    /// Ring under construction, most recent point first.
    pub ring: Vec<DmsCoordinate>,
    /// Heading the next features are named after; survives finalizing.
    pub name: Option<String>,
    pub following_border: Option<DmsCoordinate>,
    pub last_point: Option<DmsCoordinate>,
    /// Last ceiling seen, so the next bare value is the floor.
    pub last_vertical: Option<Altitude>,
    pub continuation: String,
    pub final_coordinate: bool,
    pub in_ats_section: bool,
    pub in_airsport_table: bool,
    /// Names finalized from this document, for running numbers.
    pub finalized_names: Vec<String>,
}

impl<'a> ParsingContext<'a> {
    pub fn new(document: Document, border: &'a Border, generator: GeometryGenerator) -> Self {
        Self {
            document,
            border,
            generator,
            properties: PendingProperties::default(),
            ring: vec![],
            name: None,
            following_border: None,
            last_point: None,
            last_vertical: None,
            continuation: String::new(),
            final_coordinate: false,
            in_ats_section: false,
            in_airsport_table: false,
            finalized_names: vec![],
        }
    }

    /// Drops the feature under construction, e.g. an overview polygon that
    /// never got vertical limits.
    pub fn reset_feature(&mut self) {
        self.properties = PendingProperties::default();
        self.ring.clear();
        self.following_border = None;
        self.continuation.clear();
        self.last_vertical = None;
    }

    pub fn take_feature(&mut self) -> PendingFeature {
        self.last_vertical = None;
        PendingFeature {
            name: self.name.clone(),
            properties: std::mem::take(&mut self.properties),
            ring: std::mem::take(&mut self.ring),
        }
    }

    /// Prepends a point, skipping coordinates that do not convert.
    pub fn prepend(&mut self, point: DmsCoordinate) -> bool {
        if point.to_decimal().is_none() {
            warn!("skipping misformatted coordinate {point}");
            return false;
        }
        self.ring.insert(0, point);
        true
    }

    /// Unions `other` into the ring under construction.
    pub fn merge_ring(&mut self, other: Vec<DmsCoordinate>) -> Result<(), PolygonError> {
        if (1..3).contains(&self.ring.len()) {
            info!(
                "dropping {} points of {:?} from {} that cannot form a polygon",
                self.ring.len(),
                self.name,
                self.document.source
            );
            self.ring.clear();
        }
        self.ring = polygon::merge(&self.ring, other)?;
        Ok(())
    }

    pub fn has_limits(&self) -> bool {
        self.properties.floor.is_some() && self.properties.ceiling.is_some()
    }

    /// Limits known and a ring that can form a polygon.
    pub fn is_complete(&self) -> bool {
        self.has_limits() && self.ring.len() > 3
    }

    /// Keeps the lower of two disagreeing ceilings.
    pub fn set_ceiling(&mut self, ceiling: Altitude) {
        match self.properties.ceiling {
            Some(existing) if existing.feet <= ceiling.feet => {
                if existing.feet != ceiling.feet {
                    warn!(
                        "keeping ceiling {} ft over {} ft for {:?}",
                        existing.feet, ceiling.feet, self.name
                    );
                }
            }
            existing => {
                if let Some(existing) = existing {
                    warn!(
                        "lowering ceiling from {} ft to {} ft for {:?}",
                        existing.feet, ceiling.feet, self.name
                    );
                }
                debug!("ceiling {} ft", ceiling.feet);
                self.properties.ceiling = Some(ceiling);
            }
        }
    }

    /// Keeps the higher of two disagreeing floors.
    pub fn set_floor(&mut self, floor: Altitude) {
        match self.properties.floor {
            Some(existing) if existing.feet >= floor.feet => {
                if existing.feet != floor.feet {
                    warn!(
                        "keeping floor {} ft over {} ft for {:?}",
                        existing.feet, floor.feet, self.name
                    );
                }
            }
            existing => {
                if let Some(existing) = existing {
                    warn!(
                        "raising floor from {} ft to {} ft for {:?}",
                        existing.feet, floor.feet, self.name
                    );
                }
                debug!("floor {} ft", floor.feet);
                self.properties.floor = Some(floor);
            }
        }
    }
}

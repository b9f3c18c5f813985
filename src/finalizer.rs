//! Turns a pending feature into a validated [`Airspace`].

use std::collections::HashSet;

use itertools::Itertools as _;
use tracing::{debug, info, trace};

use crate::aip::AipError;
use crate::airspace::{Airspace, AirspaceClass, AirspaceProperties};
use crate::context::ParsingContext;
use crate::corrections::{apply_corrections, Corrected};
use crate::document::DocumentKind;
use crate::polygon;

/// Name tokens marking administrative areas rather than airspace.
static IGNORED_TOKENS: &[&str] = &["ADS", "AOR", "FIR"];

/// Airspace families whose running numbers leave gaps in the published text.
static SEQUENCE_SKIPS: &[(&str, usize)] = &[("Norway CTA", 2)];

/// Class by name substring, first match wins.
static CLASS_BY_NAME: &[(&[&str], AirspaceClass)] = &[
    (&["TIZ", "TIA"], AirspaceClass::G),
    (&["CTR"], AirspaceClass::D),
    (
        &["EN R", "ES R", "ESTRA", "EUCBA", "RPAS"],
        AirspaceClass::R,
    ),
    (&["EN D", "END", "ES D"], AirspaceClass::Q),
    (
        &["TMA", "CTA", "FIR", "ACC", "ATZ", "FAB", "Sector"],
        AirspaceClass::C,
    ),
];

/// Collapses whitespace, dropping anything after a wide gap where the
/// neighbouring table column spilled into the name.
pub fn wstrip(name: &str) -> String {
    let name = name.split("      ").next().unwrap_or(name);
    name.split_whitespace().join(" ")
}

pub fn class_from_name(name: &str) -> Option<AirspaceClass> {
    CLASS_BY_NAME
        .iter()
        .find(|(markers, _)| markers.iter().any(|marker| name.contains(marker)))
        .map(|(_, class)| *class)
}

fn is_ignored(name: &str) -> bool {
    name.split_whitespace()
        .any(|token| IGNORED_TOKENS.contains(&token))
}

fn is_acc_sector(name: &str) -> bool {
    name.contains("ACC") || name.starts_with("Sector")
}

/// Appends a running number when `base` was already used in this document.
fn renumber(base: String, finalized: &[String]) -> String {
    let recount = finalized.iter().filter(|name| name.contains(&base)).count();
    if recount == 0 {
        return base;
    }
    let skip = SEQUENCE_SKIPS
        .iter()
        .find(|(family, _)| base.contains(family))
        .map_or(0, |(_, skip)| *skip);
    let separator = if base.ends_with(|c: char| c.is_ascii_digit()) {
        '-'
    } else {
        ' '
    };
    format!("{base}{separator}{}", recount + 1 + skip)
}

/// Run wide collection of finalized airspaces.
#[derive(Debug)]
pub struct Finalizer {
    completed: HashSet<String>,
    pub airspaces: Vec<Airspace>,
    pub acc_sectors: Vec<Airspace>,
    simplify_threshold: usize,
    simplify_target: usize,
}

impl Default for Finalizer {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

impl Finalizer {
    pub fn new(simplify_threshold: usize, simplify_target: usize) -> Self {
        Self {
            completed: HashSet::new(),
            airspaces: vec![],
            acc_sectors: vec![],
            simplify_threshold,
            simplify_target,
        }
    }

    pub fn len(&self) -> usize {
        self.airspaces.len() + self.acc_sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finalizes the pending feature of `ctx`, returning whether it was kept.
    ///
    /// Incomplete rings, ignored names and duplicates are dropped; missing
    /// fields and inverted limits are errors.
    pub fn finalize(&mut self, ctx: &mut ParsingContext) -> Result<bool, AipError> {
        let feature = ctx.take_feature();
        let document = &ctx.document;
        if feature.ring.is_empty() {
            trace!("nothing to finalize");
            return Ok(false);
        }

        let base = feature.name.as_deref().map(wstrip);
        if let Some(base) = base.as_deref().filter(|base| is_ignored(base)) {
            debug!("ignoring {base}");
            return Ok(false);
        }

        let class = base
            .as_deref()
            .and_then(class_from_name)
            .or_else(|| (document.kind == DocumentKind::Airsport).then_some(AirspaceClass::Luftsport))
            .or(feature.properties.class);

        let name = base.map(|base| {
            if document.renumbers() {
                renumber(base, &ctx.finalized_names)
            } else {
                base
            }
        });

        let mut ring = feature.ring;
        if ring.len() > self.simplify_threshold {
            let before = ring.len();
            ring = polygon::simplify(&ring, self.simplify_target);
            debug!("simplified {name:?} from {before} to {} points", ring.len());
        }
        if ring.len() <= 3 {
            info!(
                "dropping incomplete polygon {name:?} from {} with {} points",
                document.source,
                ring.len()
            );
            return Ok(false);
        }

        let Some(name) = name.filter(|name| !name.is_empty()) else {
            return Err(AipError::MissingField {
                field: "name",
                name: String::new(),
                source_href: document.source.clone(),
            });
        };
        ctx.finalized_names.push(name.clone());
        if !self.completed.insert(name.clone()) {
            info!("dropping duplicate feature {name} from {}", document.source);
            return Ok(false);
        }

        let mut corrected = Corrected {
            floor: feature.properties.floor,
            ceiling: feature.properties.ceiling,
            ..Default::default()
        };
        apply_corrections(&name, &mut corrected);

        let missing = |field| AipError::MissingField {
            field,
            name: name.clone(),
            source_href: document.source.clone(),
        };
        let class = class.ok_or_else(|| missing("class"))?;
        let floor = corrected.floor.ok_or_else(|| missing("floor"))?;
        let ceiling = corrected.ceiling.ok_or_else(|| missing("ceiling"))?;
        if floor.feet >= ceiling.feet {
            return Err(AipError::InvertedLimits {
                name,
                source_href: document.source.clone(),
                floor: floor.feet,
                ceiling: ceiling.feet,
            });
        }

        debug!(
            "finalized #{} {name}, class {class}, {} - {} ft, {} points",
            self.len(),
            floor.feet,
            ceiling.feet,
            ring.len()
        );
        let airspace = Airspace::new(
            AirspaceProperties {
                name,
                class,
                floor,
                ceiling,
                source: document.source.clone(),
                country: document.country,
                notam_only: corrected.notam_only,
                amc_only: corrected.amc_only,
                temporary: feature.properties.temporary,
                frequency: feature.properties.frequency,
                period: feature.properties.period,
            },
            ring,
        );
        if is_acc_sector(airspace.name()) {
            self.acc_sectors.push(airspace);
        } else {
            self.airspaces.push(airspace);
        }
        Ok(true)
    }
}

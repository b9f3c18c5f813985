//! Corrections for individual airspaces whose published text is known to be
//! incomplete or misleading, keyed by a substring of the airspace name.

use tracing::debug;

use crate::airspace::Altitude;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Correction {
    /// Only active when announced by NOTAM.
    NotamOnly,
    /// Activated through the airspace management cell.
    AmcOnly,
    /// Floor and ceiling are printed in the wrong order.
    SwapInvertedLimits,
    /// Limits to use when the document does not state them.
    DefaultLimits { floor_ft: i64, ceiling_ft: i64 },
}

pub static CORRECTIONS: &[(&str, &[Correction])] = &[
    (
        "EN R102",
        &[Correction::NotamOnly, Correction::SwapInvertedLimits],
    ),
    (
        "EN R103",
        &[Correction::NotamOnly, Correction::SwapInvertedLimits],
    ),
    (
        "EN R104",
        &[Correction::NotamOnly, Correction::SwapInvertedLimits],
    ),
    ("ESTRA", &[Correction::AmcOnly]),
    ("EUCBA", &[Correction::AmcOnly]),
    (
        "Hareid",
        &[Correction::DefaultLimits {
            floor_ft: 0,
            ceiling_ft: 3500,
        }],
    ),
];

/// The mutable part of a feature the corrections work on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corrected {
    pub floor: Option<Altitude>,
    pub ceiling: Option<Altitude>,
    pub notam_only: bool,
    pub amc_only: bool,
}

impl Correction {
    pub fn apply(self, target: &mut Corrected) {
        match self {
            Self::NotamOnly => target.notam_only = true,
            Self::AmcOnly => target.amc_only = true,
            Self::SwapInvertedLimits => {
                if let (Some(floor), Some(ceiling)) = (target.floor, target.ceiling) {
                    if floor.feet > ceiling.feet {
                        target.floor = Some(ceiling);
                        target.ceiling = Some(floor);
                    }
                }
            }
            Self::DefaultLimits {
                floor_ft,
                ceiling_ft,
            } => {
                target.floor.get_or_insert(Altitude::feet(floor_ft));
                target.ceiling.get_or_insert(Altitude::feet(ceiling_ft));
            }
        }
    }
}

pub fn corrections_for(name: &str) -> impl Iterator<Item = Correction> + '_ {
    CORRECTIONS
        .iter()
        .filter(move |(pattern, _)| name.contains(pattern))
        .flat_map(|(_, corrections)| corrections.iter().copied())
}

pub fn apply_corrections(name: &str, target: &mut Corrected) {
    for correction in corrections_for(name) {
        debug!("correcting {name}: {correction:?}");
        correction.apply(target);
    }
}

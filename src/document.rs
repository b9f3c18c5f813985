//! Document classification from AIP source file names.

use std::fmt::{self, Display};

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot tell the country of source document {0}")]
    UnknownCountry(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Country {
    #[serde(rename = "EN")]
    Norway,
    #[serde(rename = "ES")]
    Sweden,
}

impl Country {
    pub const HOME: Self = Self::Norway;

    pub fn code(self) -> &'static str {
        match self {
            Self::Norway => "EN",
            Self::Sweden => "ES",
        }
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which AIP chapter a document holds; selects layout and finalize rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// AD 2 aerodrome chapters, only the ATS airspace section is parsed.
    Aerodrome,
    /// ENR 2.1, FIR/UIR/TMA/CTA.
    ControlArea,
    /// ENR 2.2, other regulated airspace such as TIA/TIZ.
    InformationArea,
    /// ENR 5.1, prohibited, restricted and danger areas.
    Restricted,
    /// ENR 5.2, military exercise and training areas.
    Military,
    /// ENR 5.5, aerial sporting and recreational activities.
    Airsport,
    /// AIP supplements.
    Supplement,
    Other,
}

/// Substring rules on the normalized file name, first match wins.
static KIND_MARKERS: &[(&str, DocumentKind)] = &[
    ("en_sup", DocumentKind::Supplement),
    ("_AD_", DocumentKind::Aerodrome),
    ("EN_AD", DocumentKind::Aerodrome),
    ("ENR_2_1", DocumentKind::ControlArea),
    ("ENR_2_2", DocumentKind::InformationArea),
    ("ENR_5_1", DocumentKind::Restricted),
    ("ENR_5_2", DocumentKind::Military),
    ("ENR_5_5", DocumentKind::Airsport),
];

/// `ENR-2.1` and `ENR_2_1` name the same chapter.
fn normalize(filename: &str) -> String {
    let stem = filename.strip_suffix(".txt").unwrap_or(filename);
    stem.replace(['-', '.'], "_")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub source: String,
    pub kind: DocumentKind,
    pub country: Country,
}

impl Document {
    /// Classifies a source file by name, `source` being the percent-decoded stem.
    pub fn from_filename(filename: &str) -> Result<Self, DocumentError> {
        let source = percent_encoding::percent_decode_str(
            filename.split(".txt").next().unwrap_or(filename),
        )
        .decode_utf8_lossy()
        .into_owned();
        let normalized = normalize(&source);

        let country = if normalized.contains("ES_") {
            Country::Sweden
        } else if normalized.contains("EN_") || normalized.contains("en_") {
            Country::Norway
        } else {
            return Err(DocumentError::UnknownCountry(filename.to_string()));
        };

        let kind = KIND_MARKERS
            .iter()
            .find(|(marker, _)| normalized.contains(marker))
            .map_or(DocumentKind::Other, |(_, kind)| *kind);

        Ok(Self {
            source,
            kind,
            country,
        })
    }

    pub fn is_swedish_enr_table(&self) -> bool {
        self.country == Country::Sweden
            && matches!(
                self.kind,
                DocumentKind::ControlArea
                    | DocumentKind::InformationArea
                    | DocumentKind::Restricted
                    | DocumentKind::Military
            )
    }

    /// Repeated polygons under one heading get a running number, except in
    /// chapters where every area carries its own designator.
    pub fn renumbers(&self) -> bool {
        !matches!(self.kind, DocumentKind::Restricted | DocumentKind::Airsport)
    }

    /// A parenthesized closing coordinate ends the feature once the floor is known.
    pub fn finalizes_on_final_coordinate(&self) -> bool {
        matches!(
            self.kind,
            DocumentKind::ControlArea
                | DocumentKind::InformationArea
                | DocumentKind::Supplement
                | DocumentKind::Airsport
        )
    }

    /// Ceiling standing in for "See RMK", the lower limit of controlled airspace.
    pub fn remark_ceiling_ft(&self) -> i64 {
        match self.kind {
            DocumentKind::Restricted | DocumentKind::Supplement => 13_499,
            _ => 15_000,
        }
    }
}

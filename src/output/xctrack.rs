//! XCTrack airspace JSON, as consumed by the XContest flight instruments.

use chrono::{DateTime, Utc};
use itertools::Itertools as _;
use phf::phf_map;
use serde::Serialize;
use tracing::{debug, trace};

use super::OutputResult;
use crate::airspace::{Airspace, AirspaceClass, AirspaceProperties};
use crate::document::Country;
use crate::units::m2ft;

/// Pen style, width and RGB.
static PENS: phf::Map<&'static str, [i32; 5]> = phf_map! {
    "red" => [0, 2, 192, 0, 0],
    "orange" => [0, 2, 192, 63, 0],
    "yellow" => [0, 2, 192, 192, 0],
    "green" => [0, 2, 0, 192, 0],
    "blue" => [0, 2, 0, 0, 192],
    "white" => [0, 1, 255, 255, 255],
    "gray" => [0, 2, 63, 63, 63],
    "purple" => [0, 3, 192, 63, 192],
};

static BRUSHES: phf::Map<&'static str, [i32; 3]> = phf_map! {
    "none" => [-1, -1, -1],
    "red" => [192, 0, 0],
    "orange" => [192, 63, 0],
    "yellow" => [192, 192, 0],
    "green" => [0, 192, 0],
    "purple" => [192, 63, 192],
    "white" => [255, 255, 255],
    "gray" => [63, 63, 63],
};

const DASHED: i32 = 1;

/// Swedish airspace published in the Norwegian collection anyway.
static SWEDISH_KEPT: &[&str] = &["SÄLEN CTR"];

/// Floors from here up are irrelevant to paragliders.
const PARAGLIDING_MAX_FLOOR_M: i64 = 4200;
/// The lower limit of controlled airspace in the NOTAM activated areas.
const CONTROLLED_FLOOR_M: i64 = 4114;
const UNLIMITED_FT: i64 = 999_999;
const MAX_HEIGHT_FT: i64 = 40_000;

const AIRSPORT_EN: &str = "Air sport box. Must be activated before entering.\n\
    Contact your local club before flying or keep to regular airspace limits.\n";
const AIRSPORT_NO: &str = "Luftsportboks. Må aktiveres før bruk.\n\
    Ta kontakt med din lokale klubb før flyging eller hold deg innenfor fri høyde i øvrig luftrom.\n";
const NOTAM_EN: &str =
    "Only active if NOTAM is sent. Please check NOTAM for updated altitude limits.\n";
const NOTAM_NO: &str =
    "Bare aktivt hvis NOTAM er sendt. Sjekk NOTAM for oppdaterte høydebegrensninger.\n";
const CONTROLLED_FLOOR_EN: &str = "Lower limit is the lower limit of controlled airspace.\n";
const CONTROLLED_FLOOR_NO: &str = "Nedre grense er nedre grense for kontrollert luftrom.\n";

#[derive(Debug, Serialize)]
struct XcFile {
    airspaces: Vec<XcAirspace>,
    oadescription: String,
    oaname: String,
}

#[derive(Debug, Serialize)]
struct Descriptions {
    en: String,
    no: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct Limit {
    #[serde(rename = "type")]
    kind: &'static str,
    height: i64,
}

#[derive(Debug, Serialize)]
struct XcAirspace {
    #[serde(skip_serializing_if = "Option::is_none")]
    airpen: Option<[i32; 5]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    airautoid: Option<String>,
    descriptions: Descriptions,
    aircatpg: bool,
    airclass: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    airchecktype: Option<&'static str>,
    airlower: Limit,
    #[serde(skip_serializing_if = "Option::is_none")]
    airbrush: Option<[i32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    airacttime: Option<String>,
    airupper: Limit,
    airname: String,
    /// Closed ring of `(lat, lon)` pairs.
    components: Vec<(f64, f64)>,
}

fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

fn first_two_words(name: &str) -> String {
    name.split(' ').take(2).collect()
}

/// Identifier linking NOTAM and AMC activations to the feature.
fn auto_id(properties: &AirspaceProperties, airsport: &mut bool) -> Option<String> {
    let name = properties.name.as_str();
    if properties.notam_only || properties.amc_only || name.contains("EN R121") {
        if name.contains("ENR") || name.contains("END") || name.contains("EN R") {
            return Some(first_two_words(name));
        }
        if name.contains("EN D") {
            let number = name
                .find('D')
                .and_then(|d| name[d + 1..].split_whitespace().next())
                .and_then(|number| number.parse::<u32>().ok())?;
            // the D107 to D199 series are air sport areas
            if (107..200).contains(&number) && number != 110 {
                *airsport = true;
                return Some(first_two_words(name));
            }
            return None;
        }
        return Some(name.to_string());
    }
    airsport.then(|| name.to_string())
}

fn lower_limit(properties: &AirspaceProperties) -> Limit {
    let floor = properties.floor;
    match floor.flight_level {
        Some(fl) => Limit {
            kind: "FL",
            height: i64::from(fl) * 100,
        },
        None if floor.feet == 0 => Limit {
            kind: "AGL",
            height: 0,
        },
        None => Limit {
            kind: "AMSL",
            height: floor.feet,
        },
    }
}

fn upper_limit(properties: &AirspaceProperties) -> Limit {
    let ceiling = properties.ceiling;
    match ceiling.flight_level {
        Some(fl) => Limit {
            kind: "FL",
            height: i64::from(fl) * 100,
        },
        None if ceiling.feet >= UNLIMITED_FT => Limit {
            kind: "MAX",
            height: MAX_HEIGHT_FT,
        },
        None => Limit {
            kind: "AMSL",
            height: ceiling.feet,
        },
    }
}

fn reverse_date(date: &str) -> String {
    date.split(' ').rev().join(" ")
}

/// One `MAI 15 - JUN 30 0800-1600` line per activation window.
fn activation_times(properties: &AirspaceProperties) -> String {
    let period = &properties.period;
    let time_from = period.time_from.as_deref().unwrap_or("0000");
    let time_until = period.time_until.as_deref().unwrap_or("2359");
    period
        .dates_from
        .iter()
        .zip(&period.dates_until)
        .map(|(from, until)| {
            format!(
                "{} - {} {time_from}-{time_until}",
                reverse_date(from),
                reverse_date(until)
            )
        })
        .join("\n")
}

/// Colours by the height of the lower limit, in metres.
fn pen_and_brush(
    properties: &AirspaceProperties,
    lower: &Limit,
) -> (Option<[i32; 5]>, Option<[i32; 3]>) {
    let style = |pen: &str, brush: &str| (PENS.get(pen).copied(), BRUSHES.get(brush).copied());
    let lower_ft = lower.height as f64;
    match properties.class {
        AirspaceClass::C | AirspaceClass::D | AirspaceClass::G | AirspaceClass::R | AirspaceClass::Q => {
            if properties.notam_only {
                style("gray", "gray")
            } else if lower_ft < m2ft(500.0) {
                style("red", "red")
            } else if lower_ft < m2ft(1000.0) {
                style("orange", "orange")
            } else if lower_ft < m2ft(2000.0) {
                style("yellow", "yellow")
            } else if lower_ft < m2ft(4000.0) {
                style("green", "green")
            } else {
                style("white", "none")
            }
        }
        _ => (None, None),
    }
}

fn xc_airspace(airspace: &Airspace) -> XcAirspace {
    let properties = &airspace.properties;
    let mut airsport = properties.class == AirspaceClass::Luftsport;
    let airclass = if airsport {
        "W"
    } else {
        properties.class.as_str()
    };
    let airautoid = auto_id(properties, &mut airsport);

    let airchecktype = if airsport {
        Some("inverse")
    } else {
        matches!(
            properties.class,
            AirspaceClass::C | AirspaceClass::D | AirspaceClass::R | AirspaceClass::G | AirspaceClass::Q
        )
        .then_some("restrict")
    };

    let from_m = properties.floor.meters();
    let airlower = lower_limit(properties);
    let airupper = upper_limit(properties);

    let (mut info_en, mut info_no) = (String::new(), String::new());
    if airsport {
        info_en = AIRSPORT_EN.to_string();
        info_no = AIRSPORT_NO.to_string();
    }
    if properties.notam_only {
        info_en = NOTAM_EN.to_string();
        info_no = NOTAM_NO.to_string();
        if from_m == CONTROLLED_FLOOR_M {
            info_en.push_str(CONTROLLED_FLOOR_EN);
            info_no.push_str(CONTROLLED_FLOOR_NO);
        }
    }

    let mut airacttime = None;
    if properties.temporary {
        let times = activation_times(properties);
        debug!("{} is active {times:?}", properties.name);
        info_en = format!("Only active in periods: {times}\n");
        info_no = format!("Tidsbegrenset: {times}\n");
        airacttime = Some(times);
    }

    let (mut airpen, mut airbrush) = pen_and_brush(properties, &airlower);
    if airsport {
        airpen = PENS.get("purple").copied();
        airbrush = BRUSHES.get("purple").copied();
    }
    if airacttime.as_deref().is_some_and(|times| !times.is_empty()) {
        if let Some(pen) = &mut airpen {
            pen[0] = DASHED;
        }
    }

    XcAirspace {
        airpen,
        airautoid,
        descriptions: Descriptions {
            en: format!("{info_en}Source: {}", properties.source),
            no: format!("{info_no}Kilde: {}", properties.source),
        },
        aircatpg: from_m < PARAGLIDING_MAX_FLOOR_M,
        airclass,
        airchecktype,
        airlower,
        airbrush,
        airacttime,
        airupper,
        airname: properties.name.clone(),
        components: airspace
            .closed_ring()
            .iter()
            .map(|coord| (round5(coord.y), round5(coord.x)))
            .collect(),
    }
}

fn is_exported(airspace: &Airspace) -> bool {
    let kept = airspace.properties.country != Country::Sweden
        || SWEDISH_KEPT.iter().any(|name| airspace.name().contains(name));
    if !kept {
        trace!("leaving out Swedish {}", airspace.name());
    }
    kept
}

pub fn to_xctrack(airspaces: &[Airspace], generated: DateTime<Utc>) -> OutputResult<String> {
    let timestamp = generated.format("%Y-%m-%dT%H:%M:%S%.6f");
    let file = XcFile {
        airspaces: airspaces
            .iter()
            .filter(|airspace| is_exported(airspace))
            .map(xc_airspace)
            .collect(),
        oadescription: format!("Automated export from luftrom.info - {timestamp}"),
        oaname: format!("Norway airspace - {timestamp}"),
    };
    Ok(serde_json::to_string(&file)?)
}

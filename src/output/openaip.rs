//! OpenAIP airspace XML.

use itertools::Itertools as _;
use serde::Serialize;

use super::OutputResult;
use crate::airspace::Airspace;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";
const VERSION: &str = "367810a0f94887bf79cd9432d2a01142b0426795";
const DATA_FORMAT: &str = "1.1";
const COUNTRY: &str = "NO";
const FEET: &str = "F";

#[derive(Serialize)]
#[serde(rename = "OPENAIP")]
struct OpenAipXml<'a> {
    #[serde(rename = "@VERSION")]
    version: &'static str,
    #[serde(rename = "@DATAFORMAT")]
    data_format: &'static str,
    #[serde(rename = "AIRSPACES")]
    airspaces: AirspacesXml<'a>,
}

#[derive(Serialize)]
struct AirspacesXml<'a> {
    #[serde(rename = "ASP")]
    asp: Vec<AspXml<'a>>,
}

#[derive(Serialize)]
struct AspXml<'a> {
    #[serde(rename = "@CATEGORY")]
    category: &'static str,
    #[serde(rename = "VERSION")]
    version: &'static str,
    #[serde(rename = "ID")]
    id: usize,
    #[serde(rename = "COUNTRY")]
    country: &'static str,
    #[serde(rename = "NAME")]
    name: &'a str,
    #[serde(rename = "ALTLIMIT_TOP")]
    top: AltLimitXml,
    #[serde(rename = "ALTLIMIT_BOTTOM")]
    bottom: AltLimitXml,
    #[serde(rename = "GEOMETRY")]
    geometry: GeometryXml,
}

#[derive(Serialize)]
struct AltLimitXml {
    #[serde(rename = "@REFERENCE")]
    reference: &'static str,
    #[serde(rename = "ALT")]
    alt: AltXml,
}

#[derive(Serialize)]
struct AltXml {
    #[serde(rename = "@UNIT")]
    unit: &'static str,
    #[serde(rename = "$text")]
    value: i64,
}

#[derive(Serialize)]
struct GeometryXml {
    /// `lon lat` pairs separated by commas.
    #[serde(rename = "POLYGON")]
    polygon: String,
}

fn msl_feet(feet: i64) -> AltLimitXml {
    AltLimitXml {
        reference: "MSL",
        alt: AltXml {
            unit: FEET,
            value: feet,
        },
    }
}

fn asp(id: usize, airspace: &Airspace) -> AspXml<'_> {
    let properties = &airspace.properties;
    AspXml {
        category: properties.class.as_str(),
        version: VERSION,
        id,
        country: COUNTRY,
        name: &properties.name,
        top: msl_feet(properties.ceiling.feet),
        bottom: msl_feet(properties.floor.feet),
        geometry: GeometryXml {
            polygon: airspace
                .geometry_ll
                .iter()
                .map(|coord| format!("{} {}", coord.x, coord.y))
                .join(","),
        },
    }
}

pub fn to_openaip(airspaces: &[Airspace]) -> OutputResult<String> {
    let document = OpenAipXml {
        version: VERSION,
        data_format: DATA_FORMAT,
        airspaces: AirspacesXml {
            asp: airspaces
                .iter()
                .enumerate()
                .map(|(id, airspace)| asp(id, airspace))
                .collect(),
        },
    };

    let mut xml = XML_DECLARATION.to_string();
    let mut serializer = quick_xml::se::Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    document.serialize(serializer)?;
    Ok(xml)
}

//! GeoJSON with map styling, one feature per airspace.

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};
use tracing::{error, trace};

use super::is_wave_window;
use crate::airspace::{Airspace, AirspaceClass, AirspaceProperties};

const FILL_OPACITY: f64 = 0.15;
const HIGHLIGHT_OPACITY: f64 = 0.35;

/// Floors from here up are left off the map.
const MAX_FLOOR_M: i64 = 4200;

fn set(style: &mut Map<String, JsonValue>, key: &str, value: impl Into<JsonValue>) {
    style.insert(key.to_string(), value.into());
}

fn paint(style: &mut Map<String, JsonValue>, colour: &str) {
    set(style, "fillColor", colour);
    set(style, "color", colour);
}

fn styled_properties(properties: &AirspaceProperties) -> Map<String, JsonValue> {
    let mut style = properties.to_json();
    set(&mut style, "fillOpacity", FILL_OPACITY);

    let from_m = properties.floor.meters();
    let to_m = properties.ceiling.meters();
    match properties.class {
        AirspaceClass::C | AirspaceClass::D | AirspaceClass::G | AirspaceClass::R => {
            if properties.notam_only {
                set(&mut style, "fillColor", "#c0c0c0");
                set(&mut style, "color", "#606060");
                set(&mut style, "fillOpacity", HIGHLIGHT_OPACITY);
            } else if from_m < 500 {
                paint(&mut style, "#c04040");
                set(&mut style, "fillOpacity", HIGHLIGHT_OPACITY);
            } else if from_m < 1000 {
                paint(&mut style, "#c08040");
            } else if from_m < 2000 {
                paint(&mut style, "#c0c040");
            } else if from_m < 4000 {
                paint(&mut style, "#40c040");
            } else {
                set(&mut style, "fillOpacity", 0.0);
                set(&mut style, "opacity", 0.0);
                set(&mut style, "color", "#ffffff");
            }
        }
        AirspaceClass::Luftsport | AirspaceClass::Q => {
            paint(&mut style, if to_m < 2000 { "#c0c040" } else { "#40c040" });
        }
        class => trace!("no colour scheme for class {class} from {from_m} m"),
    }
    style
}

fn feature(airspace: &Airspace) -> Option<Feature> {
    if airspace.geometry_ll.is_empty() {
        error!("feature without geometry: {}", airspace.name());
        return None;
    }
    let ring = airspace
        .closed_ring()
        .iter()
        .map(|coord| vec![coord.x, coord.y])
        .collect();
    Some(Feature {
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        properties: Some(styled_properties(&airspace.properties)),
        ..Default::default()
    })
}

fn is_shown(airspace: &Airspace) -> bool {
    airspace.properties.floor.meters() < MAX_FLOOR_M || is_wave_window(airspace.name())
}

pub fn to_feature_collection(airspaces: &[Airspace]) -> FeatureCollection {
    FeatureCollection::from_iter(
        airspaces
            .iter()
            .filter(|airspace| is_shown(airspace))
            .filter_map(feature),
    )
}

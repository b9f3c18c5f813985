//! OpenAIR text, in three renderings of the vertical limits.

use phf::phf_map;

use super::is_wave_window;
use crate::airspace::{Airspace, AirspaceClass, Altitude};

/// Classes OpenAIR knows by name; everything else is a danger area.
static CLASSES: phf::Map<&'static str, &'static str> = phf_map! {
    "A" => "A",
    "B" => "B",
    "C" => "C",
    "D" => "D",
    "R" => "R",
    "P" => "P",
    "G" => "G",
    "Luftsport" => "W",
};

const MAX_FLOOR_M: i64 = 3500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rendering {
    Feet,
    Meters,
    /// Flight levels where the text gave one, feet otherwise.
    FlightLevel,
}

pub fn openair_class(class: AirspaceClass) -> &'static str {
    CLASSES.get(class.as_str()).copied().unwrap_or("Q")
}

fn altitude(rendering: Rendering, altitude: Altitude) -> String {
    match (rendering, altitude.flight_level) {
        (Rendering::Meters, _) => format!("{} MSL", altitude.meters()),
        (Rendering::FlightLevel, Some(fl)) => format!("FL{fl}"),
        (Rendering::Feet | Rendering::FlightLevel, _) => format!("{}ft AMSL", altitude.feet),
    }
}

fn is_exported(airspace: &Airspace) -> bool {
    let name = airspace.name();
    airspace.properties.floor.meters() <= MAX_FLOOR_M
        || name.contains("CTA")
        || is_wave_window(name)
}

fn record(airspace: &Airspace, rendering: Rendering) -> Vec<String> {
    let properties = &airspace.properties;
    let floor = if properties.floor.feet == 0 {
        "GND".to_string()
    } else {
        altitude(rendering, properties.floor)
    };

    let mut lines = vec![
        format!("AC {}", openair_class(properties.class)),
        format!("AN {}", properties.name),
        format!("AL {floor}"),
        format!("AH {}", altitude(rendering, properties.ceiling)),
    ];
    lines.extend(
        airspace
            .geometry
            .iter()
            .map(|coordinate| format!("DP {}", coordinate.openair_fmt())),
    );
    lines.push(format!("* Source: {}", properties.source));
    lines.push("*".to_string());
    lines.push("*".to_string());
    lines
}

pub fn to_openair(airspaces: &[Airspace], rendering: Rendering) -> String {
    airspaces
        .iter()
        .filter(|airspace| is_exported(airspace))
        .flat_map(|airspace| record(airspace, rendering))
        .map(|line| line + "\n")
        .collect()
}

//! Vertical limit phrases.

use regex::Captures;

use crate::airspace::Altitude;
use crate::patterns::{LIMIT_RANGE, LIMIT_SINGLE, LOWER_LIMIT, UPPER_LIMIT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalLimit {
    Ceiling(Altitude),
    Floor(Altitude),
    Range { floor: Altitude, ceiling: Altitude },
    /// A bare value, floor or ceiling depending on what came before it.
    Single(Altitude),
}

fn number(captures: &Captures, group: &str) -> Option<i64> {
    captures.name(group)?.as_str().parse().ok()
}

fn flight_level(captures: &Captures, group: &str) -> Option<Altitude> {
    captures
        .name(group)?
        .as_str()
        .parse()
        .ok()
        .map(Altitude::flight_level)
}

fn range_bound(value: &str) -> Option<Altitude> {
    match value {
        "GND" => Some(Altitude::GROUND),
        "UNL" => Some(Altitude::UNLIMITED),
        value => value.parse().ok().map(Altitude::feet),
    }
}

/// Recognises a vertical limit; `remark_ft` stands in for "See RMK".
pub fn parse_vertical_limit(line: &str, remark_ft: i64) -> Option<VerticalLimit> {
    if let Some(captures) = UPPER_LIMIT.captures(line) {
        let ceiling = flight_level(&captures, "flto")
            .or_else(|| number(&captures, "ftamsl").map(Altitude::feet))?;
        return Some(VerticalLimit::Ceiling(ceiling));
    }
    if let Some(captures) = LOWER_LIMIT.captures(line) {
        let floor = if captures.name("msl").is_some() {
            Altitude::GROUND
        } else {
            flight_level(&captures, "flfrom")
                .or_else(|| number(&captures, "ftamsl").map(Altitude::feet))?
        };
        return Some(VerticalLimit::Floor(floor));
    }
    if let Some(captures) = LIMIT_RANGE.captures(line) {
        return Some(VerticalLimit::Range {
            floor: range_bound(&captures["from"])?,
            ceiling: range_bound(&captures["to"])?,
        });
    }

    let captures = LIMIT_SINGLE.captures(line)?;
    if let Some(ft) = number(&captures, "ftamsl") {
        Some(VerticalLimit::Single(Altitude::feet(ft)))
    } else if let Some(fl) = flight_level(&captures, "fl") {
        Some(VerticalLimit::Single(fl))
    } else if captures.name("rmk").is_some() {
        Some(VerticalLimit::Single(Altitude::feet(remark_ft)))
    } else if captures.name("gnd").is_some() {
        Some(VerticalLimit::Floor(Altitude::GROUND))
    } else if captures.name("unl").is_some() {
        Some(VerticalLimit::Ceiling(Altitude::UNLIMITED))
    } else {
        None
    }
}

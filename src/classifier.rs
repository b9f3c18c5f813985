//! Per-line classification of AIP text.
//!
//! Every line is offered to an ordered list of handlers. The first handler
//! that consumes the line wins; a handler that recognises its family without
//! consuming it (frequencies) lets the line fall through to the next one.

use regex::Captures;
use tracing::{debug, trace, warn};

use crate::aip::AipError;
use crate::airspace::AirspaceClass;
use crate::border::{self, Direction};
use crate::context::ParsingContext;
use crate::coordinate::{DegMinSecExt as _, DmsCoordinate};
use crate::document::{Country, DocumentKind};
use crate::finalizer::{wstrip, Finalizer};
use crate::patterns::{
    ARC, CIRCLE, CLASS, CLASS_STANDALONE, COORDINATES_NO, COORDINATES_SE, FREQUENCY, NAMES,
    PERIOD_ESTABLISHED, PERIOD_FROM, PERIOD_UNTIL, SECTOR,
};
use crate::units::{parse_decimal, parse_nm};
use crate::vertical::{parse_vertical_limit, VerticalLimit};

/// Emitted between table rows; ends the pending feature.
pub const LINEBREAK: &str = "--linebreak--";

/// Names that are parts of airspaces tracked under another name.
static FILTERED_NAMES: &[&str] = &["RMZ/TMZ", "TRIDENT", "ACC Oslo"];

/// Features that keep collecting after their floor is known.
static SKIP_FINALIZE_ON_FLOOR: &[&str] = &["SÄLEN TMA", "ESTRA"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Linebreak,
    SectionGate,
    Class,
    Geometry,
    Period,
    Frequency,
    Vertical,
    Name,
    AirsportTable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Handled {
    Consumed,
    Skipped,
}

type Handler = fn(&mut ParsingContext<'_>, &mut Finalizer, &str) -> Result<Handled, AipError>;

static HANDLERS: &[(LineKind, Handler)] = &[
    (LineKind::Linebreak, linebreak),
    (LineKind::SectionGate, section_gate),
    (LineKind::Class, class),
    (LineKind::Geometry, geometry),
    (LineKind::Period, period),
    (LineKind::Frequency, frequency),
    (LineKind::Vertical, vertical),
    (LineKind::Name, name),
    (LineKind::AirsportTable, airsport_table),
];

/// Classifies one line, updating `ctx` and finalizing into `finalizer`.
///
/// Returns the kind of the handler that consumed the line, if any.
pub fn parse_line(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
) -> Result<Option<LineKind>, AipError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    trace!("line '{line}'");
    for (kind, handler) in HANDLERS {
        if handler(ctx, finalizer, line)? == Handled::Consumed {
            return Ok(Some(*kind));
        }
    }
    Ok(None)
}

fn point(captures: &Captures, n: &str, e: &str) -> Option<DmsCoordinate> {
    Some(DmsCoordinate::new(
        captures.name(n)?.as_str(),
        captures.name(e)?.as_str(),
    ))
}

/// A row that ends with its limits known is a feature; without them it is
/// an overview polygon.
fn linebreak(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    if line != LINEBREAK {
        return Ok(Handled::Skipped);
    }
    if ctx.is_complete() {
        debug!("row end completes {:?}", ctx.name);
        finalizer.finalize(ctx)?;
    } else if !ctx.ring.is_empty() {
        debug!("dropping overview polygon with {} points", ctx.ring.len());
    }
    ctx.reset_feature();
    Ok(Handled::Consumed)
}

/// Norwegian aerodrome chapters only describe airspace in their ATS section.
fn section_gate(
    ctx: &mut ParsingContext<'_>,
    _: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    if ctx.document.kind != DocumentKind::Aerodrome || ctx.document.country != Country::Norway {
        return Ok(Handled::Skipped);
    }
    if !ctx.in_ats_section {
        if line.contains("ATS airspace") {
            debug!("entering ATS airspace section");
            ctx.in_ats_section = true;
        }
        return Ok(Handled::Consumed);
    }
    if line.contains("AD 2.") {
        debug!("leaving ATS airspace section");
        ctx.in_ats_section = false;
    }
    Ok(Handled::Skipped)
}

fn class(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    let Some(captures) = CLASS
        .captures(line)
        .or_else(|| CLASS_STANDALONE.captures(line))
    else {
        return Ok(Handled::Skipped);
    };
    match AirspaceClass::from_marker(&captures["class"]) {
        Some(class) => {
            debug!("class {class}");
            ctx.properties.class = Some(class);
        }
        None => warn!("ignoring unknown class marker in '{line}'"),
    }
    if ctx.document.kind == DocumentKind::InformationArea && ctx.is_complete() {
        debug!("class completes {:?}", ctx.name);
        finalizer.finalize(ctx)?;
    }
    Ok(Handled::Consumed)
}

fn buffer_continuation(ctx: &mut ParsingContext<'_>, line: &str, reason: &str) -> Handled {
    ctx.continuation.push_str(line);
    ctx.continuation.push(' ');
    debug!("continuing {reason}: {}", ctx.continuation);
    Handled::Consumed
}

fn geometry(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    let tokens_re = match ctx.document.country {
        Country::Norway => &*COORDINATES_NO,
        Country::Sweden => &*COORDINATES_SE,
    };
    if !(CIRCLE.is_match(line) || SECTOR.is_match(line) || tokens_re.is_match(line)) {
        return Ok(Handled::Skipped);
    }
    if line.ends_with('N') {
        return Ok(buffer_continuation(ctx, line, "after N coordinate"));
    }
    let line = if ctx.continuation.is_empty() {
        line.to_string()
    } else {
        let joined = std::mem::take(&mut ctx.continuation) + line;
        debug!("continued line: {joined}");
        joined
    };

    // a circle after other coordinates belongs to a coordinate list
    let circle_line = CIRCLE.captures(&line).filter(|captures| {
        captures
            .get(0)
            .is_some_and(|m| !tokens_re.is_match(&line[..m.start()]))
    });
    if let Some(captures) = circle_line {
        circle(ctx, &line, &captures)?;
    } else if let Some(captures) = SECTOR.captures(&line) {
        sector(ctx, &captures)?;
    } else {
        coordinate_list(ctx, finalizer, &line, tokens_re)?;
    }
    Ok(Handled::Consumed)
}

fn circle(ctx: &mut ParsingContext<'_>, line: &str, captures: &Captures) -> Result<(), AipError> {
    let center = point(captures, "n", "e").or_else(|| point(captures, "cn", "ce"));
    let radius_m = captures
        .name("rad")
        .and_then(|rad| parse_nm(rad.as_str()))
        .or_else(|| captures.name("rad_m").and_then(|rad| parse_decimal(rad.as_str())));
    let (Some(center), Some(radius_m)) = (center, radius_m) else {
        buffer_continuation(ctx, line, "after incomplete circle");
        return Ok(());
    };

    ctx.last_point = Some(center.clone());
    match ctx.generator.circle(&center, radius_m) {
        Some(circle) => ctx.merge_ring(circle)?,
        None => warn!("skipping circle around misformatted centre {center}"),
    }
    Ok(())
}

fn sector(ctx: &mut ParsingContext<'_>, captures: &Captures) -> Result<(), AipError> {
    let center = point(captures, "n", "e").or_else(|| ctx.last_point.clone());
    let from = captures["secfrom"].parse().ok();
    let to = captures["secto"].parse().ok();
    let inner_m = captures
        .name("radfrom")
        .and_then(|rad| parse_nm(rad.as_str()));
    let outer_m = parse_nm(&captures["rad"]);

    let sector = match (center, from, to, outer_m) {
        (Some(center), Some(from), Some(to), Some(outer_m)) => {
            ctx.generator.sector(&center, from, to, inner_m, outer_m)
        }
        _ => None,
    };
    match sector {
        Some(sector) => ctx.merge_ring(sector)?,
        None => warn!("skipping incomplete sector '{}'", &captures[0]),
    }
    Ok(())
}

/// Prepends the arc points between the current ring head and the arc's end
/// point; returns the offset of the end point in the line.
fn follow_arc(ctx: &mut ParsingContext<'_>, arc: &Captures) -> usize {
    let end_offset = arc
        .name("ne2")
        .or_else(|| arc.get(0))
        .map_or(0, |m| m.start());
    let direction = arc
        .name("dir")
        .map_or(Direction::Forward, |dir| Direction::from_keyword(dir.as_str()));
    let radius_m = arc
        .name("rad1")
        .or_else(|| arc.name("rad2"))
        .and_then(|rad| parse_nm(rad.as_str().trim()));
    let center = point(arc, "n", "e").and_then(|c| c.to_decimal());
    let end = point(arc, "n2", "e2").and_then(|c| c.to_decimal());

    let (Some(center), Some(end), Some(radius_m)) = (center, end, radius_m) else {
        warn!("skipping arc with misformatted values '{}'", &arc[0]);
        return end_offset;
    };
    let Some(start) = ctx.ring.first().and_then(DmsCoordinate::to_decimal) else {
        warn!("skipping arc without a start point '{}'", &arc[0]);
        return end_offset;
    };

    let candidates = ctx.generator.arc_candidates(center, radius_m);
    let fill = border::fill_along(start, end, &candidates, Some(direction));
    debug!("arc {direction:?} adds {} points", fill.len());
    for coord in fill {
        ctx.ring.insert(0, coord.to_dms());
    }
    ctx.last_point = None;
    end_offset
}

fn follow_border(ctx: &mut ParsingContext<'_>, anchor: &DmsCoordinate, to: &DmsCoordinate) {
    let (Some(from_ll), Some(to_ll)) = (anchor.to_decimal(), to.to_decimal()) else {
        warn!("cannot follow the border from {anchor} to {to}");
        return;
    };
    let fill = ctx.border.fill_along(from_ll, to_ll, None);
    debug!("border from {anchor} to {to} adds {} points", fill.len());
    for coord in fill {
        ctx.ring.insert(0, coord.to_dms());
    }
    ctx.last_point = None;
}

fn coordinate_list(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
    tokens_re: &regex::Regex,
) -> Result<(), AipError> {
    let tokens: Vec<Captures> = tokens_re.captures_iter(line).collect();
    let incomplete = tokens.iter().any(|token| {
        token.name("circle").is_some()
            || token
                .name("arc")
                .is_some_and(|arc| ARC.captures_at(line, arc.start()).is_none())
    });
    if incomplete {
        buffer_continuation(ctx, line, "after incomplete arc or circle");
        return Ok(());
    }
    debug!("{} coordinate tokens in '{line}'", tokens.len());

    let mut skip_until = 0;
    for token in &tokens {
        let Some(whole) = token.get(0) else {
            continue;
        };
        if whole.start() < skip_until {
            trace!("skipping arc centre {}", whole.as_str());
            continue;
        }
        if let Some(arc) = token.name("arc") {
            if let Some(arc) = ARC.captures_at(line, arc.start()) {
                skip_until = follow_arc(ctx, &arc);
            }
            continue;
        }

        let coordinate = point(token, "n", "e");
        if let Some(coordinate) = &coordinate {
            if let Some(anchor) = ctx.following_border.take() {
                follow_border(ctx, &anchor, coordinate);
            }
        }
        if let (Some(rad), Some(center)) = (token.name("rad"), point(token, "cn", "ce")) {
            let circle = parse_nm(rad.as_str())
                .and_then(|radius_m| ctx.generator.circle(&center, radius_m));
            match circle {
                Some(circle) => ctx.merge_ring(circle)?,
                None => warn!("skipping embedded circle '{}'", whole.as_str()),
            }
        }
        if let Some(coordinate) = &coordinate {
            if ctx.prepend(coordinate.clone()) {
                ctx.last_point = Some(coordinate.clone());
            }
        }
        if token.name("along").is_some() {
            ctx.following_border = coordinate.or_else(|| ctx.last_point.clone());
            debug!("following border from {:?}", ctx.following_border);
        }

        ctx.final_coordinate = token
            .name("ne")
            .is_some_and(|ne| ne.as_str().contains('('));
        if ctx.document.kind == DocumentKind::Airsport
            && ctx.final_coordinate
            && ctx.properties.floor.is_some()
        {
            debug!("final coordinate completes {:?}", ctx.name);
            finalizer.finalize(ctx)?;
        }
    }
    Ok(())
}

fn period(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    let period = &mut ctx.properties.period;
    let mut closing = false;
    if let Some(captures) = PERIOD_ESTABLISHED.captures(line) {
        period.dates_from.push(captures["pfrom"].to_string());
        period.dates_until.push(captures["pto"].to_string());
        closing = true;
    } else {
        let from = PERIOD_FROM.captures(line);
        let until = PERIOD_UNTIL.captures(line);
        if from.is_none() && until.is_none() {
            return Ok(Handled::Skipped);
        }
        if let Some(captures) = from {
            period.dates_from.push(captures["pfrom"].to_string());
            period.time_from = Some(captures["ptimefrom"].to_string());
        }
        if let Some(captures) = until {
            period.dates_until.push(captures["pto"].to_string());
            period.time_until = Some(captures["ptimeto"].to_string());
            closing = true;
        }
    }
    debug!("temporary {:?}", ctx.properties.period);
    ctx.properties.temporary = true;

    if closing && ctx.document.kind == DocumentKind::Supplement && ctx.is_complete() {
        debug!("closing date completes {:?}", ctx.name);
        finalizer.finalize(ctx)?;
    }
    Ok(Handled::Consumed)
}

fn frequency(
    ctx: &mut ParsingContext<'_>,
    _: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    if let Some(captures) = FREQUENCY.captures(line) {
        debug!("frequency {}", &captures["freq"]);
        ctx.properties.frequency = Some(captures["freq"].to_string());
    }
    Ok(Handled::Skipped)
}

fn vertical(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    let Some(limit) = parse_vertical_limit(line, ctx.document.remark_ceiling_ft()) else {
        return Ok(Handled::Skipped);
    };
    debug!("vertical limit {limit:?} in '{line}'");

    let limit = match limit {
        VerticalLimit::Single(value) if ctx.last_vertical.is_none() => {
            VerticalLimit::Ceiling(value)
        }
        VerticalLimit::Single(value) => VerticalLimit::Floor(value),
        limit => limit,
    };
    let floor_known = match limit {
        VerticalLimit::Ceiling(ceiling) => {
            ctx.set_ceiling(ceiling);
            ctx.last_vertical = Some(ceiling);
            false
        }
        VerticalLimit::Floor(floor) => {
            ctx.set_floor(floor);
            ctx.last_vertical = None;
            true
        }
        VerticalLimit::Range { floor, ceiling } => {
            ctx.set_ceiling(ceiling);
            ctx.set_floor(floor);
            ctx.last_vertical = Some(ceiling);
            true
        }
        VerticalLimit::Single(_) => false,
    };

    if floor_known {
        let document = &ctx.document;
        let completes = (document.finalizes_on_final_coordinate() && ctx.final_coordinate)
            || document.country != Country::HOME;
        let skipped = ctx
            .name
            .as_deref()
            .is_some_and(|name| SKIP_FINALIZE_ON_FLOOR.iter().any(|skip| name.contains(skip)));
        if completes && !skipped {
            debug!("floor completes {:?}", ctx.name);
            finalizer.finalize(ctx)?;
        }
    }
    Ok(Handled::Consumed)
}

fn name(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    let Some(name) = NAMES.iter().find_map(|re| {
        let captures = re.captures(line)?;
        let name = captures.name("name")?.as_str().trim();
        Some(match captures.name("name_cont") {
            Some(cont) => format!("{name} {}", cont.as_str().trim()),
            None => name.to_string(),
        })
    }) else {
        return Ok(Handled::Skipped);
    };
    if FILTERED_NAMES.iter().any(|filtered| name.contains(filtered)) {
        debug!("ignoring name {name}");
        return Ok(Handled::Consumed);
    }

    if ctx.has_limits()
        && (ctx.document.kind == DocumentKind::Restricted || ctx.ring.len() > 3)
    {
        debug!("new name {name} completes {:?}", ctx.name);
        finalizer.finalize(ctx)?;
    }
    debug!("name {name}");
    ctx.name = Some(name);
    Ok(Handled::Consumed)
}

/// The air sport chapter is a table without name grammar: inside it every
/// unrecognised line names the next feature.
fn airsport_table(
    ctx: &mut ParsingContext<'_>,
    finalizer: &mut Finalizer,
    line: &str,
) -> Result<Handled, AipError> {
    if ctx.document.kind != DocumentKind::Airsport {
        return Ok(Handled::Skipped);
    }
    let line = wstrip(line);
    match line.as_str() {
        "1" => ctx.in_airsport_table = true,
        "Avinor" => ctx.in_airsport_table = false,
        "2" => {}
        _ if ctx.in_airsport_table => {
            let ceiling = ctx.properties.ceiling;
            debug!("new air sport name {line}, carrying ceiling {ceiling:?}");
            finalizer.finalize(ctx)?;
            ctx.properties.ceiling = ceiling;
            ctx.name = Some(line);
        }
        _ => return Ok(Handled::Skipped),
    }
    Ok(Handled::Consumed)
}

#[cfg(test)]
mod test {
    use pretty_assertions_sorted::assert_eq_sorted;

    use super::{parse_line, LineKind, LINEBREAK};
    use crate::airspace::{AirspaceClass, Altitude};
    use crate::border::test::kirkenes_border;
    use crate::border::Border;
    use crate::context::ParsingContext;
    use crate::coordinate::DmsCoordinate;
    use crate::document::Document;
    use crate::finalizer::Finalizer;
    use crate::geometry::{distance, GeometryGenerator};
    use crate::units::nm2m;

    fn context<'a>(filename: &str, border: &'a Border) -> ParsingContext<'a> {
        ParsingContext::new(
            Document::from_filename(filename).unwrap(),
            border,
            GeometryGenerator::default(),
        )
    }

    fn parse_all(ctx: &mut ParsingContext, finalizer: &mut Finalizer, lines: &[&str]) {
        for line in lines {
            parse_line(ctx, finalizer, line).unwrap();
        }
        finalizer.finalize(ctx).unwrap();
    }

    #[test]
    fn test_minimal_document() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_all(
            &mut ctx,
            &mut finalizer,
            &[
                "Foo TMA",
                "600000N 0100000E - 600000N 0110000E - 610000N 0110000E - 610000N 0100000E",
                "Class C",
                "GND to 5000 FT AMSL",
            ],
        );

        assert_eq!(finalizer.airspaces.len(), 1);
        let airspace = &finalizer.airspaces[0];
        assert_eq!(airspace.name(), "Foo TMA");
        assert_eq!(airspace.properties.class, AirspaceClass::C);
        assert_eq!(airspace.properties.floor, Altitude::GROUND);
        assert_eq!(airspace.properties.ceiling, Altitude::feet(5000));
        assert_eq!(airspace.geometry.len(), 4);
    }

    #[test]
    fn test_line_kinds() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        let kinds: Vec<_> = [
            "Foo TMA",
            "600000N 0100000E - 600000N 0110000E",
            "Class: C",
            "Active from 15 MAI 1200",
            "Oslo APP 120.450 MHZ",
            "FL 95",
            "   ",
            "ikke relevant",
            LINEBREAK,
        ]
        .iter()
        .map(|line| parse_line(&mut ctx, &mut finalizer, line).unwrap())
        .collect();

        assert_eq!(
            kinds,
            vec![
                Some(LineKind::Name),
                Some(LineKind::Geometry),
                Some(LineKind::Class),
                Some(LineKind::Period),
                None,
                Some(LineKind::Vertical),
                None,
                None,
                Some(LineKind::Linebreak),
            ]
        );
        assert!(ctx.ring.is_empty());
        assert_eq!(ctx.name.as_deref(), Some("Foo TMA"));
    }

    #[test]
    fn test_circle_line() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_line(
            &mut ctx,
            &mut finalizer,
            "Radius 5 NM centred on 600000N 0100000E",
        )
        .unwrap();

        assert_eq!(ctx.ring.len(), ctx.generator.circle_points + 1);
        assert_eq!(ctx.ring.first(), ctx.ring.last());
        let center = DmsCoordinate::new("600000", "0100000").to_decimal().unwrap();
        for point in &ctx.ring {
            let d = distance(center, point.to_decimal().unwrap());
            assert!((d - nm2m(5.0)).abs() < 50.0, "left: {d:?} not equal right: {:?}", nm2m(5.0));
        }
    }

    #[test]
    fn test_circle_after_label() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_5_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_all(
            &mut ctx,
            &mut finalizer,
            &[
                "Foo CTR",
                "Lateral limits: Radius 5 NM centred on 600000N 0100000E",
                "GND to 2500 FT AMSL",
            ],
        );

        assert_eq!(finalizer.airspaces.len(), 1);
        let airspace = &finalizer.airspaces[0];
        assert_eq!(airspace.properties.class, AirspaceClass::D);
        assert_eq!(airspace.geometry.len(), 65);
    }

    #[test]
    fn test_wrapped_circle() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_line(
            &mut ctx,
            &mut finalizer,
            "A circle with radius 2 NM centred on",
        )
        .unwrap();
        assert!(ctx.ring.is_empty());
        parse_line(&mut ctx, &mut finalizer, "600000N 0100000E").unwrap();
        assert_eq!(ctx.ring.len(), 65);
        assert!(ctx.continuation.is_empty());
    }

    #[test]
    fn test_wrapped_coordinate() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_line(&mut ctx, &mut finalizer, "600000N 0100000E - 610000N").unwrap();
        assert!(ctx.ring.is_empty());
        parse_line(&mut ctx, &mut finalizer, "0110000E - 600000N 0110000E").unwrap();
        assert_eq!(
            ctx.ring,
            vec![
                DmsCoordinate::new("600000", "0110000"),
                DmsCoordinate::new("610000", "0110000"),
                DmsCoordinate::new("600000", "0100000"),
            ]
        );
    }

    #[test]
    fn test_sector_line() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_line(
            &mut ctx,
            &mut finalizer,
            "600000N 0100000E - Sector 270° - 090° (T), radius 2 - 8 NM",
        )
        .unwrap();
        assert!(ctx.ring.len() > 64);
        assert_eq!(ctx.ring.first(), ctx.ring.last());
    }

    #[test]
    fn test_arc() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_5_1.txt", &border);
        let mut finalizer = Finalizer::default();

        // quarter circle from due north to due east of the centre
        let center = DmsCoordinate::new("600000", "0100000").to_decimal().unwrap();
        let radius = nm2m(5.0);
        parse_line(
            &mut ctx,
            &mut finalizer,
            "600500N 0100000E - clockwise along an arc of 5 NM radius centred on 600000N 0100000E - 595957N 0101000E",
        )
        .unwrap();

        assert_eq!(ctx.ring.first(), Some(&DmsCoordinate::new("595957", "0101000")));
        assert_eq!(ctx.ring.last(), Some(&DmsCoordinate::new("600500", "0100000")));
        assert!(!ctx.ring.contains(&DmsCoordinate::new("600000", "0100000")));
        let arc = &ctx.ring[1..ctx.ring.len() - 1];
        assert!(arc.len() > 10 && arc.len() < 20, "{} points", arc.len());
        for point in arc {
            let point = point.to_decimal().unwrap();
            assert!(point.x > center.x && point.y > center.y - 0.01, "{point:?}");
            let d = distance(center, point);
            assert!((d - radius).abs() < 50.0, "left: {d:?} not equal right: {radius:?}");
        }
    }

    #[test]
    fn test_along_border() {
        let border = kirkenes_border();
        let mut ctx = context("EN_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_all(
            &mut ctx,
            &mut finalizer,
            &[
                "Kirkenes Centre TMA",
                "691000N 0300000E - 693112N 0291200E - along the border - 691312N 0284800E - 690000N 0290000E",
                "Upper limit: FL 245",
                "Lower limit: 1500 FT AMSL",
            ],
        );

        let airspace = &finalizer.airspaces[0];
        assert_eq!(airspace.name(), "Kirkenes Centre TMA");
        assert!(airspace.geometry.len() < 100, "{} points", airspace.geometry.len());
        assert!(airspace.geometry.len() > 4);
        for point in &airspace.geometry_ll {
            assert!(point.y > 68.0 && point.y < 71.0, "{point:?}");
            assert!(point.x > 27.0 && point.x < 32.0, "{point:?}");
        }
        assert_eq!(airspace.properties.ceiling, Altitude::flight_level(245));
        assert_eq!(airspace.properties.floor, Altitude::feet(1500));
    }

    #[test]
    fn test_single_vertical_values() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_5_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_line(&mut ctx, &mut finalizer, "FL 95").unwrap();
        assert_eq!(ctx.properties.ceiling, Some(Altitude::flight_level(95)));
        assert_eq!(ctx.properties.floor, None);

        parse_line(&mut ctx, &mut finalizer, "1500 FT AMSL").unwrap();
        assert_eq!(ctx.properties.ceiling, Some(Altitude::flight_level(95)));
        assert_eq!(ctx.properties.floor, Some(Altitude::feet(1500)));
        assert_eq!(ctx.last_vertical, None);
    }

    #[test]
    fn test_single_value_after_range() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_5_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_line(&mut ctx, &mut finalizer, "GND to 5000 FT AMSL").unwrap();
        assert_eq!(ctx.last_vertical, Some(Altitude::feet(5000)));

        parse_line(&mut ctx, &mut finalizer, "1000 FT AMSL").unwrap();
        assert_eq!(ctx.properties.ceiling, Some(Altitude::feet(5000)));
        assert_eq!(ctx.properties.floor, Some(Altitude::feet(1000)));
        assert_eq!(ctx.last_vertical, None);
    }

    #[test]
    fn test_see_remark() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_5_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_line(&mut ctx, &mut finalizer, "See RMK").unwrap();
        parse_line(&mut ctx, &mut finalizer, "GND").unwrap();
        assert_eq!(ctx.properties.ceiling, Some(Altitude::feet(13_499)));
        assert_eq!(ctx.properties.floor, Some(Altitude::GROUND));
    }

    #[test]
    fn test_restricted_names_finalize() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_5_1.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_all(
            &mut ctx,
            &mut finalizer,
            &[
                "EN R201 Foo",
                "600000N 0100000E - 600000N 0110000E - 610000N 0110000E - 610000N 0100000E",
                "FL 95",
                "GND",
                "EN R202 Bar",
                "620000N 0100000E - 620000N 0110000E - 630000N 0110000E - 630000N 0100000E",
                "4500 FT AMSL",
                "1000 FT AMSL",
            ],
        );

        let limits: Vec<_> = finalizer
            .airspaces
            .iter()
            .map(|a| (a.name(), a.properties.floor.feet, a.properties.ceiling.feet))
            .collect();
        assert_eq_sorted!(limits, vec![("EN R201 Foo", 0, 9500), ("EN R202 Bar", 1000, 4500)]);
        assert!(finalizer
            .airspaces
            .iter()
            .all(|a| a.properties.class == AirspaceClass::R));
    }

    #[test]
    fn test_final_coordinate_finalizes() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        for line in [
            "Polaris CTA",
            "600000N 0100000E - 600000N 0110000E - 610000N 0110000E - (610000N 0100000E)",
            "FL 245",
            "FL 95",
            "620000N 0100000E - 620000N 0110000E - 630000N 0110000E - (630000N 0100000E)",
            "FL 660",
            "FL 245",
        ] {
            parse_line(&mut ctx, &mut finalizer, line).unwrap();
        }

        let names: Vec<_> = finalizer.airspaces.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["Polaris CTA", "Polaris CTA 2"]);
        assert!(ctx.ring.is_empty());
    }

    #[test]
    fn test_supplement_closing_date_finalizes() {
        let border = Border::default();
        let mut ctx = context("en_sup_a_2024_012_en.txt", &border);
        let mut finalizer = Finalizer::default();

        for line in [
            "Foo TMA",
            "600000N 0100000E - 600000N 0110000E - 610000N 0110000E - 610000N 0100000E",
            "GND to 5000 FT AMSL",
        ] {
            parse_line(&mut ctx, &mut finalizer, line).unwrap();
        }
        assert!(finalizer.is_empty());

        parse_line(&mut ctx, &mut finalizer, "Active until 15 MAI 1200").unwrap();
        assert_eq!(finalizer.airspaces.len(), 1);
        let properties = &finalizer.airspaces[0].properties;
        assert!(properties.temporary);
        assert_eq!(properties.period.dates_until, ["15 MAI"]);
        assert_eq!(properties.period.time_until.as_deref(), Some("1200"));
        assert!(ctx.ring.is_empty());
    }

    #[test]
    fn test_information_area_class_finalizes() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_2_2.txt", &border);
        let mut finalizer = Finalizer::default();

        for line in [
            "Foo TIA",
            "600000N 0100000E - 600000N 0110000E - 610000N 0110000E - 610000N 0100000E",
            "GND to 5000 FT AMSL",
        ] {
            parse_line(&mut ctx, &mut finalizer, line).unwrap();
        }
        assert!(finalizer.is_empty());

        assert_eq!(
            parse_line(&mut ctx, &mut finalizer, "Class G").unwrap(),
            Some(LineKind::Class)
        );
        assert_eq!(finalizer.airspaces.len(), 1);
        assert_eq!(finalizer.airspaces[0].properties.class, AirspaceClass::G);
        assert!(ctx.ring.is_empty());
    }

    #[test]
    fn test_swedish_floor_finalizes() {
        let border = Border::default();
        let mut ctx = context("ES_ENR_2_1.txt", &border);
        let mut finalizer = Finalizer::default();

        for line in [
            "ARVIDSJAUR TMA",
            "652000N 0180000E - 652000N 0183000E - 662000N 0183000E - 662000N 0180000E",
            "FL 95",
            "1500 FT MSL",
        ] {
            parse_line(&mut ctx, &mut finalizer, line).unwrap();
        }
        assert_eq!(finalizer.airspaces.len(), 1);
        assert_eq!(finalizer.airspaces[0].name(), "ARVIDSJAUR TMA");
        assert!(ctx.ring.is_empty());

        for line in [
            "SÄLEN TMA",
            "612000N 0130000E - 612000N 0140000E - 622000N 0140000E - 622000N 0130000E",
            "FL 95",
            "1500 FT MSL",
        ] {
            parse_line(&mut ctx, &mut finalizer, line).unwrap();
        }
        assert_eq!(finalizer.airspaces.len(), 1);
        assert_eq!(ctx.ring.len(), 4);

        parse_line(&mut ctx, &mut finalizer, LINEBREAK).unwrap();
        let names: Vec<_> = finalizer.airspaces.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["ARVIDSJAUR TMA", "SÄLEN TMA"]);
    }

    #[test]
    fn test_aerodrome_section_gate() {
        let border = Border::default();
        let mut ctx = context("EN_AD_2_ENGM_en.txt", &border);
        let mut finalizer = Finalizer::default();

        assert_eq!(parse_line(&mut ctx, &mut finalizer, "Gardermoen CTR").unwrap(), Some(LineKind::SectionGate));
        assert_eq!(ctx.name, None);
        parse_line(&mut ctx, &mut finalizer, "ENGM AD 2.17 ATS airspace").unwrap();
        assert_eq!(parse_line(&mut ctx, &mut finalizer, "Gardermoen CTR").unwrap(), Some(LineKind::Name));
        assert_eq!(ctx.name.as_deref(), Some("Gardermoen CTR"));
        parse_line(&mut ctx, &mut finalizer, "ENGM AD 2.18 ATS communication facilities").unwrap();
        assert!(!ctx.in_ats_section);
    }

    #[test]
    fn test_airsport_table() {
        let border = Border::default();
        let mut ctx = context("EN_ENR_5_5.txt", &border);
        let mut finalizer = Finalizer::default();

        parse_all(
            &mut ctx,
            &mut finalizer,
            &[
                "1",
                "Vinstra",
                "600000N 0100000E - 600000N 0110000E - 610000N 0110000E - 610000N 0100000E",
                "FL 95",
                "GND",
                "Frya",
                "620000N 0100000E - 620000N 0110000E - 630000N 0110000E - 630000N 0100000E",
                "GND",
                "Avinor",
            ],
        );

        let limits: Vec<_> = finalizer
            .airspaces
            .iter()
            .map(|a| (a.name(), a.properties.floor.feet, a.properties.ceiling.feet))
            .collect();
        assert_eq_sorted!(limits, vec![("Vinstra", 0, 9500), ("Frya", 0, 9500)]);
        assert!(finalizer
            .airspaces
            .iter()
            .all(|a| a.properties.class == AirspaceClass::Luftsport));
    }
}

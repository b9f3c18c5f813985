use geo::{Area, BooleanOps, Coord, LineString, Polygon, SimplifyVwPreserve};
use thiserror::Error;
use tracing::{debug, warn};

use crate::coordinate::{DegMinSecExt as _, DmsCoordinate};

#[derive(Error, Debug)]
pub enum PolygonError {
    #[error("union of rings with {0} and {1} points is disjoint ({2} parts)")]
    Disjoint(usize, usize, usize),
}

pub type PolygonResult = Result<Vec<DmsCoordinate>, PolygonError>;

const SIMPLIFY_START_TOLERANCE: f64 = 0.001;
const SIMPLIFY_TOLERANCE_STEP: f64 = 0.0002;
const SIMPLIFY_MAX_TOLERANCE: f64 = 1.0;

fn to_polygon(ring: &[DmsCoordinate]) -> Option<Polygon> {
    let coords = ring
        .iter()
        .map(DmsCoordinate::to_decimal)
        .collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(LineString::new(coords), vec![]))
}

fn exterior_dms(polygon: &Polygon) -> Vec<DmsCoordinate> {
    polygon.exterior().coords().map(|c| c.to_dms()).collect()
}

/// Unions two rings into the exterior of a single polygon.
pub fn merge(existing: &[DmsCoordinate], other: Vec<DmsCoordinate>) -> PolygonResult {
    if existing.is_empty() {
        return Ok(other);
    }
    if existing.len() < 3 {
        debug!(
            "dropping {} pending points that cannot form a polygon before merge",
            existing.len()
        );
        return Ok(other);
    }
    let (Some(a), Some(b)) = (to_polygon(existing), to_polygon(&other)) else {
        warn!("cannot merge rings with misformatted coordinates");
        return Ok(other);
    };
    debug!(
        "merging rings with {} and {} points",
        existing.len(),
        other.len()
    );

    let union = a.union(&b);
    match union.0.as_slice() {
        [] => Ok(other),
        [polygon] => Ok(exterior_dms(polygon)),
        parts => Err(PolygonError::Disjoint(
            existing.len(),
            other.len(),
            parts.len(),
        )),
    }
}

/// Topology preserving simplification until the ring has at most `target` points.
pub fn simplify(ring: &[DmsCoordinate], target: usize) -> Vec<DmsCoordinate> {
    let Some(mut polygon) = to_polygon(ring) else {
        warn!("cannot simplify ring with misformatted coordinates");
        return ring.to_vec();
    };

    let mut tolerance = SIMPLIFY_START_TOLERANCE;
    while polygon.exterior().0.len() > target {
        if tolerance > SIMPLIFY_MAX_TOLERANCE {
            warn!(
                "giving up simplifying at {} points",
                polygon.exterior().0.len()
            );
            break;
        }
        polygon = polygon.simplify_vw_preserve(&(tolerance * tolerance));
        debug!(
            "simplified to {} points using tolerance {tolerance}",
            polygon.exterior().0.len()
        );
        tolerance += SIMPLIFY_TOLERANCE_STEP;
    }
    exterior_dms(&polygon)
}

/// Planar area in square degrees.
pub fn area(ring: &[Coord]) -> f64 {
    Polygon::new(LineString::from(ring.to_vec()), vec![]).unsigned_area()
}

use std::f64::consts::TAU;

use geo::Coord;
use tracing::debug;

use crate::coordinate::{DegMinSecExt, DmsCoordinate};

pub const RAD_EARTH: f64 = 6_371_000.0;

/// Spherical forward projection from `center` (decimal degrees) along a bearing
/// in radians.
pub fn destination(center: Coord, bearing: f64, distance_m: f64) -> Coord {
    let lat = center.y.to_radians();
    let lon = center.x.to_radians();
    let d = distance_m / RAD_EARTH;

    let lat2 = (lat.sin() * d.cos() + lat.cos() * d.sin() * bearing.cos()).asin();
    let lon2 =
        lon + (bearing.sin() * d.sin() * lat.cos()).atan2(d.cos() - lat.sin() * lat2.sin());

    Coord {
        x: lon2.to_degrees(),
        y: lat2.to_degrees(),
    }
}

/// Great circle distance in metres on the same sphere [`destination`] uses.
pub fn distance(a: Coord, b: Coord) -> f64 {
    let (lat1, lat2) = (a.y.to_radians(), b.y.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.x - a.x).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * RAD_EARTH * h.sqrt().asin()
}

/// Rasterizes circles, pie sectors and arcs around a centre point.
#[derive(Clone, Copy, Debug)]
pub struct GeometryGenerator {
    pub circle_points: usize,
}

impl Default for GeometryGenerator {
    fn default() -> Self {
        Self { circle_points: 64 }
    }
}

impl GeometryGenerator {
    pub fn new(circle_points: usize) -> Self {
        Self { circle_points }
    }

    /// Unclosed ring of `circle_points` points, starting due north.
    pub fn arc_candidates(&self, center: Coord, radius_m: f64) -> Vec<Coord> {
        (0..self.circle_points)
            .map(|i| {
                let bearing = i as f64 * TAU / self.circle_points as f64;
                destination(center, bearing, radius_m)
            })
            .collect()
    }

    pub fn circle_decimal(&self, center: Coord, radius_m: f64) -> Vec<Coord> {
        let mut circle = self.arc_candidates(center, radius_m);
        if let Some(&first) = circle.first() {
            circle.push(first);
        }
        circle
    }

    pub fn circle(&self, center: &DmsCoordinate, radius_m: f64) -> Option<Vec<DmsCoordinate>> {
        debug!("generating circle around {center}, radius {radius_m} m");
        let center = center.to_decimal()?;
        Some(
            self.circle_decimal(center, radius_m)
                .iter()
                .map(DegMinSecExt::to_dms)
                .collect(),
        )
    }

    /// Pie slice swept clockwise from `from_deg` to `to_deg`.
    ///
    /// Without an inner radius the slice starts and ends in the centre point.
    pub fn sector(
        &self,
        center: &DmsCoordinate,
        from_deg: i32,
        to_deg: i32,
        inner_m: Option<f64>,
        outer_m: f64,
    ) -> Option<Vec<DmsCoordinate>> {
        let span = (to_deg.rem_euclid(360) - from_deg.rem_euclid(360)).rem_euclid(360);
        debug!(
            "generating sector around {center}, {from_deg}° to {to_deg}° ({span}°), radius {inner_m:?} to {outer_m} m"
        );
        let center_ll = center.to_decimal()?;
        let from = f64::from(from_deg).to_radians();
        let span = f64::from(span).to_radians();
        let inner_m = inner_m.filter(|radius| *radius > 0.0);

        let mut inner = match inner_m {
            Some(_) => Vec::with_capacity(self.circle_points + 1),
            None => vec![center.clone()],
        };
        let mut outer = Vec::with_capacity(self.circle_points + 1);
        for i in 0..=self.circle_points {
            let bearing = from + i as f64 * span / self.circle_points as f64;
            if let Some(radius) = inner_m {
                inner.insert(0, destination(center_ll, bearing, radius).to_dms());
            }
            outer.push(destination(center_ll, bearing, outer_m).to_dms());
        }

        let first = inner[0].clone();
        inner.extend(outer);
        inner.push(first);
        Some(inner)
    }
}

use std::io;
use std::path::Path;

use geo::Coord;
use geojson::{GeoJson, Geometry, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::document::Country;

#[derive(Error, Debug)]
pub enum BorderError {
    #[error("failed to read border file: {0}")]
    FileRead(#[from] io::Error),
    #[error("failed to parse border geojson: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("unsupported border geometry: {0}")]
    UnsupportedGeometry(String),
    #[error("border file contains no points")]
    Empty,
}

pub type BorderResult = Result<Border, BorderError>;

/// Walking direction along a ring, in index order.
///
/// The reference rings and the generated circles both increase their bearing
/// with the index, so `Forward` is clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword.starts_with("counter") {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

/// Read-only national border ring in decimal degrees, without closing point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Border {
    pub points: Vec<Coord>,
}

fn positions_to_coords(positions: &[Vec<f64>]) -> Vec<Coord> {
    positions
        .iter()
        .filter_map(|position| match position.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect()
}

fn geometry_points(geometry: &Geometry) -> Result<Vec<Coord>, BorderError> {
    match &geometry.value {
        Value::Polygon(rings) => Ok(rings
            .first()
            .map(|exterior| positions_to_coords(exterior))
            .unwrap_or_default()),
        Value::LineString(line) => Ok(positions_to_coords(line)),
        Value::MultiLineString(lines) => Ok(lines
            .iter()
            .flat_map(|line| positions_to_coords(line))
            .collect()),
        Value::Point(_) | Value::MultiPoint(_) => {
            Err(BorderError::UnsupportedGeometry("Point".to_string()))
        }
        Value::MultiPolygon(_) => Err(BorderError::UnsupportedGeometry("MultiPolygon".to_string())),
        Value::GeometryCollection(_) => Err(BorderError::UnsupportedGeometry(
            "GeometryCollection".to_string(),
        )),
    }
}

impl Border {
    pub fn new(mut points: Vec<Coord>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    pub fn parse(content: &str) -> BorderResult {
        let geometry = match content.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .next()
                .and_then(|feature| feature.geometry),
            GeoJson::Feature(feature) => feature.geometry,
            GeoJson::Geometry(geometry) => Some(geometry),
        }
        .ok_or(BorderError::Empty)?;

        let points = geometry_points(&geometry)?;
        if points.is_empty() {
            return Err(BorderError::Empty);
        }
        Ok(Self::new(points))
    }

    pub fn load(path: impl AsRef<Path>) -> BorderResult {
        let path = path.as_ref();
        let border = Self::parse(&fs_err::read_to_string(path)?)?;
        info!("{} has {} border points", path.display(), border.points.len());
        Ok(border)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Ring index closest to `target` by unweighted |Δlon| + |Δlat|.
    pub fn nearest_index(&self, target: Coord) -> Option<usize> {
        nearest_index(&self.points, target)
    }

    pub fn fill_along(&self, from: Coord, to: Coord, direction: Option<Direction>) -> Vec<Coord> {
        fill_along(from, to, &self.points, direction)
    }
}

pub fn nearest_index(ring: &[Coord], target: Coord) -> Option<usize> {
    ring.iter()
        .enumerate()
        .map(|(i, point)| (i, (point.x - target.x).abs() + (point.y - target.y).abs()))
        .fold(None, |nearest: Option<(usize, f64)>, (i, d)| match nearest {
            Some((_, best)) if best <= d => nearest,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Ring points strictly between the points nearest to `from` and `to`.
///
/// Without an explicit direction the walk with fewer steps wins; on a tie the
/// walk goes forward when `to` lies at a higher index than `from`.
pub fn fill_along(
    from: Coord,
    to: Coord,
    ring: &[Coord],
    direction: Option<Direction>,
) -> Vec<Coord> {
    let (Some(from_index), Some(to_index)) = (nearest_index(ring, from), nearest_index(ring, to))
    else {
        warn!("cannot follow an empty ring");
        return vec![];
    };
    let len = ring.len();
    let forward_steps = (to_index + len - from_index) % len;
    let backward_steps = (from_index + len - to_index) % len;

    let direction = direction.unwrap_or_else(|| match forward_steps.cmp(&backward_steps) {
        std::cmp::Ordering::Less => Direction::Forward,
        std::cmp::Ordering::Greater => Direction::Backward,
        std::cmp::Ordering::Equal if to_index > from_index => Direction::Forward,
        std::cmp::Ordering::Equal => Direction::Backward,
    });

    let path: Vec<Coord> = match direction {
        Direction::Forward => (1..forward_steps)
            .map(|step| ring[(from_index + step) % len])
            .collect(),
        Direction::Backward => (1..backward_steps)
            .map(|step| ring[(from_index + len - step) % len])
            .collect(),
    };
    debug!(
        "following {direction:?} from index {from_index} to {to_index} of {len}: {} points",
        path.len()
    );
    path
}

/// The two reference rings, selected by the country a document describes.
#[derive(Clone, Debug, Default)]
pub struct Borders {
    pub norway: Border,
    pub sweden: Border,
}

impl Borders {
    pub fn new(norway: Border, sweden: Border) -> Self {
        Self { norway, sweden }
    }

    pub fn load(norway: impl AsRef<Path>, sweden: impl AsRef<Path>) -> Result<Self, BorderError> {
        Ok(Self::new(Border::load(norway)?, Border::load(sweden)?))
    }

    pub fn for_country(&self, country: Country) -> &Border {
        match country {
            Country::Norway => &self.norway,
            Country::Sweden => &self.sweden,
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::f64::consts::TAU;

    use geo::Coord;

    use super::{fill_along, nearest_index, Border, BorderError, Direction};

    /// A closed ring that starts and ends in the middle of a short stretch near
    /// Kirkenes, with the rest of the points spread down to southern Norway.
    pub(crate) fn kirkenes_border() -> Border {
        let mut points = Vec::new();
        // local stretch, first half: heading north-east towards the coast
        for i in 0..10 {
            points.push(Coord {
                x: 29.0 + f64::from(i) * 0.05,
                y: 69.40 + f64::from(i) * 0.03,
            });
        }
        // the long way round
        for i in 0..2000 {
            let t = f64::from(i) / 2000.0 * TAU;
            points.push(Coord {
                x: 20.0 + 9.0 * t.cos(),
                y: 64.0 + 5.0 * t.sin(),
            });
        }
        // local stretch, second half, ending next to the first point
        for i in 0..10 {
            points.push(Coord {
                x: 28.50 + f64::from(i) * 0.05,
                y: 69.10 + f64::from(i) * 0.03,
            });
        }
        Border::new(points)
    }

    #[test]
    fn test_nearest_index() {
        let ring = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ];
        assert_eq!(nearest_index(&ring, Coord { x: 0.9, y: 0.2 }), Some(1));
        assert_eq!(nearest_index(&[], Coord { x: 0.9, y: 0.2 }), None);
    }

    #[test]
    fn test_fill_along_shortest() {
        let ring: Vec<_> = (0..10).map(|i| Coord { x: f64::from(i), y: 0.0 }).collect();

        let path = fill_along(ring[2], ring[5], &ring, None);
        assert_eq!(path, vec![ring[3], ring[4]]);

        let path = fill_along(ring[5], ring[2], &ring, None);
        assert_eq!(path, vec![ring[4], ring[3]]);

        // wraps around the ring seam
        let path = fill_along(ring[8], ring[1], &ring, None);
        assert_eq!(path, vec![ring[9], ring[0]]);

        let path = fill_along(ring[1], ring[8], &ring, None);
        assert_eq!(path, vec![ring[0], ring[9]]);

        // tie on an even ring
        let path = fill_along(ring[0], ring[5], &ring, None);
        assert_eq!(path, vec![ring[1], ring[2], ring[3], ring[4]]);
        let path = fill_along(ring[5], ring[0], &ring, None);
        assert_eq!(path, vec![ring[4], ring[3], ring[2], ring[1]]);
    }

    #[test]
    fn test_fill_along_explicit_direction() {
        let ring: Vec<_> = (0..6).map(|i| Coord { x: f64::from(i), y: 0.0 }).collect();

        let path = fill_along(ring[1], ring[2], &ring, Some(Direction::Backward));
        assert_eq!(path, vec![ring[0], ring[5], ring[4], ring[3]]);

        let path = fill_along(ring[1], ring[1], &ring, Some(Direction::Forward));
        assert!(path.is_empty());
    }

    #[test]
    fn test_kirkenes_local_path() {
        let border = kirkenes_border();
        let from = Coord { x: 29.2, y: 69.52 };
        let to = Coord { x: 28.8, y: 69.22 };
        let path = border.fill_along(from, to, None);

        assert!(path.len() < 20, "{} points", path.len());
        for point in &path {
            assert!(point.y > 69.0 && point.y < 70.0, "{point:?}");
            assert!(point.x > 28.0 && point.x < 31.0, "{point:?}");
        }
    }

    #[test]
    fn test_parse_border() {
        let border = Border::parse(
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{},
            "geometry":{"type":"Polygon","coordinates":[[[5,58],[31,70],[20,69],[5,58]]]}}]}"#,
        )
        .unwrap();
        assert_eq!(border.len(), 3);

        let border = Border::parse(
            r#"{"type":"MultiLineString","coordinates":[[[5,58],[6,59]],[[7,60],[8,61]]]}"#,
        )
        .unwrap();
        assert_eq!(border.len(), 4);

        assert!(matches!(
            Border::parse(r#"{"type":"Point","coordinates":[5,58]}"#),
            Err(BorderError::UnsupportedGeometry(_))
        ));
    }

    #[test]
    fn test_direction_keyword() {
        assert_eq!(Direction::from_keyword("clockwise"), Direction::Forward);
        assert_eq!(Direction::from_keyword("counterclockwise"), Direction::Backward);
    }
}

//! Altitude and distance conversions used while parsing and rendering.

use uom::si::f64::Length;
use uom::si::length::{foot, meter, nautical_mile};

/// Parses a decimal number that may use `,` as decimal separator.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let value = value.trim();
    value
        .parse()
        .ok()
        .or_else(|| value.replace(',', ".").parse().ok())
}

/// Feet to whole metres, truncated.
pub fn ft2m(ft: i64) -> i64 {
    Length::new::<foot>(ft as f64).get::<meter>() as i64
}

pub fn m2ft(m: f64) -> f64 {
    Length::new::<meter>(m).get::<foot>()
}

pub fn nm2m(nm: f64) -> f64 {
    Length::new::<nautical_mile>(nm).get::<meter>()
}

pub fn m2nm(m: f64) -> f64 {
    Length::new::<meter>(m).get::<nautical_mile>()
}

/// Parses a nautical mile figure from the text, e.g. `5,5`, into metres.
pub fn parse_nm(nm: &str) -> Option<f64> {
    parse_decimal(nm).map(nm2m)
}

pub fn fl2ft(fl: u32) -> i64 {
    i64::from(fl) * 100
}

#[cfg(test)]
mod test {
    use super::{fl2ft, ft2m, m2ft, m2nm, nm2m, parse_decimal, parse_nm};

    #[test]
    fn test_altitudes() {
        assert_eq!(ft2m(0), 0);
        assert_eq!(ft2m(1000), 304);
        assert_eq!(ft2m(3500), 1066);
        assert_eq!(fl2ft(95), 9500);
        assert!((m2ft(1000.0) - 3280.839_895).abs() < 1e-5);
    }

    #[test]
    fn test_distances() {
        assert!((nm2m(1.0) - 1852.0).abs() < 1e-9);
        assert!((m2nm(926.0) - 0.5).abs() < 1e-9);
        assert!((parse_nm("5,5").unwrap() - 10_186.0).abs() < 1e-6);
        assert!((parse_nm(" 2.5 ").unwrap() - 4630.0).abs() < 1e-6);
        assert_eq!(parse_decimal("abc"), None);
    }
}

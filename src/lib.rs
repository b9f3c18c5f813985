use std::io;

use tracing::warn;

pub mod aip;
pub mod airspace;
pub mod border;
pub mod classifier;
pub mod columns;
pub mod context;
pub mod coordinate;
pub mod corrections;
pub mod document;
pub mod finalizer;
pub mod geometry;
pub mod output;
pub mod patterns;
pub mod polygon;
pub mod units;
pub mod vertical;

pub use aip::{AipError, AipParser, Collection, Filter, ParserConfig};
pub use airspace::{Airspace, AirspaceClass, AirspaceProperties};
pub use coordinate::{DegMinSecExt, DmsCoordinate};

fn read_to_string(contents: &[u8]) -> Result<String, io::Error> {
    String::from_utf8(contents.to_vec()).or_else(|_| {
        let (string, _, errors) = encoding_rs::WINDOWS_1252.decode(contents);
        if errors {
            warn!("errors while decoding win-1252");
        }
        Ok(string.to_string())
    })
}

#[cfg(test)]
mod test {
    use super::read_to_string;

    #[test]
    fn test_read_latin1_fallback() {
        let bytes = b"S\xc4LEN CTR";
        assert_eq!(read_to_string(bytes).unwrap(), "SÄLEN CTR");
        assert_eq!(read_to_string("Vågå".as_bytes()).unwrap(), "Vågå");
    }
}

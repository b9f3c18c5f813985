//! Serialisers for a finished [`Collection`].

use std::io;
use std::path::Path;

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::aip::Collection;

pub mod geojson;
pub mod openair;
pub mod openaip;
pub mod xctrack;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("XML: {0}")]
    Xml(#[from] quick_xml::SeError),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OutputResult<T = ()> = Result<T, OutputError>;

/// Wave windows for gliders, exported whatever their floor.
static WAVE_WINDOWS: &[&str] = &[
    "Lesja",
    "Rondane",
    "Jotunheimen",
    "Oppdal",
    "Dovre",
    "Bjorli",
    "Ringebu",
    "Vågå",
];

pub fn is_wave_window(name: &str) -> bool {
    WAVE_WINDOWS.iter().any(|window| name.contains(window))
}

fn write(path: &Path, contents: impl AsRef<[u8]>) -> OutputResult {
    info!("writing {}", path.display());
    fs_err::write(path, contents)?;
    Ok(())
}

/// Writes every output format of `collection` into `dir`.
pub fn write_all(collection: &Collection, dir: impl AsRef<Path>) -> OutputResult {
    let dir = dir.as_ref();
    fs_err::create_dir_all(dir)?;

    let airspaces = &collection.airspaces;
    write(
        &dir.join("luftrom.geojson"),
        self::geojson::to_feature_collection(airspaces).to_string(),
    )?;
    write(
        &dir.join("accsectors.geojson"),
        self::geojson::to_feature_collection(&collection.acc_sectors).to_string(),
    )?;

    for (extension, rendering) in [
        ("ft.txt", openair::Rendering::Feet),
        ("m.txt", openair::Rendering::Meters),
        ("fl.txt", openair::Rendering::FlightLevel),
    ] {
        write(
            &dir.join(format!("luftrom.{extension}")),
            openair::to_openair(airspaces, rendering),
        )?;
    }

    write(&dir.join("luftrom.openaip"), openaip::to_openaip(airspaces)?)?;
    write(
        &dir.join("xcontest.json"),
        xctrack::to_xctrack(airspaces, Utc::now())?,
    )?;
    Ok(())
}

use std::convert::Infallible;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::airspace::Airspace;
use crate::border::{BorderError, Borders};
use crate::classifier::parse_line;
use crate::columns::split_columns;
use crate::context::ParsingContext;
use crate::document::{Document, DocumentError};
use crate::finalizer::Finalizer;
use crate::geometry::GeometryGenerator;
use crate::polygon::PolygonError;
use crate::read_to_string;

#[derive(Error, Debug)]
pub enum AipError {
    #[error("failed to read source document: {0}")]
    FileRead(#[from] io::Error),
    #[error("Document: {0}")]
    Document(#[from] DocumentError),
    #[error("Border: {0}")]
    Border(#[from] BorderError),
    #[error("Polygon: {0}")]
    Polygon(#[from] PolygonError),
    #[error("feature {name:?} from {source_href} has no {field}")]
    MissingField {
        field: &'static str,
        name: String,
        source_href: String,
    },
    #[error("feature {name} from {source_href} has floor {floor} ft not below ceiling {ceiling} ft")]
    InvertedLimits {
        name: String,
        source_href: String,
        floor: i64,
        ceiling: i64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Points per generated circle.
    pub circle_points: usize,
    /// Rings with more points than this are simplified.
    pub simplify_threshold: usize,
    pub simplify_target: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            circle_points: 64,
            simplify_threshold: 100,
            simplify_target: 100,
        }
    }
}

/// Selects features of the main collection by position or name substring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    Index(usize),
    Name(String),
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse()
            .map_or_else(|_| Self::Name(s.to_string()), Self::Index))
    }
}

/// All features of a run, largest first.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    pub airspaces: Vec<Airspace>,
    pub acc_sectors: Vec<Airspace>,
}

fn sort_by_area(airspaces: &mut [Airspace]) {
    airspaces.sort_by(|a, b| b.area.total_cmp(&a.area));
}

#[derive(Debug)]
pub struct AipParser {
    config: ParserConfig,
    borders: Borders,
    finalizer: Finalizer,
}

impl AipParser {
    pub fn new(config: ParserConfig, borders: Borders) -> Self {
        Self {
            config,
            borders,
            finalizer: Finalizer::new(config.simplify_threshold, config.simplify_target),
        }
    }

    /// Parses one source document, `filename` telling its country and chapter.
    ///
    /// Returns the number of features it added.
    pub fn parse_document(&mut self, filename: &str, contents: &[u8]) -> Result<usize, AipError> {
        let document = Document::from_filename(filename)?;
        info!(
            "reading {} ({:?}, {})",
            document.source, document.kind, document.country
        );
        let text = read_to_string(contents)?;
        let lines = split_columns(&document, &text);
        debug!("{} logical lines", lines.len());

        let before = self.finalizer.len();
        let border = self.borders.for_country(document.country);
        let generator = GeometryGenerator::new(self.config.circle_points);
        let mut ctx = ParsingContext::new(document, border, generator);
        for line in &lines {
            parse_line(&mut ctx, &mut self.finalizer, line)?;
        }
        self.finalizer.finalize(&mut ctx)?;

        let added = self.finalizer.len() - before;
        info!("{added} features from {}", ctx.document.source);
        Ok(added)
    }

    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<usize, AipError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .into_owned();
        self.parse_document(&filename, &fs_err::read(path)?)
    }

    /// Parses every `.txt` document of `dir` in file name order.
    pub fn parse_directory(&mut self, dir: impl AsRef<Path>) -> Result<usize, AipError> {
        let mut paths = fs_err::read_dir(dir.as_ref())?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<PathBuf>, _>>()?;
        paths.retain(|path| path.extension().is_some_and(|ext| ext == "txt"));
        paths.sort();

        let mut total = 0;
        for path in &paths {
            total += self.parse_file(path)?;
        }
        info!("{total} features from {} documents", paths.len());
        Ok(total)
    }

    pub fn finish(self, filter: Option<&Filter>) -> Collection {
        let mut airspaces = self.finalizer.airspaces;
        let mut acc_sectors = self.finalizer.acc_sectors;
        match filter {
            Some(Filter::Index(index)) => {
                airspaces = airspaces.into_iter().nth(*index).into_iter().collect();
            }
            Some(Filter::Name(name)) => airspaces.retain(|airspace| airspace.name().contains(name)),
            None => {}
        }
        sort_by_area(&mut airspaces);
        sort_by_area(&mut acc_sectors);
        info!(
            "{} airspaces, {} ACC sectors",
            airspaces.len(),
            acc_sectors.len()
        );
        Collection {
            airspaces,
            acc_sectors,
        }
    }
}

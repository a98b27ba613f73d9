use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("feature {feature}: position {position} has fewer than two components")]
    MalformedCoordinate { feature: usize, position: usize },
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("kml: {0}")]
    Kml(#[from] kml::Error),
    #[error("geojson: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("gpx: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

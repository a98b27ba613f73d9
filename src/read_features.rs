use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use geojson::Feature;
use walkdir::WalkDir;

use crate::error::{Error, Result};

const EXTENSIONS: [&str; 4] = ["kml", "geojson", "json", "gpx"];

fn feature(value: geojson::Value, name: Option<&str>) -> Feature {
    let properties = name.map(|n| {
        let mut p = geojson::JsonObject::new();
        p.insert("name".to_string(), geojson::JsonValue::from(n));
        p
    });
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(value)),
        id: None,
        properties,
        foreign_members: None,
    }
}

mod locgpx {
    use super::*;
    use geojson::Value;
    use gpx::{Gpx, Waypoint};
    use std::io::Cursor;

    fn position(p: &Waypoint) -> Vec<f64> {
        match p.elevation {
            Some(ele) => vec![p.point().x(), p.point().y(), ele],
            None => vec![p.point().x(), p.point().y()],
        }
    }

    fn positions(points: &[Waypoint]) -> Vec<Vec<f64>> {
        points.iter().map(position).collect()
    }

    pub fn read(content: &str) -> Result<Vec<Feature>> {
        let gpx: Gpx = gpx::read(Cursor::new(content))?;

        let waypoints = gpx
            .waypoints
            .iter()
            .map(|w| feature(Value::Point(position(w)), w.name.as_deref()));
        let routes = gpx
            .routes
            .iter()
            .map(|r| feature(Value::LineString(positions(&r.points)), r.name.as_deref()));
        let tracks = gpx.tracks.iter().filter_map(|t| {
            let mut lines: Vec<_> = t.segments.iter().map(|s| positions(&s.points)).collect();
            let value = match lines.len() {
                0 => {
                    log::debug!("gpx: track {:?} has no segments, skipped", t.name);
                    return None;
                }
                1 => Value::LineString(lines.remove(0)),
                _ => Value::MultiLineString(lines),
            };
            Some(feature(value, t.name.as_deref()))
        });
        Ok(waypoints.chain(routes).chain(tracks).collect())
    }
}

mod locjson {
    use super::*;
    use geojson::GeoJson;

    pub fn read(content: &str) -> Result<Vec<Feature>> {
        let geojson: GeoJson = content.parse()?;
        Ok(match geojson {
            GeoJson::FeatureCollection(collection) => collection.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(geometry) => vec![feature(geometry.value, None)],
        })
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|e| EXTENSIONS.contains(&e.as_str()))
}

/// Reads the features of a `.kml`, `.geojson`/`.json` or `.gpx` file.
pub fn read(path: &Path) -> Result<Vec<Feature>> {
    let Some(ext) = extension(path).filter(|e| EXTENSIONS.contains(&e.as_str())) else {
        return Err(Error::UnsupportedFormat(path.to_path_buf()));
    };
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    log::trace!("read {} bytes from {}", content.len(), path.display());
    match ext.as_str() {
        "kml" => crate::read_kml::read(&content),
        "gpx" => locgpx::read(&content),
        _ => locjson::read(&content),
    }
}

/// A file yields itself; a directory yields the supported files below it,
/// sorted.
pub fn collect(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    let mut ret: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                log::warn!("walk: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_supported(e.path()))
        .map(|e| e.into_path())
        .collect();
    ret.sort();
    ret
}

use std::collections::BTreeMap;
use std::collections::btree_map;

use geo::{Coord, Euclidean, Length, LineString};
use geojson::{Feature, Value};

use crate::error::{Error, Result};
use crate::geometry_type::GeometryType;

/// Number of features per geometry type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeCountReport {
    counts: BTreeMap<GeometryType, usize>,
}

impl TypeCountReport {
    pub fn get(&self, t: GeometryType) -> Option<usize> {
        self.counts.get(&t).copied()
    }
    pub fn iter(&self) -> btree_map::Iter<'_, GeometryType, usize> {
        self.counts.iter()
    }
    pub fn len(&self) -> usize {
        self.counts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Cumulative planar length of LineString and MultiLineString features,
/// in the units of the input coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineLengthReport {
    lengths: BTreeMap<GeometryType, f64>,
}

impl LineLengthReport {
    pub fn get(&self, t: GeometryType) -> Option<f64> {
        self.lengths.get(&t).copied()
    }
    pub fn iter(&self) -> btree_map::Iter<'_, GeometryType, f64> {
        self.lengths.iter()
    }
    pub fn len(&self) -> usize {
        self.lengths.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub counts: TypeCountReport,
    pub lengths: LineLengthReport,
}

impl Summary {
    pub fn info(&self) {
        log::info!("summary: features: {}", self.counts.total());
        for (t, n) in self.counts.iter() {
            log::info!("summary: {}: {}", t, n);
        }
        for (t, l) in self.lengths.iter() {
            log::info!("summary: {} length: {:.3}", t, l);
        }
    }
}

pub fn summarize(features: &[Feature]) -> Result<Summary> {
    Ok(Summary {
        counts: count_by_type(features),
        lengths: sum_line_lengths(features)?,
    })
}

/// Features without a geometry are skipped.
pub fn count_by_type(features: &[Feature]) -> TypeCountReport {
    let mut counts = BTreeMap::new();
    for (index, feature) in features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            log::debug!("feature {}: no geometry, skipped", index);
            continue;
        };
        *counts.entry(GeometryType::of(&geometry.value)).or_insert(0) += 1;
    }
    TypeCountReport { counts }
}

/// Fails on the first position with fewer than two components; no partial
/// report is returned.
pub fn sum_line_lengths(features: &[Feature]) -> Result<LineLengthReport> {
    let mut lengths = BTreeMap::new();
    for (index, feature) in features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        match &geometry.value {
            Value::LineString(positions) => {
                let length = line_length(positions, index)?;
                log::trace!("feature {}: LineString length {}", index, length);
                *lengths.entry(GeometryType::LineString).or_insert(0f64) += length;
            }
            Value::MultiLineString(lines) => {
                for positions in lines {
                    let length = line_length(positions, index)?;
                    log::trace!("feature {}: MultiLineString part length {}", index, length);
                    *lengths.entry(GeometryType::MultiLineString).or_insert(0f64) += length;
                }
            }
            _ => {}
        }
    }
    log::debug!("line lengths: {:?}", lengths);
    Ok(LineLengthReport { lengths })
}

fn planar_coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

// Planar distance on the first two components, no great-circle correction.
fn line_length(positions: &[Vec<f64>], feature: usize) -> Result<f64> {
    let coords = positions
        .iter()
        .enumerate()
        .map(|(position, p)| {
            planar_coord(p).ok_or(Error::MalformedCoordinate { feature, position })
        })
        .collect::<Result<Vec<Coord<f64>>>>()?;
    Ok(Euclidean.length(&LineString::new(coords)))
}

use core::fmt;

use geojson::Value;

/// The GeoJSON geometry types, used as report keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Point(_) => GeometryType::Point,
            Value::MultiPoint(_) => GeometryType::MultiPoint,
            Value::LineString(_) => GeometryType::LineString,
            Value::MultiLineString(_) => GeometryType::MultiLineString,
            Value::Polygon(_) => GeometryType::Polygon,
            Value::MultiPolygon(_) => GeometryType::MultiPolygon,
            Value::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

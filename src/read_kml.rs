use geojson::{Feature, JsonObject, JsonValue, Value};
use kml::Kml;
use kml::types::{Coord, Geometry, LinearRing, Placemark};

use crate::error::Result;

/// Converts a KML document into GeoJSON features, one per placemark, in
/// document order. Placemarks without a supported geometry yield a feature
/// with no geometry.
pub fn read(content: &str) -> Result<Vec<Feature>> {
    let kml: Kml = content.parse()?;
    let mut features = Vec::new();
    collect_placemarks(&kml, &mut features);
    log::debug!("kml: {} placemarks", features.len());
    Ok(features)
}

fn collect_placemarks(kml: &Kml, features: &mut Vec<Feature>) {
    match kml {
        Kml::KmlDocument(doc) => doc
            .elements
            .iter()
            .for_each(|e| collect_placemarks(e, features)),
        Kml::Document { elements, .. } => elements
            .iter()
            .for_each(|e| collect_placemarks(e, features)),
        Kml::Folder(z) => z
            .elements
            .iter()
            .for_each(|e| collect_placemarks(e, features)),
        Kml::Placemark(p) => features.push(to_feature(p)),
        _ => {}
    }
}

fn to_feature(placemark: &Placemark) -> Feature {
    let mut properties = JsonObject::new();
    if let Some(name) = &placemark.name {
        properties.insert("name".to_string(), JsonValue::from(name.clone()));
    }
    if let Some(description) = &placemark.description {
        properties.insert(
            "description".to_string(),
            JsonValue::from(description.clone()),
        );
    }
    let value = placemark.geometry.as_ref().and_then(to_value);
    if value.is_none() {
        log::trace!("placemark {:?}: no supported geometry", placemark.name);
    }
    Feature {
        bbox: None,
        geometry: value.map(geojson::Geometry::new),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn position(c: &Coord) -> Vec<f64> {
    match c.z {
        Some(z) => vec![c.x, c.y, z],
        None => vec![c.x, c.y],
    }
}

fn ring(r: &LinearRing) -> Vec<Vec<f64>> {
    r.coords.iter().map(position).collect()
}

fn to_value(geometry: &Geometry) -> Option<Value> {
    match geometry {
        Geometry::Point(p) => Some(Value::Point(position(&p.coord))),
        Geometry::LineString(ls) => Some(Value::LineString(
            ls.coords.iter().map(position).collect(),
        )),
        Geometry::Polygon(p) => {
            let mut rings = vec![ring(&p.outer)];
            rings.extend(p.inner.iter().map(ring));
            Some(Value::Polygon(rings))
        }
        Geometry::MultiGeometry(m) => {
            let mut children: Vec<Value> = m.geometries.iter().filter_map(to_value).collect();
            match children.len() {
                0 => None,
                1 => children.pop(),
                _ => Some(Value::GeometryCollection(
                    children.into_iter().map(geojson::Geometry::new).collect(),
                )),
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_type::GeometryType;

    const TRAIL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>trail</name>
    <Placemark>
      <name>start</name>
      <Point><coordinates>8.0,47.0,420</coordinates></Point>
    </Placemark>
    <Folder>
      <name>paths</name>
      <Placemark>
        <name>path</name>
        <description>along the river</description>
        <LineString><coordinates>8.0,47.0 8.0,47.5 8.5,47.5</coordinates></LineString>
      </Placemark>
      <Placemark>
        <name>empty</name>
      </Placemark>
    </Folder>
    <Placemark>
      <name>lake</name>
      <Polygon>
        <outerBoundaryIs><LinearRing>
          <coordinates>0,0 1,0 1,1 0,0</coordinates>
        </LinearRing></outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>"#;

    fn type_of(f: &Feature) -> Option<GeometryType> {
        f.geometry.as_ref().map(|g| GeometryType::of(&g.value))
    }

    #[test]
    fn placemarks_in_document_order() {
        let features = read(TRAIL).unwrap();
        assert_eq!(features.len(), 4);
        assert_eq!(type_of(&features[0]), Some(GeometryType::Point));
        assert_eq!(type_of(&features[1]), Some(GeometryType::LineString));
        assert_eq!(type_of(&features[2]), None);
        assert_eq!(type_of(&features[3]), Some(GeometryType::Polygon));
    }

    #[test]
    fn properties_and_altitude() {
        let features = read(TRAIL).unwrap();
        let props = features[1].properties.as_ref().unwrap();
        assert_eq!(props["name"], JsonValue::from("path"));
        assert_eq!(props["description"], JsonValue::from("along the river"));
        match &features[0].geometry.as_ref().unwrap().value {
            Value::Point(p) => assert_eq!(p, &vec![8.0, 47.0, 420.0]),
            v => panic!("unexpected {:?}", v),
        }
    }

    #[test]
    fn multi_geometry() {
        let content = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Placemark><MultiGeometry>
    <LineString><coordinates>0,0 0,1</coordinates></LineString>
  </MultiGeometry></Placemark>
  <Placemark><MultiGeometry>
    <Point><coordinates>0,0</coordinates></Point>
    <LineString><coordinates>0,0 0,1</coordinates></LineString>
  </MultiGeometry></Placemark>
</Document></kml>"#;
        let features = read(content).unwrap();
        assert_eq!(type_of(&features[0]), Some(GeometryType::LineString));
        assert_eq!(
            type_of(&features[1]),
            Some(GeometryType::GeometryCollection)
        );
    }

    #[test]
    fn invalid_xml() {
        assert!(read("<kml><Placemark></Folder></kml>").is_err());
    }
}

//! District boundary shapes parsed from a GeoJSON feature collection.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use serde_json::Value;

use crate::types::canonical_number;

/// One named district boundary.
#[derive(Debug, Clone)]
pub struct District {
    key: String,
    geometry: MultiPolygon<f64>,
}

impl District {
    pub fn key(&self) -> &str { &self.key }

    pub fn geometry(&self) -> &MultiPolygon<f64> { &self.geometry }
}

/// All district boundaries of the city, keyed by one feature property.
///
/// The raw feature collection is kept alongside the parsed geometries so map
/// traces can embed it unchanged. Loaded once per process and never mutated.
#[derive(Debug, Clone)]
pub struct DistrictShapes {
    key_property: String,
    districts: Vec<District>,
    index: HashMap<String, usize>,
    raw: Value,
    bounds: Rect<f64>,
}

impl DistrictShapes {
    /// Read a GeoJSON file and key its features by `key_property`.
    pub fn from_geojson_file(path: &Path, key_property: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read GeoJSON file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse GeoJSON from {}", path.display()))?;
        Self::from_geojson_value(value, key_property)
            .with_context(|| format!("Invalid district GeoJSON in {}", path.display()))
    }

    /// Key the features of an in-memory feature collection by `key_property`.
    pub fn from_geojson_value(value: Value, key_property: &str) -> Result<Self> {
        let Some(features) = value["features"].as_array() else {
            bail!("GeoJSON has no 'features' array");
        };

        let mut districts = Vec::with_capacity(features.len());
        let mut index = HashMap::with_capacity(features.len());
        let mut bounds: Option<Rect<f64>> = None;
        for (pos, feature) in features.iter().enumerate() {
            let key = match &feature["properties"][key_property] {
                Value::String(text) => text.clone(),
                Value::Number(number) => canonical_number(number.as_f64().unwrap_or(f64::NAN)),
                other => bail!("Feature {pos} property '{key_property}' is not a key: {other}"),
            };
            ensure!(!index.contains_key(&key), "Duplicate district key: {key}");

            let geometry = parse_geometry(&feature["geometry"])
                .with_context(|| format!("Feature {pos} ('{key}') has invalid geometry"))?;
            if let Some(rect) = geometry.bounding_rect() {
                bounds = Some(match bounds {
                    None => rect,
                    Some(merged) => merge(merged, rect),
                });
            }

            index.insert(key.clone(), districts.len());
            districts.push(District { key, geometry });
        }

        let Some(bounds) = bounds else {
            bail!("GeoJSON contains no usable district geometry");
        };
        Ok(Self { key_property: key_property.to_string(), districts, index, raw: value, bounds })
    }

    /// Name of the feature property the districts are keyed by.
    pub fn key_property(&self) -> &str { &self.key_property }

    pub fn len(&self) -> usize { self.districts.len() }

    pub fn is_empty(&self) -> bool { self.districts.is_empty() }

    /// District keys in feature order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.districts.iter().map(|district| district.key.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&District> {
        self.index.get(key).map(|&pos| &self.districts[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &District> {
        self.districts.iter()
    }

    /// The raw feature collection, for embedding into map traces.
    pub fn geojson(&self) -> &Value { &self.raw }

    /// Bounding box over every district, in (lon, lat) axes.
    pub fn bounds(&self) -> Rect<f64> { self.bounds }

    /// (lat, lon) midpoint of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        let center = self.bounds.center();
        (center.y, center.x)
    }

    /// Shape keys that have no match in `keys`, in feature order.
    pub fn unmatched_keys(&self, keys: &[String]) -> Vec<String> {
        let present: std::collections::HashSet<&str> = keys.iter().map(|k| k.as_str()).collect();
        self.districts
            .iter()
            .map(|district| &district.key)
            .filter(|key| !present.contains(key.as_str()))
            .cloned()
            .collect()
    }
}

fn merge(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

/// Parse a GeoJSON geometry object into a MultiPolygon. Plain polygons
/// become single-element multipolygons.
fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let Some(coords) = geometry["coordinates"].as_array() else {
        bail!("Geometry has no 'coordinates' array");
    };
    match geometry["type"].as_str() {
        Some("MultiPolygon") => {
            let polygons = coords
                .iter()
                .map(|rings| parse_polygon(rings))
                .collect::<Result<Vec<_>>>()?;
            Ok(MultiPolygon(polygons))
        }
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon(&geometry["coordinates"])?])),
        other => bail!("Unsupported geometry type: {:?}", other),
    }
}

/// Parse one polygon: the first ring is the exterior, the rest are holes.
fn parse_polygon(rings: &Value) -> Result<Polygon<f64>> {
    let Some(rings) = rings.as_array() else {
        bail!("Polygon coordinates are not an array of rings");
    };
    let exterior = rings
        .first()
        .map(|ring| parse_ring(ring))
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("Polygon has no exterior ring"))?;
    let interiors = rings[1..]
        .iter()
        .map(|ring| parse_ring(ring))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring of `[x, y]` pairs, closing it if the source left it open.
fn parse_ring(ring: &Value) -> Result<LineString<f64>> {
    let Some(pairs) = ring.as_array() else {
        bail!("Ring is not an array of coordinates");
    };
    let mut points = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Some(pair) = pair.as_array() else {
            bail!("Coordinate is not an [x, y] pair");
        };
        ensure!(pair.len() >= 2, "Coordinate has fewer than two components");
        let x = pair[0].as_f64().ok_or_else(|| anyhow::anyhow!("Coordinate x is not a number"))?;
        let y = pair[1].as_f64().ok_or_else(|| anyhow::anyhow!("Coordinate y is not a number"))?;
        points.push(Coord { x, y });
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

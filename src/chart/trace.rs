//! Mapbox choropleth trace, which the plotly crate does not ship.
//!
//! Serializes to the `choroplethmapbox` trace type understood by plotly.js,
//! with the boundary GeoJSON embedded inline.

use plotly::Trace;
use plotly::common::{ColorBar, ColorScale, Marker};
use serde::Serialize;
use serde_json::Value;

/// Shaded-region map trace over an inline GeoJSON feature collection.
///
/// `locations` are matched against the feature property named by
/// `featureidkey`; each matched feature is shaded by the `z` value of its row.
#[derive(Serialize, Clone, Debug)]
pub struct ChoroplethMapbox {
    #[serde(rename = "type")]
    kind: &'static str,
    geojson: Value,
    locations: Vec<String>,
    z: Vec<f64>,
    #[serde(rename = "featureidkey")]
    feature_id_key: String,
    #[serde(rename = "colorscale", skip_serializing_if = "Option::is_none")]
    color_scale: Option<ColorScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zmax: Option<f64>,
    #[serde(rename = "colorbar", skip_serializing_if = "Option::is_none")]
    color_bar: Option<ColorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl ChoroplethMapbox {
    pub fn new(geojson: Value, locations: Vec<String>, z: Vec<f64>) -> Box<Self> {
        Box::new(Self {
            kind: "choroplethmapbox",
            geojson,
            locations,
            z,
            feature_id_key: "properties.name".to_string(),
            color_scale: None,
            zmin: None,
            zmax: None,
            color_bar: None,
            marker: None,
            name: None,
        })
    }

    /// Feature property path the locations are matched against,
    /// e.g. `properties.name`.
    pub fn feature_id_key(mut self: Box<Self>, key: &str) -> Box<Self> {
        self.feature_id_key = key.to_string();
        self
    }

    pub fn color_scale(mut self: Box<Self>, color_scale: ColorScale) -> Box<Self> {
        self.color_scale = Some(color_scale);
        self
    }

    pub fn zmin(mut self: Box<Self>, zmin: f64) -> Box<Self> {
        self.zmin = Some(zmin);
        self
    }

    pub fn zmax(mut self: Box<Self>, zmax: f64) -> Box<Self> {
        self.zmax = Some(zmax);
        self
    }

    pub fn color_bar(mut self: Box<Self>, color_bar: ColorBar) -> Box<Self> {
        self.color_bar = Some(color_bar);
        self
    }

    pub fn marker(mut self: Box<Self>, marker: Marker) -> Box<Self> {
        self.marker = Some(marker);
        self
    }

    pub fn name(mut self: Box<Self>, name: &str) -> Box<Self> {
        self.name = Some(name.to_string());
        self
    }
}

impl Trace for ChoroplethMapbox {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn minimal_geojson() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[8.5, 47.3], [8.6, 47.3], [8.6, 47.4], [8.5, 47.3]]]]
                },
                "properties": { "name": "Kreis 1" }
            }]
        })
    }

    #[test]
    fn serializes_trace_type_and_join_fields() {
        let trace = ChoroplethMapbox::new(
            minimal_geojson(),
            vec!["Kreis 1".to_string()],
            vec![42.0],
        );
        let value: Value = serde_json::from_str(&trace.to_json()).unwrap();
        assert_eq!(value["type"], "choroplethmapbox");
        assert_eq!(value["featureidkey"], "properties.name");
        assert_eq!(value["locations"], json!(["Kreis 1"]));
        assert_eq!(value["z"], json!([42.0]));
    }

    #[test]
    fn unset_options_stay_out_of_the_json() {
        let trace = ChoroplethMapbox::new(minimal_geojson(), vec![], vec![]);
        let value: Value = serde_json::from_str(&trace.to_json()).unwrap();
        assert!(value.get("colorscale").is_none());
        assert!(value.get("zmin").is_none());
        assert!(value.get("colorbar").is_none());
    }

    #[test]
    fn z_bounds_round_trip() {
        let trace = ChoroplethMapbox::new(minimal_geojson(), vec![], vec![]).zmin(1.0).zmax(9.0);
        let value: Value = serde_json::from_str(&trace.to_json()).unwrap();
        assert_eq!(value["zmin"], json!(1.0));
        assert_eq!(value["zmax"], json!(9.0));
    }
}

//! Choropleth map of one metric over the city districts.

use anyhow::{Result, bail};
use plotly::Plot;
use plotly::color::NamedColor;
use plotly::common::{ColorBar, Font, Line, Marker, Title};
use plotly::layout::{Center, Layout, Mapbox, MapboxStyle, Margin};
use polars::prelude::DataFrame;

use super::color::Gradient;
use super::trace::ChoroplethMapbox;
use super::{finite_max, finite_min, key_values, numeric_values, require_rows};
use crate::shapes::DistrictShapes;
use crate::types::UnmatchedPolicy;

/// Builder for a district map shaded by one numeric column.
///
/// Rows are joined against the shape collection by exact key equality.
/// Districts without a metric row stay unshaded under the default policy
/// and fail the build under [`UnmatchedPolicy::Deny`].
#[derive(Debug, Clone)]
pub struct DistrictMap {
    metric: String,
    key: String,
    gradient: Gradient,
    policy: UnmatchedPolicy,
    zoom: u8,
    center: Option<(f64, f64)>,
    title: Option<String>,
}

impl DistrictMap {
    /// Map shaded by `metric`, joined on the register's district-name column.
    pub fn new(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            key: "Stadtkreis".to_string(),
            gradient: Gradient::blues(),
            policy: UnmatchedPolicy::default(),
            zoom: 11,
            center: None,
            title: None,
        }
    }

    /// Join on a different key column of the metrics table.
    pub fn key(mut self, column: &str) -> Self {
        self.key = column.to_string();
        self
    }

    pub fn gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn policy(mut self, policy: UnmatchedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fixed zoom level of the map view.
    pub fn zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Override the view center instead of fitting it to the shape bounds.
    pub fn center(mut self, lat: f64, lon: f64) -> Self {
        self.center = Some((lat, lon));
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Shape keys that `df` has no metric row for, in feature order.
    pub fn unshaded_districts(&self, df: &DataFrame, shapes: &DistrictShapes) -> Result<Vec<String>> {
        let keys = key_values(df, &self.key)?;
        Ok(shapes.unmatched_keys(&keys))
    }

    /// Build the figure. Reads the shared reference data, never changes it.
    pub fn build(&self, df: &DataFrame, shapes: &DistrictShapes) -> Result<Plot> {
        require_rows(df)?;
        let keys = key_values(df, &self.key)?;
        let values = numeric_values(df, &self.metric)?;
        let zmin = finite_min(&values)?;
        let zmax = finite_max(&values)?;

        if self.policy == UnmatchedPolicy::Deny {
            let unmatched = shapes.unmatched_keys(&keys);
            if !unmatched.is_empty() {
                bail!("Districts without a metric row: {}", unmatched.join(", "));
            }
        }

        let trace = ChoroplethMapbox::new(shapes.geojson().clone(), keys, values)
            .feature_id_key(&format!("properties.{}", shapes.key_property()))
            .color_scale(self.gradient.to_color_scale())
            .zmin(zmin)
            .zmax(zmax)
            .color_bar(ColorBar::new().title(Title::with_text(self.metric.as_str())))
            .marker(Marker::new().line(Line::new().width(1.0).color(NamedColor::White)));

        let (lat, lon) = self.center.unwrap_or_else(|| shapes.center());
        let mut layout = Layout::new()
            .mapbox(
                Mapbox::new()
                    .style(MapboxStyle::WhiteBg)
                    .center(Center::new(lat, lon))
                    .zoom(self.zoom),
            )
            .margin(Margin::new().top(60).bottom(10).left(10).right(10));
        if let Some(title) = &self.title {
            layout = layout.title(Title::with_text(title.as_str()).font(Font::new().size(20)));
        }

        let mut plot = Plot::new();
        plot.add_trace(trace);
        plot.set_layout(layout);
        Ok(plot)
    }
}

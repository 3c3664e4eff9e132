//! Time-series line chart with an event band and forced per-label ticks.

use anyhow::Result;
use plotly::color::NamedColor;
use plotly::common::{Anchor, Font, Line, Mode, TickMode, Title};
use plotly::layout::{Annotation, Axis, Layout, Legend, Shape, ShapeLine, ShapeType};
use plotly::{Plot, Scatter};
use polars::prelude::DataFrame;

use super::color::golden_angle_color;
use super::{
    InvalidInput, distinct_keys, distinct_sorted, finite_max, key_values, numeric_values,
    require_rows, sorted_points, time_values,
};
use crate::types::EventWindow;

/// Builder for a single-panel time-series chart.
///
/// Produces one line per distinct value of the optional grouping column,
/// with every distinct time label forced onto the x-axis in ascending order.
#[derive(Debug, Clone)]
pub struct LineChart {
    time: String,
    metric: String,
    group: Option<String>,
    window: Option<EventWindow>,
    title: Option<String>,
    x_title: Option<String>,
    y_title: Option<String>,
    legend_title: Option<String>,
    width: usize,
    height: usize,
}

impl LineChart {
    /// Chart of `metric` over the labels in the `time` column.
    pub fn new(time: &str, metric: &str) -> Self {
        Self {
            time: time.to_string(),
            metric: metric.to_string(),
            group: None,
            window: None,
            title: None,
            x_title: None,
            y_title: None,
            legend_title: None,
            width: 800,
            height: 600,
        }
    }

    /// Split into one series per distinct value of `column`, in order of
    /// first appearance.
    pub fn grouped_by(mut self, column: &str) -> Self {
        self.group = Some(column.to_string());
        self
    }

    /// Shade the given span and label it at the all-series maximum.
    pub fn window(mut self, window: EventWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn x_title(mut self, title: &str) -> Self {
        self.x_title = Some(title.to_string());
        self
    }

    pub fn y_title(mut self, title: &str) -> Self {
        self.y_title = Some(title.to_string());
        self
    }

    pub fn legend_title(mut self, title: &str) -> Self {
        self.legend_title = Some(title.to_string());
        self
    }

    pub fn size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build the figure. The input table is only read, never changed.
    pub fn build(&self, df: &DataFrame) -> Result<Plot> {
        require_rows(df)?;
        let times = time_values(df, &self.time)?;
        let metrics = numeric_values(df, &self.metric)?;

        let ticks = distinct_sorted(&times);
        if ticks.is_empty() {
            return Err(InvalidInput::Empty.into());
        }
        let y_max = finite_max(&metrics)?;

        let mut plot = Plot::new();
        match &self.group {
            None => {
                let (xs, ys) = sorted_points(&times, &metrics, (0..times.len()).collect());
                plot.add_trace(
                    Scatter::new(xs, ys)
                        .name(self.metric.as_str())
                        .mode(Mode::Lines)
                        .line(Line::new().color(golden_angle_color(0).to_string())),
                );
            }
            Some(group) => {
                let keys = key_values(df, group)?;
                for (idx, key) in distinct_keys(&keys).iter().enumerate() {
                    let rows = (0..keys.len()).filter(|&i| &keys[i] == key).collect();
                    let (xs, ys) = sorted_points(&times, &metrics, rows);
                    plot.add_trace(
                        Scatter::new(xs, ys)
                            .name(key.as_str())
                            .mode(Mode::Lines)
                            .line(Line::new().color(golden_angle_color(idx).to_string())),
                    );
                }
            }
        }

        plot.set_layout(self.layout(&ticks, y_max));
        Ok(plot)
    }

    fn layout(&self, ticks: &[f64], y_max: f64) -> Layout {
        let mut x_axis = Axis::new().tick_mode(TickMode::Array).tick_values(ticks.to_vec());
        if let Some(title) = &self.x_title {
            x_axis = x_axis.title(Title::with_text(title.as_str()));
        }
        let mut y_axis = Axis::new();
        if let Some(title) = &self.y_title {
            y_axis = y_axis.title(Title::with_text(title.as_str()));
        }

        let mut layout = Layout::new()
            .width(self.width)
            .height(self.height)
            .x_axis(x_axis)
            .y_axis(y_axis);
        if let Some(title) = &self.title {
            layout = layout.title(Title::with_text(title.as_str()));
        }
        if let Some(title) = &self.legend_title {
            layout = layout.legend(Legend::new().title(Title::with_text(title.as_str())));
        }
        if let Some(window) = &self.window {
            layout = layout
                .shapes(vec![event_band(window, "x", "y domain")])
                .annotations(vec![event_label(window, y_max)]);
        }
        layout
    }
}

/// Shaded event span behind the traces of one panel. Spans the full panel
/// height via a domain-referenced y range.
pub(super) fn event_band(window: &EventWindow, x_ref: &str, y_ref: &str) -> Shape {
    Shape::new()
        .shape_type(ShapeType::Rect)
        .x_ref(x_ref)
        .y_ref(y_ref)
        .x0(window.start())
        .x1(window.end())
        .y0(0.)
        .y1(1.)
        .fill_color(NamedColor::Green)
        .opacity(0.5)
        .line(ShapeLine::new().width(0.))
}

/// Window label pinned to the highest value observed across all series.
fn event_label(window: &EventWindow, y: f64) -> Annotation {
    Annotation::new()
        .x_ref("x")
        .y_ref("y")
        .x(window.label_x())
        .y(y)
        .text(window.label())
        .show_arrow(false)
        .font(Font::new().size(12).color(NamedColor::White))
        .x_anchor(Anchor::Center)
        .y_anchor(Anchor::Bottom)
}

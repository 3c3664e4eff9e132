//! Grid of small per-group panels sharing both axes.

use anyhow::{Result, ensure};
use plotly::common::{Anchor, Font, Mode, TickMode, Title};
use plotly::layout::{Annotation, Axis, GridPattern, Layout, LayoutGrid, RowOrder};
use plotly::{Plot, Scatter};
use polars::prelude::DataFrame;

use super::line::event_band;
use super::{
    InvalidInput, distinct_keys, distinct_sorted, finite_max, finite_min, key_values,
    numeric_values, require_rows, sorted_points, time_values,
};
use crate::types::EventWindow;

/// Builder for a grid of one small time-series panel per facet value.
///
/// Panels share the x-axis per column and the y-axis per row, with a common
/// y range padded by one unit beyond the observed extremes.
#[derive(Debug, Clone)]
pub struct FacetGrid {
    time: String,
    metric: String,
    facet: String,
    rows: Option<usize>,
    cols: usize,
    panel_prefix: String,
    window: Option<EventWindow>,
    title: Option<String>,
    x_title: Option<String>,
    y_title: Option<String>,
    cell_width: usize,
    cell_height: usize,
}

impl FacetGrid {
    /// One panel of `metric` over `time` per distinct value of `facet`,
    /// in order of first appearance.
    pub fn new(time: &str, metric: &str, facet: &str) -> Self {
        Self {
            time: time.to_string(),
            metric: metric.to_string(),
            facet: facet.to_string(),
            rows: None,
            cols: 3,
            panel_prefix: String::new(),
            window: None,
            title: None,
            x_title: None,
            y_title: None,
            cell_width: 500,
            cell_height: 300,
        }
    }

    /// Fix the grid shape instead of deriving rows from the facet count.
    pub fn shape(mut self, rows: usize, cols: usize) -> Self {
        self.rows = Some(rows);
        self.cols = cols;
        self
    }

    /// Text put in front of the facet value in each panel title.
    pub fn panel_prefix(mut self, prefix: &str) -> Self {
        self.panel_prefix = prefix.to_string();
        self
    }

    /// Shade the given span in every panel.
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

    /// Size of one panel; the figure grows with the grid shape.
    pub fn cell_size(mut self, width: usize, height: usize) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Build the figure. The input table is only read, never changed.
    pub fn build(&self, df: &DataFrame) -> Result<Plot> {
        require_rows(df)?;
        let times = time_values(df, &self.time)?;
        let metrics = numeric_values(df, &self.metric)?;
        let keys = key_values(df, &self.facet)?;
        let facets = distinct_keys(&keys);

        let cols = self.cols.max(1);
        let rows = self.rows.unwrap_or_else(|| facets.len().div_ceil(cols));
        ensure!(
            facets.len() <= rows * cols,
            "Grid of {}x{} cannot hold {} panels",
            rows,
            cols,
            facets.len()
        );
        ensure!(rows <= 8 && cols <= 8, "Grid shape {}x{} exceeds the 8-axis limit", rows, cols);

        let ticks = distinct_sorted(&times);
        if ticks.is_empty() {
            return Err(InvalidInput::Empty.into());
        }
        let y_min = finite_min(&metrics)?;
        let y_max = finite_max(&metrics)?;

        let mut plot = Plot::new();
        let mut shapes = Vec::new();
        let mut annotations = Vec::new();
        for (idx, facet) in facets.iter().enumerate() {
            let (row, col) = (idx / cols, idx % cols);
            let rows_of_facet = (0..keys.len()).filter(|&i| &keys[i] == facet).collect();
            let (xs, ys) = sorted_points(&times, &metrics, rows_of_facet);
            plot.add_trace(
                Scatter::new(xs, ys)
                    .name(facet.as_str())
                    .mode(Mode::LinesMarkers)
                    .x_axis(axis_name("x", col))
                    .y_axis(axis_name("y", row)),
            );

            annotations.push(panel_title(
                &format!("{}{}", self.panel_prefix, facet),
                row,
                col,
                rows,
                cols,
            ));
            if let Some(window) = &self.window {
                shapes.push(event_band(
                    window,
                    &axis_name("x", col),
                    &format!("{} domain", axis_name("y", row)),
                ));
            }
        }

        let mut layout = Layout::new()
            .grid(
                LayoutGrid::new()
                    .rows(rows)
                    .columns(cols)
                    .pattern(GridPattern::Coupled)
                    .row_order(RowOrder::TopToBottom),
            )
            .width(self.cell_width * cols)
            .height(self.cell_height * rows)
            .show_legend(false)
            .annotations(annotations)
            .shapes(shapes);
        if let Some(title) = &self.title {
            layout = layout.title(Title::with_text(title.as_str()));
        }
        for col in 0..cols {
            let mut axis = Axis::new()
                .tick_mode(TickMode::Array)
                .tick_values(ticks.clone())
                .show_tick_labels(true);
            if let Some(title) = &self.x_title {
                axis = axis.title(Title::with_text(title.as_str()));
            }
            layout = with_x_axis(layout, col, axis);
        }
        for row in 0..rows {
            let mut axis = Axis::new().range(vec![y_min - 1.0, y_max + 1.0]);
            if let Some(title) = &self.y_title {
                axis = axis.title(Title::with_text(title.as_str()));
            }
            layout = with_y_axis(layout, row, axis);
        }

        plot.set_layout(layout);
        Ok(plot)
    }
}

/// Plotly axis id for the `index`-th column or row: "x", "x2", "x3", ...
fn axis_name(prefix: &str, index: usize) -> String {
    if index == 0 { prefix.to_string() } else { format!("{}{}", prefix, index + 1) }
}

/// Paper-referenced title above one panel, the way subplot titles sit.
fn panel_title(text: &str, row: usize, col: usize, rows: usize, cols: usize) -> Annotation {
    Annotation::new()
        .x_ref("paper")
        .y_ref("paper")
        .x((col as f64 + 0.5) / cols as f64)
        .y(1.0 - row as f64 / rows as f64)
        .text(text)
        .show_arrow(false)
        .x_anchor(Anchor::Center)
        .y_anchor(Anchor::Bottom)
        .font(Font::new().size(16))
}

fn with_x_axis(layout: Layout, index: usize, axis: Axis) -> Layout {
    match index {
        0 => layout.x_axis(axis),
        1 => layout.x_axis2(axis),
        2 => layout.x_axis3(axis),
        3 => layout.x_axis4(axis),
        4 => layout.x_axis5(axis),
        5 => layout.x_axis6(axis),
        6 => layout.x_axis7(axis),
        7 => layout.x_axis8(axis),
        _ => layout,
    }
}

fn with_y_axis(layout: Layout, index: usize, axis: Axis) -> Layout {
    match index {
        0 => layout.y_axis(axis),
        1 => layout.y_axis2(axis),
        2 => layout.y_axis3(axis),
        3 => layout.y_axis4(axis),
        4 => layout.y_axis5(axis),
        5 => layout.y_axis6(axis),
        6 => layout.y_axis7(axis),
        7 => layout.y_axis8(axis),
        _ => layout,
    }
}

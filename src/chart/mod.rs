//! Chart builders: Polars frames in, Plotly figure descriptions out.

mod choropleth;
mod color;
mod facet;
mod line;
mod trace;

#[doc(inline)]
pub use choropleth::DistrictMap;
#[doc(inline)]
pub use color::{Gradient, Rgb};
#[doc(inline)]
pub use facet::FacetGrid;
#[doc(inline)]
pub use line::LineChart;
#[doc(inline)]
pub use trace::ChoroplethMapbox;

use anyhow::Result;
use polars::prelude::{DataFrame, DataType};
use thiserror::Error;

use crate::types::canonical_number;

/// Input-table problems that make a chart impossible to build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// A required column is missing from the input table.
    #[error("Column '{column}' not found in input table")]
    MissingColumn { column: String },

    /// The column exists but does not hold numbers.
    #[error("Column '{column}' is not numeric (found {dtype})")]
    NotNumeric { column: String, dtype: String },

    /// The table has no rows (or no usable values) to plot.
    #[error("Input table is empty")]
    Empty,

    /// A time label that cannot be placed on the axis.
    #[error("Time label '{value}' in column '{column}' is not a number")]
    BadTimeLabel { column: String, value: String },

    /// A key column whose values cannot serve as join keys.
    #[error("Column '{column}' cannot be used as a key (found {dtype})")]
    BadKeyColumn { column: String, dtype: String },
}

/// Dtypes accepted for metric and time columns.
fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Metric column as one `f64` per row. Nulls become `NaN` so the row keeps
/// its position and plots as a gap instead of shifting later points.
pub(crate) fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let col = df
        .column(column)
        .map_err(|_| InvalidInput::MissingColumn { column: column.to_string() })?;
    if !is_numeric(col.dtype()) {
        return Err(InvalidInput::NotNumeric {
            column: column.to_string(),
            dtype: col.dtype().to_string(),
        }
        .into());
    }
    let values = col.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Time-label column as sortable numbers. Text labels must parse as numbers;
/// anything else cannot be ordered on the axis.
pub(crate) fn time_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let col = df
        .column(column)
        .map_err(|_| InvalidInput::MissingColumn { column: column.to_string() })?;
    if is_numeric(col.dtype()) {
        return numeric_values(df, column);
    }
    if col.dtype() != &DataType::String {
        return Err(InvalidInput::NotNumeric {
            column: column.to_string(),
            dtype: col.dtype().to_string(),
        }
        .into());
    }
    col.str()?
        .into_iter()
        .map(|label| match label {
            None => Ok(f64::NAN),
            Some(text) => text.trim().parse::<f64>().map_err(|_| {
                InvalidInput::BadTimeLabel {
                    column: column.to_string(),
                    value: text.to_string(),
                }
                .into()
            }),
        })
        .collect()
}

/// Key column as canonical strings: text keys pass through, numeric keys
/// print without a fractional part (`1`, never `1.0`). Null keys become
/// empty strings, which simply never match anything.
pub(crate) fn key_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let col = df
        .column(column)
        .map_err(|_| InvalidInput::MissingColumn { column: column.to_string() })?;
    if col.dtype() == &DataType::String {
        return Ok(col
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect());
    }
    if is_numeric(col.dtype()) {
        let values = col.cast(&DataType::Float64)?;
        return Ok(values
            .f64()?
            .into_iter()
            .map(|v| v.map(canonical_number).unwrap_or_default())
            .collect());
    }
    Err(InvalidInput::BadKeyColumn {
        column: column.to_string(),
        dtype: col.dtype().to_string(),
    }
    .into())
}

/// Distinct finite values in ascending order.
pub(crate) fn distinct_sorted(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// Distinct keys in order of first appearance.
pub(crate) fn distinct_keys(values: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values.iter().filter(|v| seen.insert(v.as_str())).cloned().collect()
}

/// Points of one series, ordered by time label. `rows` selects the rows
/// belonging to the series; the sort is stable so duplicate labels keep
/// their input order.
pub(crate) fn sorted_points(
    times: &[f64],
    metrics: &[f64],
    mut rows: Vec<usize>,
) -> (Vec<f64>, Vec<f64>) {
    rows.sort_by(|a, b| times[*a].total_cmp(&times[*b]));
    let xs = rows.iter().map(|&i| times[i]).collect();
    let ys = rows.iter().map(|&i| metrics[i]).collect();
    (xs, ys)
}

/// Largest finite value, or `InvalidInput::Empty` when there is none.
pub(crate) fn finite_max(values: &[f64]) -> Result<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .max_by(f64::total_cmp)
        .ok_or_else(|| InvalidInput::Empty.into())
}

/// Smallest finite value, or `InvalidInput::Empty` when there is none.
pub(crate) fn finite_min(values: &[f64]) -> Result<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .min_by(f64::total_cmp)
        .ok_or_else(|| InvalidInput::Empty.into())
}

/// Refuse tables with no rows before doing any column work.
pub(crate) fn require_rows(df: &DataFrame) -> Result<()> {
    if df.height() == 0 {
        return Err(InvalidInput::Empty.into());
    }
    Ok(())
}

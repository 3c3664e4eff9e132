//! Shared value types used across charts and maps.

/// A labeled span on the time axis, drawn as a shaded band behind the traces.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWindow {
    label: String,
    start: f64,
    end: f64,
    label_offset: f64,
}

impl EventWindow {
    /// Window over `[start, end]` in axis units, with the label centered on the span.
    pub fn new(label: &str, start: f64, end: f64) -> Self {
        Self {
            label: label.to_string(),
            start,
            end,
            label_offset: (end - start) / 2.0,
        }
    }

    /// The pandemic span highlighted on every time-series chart of the register.
    pub fn covid() -> Self {
        Self {
            label: "COVID-19 Pandemic".to_string(),
            start: 2020.0,
            end: 2022.0,
            label_offset: 1.2,
        }
    }

    /// Place the label at `start + offset` instead of the span center.
    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn label(&self) -> &str { &self.label }

    pub fn start(&self) -> f64 { self.start }

    pub fn end(&self) -> f64 { self.end }

    /// X position of the label text.
    pub fn label_x(&self) -> f64 { self.start + self.label_offset }
}

/// What to do with districts that have a shape but no metric row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Leave unmatched districts unshaded and report them to the caller.
    #[default]
    Allow,
    /// Fail the build if any district is unmatched.
    Deny,
}

/// Canonical text form of a numeric key: integral values print without a
/// fractional part, so `1.0` matches the GeoJSON string `"1"`.
pub(crate) fn canonical_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

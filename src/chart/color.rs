//! Color helpers for series lines and choropleth scales.

use std::fmt;

use plotly::common::{ColorScale, ColorScaleElement};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// HSL color: h in degrees, s and l in [0.0, 1.0].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Hsl {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) l: f64,
}

impl fmt::Display for Hsl {
    /// Format as CSS HSL:
    ///   hsl({h:.1},{s:.0}%,{l:.0}%)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // normalize hue into [0,360)
        let h = (self.h % 360.0 + 360.0) % 360.0;
        let s = (self.s * 100.0).clamp(0.0, 100.0);
        let l = (self.l * 100.0).clamp(0.0, 100.0);
        write!(f, "hsl({:.1},{:.0}%,{:.0}%)", h, s, l)
    }
}

const GOLDEN_ANGLE: f64 = 137.50776405;

/// Well-spread hue for the `index`-th series of a chart.
pub(crate) fn golden_angle_color(index: usize) -> Hsl {
    Hsl { h: ((index as f64) * GOLDEN_ANGLE) % 360.0, s: 0.70, l: 0.55 }
}

/// Two-point linear gradient between a light and a dark color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gradient {
    low: Rgb,
    high: Rgb,
}

impl Gradient {
    pub fn new(low: Rgb, high: Rgb) -> Self {
        Self { low, high }
    }

    /// Light-to-dark blue ramp used by the district maps.
    pub fn blues() -> Self {
        Self {
            low: Rgb { r: 239, g: 243, b: 255 },
            high: Rgb { r: 8, g: 81, b: 156 },
        }
    }

    pub fn low(&self) -> Rgb { self.low }

    pub fn high(&self) -> Rgb { self.high }

    /// Interpolated color at `t` in [0, 1]; out-of-range values are clamped.
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: lerp(self.low.r, self.high.r),
            g: lerp(self.low.g, self.high.g),
            b: lerp(self.low.b, self.high.b),
        }
    }

    /// Plotly color scale with the two endpoints pinned to 0 and 1.
    pub(crate) fn to_color_scale(&self) -> ColorScale {
        ColorScale::Vector(vec![
            ColorScaleElement(0.0, self.low.to_string()),
            ColorScaleElement(1.0, self.high.to_string()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_css_format() {
        assert_eq!(Rgb { r: 8, g: 81, b: 156 }.to_string(), "rgb(8,81,156)");
    }

    #[test]
    fn hsl_css_format() {
        assert_eq!(golden_angle_color(0).to_string(), "hsl(0.0,70%,55%)");
    }

    #[test]
    fn golden_angle_hues_differ() {
        let first = golden_angle_color(0).h;
        let second = golden_angle_color(1).h;
        assert!((first - second).abs() > 1.0);
    }

    #[test]
    fn gradient_endpoints() {
        let gradient = Gradient::blues();
        assert_eq!(gradient.sample(0.0), gradient.low());
        assert_eq!(gradient.sample(1.0), gradient.high());
    }

    #[test]
    fn gradient_darkens_monotonically() {
        // Blues run light to dark, so every channel decreases with t.
        let gradient = Gradient::blues();
        let mut previous = gradient.sample(0.0);
        for step in 1..=10 {
            let current = gradient.sample(step as f64 / 10.0);
            assert!(current.r <= previous.r);
            assert!(current.g <= previous.g);
            assert!(current.b <= previous.b);
            previous = current;
        }
    }

    #[test]
    fn gradient_clamps_out_of_range() {
        let gradient = Gradient::blues();
        assert_eq!(gradient.sample(-0.5), gradient.low());
        assert_eq!(gradient.sample(1.5), gradient.high());
    }
}

//! Linear and radial gradient paint descriptors

use crate::error::InvalidGradientError;
use crate::geometry::{Affine, Color, Point};

/// One entry of a gradient's color ramp.
///
/// The stop's opacity is the alpha of its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient vector, in [0, 1]
    pub offset: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// How the gradient continues outside the [0, 1] range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadMethod {
    #[default]
    Pad,
    Reflect,
    Repeat,
}

impl SpreadMethod {
    /// SVG `spreadMethod` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            SpreadMethod::Pad => "pad",
            SpreadMethod::Reflect => "reflect",
            SpreadMethod::Repeat => "repeat",
        }
    }
}

/// Color space the ramp is interpolated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorInterpolation {
    #[default]
    Srgb,
    LinearRgb,
}

/// A gradient along the line from `start` to `end`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMethod,
    /// Transform from gradient space to the user space of the painted shape
    pub transform: Affine,
    pub interpolation: ColorInterpolation,
}

impl LinearGradient {
    pub fn new(start: Point, end: Point, stops: impl IntoIterator<Item = ColorStop>) -> Self {
        Self {
            start,
            end,
            stops: stops.into_iter().collect(),
            spread: SpreadMethod::default(),
            transform: Affine::IDENTITY,
            interpolation: ColorInterpolation::default(),
        }
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_interpolation(mut self, interpolation: ColorInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidGradientError> {
        validate_stops(&self.stops)
    }
}

/// A gradient radiating from `center` out to `radius`.
///
/// The focus defaults to the center.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f64,
    pub focus: Option<Point>,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMethod,
    pub transform: Affine,
    pub interpolation: ColorInterpolation,
}

impl RadialGradient {
    pub fn new(center: Point, radius: f64, stops: impl IntoIterator<Item = ColorStop>) -> Self {
        Self {
            center,
            radius,
            focus: None,
            stops: stops.into_iter().collect(),
            spread: SpreadMethod::default(),
            transform: Affine::IDENTITY,
            interpolation: ColorInterpolation::default(),
        }
    }

    pub fn with_focus(mut self, focus: Point) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_interpolation(mut self, interpolation: ColorInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Focus point, falling back to the center
    pub fn focus(&self) -> Point {
        self.focus.unwrap_or(self.center)
    }

    pub fn validate(&self) -> Result<(), InvalidGradientError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(InvalidGradientError::InvalidRadius {
                radius: self.radius,
            });
        }
        validate_stops(&self.stops)
    }
}

/// Check the ramp invariants: at least two stops, offsets in [0, 1],
/// non-decreasing order. Nothing is clamped or deduplicated.
fn validate_stops(stops: &[ColorStop]) -> Result<(), InvalidGradientError> {
    if stops.len() < 2 {
        return Err(InvalidGradientError::TooFewStops { count: stops.len() });
    }

    let mut previous: Option<f64> = None;
    for (index, stop) in stops.iter().enumerate() {
        // NaN fails this check too
        if !(0.0..=1.0).contains(&stop.offset) {
            return Err(InvalidGradientError::OffsetOutOfRange {
                index,
                offset: stop.offset,
            });
        }
        if let Some(previous) = previous {
            if stop.offset < previous {
                return Err(InvalidGradientError::OffsetsOutOfOrder {
                    index,
                    offset: stop.offset,
                    previous,
                });
            }
        }
        previous = Some(stop.offset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_ramp() -> Vec<ColorStop> {
        vec![
            ColorStop::new(0.0, Color::RED),
            ColorStop::new(0.25, Color::GREEN),
            ColorStop::new(1.0, Color::BLUE),
        ]
    }

    #[test]
    fn test_valid_linear_gradient() {
        let g = LinearGradient::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0), rgb_ramp());
        assert!(g.validate().is_ok());
        assert_eq!(g.spread, SpreadMethod::Pad);
    }

    #[test]
    fn test_single_stop_rejected() {
        let g = LinearGradient::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            [ColorStop::new(0.0, Color::RED)],
        );
        assert_eq!(
            g.validate(),
            Err(InvalidGradientError::TooFewStops { count: 1 })
        );
    }

    #[test]
    fn test_offset_out_of_range_rejected() {
        let g = RadialGradient::new(
            Point::new(50.0, 50.0),
            50.0,
            [
                ColorStop::new(0.0, Color::RED),
                ColorStop::new(1.5, Color::BLUE),
            ],
        );
        assert_eq!(
            g.validate(),
            Err(InvalidGradientError::OffsetOutOfRange {
                index: 1,
                offset: 1.5
            })
        );
    }

    #[test]
    fn test_nan_offset_rejected() {
        let g = LinearGradient::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            [
                ColorStop::new(f64::NAN, Color::RED),
                ColorStop::new(1.0, Color::BLUE),
            ],
        );
        assert!(matches!(
            g.validate(),
            Err(InvalidGradientError::OffsetOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_decreasing_offsets_rejected() {
        let g = LinearGradient::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            [
                ColorStop::new(0.5, Color::RED),
                ColorStop::new(0.2, Color::BLUE),
            ],
        );
        assert!(matches!(
            g.validate(),
            Err(InvalidGradientError::OffsetsOutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn test_equal_offsets_allowed() {
        let g = LinearGradient::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            [
                ColorStop::new(0.0, Color::RED),
                ColorStop::new(0.5, Color::RED),
                ColorStop::new(0.5, Color::BLUE),
                ColorStop::new(1.0, Color::BLUE),
            ],
        );
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_radius_must_be_positive() {
        let g = RadialGradient::new(Point::new(0.0, 0.0), 0.0, rgb_ramp());
        assert_eq!(
            g.validate(),
            Err(InvalidGradientError::InvalidRadius { radius: 0.0 })
        );
    }

    #[test]
    fn test_focus_defaults_to_center() {
        let g = RadialGradient::new(Point::new(3.0, 4.0), 5.0, rgb_ramp());
        assert_eq!(g.focus(), Point::new(3.0, 4.0));
        let g = g.with_focus(Point::new(1.0, 1.0));
        assert_eq!(g.focus(), Point::new(1.0, 1.0));
    }
}

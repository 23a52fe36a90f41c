//! Paints, strokes and fonts applied by the drawing surface
//!
//! Gradient and texture paints are shared handles. Two uses of the same
//! handle are the same paint; two handles built from equal descriptors are
//! different paints.

pub mod gradient;

use std::sync::Arc;

use image::RgbaImage;

use crate::geometry::{Color, Rect};

pub use gradient::{ColorInterpolation, ColorStop, LinearGradient, RadialGradient, SpreadMethod};

/// The paint used for fills and strokes
#[derive(Debug, Clone)]
pub enum Paint {
    Solid(Color),
    LinearGradient(Arc<LinearGradient>),
    RadialGradient(Arc<RadialGradient>),
    Texture(Arc<TexturePaint>),
}

impl Paint {
    /// Check whether two paints are the same paint object.
    ///
    /// Solid colors have no identity and compare by value.
    pub fn same_as(&self, other: &Paint) -> bool {
        match (self, other) {
            (Paint::Solid(a), Paint::Solid(b)) => a == b,
            (Paint::LinearGradient(a), Paint::LinearGradient(b)) => Arc::ptr_eq(a, b),
            (Paint::RadialGradient(a), Paint::RadialGradient(b)) => Arc::ptr_eq(a, b),
            (Paint::Texture(a), Paint::Texture(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Color::BLACK)
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Paint::LinearGradient(Arc::new(gradient))
    }
}

impl From<Arc<LinearGradient>> for Paint {
    fn from(gradient: Arc<LinearGradient>) -> Self {
        Paint::LinearGradient(gradient)
    }
}

impl From<RadialGradient> for Paint {
    fn from(gradient: RadialGradient) -> Self {
        Paint::RadialGradient(Arc::new(gradient))
    }
}

impl From<Arc<RadialGradient>> for Paint {
    fn from(gradient: Arc<RadialGradient>) -> Self {
        Paint::RadialGradient(gradient)
    }
}

impl From<TexturePaint> for Paint {
    fn from(texture: TexturePaint) -> Self {
        Paint::Texture(Arc::new(texture))
    }
}

/// An image tiled across user space, with one tile placed at `anchor`
#[derive(Debug, Clone, PartialEq)]
pub struct TexturePaint {
    pub image: RgbaImage,
    pub anchor: Rect,
}

impl TexturePaint {
    pub fn new(image: RgbaImage, anchor: Rect) -> Self {
        Self { image, anchor }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

/// Outline style for `draw` calls
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    pub dash: Option<Vec<f64>>,
    pub dash_offset: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Square,
            join: LineJoin::Miter,
            miter_limit: 10.0,
            dash: None,
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit;
        self
    }

    pub fn with_dash(mut self, dash: Vec<f64>, offset: f64) -> Self {
        self.dash = Some(dash);
        self.dash_offset = offset;
        self
    }
}

/// Font used by `draw_string`
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12.0,
            bold: false,
            italic: false,
        }
    }
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_paint_identity() {
        let gradient = LinearGradient::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            [
                ColorStop::new(0.0, Color::RED),
                ColorStop::new(1.0, Color::BLUE),
            ],
        );
        let a = Paint::from(gradient.clone());
        let b = Paint::from(gradient);

        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_solid_paints_compare_by_value() {
        assert!(Paint::from(Color::RED).same_as(&Paint::Solid(Color::RED)));
        assert!(!Paint::from(Color::RED).same_as(&Paint::Solid(Color::BLUE)));
    }

    #[test]
    fn test_default_stroke() {
        let stroke = Stroke::default();
        assert_eq!(stroke.width, 1.0);
        assert_eq!(stroke.cap, LineCap::Square);
        assert_eq!(stroke.join, LineJoin::Miter);
        assert!(stroke.dash.is_none());
    }
}

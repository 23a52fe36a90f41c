//! Drawing surface that records drawing calls into an SVG document
//!
//! [`SvgGraphics`] follows the usual graphics-context model: a current
//! transform, paint, stroke, font, opacity and clip, with `save`/`restore`
//! for nesting. Every drawing call appends one element to the session's
//! document.
//!
//! Paint resolution and image encoding run before anything is appended,
//! so a failing drawing call leaves the document as it was.

use std::io::Write;
use std::sync::Arc;

use image::RgbaImage;
use log::{debug, warn};

use crate::config::ExportConfig;
use crate::document::{Element, NumberFormat, SvgDocument};
use crate::error::ExportError;
use crate::extension::{ExtensionHandler, GradientExtensionHandler};
use crate::geometry::{Affine, Color, FillRule, Point, Rect, Shape, Size};
use crate::image_writer::{ImageWriterRegistry, PNG_MIME_TYPE};
use crate::paint::{Font, LineCap, LineJoin, Paint, Stroke, TexturePaint};

/// SVG's initial `stroke-miterlimit`
const SVG_DEFAULT_MITER_LIMIT: f64 = 4.0;

/// State saved and restored by `save`/`restore`
#[derive(Debug, Clone)]
struct GraphicsState {
    transform: Affine,
    paint: Paint,
    stroke: Stroke,
    font: Font,
    opacity: f64,
    /// ID of the active `<clipPath>`, if any
    clip: Option<String>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            paint: Paint::default(),
            stroke: Stroke::default(),
            font: Font::default(),
            opacity: 1.0,
            clip: None,
        }
    }
}

/// A paint ready to be written as `fill` or `stroke`
struct ResolvedPaint {
    value: String,
    opacity: Option<f64>,
}

/// One export session: a drawing surface bound to its own document
pub struct SvgGraphics {
    config: ExportConfig,
    document: SvgDocument,
    images: ImageWriterRegistry,
    extension: Box<dyn ExtensionHandler + Send>,
    textures: Vec<(Arc<TexturePaint>, String)>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl SvgGraphics {
    /// Create a session with default configuration
    pub fn new() -> Self {
        Self::with_config(ExportConfig::default())
    }

    /// Create a session bound to a fresh document.
    ///
    /// The gradient extension handler is installed and the PNG image writer
    /// registered before any drawing call can run.
    pub fn with_config(config: ExportConfig) -> Self {
        let mut document = SvgDocument::new(NumberFormat::new(config.svg.precision));
        if let Some(size) = config.canvas {
            document.set_canvas_size(size);
        }
        Self {
            config,
            document,
            images: ImageWriterRegistry::with_defaults(),
            extension: Box::new(GradientExtensionHandler::new()),
            textures: vec![],
            state: GraphicsState::default(),
            saved: vec![],
        }
    }

    /// Replace the paint extension handler
    pub fn with_extension_handler(
        mut self,
        handler: impl ExtensionHandler + Send + 'static,
    ) -> Self {
        self.extension = Box::new(handler);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn image_writers(&self) -> &ImageWriterRegistry {
        &self.images
    }

    pub fn image_writers_mut(&mut self) -> &mut ImageWriterRegistry {
        &mut self.images
    }

    /// Set the size written on the root `<svg>` element
    pub fn set_canvas_size(&mut self, size: Size) {
        self.document.set_canvas_size(size);
    }

    // --- state ---

    /// Push a copy of the current state
    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pop the most recently saved state.
    ///
    /// Returns false when there was nothing to restore.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
    }

    /// Concatenate a transform with the current one; it applies first
    pub fn transform_by(&mut self, transform: Affine) {
        self.state.transform *= transform;
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.transform_by(Affine::translate(tx, ty));
    }

    pub fn rotate(&mut self, radians: f64) {
        self.transform_by(Affine::rotate(radians));
    }

    pub fn rotate_about(&mut self, radians: f64, x: f64, y: f64) {
        self.transform_by(Affine::rotate_about(radians, Point::new(x, y)));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform_by(Affine::scale(sx, sy));
    }

    pub fn shear(&mut self, shx: f64, shy: f64) {
        self.transform_by(Affine::shear(shx, shy));
    }

    pub fn paint(&self) -> &Paint {
        &self.state.paint
    }

    pub fn set_paint(&mut self, paint: impl Into<Paint>) {
        self.state.paint = paint.into();
    }

    pub fn set_color(&mut self, color: Color) {
        self.state.paint = Paint::Solid(color);
    }

    pub fn stroke(&self) -> &Stroke {
        &self.state.stroke
    }

    pub fn set_stroke(&mut self, stroke: Stroke) {
        self.state.stroke = stroke;
    }

    pub fn font(&self) -> &Font {
        &self.state.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    pub fn opacity(&self) -> f64 {
        self.state.opacity
    }

    /// Group opacity for subsequent elements, clamped to [0, 1]
    pub fn set_opacity(&mut self, opacity: f64) {
        self.state.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Intersect the clip region with a shape in the current user space
    pub fn clip(&mut self, shape: &Shape) {
        let fmt = self.document.number_format();
        let id = self.document.generate_id("clipPath");

        let mut outline = shape_element(shape, fmt);
        if !self.state.transform.is_identity() {
            outline.set_attr("transform", fmt.transform(&self.state.transform));
        }
        if shape.fill_rule() == FillRule::EvenOdd {
            outline.set_attr("clip-rule", "evenodd");
        }

        let mut clip_path = Element::new("clipPath")
            .attr("id", id.clone())
            .attr("clipPathUnits", "userSpaceOnUse");
        if let Some(previous) = &self.state.clip {
            clip_path.set_attr("clip-path", format!("url(#{})", previous));
        }
        clip_path.push_child(outline);

        debug!("registered clip path {}", id);
        self.document.add_definition(clip_path);
        self.state.clip = Some(id);
    }

    pub fn reset_clip(&mut self) {
        self.state.clip = None;
    }

    // --- drawing ---

    /// Fill a shape with the current paint
    pub fn fill(&mut self, shape: &Shape) -> Result<(), ExportError> {
        let paint = self.state.paint.clone();
        let resolved = self.resolve_paint(&paint)?;

        let mut element = shape_element(shape, self.document.number_format());
        element.set_style("fill", resolved.value);
        if let Some(opacity) = resolved.opacity {
            element.set_style("fill-opacity", self.num(opacity));
        }
        if shape.fill_rule() == FillRule::EvenOdd {
            element.set_style("fill-rule", "evenodd");
        }
        element.set_style("stroke", "none");
        self.append(element);
        Ok(())
    }

    /// Outline a shape with the current paint and stroke
    pub fn draw(&mut self, shape: &Shape) -> Result<(), ExportError> {
        let paint = self.state.paint.clone();
        let resolved = self.resolve_paint(&paint)?;

        let mut element = shape_element(shape, self.document.number_format());
        element.set_style("fill", "none");
        element.set_style("stroke", resolved.value);
        if let Some(opacity) = resolved.opacity {
            element.set_style("stroke-opacity", self.num(opacity));
        }
        self.apply_stroke(&mut element);
        self.append(element);
        Ok(())
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), ExportError> {
        self.fill(&Shape::rect(x, y, width, height))
    }

    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), ExportError> {
        self.draw(&Shape::line(x1, y1, x2, y2))
    }

    /// Draw text with its baseline starting at (x, y)
    pub fn draw_string(&mut self, text: &str, x: f64, y: f64) -> Result<(), ExportError> {
        let paint = self.state.paint.clone();
        let resolved = self.resolve_paint(&paint)?;

        let font = &self.state.font;
        let mut element = Element::new("text")
            .attr("x", self.num(x))
            .attr("y", self.num(y))
            .attr("xml:space", "preserve")
            .style("fill", resolved.value)
            .style("stroke", "none")
            .style("font-family", font.family.clone())
            .style("font-size", self.num(font.size));
        if font.bold {
            element.set_style("font-weight", "bold");
        }
        if font.italic {
            element.set_style("font-style", "italic");
        }
        if let Some(opacity) = resolved.opacity {
            element.set_style("fill-opacity", self.num(opacity));
        }
        self.append(element.text(text));
        Ok(())
    }

    /// Draw an image at its natural size with its top-left corner at (x, y)
    pub fn draw_image(&mut self, image: &RgbaImage, x: f64, y: f64) -> Result<(), ExportError> {
        let bounds = Rect::new(
            x,
            y,
            f64::from(image.width()),
            f64::from(image.height()),
        );
        self.draw_image_scaled(image, bounds)
    }

    /// Draw an image stretched to fill `bounds`
    pub fn draw_image_scaled(&mut self, image: &RgbaImage, bounds: Rect) -> Result<(), ExportError> {
        let element = self.image_element(image, bounds)?;
        debug!("embedded {}x{} image", image.width(), image.height());
        self.append(element);
        Ok(())
    }

    // --- serialization ---

    /// Write the document to a byte sink.
    ///
    /// The session stays usable; streaming again produces the same document
    /// plus anything drawn in between.
    pub fn stream<W: Write + ?Sized>(&self, sink: &mut W, use_css: bool) -> Result<(), ExportError> {
        self.document.write_to(sink, &self.config.svg, use_css)?;
        Ok(())
    }

    /// Serialize with the configured styling mode
    pub fn to_svg_string(&self) -> String {
        let mut buf = Vec::new();
        let _ = self
            .document
            .write_to(&mut buf, &self.config.svg, self.config.svg.use_css);
        String::from_utf8_lossy(&buf).into_owned()
    }

    // --- internals ---

    fn num(&self, value: f64) -> String {
        self.document.number_format().number(value)
    }

    fn resolve_paint(&mut self, paint: &Paint) -> Result<ResolvedPaint, ExportError> {
        if let Some(reference) = self.extension.handle_paint(paint, &mut self.document)? {
            return Ok(ResolvedPaint {
                value: reference,
                opacity: None,
            });
        }

        match paint {
            Paint::Solid(color) => Ok(solid(*color)),
            Paint::Texture(texture) => {
                let id = self.texture_pattern(texture)?;
                Ok(ResolvedPaint {
                    value: format!("url(#{})", id),
                    opacity: None,
                })
            }
            Paint::LinearGradient(g) => {
                warn!("gradient paint not handled by extension, using first stop color");
                Ok(solid(g.stops.first().map_or(Color::BLACK, |s| s.color)))
            }
            Paint::RadialGradient(g) => {
                warn!("gradient paint not handled by extension, using first stop color");
                Ok(solid(g.stops.first().map_or(Color::BLACK, |s| s.color)))
            }
        }
    }

    /// Pattern definition for a texture paint, registered once per handle
    fn texture_pattern(&mut self, texture: &Arc<TexturePaint>) -> Result<String, ExportError> {
        if let Some((_, id)) = self.textures.iter().find(|(t, _)| Arc::ptr_eq(t, texture)) {
            return Ok(id.clone());
        }

        let anchor = texture.anchor;
        let image = self.image_element(&texture.image, Rect::new(0.0, 0.0, anchor.width, anchor.height))?;
        let id = self.document.generate_id("pattern");
        let pattern = Element::new("pattern")
            .attr("id", id.clone())
            .attr("patternUnits", "userSpaceOnUse")
            .attr("x", self.num(anchor.x))
            .attr("y", self.num(anchor.y))
            .attr("width", self.num(anchor.width))
            .attr("height", self.num(anchor.height))
            .child(image);

        debug!("registered texture pattern {}", id);
        self.document.add_definition(pattern);
        self.textures.push((Arc::clone(texture), id.clone()));
        Ok(id)
    }

    fn image_element(&self, image: &RgbaImage, bounds: Rect) -> Result<Element, ExportError> {
        let href = self.images.encode_data_uri(image, PNG_MIME_TYPE)?;
        Ok(Element::new("image")
            .attr("x", self.num(bounds.x))
            .attr("y", self.num(bounds.y))
            .attr("width", self.num(bounds.width))
            .attr("height", self.num(bounds.height))
            .attr("preserveAspectRatio", "none")
            .attr("xlink:href", href))
    }

    fn apply_stroke(&self, element: &mut Element) {
        let stroke = &self.state.stroke;
        if stroke.width != 1.0 {
            element.set_style("stroke-width", self.num(stroke.width));
        }
        if stroke.cap != LineCap::Butt {
            element.set_style("stroke-linecap", stroke.cap.as_str());
        }
        if stroke.join != LineJoin::Miter {
            element.set_style("stroke-linejoin", stroke.join.as_str());
        } else if stroke.miter_limit != SVG_DEFAULT_MITER_LIMIT {
            element.set_style("stroke-miterlimit", self.num(stroke.miter_limit));
        }
        if let Some(dash) = stroke.dash.as_ref().filter(|d| !d.is_empty()) {
            let pattern = dash
                .iter()
                .map(|v| self.num(*v))
                .collect::<Vec<_>>()
                .join(",");
            element.set_style("stroke-dasharray", pattern);
            if stroke.dash_offset != 0.0 {
                element.set_style("stroke-dashoffset", self.num(stroke.dash_offset));
            }
        }
    }

    /// Attach the current transform and opacity, then add to the document
    fn append(&mut self, mut element: Element) {
        if !self.state.transform.is_identity() {
            let transform = self.document.number_format().transform(&self.state.transform);
            element.set_attr("transform", transform);
        }
        if self.state.opacity < 1.0 {
            element.set_style("opacity", self.num(self.state.opacity));
        }
        self.document.append(element, self.state.clip.as_deref());
    }
}

impl Default for SvgGraphics {
    fn default() -> Self {
        Self::new()
    }
}

fn solid(color: Color) -> ResolvedPaint {
    ResolvedPaint {
        value: color.to_hex(),
        opacity: (!color.is_opaque()).then(|| color.opacity()),
    }
}

/// Geometry of a shape as an element, without styling
fn shape_element(shape: &Shape, fmt: NumberFormat) -> Element {
    match shape {
        Shape::Rect(r) => Element::new("rect")
            .attr("x", fmt.number(r.x))
            .attr("y", fmt.number(r.y))
            .attr("width", fmt.number(r.width))
            .attr("height", fmt.number(r.height)),
        Shape::RoundedRect { rect, rx, ry } => Element::new("rect")
            .attr("x", fmt.number(rect.x))
            .attr("y", fmt.number(rect.y))
            .attr("width", fmt.number(rect.width))
            .attr("height", fmt.number(rect.height))
            .attr("rx", fmt.number(*rx))
            .attr("ry", fmt.number(*ry)),
        Shape::Ellipse { center, rx, ry } if rx == ry => Element::new("circle")
            .attr("cx", fmt.number(center.x))
            .attr("cy", fmt.number(center.y))
            .attr("r", fmt.number(*rx)),
        Shape::Ellipse { center, rx, ry } => Element::new("ellipse")
            .attr("cx", fmt.number(center.x))
            .attr("cy", fmt.number(center.y))
            .attr("rx", fmt.number(*rx))
            .attr("ry", fmt.number(*ry)),
        Shape::Line(p1, p2) => Element::new("line")
            .attr("x1", fmt.number(p1.x))
            .attr("y1", fmt.number(p1.y))
            .attr("x2", fmt.number(p2.x))
            .attr("y2", fmt.number(p2.y)),
        Shape::Polyline(points) => Element::new("polyline").attr("points", fmt.points(points)),
        Shape::Polygon(points) => Element::new("polygon").attr("points", fmt.points(points)),
        Shape::Path(path) => Element::new("path").attr("d", fmt.path_data(path)),
    }
}

//! Gradient paint serialization
//!
//! Turns linear and radial gradient paints into `<linearGradient>` and
//! `<radialGradient>` definitions and hands back `url(#id)` references.
//!
//! ## Identity
//!
//! Each paint handle is registered at most once per session. Reusing the
//! same handle reuses its definition; a structurally equal but distinct
//! handle gets its own definition.
//!
//! ## Coordinates
//!
//! Gradients use `gradientUnits="userSpaceOnUse"`. The surface writes its
//! current transform on every element it emits, so the gradient is
//! evaluated in the same user space as the geometry it paints. Only the
//! paint's own transform goes into `gradientTransform`.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::document::{Element, NumberFormat, SvgDocument};
use crate::error::InvalidGradientError;
use crate::geometry::Affine;
use crate::paint::{ColorInterpolation, ColorStop, LinearGradient, Paint, RadialGradient, SpreadMethod};

use super::ExtensionHandler;

/// Keeps a registered paint alive so its address is not reused while the
/// session runs.
#[derive(Debug)]
enum GradientHandle {
    Linear(Arc<LinearGradient>),
    Radial(Arc<RadialGradient>),
}

impl GradientHandle {
    fn address(&self) -> usize {
        match self {
            GradientHandle::Linear(g) => Arc::as_ptr(g) as *const () as usize,
            GradientHandle::Radial(g) => Arc::as_ptr(g) as *const () as usize,
        }
    }
}

#[derive(Debug)]
struct Registration {
    _handle: GradientHandle,
    id: String,
}

/// Paint identity to definition ID, for one session
#[derive(Debug, Default)]
pub struct GradientRegistry {
    entries: HashMap<usize, Registration>,
}

impl GradientRegistry {
    fn get(&self, handle: &GradientHandle) -> Option<&str> {
        self.entries
            .get(&handle.address())
            .map(|entry| entry.id.as_str())
    }

    fn insert(&mut self, handle: GradientHandle, id: String) {
        self.entries.insert(
            handle.address(),
            Registration {
                _handle: handle,
                id,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extension handler that serializes gradient paints
#[derive(Debug, Default)]
pub struct GradientExtensionHandler {
    registry: GradientRegistry,
}

impl GradientExtensionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gradients registered so far in this session
    pub fn registry(&self) -> &GradientRegistry {
        &self.registry
    }

    fn resolve(
        &mut self,
        handle: GradientHandle,
        document: &mut SvgDocument,
    ) -> Result<String, InvalidGradientError> {
        if let Some(id) = self.registry.get(&handle) {
            debug!("reusing gradient definition {}", id);
            return Ok(reference(id));
        }

        // Validate before touching the document, including its ID counter
        match &handle {
            GradientHandle::Linear(g) => g.validate()?,
            GradientHandle::Radial(g) => g.validate()?,
        }

        let fmt = document.number_format();
        let (id, element) = match &handle {
            GradientHandle::Linear(g) => {
                let id = document.generate_id("linearGradient");
                let element = linear_element(g, &id, fmt);
                (id, element)
            }
            GradientHandle::Radial(g) => {
                let id = document.generate_id("radialGradient");
                let element = radial_element(g, &id, fmt);
                (id, element)
            }
        };
        debug!("registered gradient definition {}", id);

        document.add_definition(element);
        let result = reference(&id);
        self.registry.insert(handle, id);
        Ok(result)
    }
}

impl ExtensionHandler for GradientExtensionHandler {
    fn handle_paint(
        &mut self,
        paint: &Paint,
        document: &mut SvgDocument,
    ) -> Result<Option<String>, InvalidGradientError> {
        let handle = match paint {
            Paint::LinearGradient(g) => GradientHandle::Linear(Arc::clone(g)),
            Paint::RadialGradient(g) => GradientHandle::Radial(Arc::clone(g)),
            Paint::Solid(_) | Paint::Texture(_) => return Ok(None),
        };
        self.resolve(handle, document).map(Some)
    }
}

fn reference(id: &str) -> String {
    format!("url(#{})", id)
}

fn linear_element(gradient: &LinearGradient, id: &str, fmt: NumberFormat) -> Element {
    let element = Element::new("linearGradient")
        .attr("id", id)
        .attr("gradientUnits", "userSpaceOnUse")
        .attr("x1", fmt.number(gradient.start.x))
        .attr("y1", fmt.number(gradient.start.y))
        .attr("x2", fmt.number(gradient.end.x))
        .attr("y2", fmt.number(gradient.end.y));
    finish_gradient(
        element,
        &gradient.stops,
        gradient.spread,
        &gradient.transform,
        gradient.interpolation,
        fmt,
    )
}

fn radial_element(gradient: &RadialGradient, id: &str, fmt: NumberFormat) -> Element {
    let mut element = Element::new("radialGradient")
        .attr("id", id)
        .attr("gradientUnits", "userSpaceOnUse")
        .attr("cx", fmt.number(gradient.center.x))
        .attr("cy", fmt.number(gradient.center.y))
        .attr("r", fmt.number(gradient.radius));
    let focus = gradient.focus();
    if focus != gradient.center {
        element.set_attr("fx", fmt.number(focus.x));
        element.set_attr("fy", fmt.number(focus.y));
    }
    finish_gradient(
        element,
        &gradient.stops,
        gradient.spread,
        &gradient.transform,
        gradient.interpolation,
        fmt,
    )
}

/// Attributes and stops shared by both gradient kinds
fn finish_gradient(
    mut element: Element,
    stops: &[ColorStop],
    spread: SpreadMethod,
    transform: &Affine,
    interpolation: ColorInterpolation,
    fmt: NumberFormat,
) -> Element {
    element.set_attr("spreadMethod", spread.as_str());
    if !transform.is_identity() {
        element.set_attr("gradientTransform", fmt.transform(transform));
    }
    if interpolation == ColorInterpolation::LinearRgb {
        element.set_attr("color-interpolation", "linearRGB");
    }
    for stop in stops {
        element.push_child(
            Element::new("stop")
                .attr("offset", fmt.number(stop.offset))
                .attr("stop-color", stop.color.to_hex())
                .attr("stop-opacity", fmt.number(stop.color.opacity())),
        );
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Color, Point};
    use pretty_assertions::assert_eq;

    fn rgb_stops() -> Vec<ColorStop> {
        vec![
            ColorStop::new(0.0, Color::RED),
            ColorStop::new(0.25, Color::GREEN),
            ColorStop::new(1.0, Color::BLUE),
        ]
    }

    fn linear() -> Paint {
        LinearGradient::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0), rgb_stops()).into()
    }

    fn radial() -> Paint {
        RadialGradient::new(Point::new(50.0, 50.0), 50.0, rgb_stops()).into()
    }

    #[test]
    fn test_solid_paint_not_handled() {
        let mut handler = GradientExtensionHandler::new();
        let mut doc = SvgDocument::default();
        let result = handler
            .handle_paint(&Paint::Solid(Color::RED), &mut doc)
            .unwrap();
        assert_eq!(result, None);
        assert!(doc.definitions().is_empty());
    }

    #[test]
    fn test_same_paint_registered_once() {
        let mut handler = GradientExtensionHandler::new();
        let mut doc = SvgDocument::default();
        let paint = linear();

        let first = handler.handle_paint(&paint, &mut doc).unwrap();
        let second = handler.handle_paint(&paint.clone(), &mut doc).unwrap();

        assert_eq!(first, Some("url(#linearGradient1)".to_string()));
        assert_eq!(first, second);
        assert_eq!(doc.definitions().len(), 1);
        assert_eq!(handler.registry().len(), 1);
    }

    #[test]
    fn test_equal_paints_get_distinct_ids() {
        let mut handler = GradientExtensionHandler::new();
        let mut doc = SvgDocument::default();

        let a = handler.handle_paint(&radial(), &mut doc).unwrap();
        let b = handler.handle_paint(&radial(), &mut doc).unwrap();

        assert_eq!(a, Some("url(#radialGradient1)".to_string()));
        assert_eq!(b, Some("url(#radialGradient2)".to_string()));
        assert_eq!(doc.definitions().len(), 2);
    }

    #[test]
    fn test_stops_in_input_order() {
        let mut handler = GradientExtensionHandler::new();
        let mut doc = SvgDocument::default();
        handler.handle_paint(&linear(), &mut doc).unwrap();

        let stops: Vec<_> = doc.definitions()[0]
            .child_elements()
            .map(|s| {
                (
                    s.attribute("offset").unwrap().to_string(),
                    s.attribute("stop-color").unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            stops,
            vec![
                ("0".to_string(), "#ff0000".to_string()),
                ("0.25".to_string(), "#00ff00".to_string()),
                ("1".to_string(), "#0000ff".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_gradient_leaves_document_untouched() {
        let mut handler = GradientExtensionHandler::new();
        let mut doc = SvgDocument::default();
        let paint: Paint = LinearGradient::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            [ColorStop::new(0.0, Color::RED)],
        )
        .into();

        let err = handler.handle_paint(&paint, &mut doc).unwrap_err();
        assert_eq!(err, InvalidGradientError::TooFewStops { count: 1 });
        assert!(doc.definitions().is_empty());
        assert!(handler.registry().is_empty());

        // The ID counter was not advanced either
        handler.handle_paint(&linear(), &mut doc).unwrap();
        assert!(doc.definition("linearGradient1").is_some());
    }

    #[test]
    fn test_radial_focus_and_spread() {
        let mut handler = GradientExtensionHandler::new();
        let mut doc = SvgDocument::default();
        let paint: Paint = RadialGradient::new(Point::new(50.0, 50.0), 40.0, rgb_stops())
            .with_focus(Point::new(30.0, 45.0))
            .with_spread(SpreadMethod::Reflect)
            .into();
        handler.handle_paint(&paint, &mut doc).unwrap();

        let def = &doc.definitions()[0];
        assert_eq!(def.name(), "radialGradient");
        assert_eq!(def.attribute("r"), Some("40"));
        assert_eq!(def.attribute("fx"), Some("30"));
        assert_eq!(def.attribute("fy"), Some("45"));
        assert_eq!(def.attribute("spreadMethod"), Some("reflect"));
        assert_eq!(def.attribute("gradientUnits"), Some("userSpaceOnUse"));
    }

    #[test]
    fn test_paint_transform_and_interpolation() {
        let mut handler = GradientExtensionHandler::new();
        let mut doc = SvgDocument::default();
        let paint: Paint =
            LinearGradient::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), rgb_stops())
                .with_transform(Affine::scale(2.0, 1.0))
                .with_interpolation(ColorInterpolation::LinearRgb)
                .into();
        handler.handle_paint(&paint, &mut doc).unwrap();

        let def = &doc.definitions()[0];
        assert_eq!(def.attribute("gradientTransform"), Some("matrix(2,0,0,1,0,0)"));
        assert_eq!(def.attribute("color-interpolation"), Some("linearRGB"));
    }

    #[test]
    fn test_stop_opacity_from_alpha() {
        let mut handler = GradientExtensionHandler::new();
        let mut doc = SvgDocument::default();
        let paint: Paint = LinearGradient::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            [
                ColorStop::new(0.0, Color::rgba(0, 0, 0, 0)),
                ColorStop::new(1.0, Color::rgba(255, 255, 255, 51)),
            ],
        )
        .into();
        handler.handle_paint(&paint, &mut doc).unwrap();

        let opacities: Vec<_> = doc.definitions()[0]
            .child_elements()
            .map(|s| s.attribute("stop-opacity").unwrap().to_string())
            .collect();
        assert_eq!(opacities, vec!["0", "0.2"]);
    }
}

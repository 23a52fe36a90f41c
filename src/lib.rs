//! SVG Graphics - export 2D drawings, including gradient paints, as SVG
//!
//! This library provides a drawing surface that records shapes, text and
//! images into an SVG document, serializes linear and radial gradients as
//! reusable `<defs>` entries, and writes the result to a stream or file.
//!
//! # Example
//!
//! ```rust
//! use svg_graphics::geometry::{Color, Point};
//! use svg_graphics::paint::{ColorStop, LinearGradient};
//!
//! let mut graphics = svg_graphics::create();
//! graphics.set_paint(LinearGradient::new(
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 0.0),
//!     [
//!         ColorStop::new(0.0, Color::RED),
//!         ColorStop::new(1.0, Color::BLUE),
//!     ],
//! ));
//! graphics.fill_rect(0.0, 0.0, 100.0, 50.0).unwrap();
//!
//! let svg = graphics.to_svg_string();
//! assert!(svg.contains(r#"<linearGradient id="linearGradient1""#));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod extension;
pub mod geometry;
pub mod graphics;
pub mod image_writer;
#[cfg(feature = "gui")]
pub mod native_dialog;
pub mod paint;
pub mod scene;
pub mod writer;

pub use config::{ConfigError, ExportConfig, SvgConfig};
pub use error::{EncodingError, ExportError, InvalidGradientError};
pub use extension::{ExtensionHandler, GradientExtensionHandler};
pub use graphics::SvgGraphics;
pub use image_writer::{ImageWriter, ImageWriterRegistry, PngImageWriter};
pub use paint::Paint;

/// Create a drawing session with default configuration.
///
/// The session has its own document, gradient registry and image writers.
pub fn create() -> SvgGraphics {
    SvgGraphics::new()
}

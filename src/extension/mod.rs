//! Paint extensions for the drawing surface
//!
//! An extension handler gets the first chance to turn a paint into an SVG
//! paint server reference. Paints it does not handle fall through to the
//! surface's built-in handling.

pub mod gradient;

use crate::document::SvgDocument;
use crate::error::InvalidGradientError;
use crate::paint::Paint;

pub use gradient::GradientExtensionHandler;

/// Hook for paint kinds the surface does not serialize itself
pub trait ExtensionHandler {
    /// Resolve a paint to a `fill`/`stroke` value such as `url(#id)`.
    ///
    /// Returns `Ok(None)` when the paint is left to default handling. On
    /// error the document must be left unchanged.
    fn handle_paint(
        &mut self,
        paint: &Paint,
        document: &mut SvgDocument,
    ) -> Result<Option<String>, InvalidGradientError>;
}

//! SVG document model
//!
//! A small element tree with a `<defs>` section, a session-scoped ID
//! generator, and serialization with either CSS classes or inline
//! presentation attributes.

pub mod element;
pub mod format;
pub mod ids;
pub mod style;
pub mod svg;

pub use element::{Element, Node};
pub use format::NumberFormat;
pub use svg::SvgDocument;

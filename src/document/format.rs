//! Number, transform and path formatting for SVG attribute values

use crate::geometry::{Affine, Path, PathSegment, Point};

/// Formats numbers with a fixed number of fractional digits, trimming
/// trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    precision: usize,
}

impl NumberFormat {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn number(&self, value: f64) -> String {
        if !value.is_finite() {
            return "0".to_string();
        }
        let formatted = format!("{:.*}", self.precision, value);
        let trimmed = if formatted.contains('.') {
            formatted.trim_end_matches('0').trim_end_matches('.')
        } else {
            formatted.as_str()
        };
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Format a point list for `points` attributes
    pub fn points(&self, points: &[Point]) -> String {
        points
            .iter()
            .map(|p| format!("{},{}", self.number(p.x), self.number(p.y)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Format a transform for `transform` and `gradientTransform` attributes
    pub fn transform(&self, transform: &Affine) -> String {
        if transform.is_translation() {
            return format!(
                "translate({},{})",
                self.number(transform.e),
                self.number(transform.f)
            );
        }
        let coefficients = transform
            .coefficients()
            .iter()
            .map(|v| self.number(*v))
            .collect::<Vec<_>>()
            .join(",");
        format!("matrix({})", coefficients)
    }

    /// Convert a path to an SVG path `d` attribute
    pub fn path_data(&self, path: &Path) -> String {
        path.segments()
            .iter()
            .map(|segment| match segment {
                PathSegment::MoveTo(p) => format!("M{} {}", self.number(p.x), self.number(p.y)),
                PathSegment::LineTo(p) => format!("L{} {}", self.number(p.x), self.number(p.y)),
                PathSegment::QuadTo(c, p) => format!(
                    "Q{} {} {} {}",
                    self.number(c.x),
                    self.number(c.y),
                    self.number(p.x),
                    self.number(p.y)
                ),
                PathSegment::CubicTo(c1, c2, p) => format!(
                    "C{} {} {} {} {} {}",
                    self.number(c1.x),
                    self.number(c1.y),
                    self.number(c2.x),
                    self.number(c2.y),
                    self.number(p.x),
                    self.number(p.y)
                ),
                PathSegment::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(4)
    }
}

/// Escape special XML characters and drop characters XML 1.0 does not allow
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make text safe to place inside a `<![CDATA[...]]>` section
pub fn escape_cdata(s: &str) -> String {
    s.chars()
        .filter(|c| is_xml_char(*c))
        .collect::<String>()
        .replace("]]>", "]]]]><![CDATA[>")
}

/// Quote a value as a CSS string
pub fn css_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' | '\x0c' => out.push_str(&format!("\\{:x} ", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Characters allowed by the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{d7ff}' | '\u{e000}'..='\u{fffd}' | '\u{10000}'..)
}

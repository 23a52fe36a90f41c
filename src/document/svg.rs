//! SVG document built up by one drawing session

use std::io::{self, Write};

use crate::config::SvgConfig;
use crate::geometry::Size;

use super::element::{Element, Node};
use super::format::{escape_cdata, escape_xml, NumberFormat};
use super::ids::IdGenerator;
use super::style::StyleClasses;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// An SVG document: definitions, content elements and the ID generator
/// that keeps definition IDs unique.
#[derive(Debug)]
pub struct SvgDocument {
    defs: Vec<Element>,
    body: Vec<Element>,
    ids: IdGenerator,
    canvas: Option<Size>,
    number_format: NumberFormat,
}

impl SvgDocument {
    /// Create an empty document
    pub fn new(number_format: NumberFormat) -> Self {
        Self {
            defs: vec![],
            body: vec![],
            ids: IdGenerator::new(),
            canvas: None,
            number_format,
        }
    }

    /// Generate an ID that is unique within this document
    pub fn generate_id(&mut self, prefix: &str) -> String {
        self.ids.next_id(prefix)
    }

    /// Insert an element into the `<defs>` section
    pub fn add_definition(&mut self, element: Element) {
        self.defs.push(element);
    }

    pub fn definitions(&self) -> &[Element] {
        &self.defs
    }

    /// Find a definition by its `id`
    pub fn definition(&self, id: &str) -> Option<&Element> {
        self.defs.iter().find(|e| e.attribute("id") == Some(id))
    }

    /// Append a content element.
    ///
    /// Clipped elements go into a `<g clip-path="...">` group. Consecutive
    /// elements with the same clip share the group.
    pub fn append(&mut self, element: Element, clip_id: Option<&str>) {
        let Some(clip_id) = clip_id else {
            self.body.push(element);
            return;
        };

        let reference = format!("url(#{})", clip_id);
        if let Some(group) = self.body.last_mut() {
            if group.name() == "g" && group.attribute("clip-path") == Some(reference.as_str()) {
                group.push_child(element);
                return;
            }
        }
        self.body
            .push(Element::new("g").attr("clip-path", reference).child(element));
    }

    /// Top-level content elements in drawing order
    pub fn elements(&self) -> &[Element] {
        &self.body
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas = Some(size);
    }

    pub fn canvas_size(&self) -> Option<Size> {
        self.canvas
    }

    pub fn number_format(&self) -> NumberFormat {
        self.number_format
    }

    /// Serialize the document as UTF-8 SVG 1.1.
    ///
    /// With `use_css`, style properties are collected into classes in a
    /// `<style>` block; otherwise they are written as presentation
    /// attributes.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        config: &SvgConfig,
        use_css: bool,
    ) -> io::Result<()> {
        let classes = if use_css {
            Some(StyleClasses::collect(
                self.defs.iter().chain(self.body.iter()),
                &config.class_prefix,
            ))
        } else {
            None
        };
        let mut writer = XmlWriter {
            sink,
            classes: classes.as_ref(),
            pretty: config.pretty_print,
        };
        let nl = writer.newline();

        if config.standalone {
            write!(
                writer.sink,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>{nl}"#
            )?;
        }
        if let Some(comment) = &config.comment {
            // "--" is not allowed inside XML comments
            write!(writer.sink, "<!-- {} -->{nl}", comment.replace("--", "- -"))?;
        }

        write!(
            writer.sink,
            r#"<svg xmlns="{}" xmlns:xlink="{}" version="1.1""#,
            SVG_NAMESPACE, XLINK_NAMESPACE
        )?;
        if let Some(size) = self.canvas {
            let width = self.number_format.number(size.width);
            let height = self.number_format.number(size.height);
            write!(
                writer.sink,
                r#" width="{width}" height="{height}" viewBox="0 0 {width} {height}""#
            )?;
        }
        write!(writer.sink, ">{nl}")?;

        if let Some(classes) = classes.as_ref().filter(|c| !c.is_empty()) {
            let indent = writer.indent(1);
            let rule_indent = writer.indent(2);
            write!(
                writer.sink,
                r#"{indent}<style type="text/css"><![CDATA[{nl}"#
            )?;
            for rule in classes.rules() {
                write!(writer.sink, "{rule_indent}{}{nl}", escape_cdata(&rule))?;
            }
            write!(writer.sink, "{indent}]]></style>{nl}")?;
        }

        if !self.defs.is_empty() {
            let indent = writer.indent(1);
            write!(writer.sink, "{indent}<defs>{nl}")?;
            for def in &self.defs {
                writer.element(def, 2)?;
            }
            write!(writer.sink, "{indent}</defs>{nl}")?;
        }

        for element in &self.body {
            writer.element(element, 1)?;
        }

        write!(writer.sink, "</svg>{nl}")?;
        writer.sink.flush()
    }
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::new(NumberFormat::default())
    }
}

struct XmlWriter<'a, W: Write + ?Sized> {
    sink: &'a mut W,
    classes: Option<&'a StyleClasses>,
    pretty: bool,
}

impl<W: Write + ?Sized> XmlWriter<'_, W> {
    fn newline(&self) -> &'static str {
        if self.pretty {
            "\n"
        } else {
            ""
        }
    }

    fn indent(&self, depth: usize) -> String {
        if self.pretty {
            "  ".repeat(depth)
        } else {
            String::new()
        }
    }

    fn element(&mut self, element: &Element, depth: usize) -> io::Result<()> {
        let indent = self.indent(depth);
        let nl = self.newline();

        write!(self.sink, "{}<{}", indent, element.name())?;
        for (name, value) in element.attributes() {
            write!(self.sink, r#" {}="{}""#, name, escape_xml(value))?;
        }
        match self.classes {
            Some(classes) => {
                if let Some(class) = classes.class_for(element) {
                    write!(self.sink, r#" class="{}""#, escape_xml(class))?;
                }
            }
            None => {
                for (property, value) in element.style_properties() {
                    write!(self.sink, r#" {}="{}""#, property, escape_xml(value))?;
                }
            }
        }

        let children = element.children();
        if children.is_empty() {
            return write!(self.sink, "/>{nl}");
        }

        if children.iter().all(|c| matches!(c, Node::Text(_))) {
            write!(self.sink, ">")?;
            for child in children {
                if let Node::Text(text) = child {
                    write!(self.sink, "{}", escape_xml(text))?;
                }
            }
            return write!(self.sink, "</{}>{nl}", element.name());
        }

        write!(self.sink, ">{nl}")?;
        let child_indent = self.indent(depth + 1);
        for child in children {
            match child {
                Node::Element(e) => self.element(e, depth + 1)?,
                Node::Text(text) => write!(self.sink, "{}{}{nl}", child_indent, escape_xml(text))?,
            }
        }
        write!(self.sink, "{}</{}>{nl}", indent, element.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(doc: &SvgDocument, config: &SvgConfig, use_css: bool) -> String {
        let mut buf = Vec::new();
        doc.write_to(&mut buf, config, use_css).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_document() {
        let doc = SvgDocument::default();
        let svg = render(&doc, &SvgConfig::default(), true);
        assert_eq!(
            svg,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\">\n",
                "</svg>\n"
            )
        );
    }

    #[test]
    fn test_inline_attributes() {
        let mut doc = SvgDocument::default();
        doc.append(
            Element::new("rect")
                .attr("width", "10")
                .style("fill", "#ff0000"),
            None,
        );
        let config = SvgConfig::default().with_standalone(false).with_pretty_print(false);
        let svg = render(&doc, &config, false);
        assert!(svg.contains(r##"<rect width="10" fill="#ff0000"/>"##));
        assert!(!svg.contains("<style"));
    }

    #[test]
    fn test_css_classes() {
        let mut doc = SvgDocument::default();
        doc.append(Element::new("rect").style("fill", "#ff0000"), None);
        doc.append(Element::new("circle").style("fill", "#ff0000"), None);
        let svg = render(&doc, &SvgConfig::default(), true);

        assert!(svg.contains("<![CDATA["));
        assert!(svg.contains(".s0 { fill: #ff0000; }"));
        assert!(svg.contains(r#"<rect class="s0"/>"#));
        assert!(svg.contains(r#"<circle class="s0"/>"#));
        assert!(!svg.contains(r##"fill="#ff0000""##));
    }

    #[test]
    fn test_defs_section() {
        let mut doc = SvgDocument::default();
        let id = doc.generate_id("clipPath");
        doc.add_definition(Element::new("clipPath").attr("id", id.clone()));
        assert!(doc.definition(&id).is_some());

        let svg = render(&doc, &SvgConfig::default(), true);
        assert!(svg.contains("  <defs>\n    <clipPath id=\"clipPath1\"/>\n  </defs>\n"));
    }

    #[test]
    fn test_clipped_elements_share_group() {
        let mut doc = SvgDocument::default();
        doc.append(Element::new("rect"), Some("clipPath1"));
        doc.append(Element::new("circle"), Some("clipPath1"));
        doc.append(Element::new("line"), Some("clipPath2"));
        doc.append(Element::new("path"), None);

        let names: Vec<_> = doc.elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["g", "g", "path"]);
        assert_eq!(doc.elements()[0].child_elements().count(), 2);
        assert_eq!(
            doc.elements()[1].attribute("clip-path"),
            Some("url(#clipPath2)")
        );
    }

    #[test]
    fn test_canvas_size_and_comment() {
        let mut doc = SvgDocument::default();
        doc.set_canvas_size(Size::new(300.0, 200.5));
        let config = SvgConfig::default().with_comment("made -- here");
        let svg = render(&doc, &config, true);
        assert!(svg.contains(r#"width="300" height="200.5" viewBox="0 0 300 200.5""#));
        assert!(svg.contains("<!-- made - - here -->"));
    }

    #[test]
    fn test_cdata_terminator_in_style_is_split() {
        let mut doc = SvgDocument::default();
        doc.append(Element::new("text").style("font-family", "a]]>b"), None);
        let svg = render(&doc, &SvgConfig::default(), true);
        assert!(svg.contains(r#"font-family: "a]]]]><![CDATA[>b";"#));
        assert_eq!(svg.matches("]]>").count(), 2);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = SvgDocument::default();
        doc.append(Element::new("text").text("a < b & c"), None);
        let svg = render(&doc, &SvgConfig::default(), false);
        assert!(svg.contains("<text>a &lt; b &amp; c</text>"));
    }
}

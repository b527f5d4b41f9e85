//! Markup export.
//!
//! Shapes write themselves through the [`MarkupWriter`] trait. [`SvgWriter`] streams the result
//! as SVG text into anything that implements `fmt::Write`.

use crate::shape::Shape;
use cgmath::Vector2;
use failure::Error;
use std::fmt;

/// Stroke width written for every exported outline, in output units.
pub const SVG_STROKE_WIDTH: &str = "0.01";

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Fail)]
pub enum ExportError {
    #[fail(display = "end_element without a matching start_element")]
    UnbalancedEnd,
    #[fail(display = "attribute {} written outside of a start tag", _0)]
    AttributeOutsideTag(String),
    #[fail(display = "attribute text written outside of an attribute")]
    TextOutsideAttribute,
    #[fail(display = "attribute still open")]
    AttributeOpen,
}

/// A streaming element/attribute writer.
pub trait MarkupWriter {
    fn start_element(&mut self, name: &str) -> Result<(), Error>;

    /// Closes the innermost open element.
    fn end_element(&mut self) -> Result<(), Error>;

    fn start_attribute(&mut self, name: &str) -> Result<(), Error>;

    /// Appends text to the current attribute value.
    fn write_str(&mut self, text: &str) -> Result<(), Error>;

    fn write_number(&mut self, value: f64) -> Result<(), Error>;

    fn end_attribute(&mut self) -> Result<(), Error>;

    fn attribute_str(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.start_attribute(name)?;
        self.write_str(value)?;
        self.end_attribute()
    }

    fn attribute_number(&mut self, name: &str, value: f64) -> Result<(), Error> {
        self.start_attribute(name)?;
        self.write_number(value)?;
        self.end_attribute()
    }
}

/// Writes SVG text.
///
/// Elements without children are closed as `<name .../>`.
pub struct SvgWriter<W: fmt::Write> {
    out: W,
    open_elements: Vec<String>,

    /// True while the start tag of the innermost element has not been closed with `>`.
    in_start_tag: bool,
    in_attribute: bool,
}

impl<W: fmt::Write> SvgWriter<W> {
    pub fn new(out: W) -> SvgWriter<W> {
        SvgWriter {
            out,
            open_elements: Vec::new(),
            in_start_tag: false,
            in_attribute: false,
        }
    }

    /// Returns the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Number of elements that were started but not yet ended.
    pub fn depth(&self) -> usize {
        self.open_elements.len()
    }

    fn close_start_tag(&mut self) -> Result<(), Error> {
        if self.in_attribute {
            return Err(ExportError::AttributeOpen.into());
        }
        if self.in_start_tag {
            self.out.write_char('>')?;
            self.in_start_tag = false;
        }
        Ok(())
    }
}

fn escape_attribute(text: &str, out: &mut impl fmt::Write) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

impl<W: fmt::Write> MarkupWriter for SvgWriter<W> {
    fn start_element(&mut self, name: &str) -> Result<(), Error> {
        self.close_start_tag()?;
        write!(self.out, "<{}", name)?;
        self.open_elements.push(name.to_string());
        self.in_start_tag = true;
        Ok(())
    }

    fn end_element(&mut self) -> Result<(), Error> {
        if self.in_attribute {
            return Err(ExportError::AttributeOpen.into());
        }
        let name = self
            .open_elements
            .pop()
            .ok_or(ExportError::UnbalancedEnd)?;
        if self.in_start_tag {
            self.out.write_str("/>")?;
            self.in_start_tag = false;
        } else {
            write!(self.out, "</{}>", name)?;
        }
        Ok(())
    }

    fn start_attribute(&mut self, name: &str) -> Result<(), Error> {
        if !self.in_start_tag {
            return Err(ExportError::AttributeOutsideTag(name.to_string()).into());
        }
        if self.in_attribute {
            return Err(ExportError::AttributeOpen.into());
        }
        write!(self.out, " {}=\"", name)?;
        self.in_attribute = true;
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), Error> {
        if !self.in_attribute {
            return Err(ExportError::TextOutsideAttribute.into());
        }
        escape_attribute(text, &mut self.out)?;
        Ok(())
    }

    fn write_number(&mut self, value: f64) -> Result<(), Error> {
        if !self.in_attribute {
            return Err(ExportError::TextOutsideAttribute.into());
        }
        // no negative zero
        let value = if value == 0. { 0. } else { value };
        write!(self.out, "{}", value)?;
        Ok(())
    }

    fn end_attribute(&mut self) -> Result<(), Error> {
        if !self.in_attribute {
            return Err(ExportError::TextOutsideAttribute.into());
        }
        self.out.write_char('"')?;
        self.in_attribute = false;
        Ok(())
    }
}

/// Writes an `svg` root element containing every shape.
///
/// Coordinates are mapped as `(world - origin) * (scale, -scale)`.
pub fn write_svg_document(
    writer: &mut dyn MarkupWriter,
    shapes: &[Box<dyn Shape>],
    origin: Vector2<f64>,
    scale: f64,
) -> Result<(), Error> {
    debug!(target: "vecshape", "exporting {} shapes", shapes.len());
    writer.start_element("svg")?;
    writer.attribute_str("xmlns", SVG_NAMESPACE)?;
    for shape in shapes {
        shape.write_markup(writer, origin, scale)?;
    }
    writer.end_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{CircleShape, PointShape};

    #[test]
    fn nested_elements() {
        let mut out = String::new();
        {
            let mut w = SvgWriter::new(&mut out);
            w.start_element("g").unwrap();
            w.attribute_str("id", "a").unwrap();
            w.start_element("rect").unwrap();
            w.attribute_number("x", 1.5).unwrap();
            w.end_element().unwrap();
            w.end_element().unwrap();
            assert_eq!(w.depth(), 0);
        }
        assert_eq!(out, r#"<g id="a"><rect x="1.5"/></g>"#);
    }

    #[test]
    fn escapes_attribute_text() {
        let mut w = SvgWriter::new(String::new());
        w.start_element("text").unwrap();
        w.attribute_str("title", r#"a "b" & <c>"#).unwrap();
        w.end_element().unwrap();
        assert_eq!(
            w.into_inner(),
            r#"<text title="a &quot;b&quot; &amp; &lt;c&gt;"/>"#
        );
    }

    #[test]
    fn numbers() {
        let mut w = SvgWriter::new(String::new());
        w.start_element("c").unwrap();
        w.attribute_number("a", 10.).unwrap();
        w.attribute_number("b", -0.).unwrap();
        w.attribute_number("c", -2.25).unwrap();
        w.end_element().unwrap();
        assert_eq!(w.into_inner(), r#"<c a="10" b="0" c="-2.25"/>"#);
    }

    #[test]
    fn misuse_is_an_error() {
        let mut w = SvgWriter::new(String::new());
        assert!(w.end_element().is_err());
        assert!(w.attribute_str("a", "b").is_err());
        assert!(w.write_str("x").is_err());

        w.start_element("a").unwrap();
        w.start_attribute("b").unwrap();
        assert!(w.start_element("c").is_err());
        assert!(w.end_element().is_err());
    }

    #[test]
    fn document() {
        let shapes: Vec<Box<dyn Shape>> = vec![
            Box::new(CircleShape::new(Vector2::new(1., 1.), 2.)),
            Box::new(PointShape::new(Vector2::new(5., 5.))),
        ];
        let mut out = String::new();
        write_svg_document(
            &mut SvgWriter::new(&mut out),
            &shapes,
            Vector2::new(0., 0.),
            10.,
        )
        .unwrap();

        assert!(out.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg"><circle cx="10" cy="-10" r="20""#));
        assert!(out.ends_with("/></svg>"));
        assert_eq!(out.matches("<circle").count(), 1);
    }

    #[test]
    fn empty_document() {
        let mut out = String::new();
        write_svg_document(&mut SvgWriter::new(&mut out), &[], Vector2::new(0., 0.), 1.).unwrap();
        assert_eq!(out, r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#);
    }
}

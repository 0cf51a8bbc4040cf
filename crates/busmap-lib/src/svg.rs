//! Minimal vector-graphics document assembly.
//!
//! Primitives mirror the handful of SVG elements the map renderer emits:
//! filled circles, stroked polylines, and two-pass outlined text. Elements
//! render in insertion order, which is what gives the map its strict
//! layering.

use std::fmt::{self, Write};

/// 2-D point on the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Color specification: 3-channel, 4-channel with alpha, or a named/hex
/// color string passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
    Named(String),
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Color::Named(name.into())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
            Color::Named(name) => f.write_str(name),
        }
    }
}

/// Filled circle.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point,
    radius: f64,
    fill: Color,
}

impl Circle {
    pub fn new() -> Self {
        Self {
            center: Point::default(),
            radius: 1.0,
            fill: Color::named("white"),
        }
    }

    pub fn center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    fn render(&self, out: &mut impl Write) -> fmt::Result {
        write!(
            out,
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
            self.center.x, self.center.y, self.radius, self.fill
        )
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

/// Open polyline stroked with round caps and joins.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Point>,
    stroke: Color,
    stroke_width: f64,
}

impl Polyline {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            stroke: Color::named("none"),
            stroke_width: 1.0,
        }
    }

    pub fn point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }

    pub fn stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    fn render(&self, out: &mut impl Write) -> fmt::Result {
        out.write_str("  <polyline points=\"")?;
        for (index, point) in self.points.iter().enumerate() {
            if index > 0 {
                out.write_str(" ")?;
            }
            write!(out, "{},{}", point.x, point.y)?;
        }
        write!(
            out,
            "\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" \
             stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
            self.stroke, self.stroke_width
        )
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

/// Text label. An underlay pass sets the stroke attributes; the fill pass
/// leaves them unset.
#[derive(Debug, Clone)]
pub struct Text {
    position: Point,
    offset: Point,
    font_size: u32,
    font_family: String,
    font_weight: Option<String>,
    fill: Color,
    stroke: Option<(Color, f64)>,
    content: String,
}

impl Text {
    pub fn new() -> Self {
        Self {
            position: Point::default(),
            offset: Point::default(),
            font_size: 1,
            font_family: String::new(),
            font_weight: None,
            fill: Color::named("none"),
            stroke: None,
            content: String::new(),
        }
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Stroke used by underlay passes; also sets round caps and joins.
    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some((color, width));
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    fn render(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "  <text fill=\"{}\"", self.fill)?;
        if let Some((color, width)) = &self.stroke {
            write!(
                out,
                " stroke=\"{color}\" stroke-width=\"{width}\" \
                 stroke-linecap=\"round\" stroke-linejoin=\"round\""
            )?;
        }
        write!(
            out,
            " x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
            self.position.x, self.position.y, self.offset.x, self.offset.y, self.font_size
        )?;
        if !self.font_family.is_empty() {
            write!(out, " font-family=\"{}\"", self.font_family)?;
        }
        if let Some(weight) = &self.font_weight {
            write!(out, " font-weight=\"{weight}\"")?;
        }
        out.write_str(">")?;
        write_escaped(out, &self.content)?;
        out.write_str("</text>")
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

/// One drawable element.
#[derive(Debug, Clone)]
pub enum Object {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl From<Circle> for Object {
    fn from(circle: Circle) -> Self {
        Object::Circle(circle)
    }
}

impl From<Polyline> for Object {
    fn from(polyline: Polyline) -> Self {
        Object::Polyline(polyline)
    }
}

impl From<Text> for Object {
    fn from(text: Text) -> Self {
        Object::Text(text)
    }
}

/// Ordered collection of drawable elements.
#[derive(Debug, Clone, Default)]
pub struct Document {
    objects: Vec<Object>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Render the document, one element per line inside the `<svg>` envelope.
    pub fn render(&self, out: &mut impl Write) -> fmt::Result {
        out.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n")?;
        out.write_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n")?;
        for object in &self.objects {
            match object {
                Object::Circle(circle) => circle.render(out)?,
                Object::Polyline(polyline) => polyline.render(out)?,
                Object::Text(text) => text.render(out)?,
            }
            out.write_str("\n")?;
        }
        out.write_str("</svg>")
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

/// Stop and bus names are arbitrary strings; keep the XML well-formed.
fn write_escaped(out: &mut impl Write, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&apos;")?,
            other => write!(out, "{other}")?,
        }
    }
    Ok(())
}

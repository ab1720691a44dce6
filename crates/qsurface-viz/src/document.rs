//! Vector document model and SVG serialization
//!
//! The renderer builds a `Document` first and serializes it second, so the
//! diagram can be inspected in tests without parsing SVG text.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Group ids in paint order (first is drawn beneath the rest)
pub const CONNECTIONS_GROUP: &str = "connections";
pub const ANCILLA_GROUP: &str = "ancilla-qubits";
pub const DATA_GROUP: &str = "data-qubits";

/// Drawing primitive with explicit paint attributes
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        stroke_width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        stroke: String,
        stroke_width: f64,
    },
    /// Text centered on `(x, y)` both horizontally and vertically
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        fill: String,
        bold: bool,
    },
}

impl Shape {
    pub fn is_line(&self) -> bool {
        matches!(self, Shape::Line { .. })
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle { .. })
    }

    /// Label content for text shapes
    pub fn text(&self) -> Option<&str> {
        match self {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    fn write_svg(&self, out: &mut String) {
        match self {
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                stroke_width,
            } => {
                out.push_str(&format!(
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />\n",
                    x1,
                    y1,
                    x2,
                    y2,
                    escape(stroke),
                    stroke_width
                ));
            }
            Shape::Circle {
                cx,
                cy,
                r,
                fill,
                stroke,
                stroke_width,
            } => {
                out.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />\n",
                    cx,
                    cy,
                    r,
                    escape(fill),
                    escape(stroke),
                    stroke_width
                ));
            }
            Shape::Text {
                text,
                x,
                y,
                font_size,
                fill,
                bold,
            } => {
                let weight = if *bold { " font-weight=\"bold\"" } else { "" };
                out.push_str(&format!(
                    "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\"{} text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
                    x,
                    y,
                    font_size,
                    escape(fill),
                    weight,
                    escape(text)
                ));
            }
        }
    }
}

/// Named flat list of shapes
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub shapes: Vec<Shape>,
}

impl Group {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn lines(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_line())
    }

    pub fn circles(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_circle())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| s.text())
    }
}

/// Canvas with layered groups, painted in order
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f64,
    pub height: f64,
    pub groups: Vec<Group>,
}

impl Document {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            groups: Vec::new(),
        }
    }

    pub fn push_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        ));
        for group in &self.groups {
            out.push_str(&format!("<g id=\"{}\">\n", escape(&group.id)));
            for shape in &group.shapes {
                shape.write_svg(&mut out);
            }
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_svg())
            .with_context(|| format!("Failed to write SVG: {}", path.display()))?;
        Ok(())
    }
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

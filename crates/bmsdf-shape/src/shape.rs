//! Shape description builder
//!
//! Splits outline commands into contours and renders them in the shape
//! grammar understood by msdfgen's `-defineshape`:
//!
//! ```text
//! {x, y; (cx, cy); x, y; (c1x, c1y; c2x, c2y); x, y}{...}
//! ```
//!
//! The closing command of a contour never produces a coordinate. Repeating
//! the start point at the end of a contour makes the renderer's parser
//! reject the shape.

use std::fmt::Write;

use crate::OutlineCommand;
use crate::round_to;

/// A point in pixel space (y down, baseline at 0)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One entry of a contour: an end point plus its control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Point),
    Quad { control: Point, to: Point },
    Cubic { c1: Point, c2: Point, to: Point },
}

impl Segment {
    /// End point of the segment
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line(p) => p,
            Segment::Quad { to, .. } => to,
            Segment::Cubic { to, .. } => to,
        }
    }

    fn write_to(&self, out: &mut String) {
        match *self {
            Segment::Line(p) => {
                let _ = write!(out, "{}, {}", coord(p.x), coord(p.y));
            }
            Segment::Quad { control, to } => {
                let _ = write!(
                    out,
                    "({}, {}); {}, {}",
                    coord(control.x),
                    coord(control.y),
                    coord(to.x),
                    coord(to.y)
                );
            }
            Segment::Cubic { c1, c2, to } => {
                let _ = write!(
                    out,
                    "({}, {}; {}, {}); {}, {}",
                    coord(c1.x),
                    coord(c1.y),
                    coord(c2.x),
                    coord(c2.y),
                    coord(to.x),
                    coord(to.y)
                );
            }
        }
    }
}

/// Ordered segment list of one closed or open path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub segments: Vec<Segment>,
    /// Whether the source outline closed this contour
    pub closed: bool,
}

impl Contour {
    /// A contour that is only its starting point
    pub fn is_degenerate(&self) -> bool {
        self.segments.len() == 1
    }

    fn write_to(&self, out: &mut String) {
        out.push('{');
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            segment.write_to(out);
        }
        out.push('}');
    }
}

/// Axis aligned box over segment end points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl BoundingBox {
    /// Box around a single point
    pub fn at(p: Point) -> Self {
        Self {
            left: p.x,
            bottom: p.y,
            right: p.x,
            top: p.y,
        }
    }

    /// Grow the box to include a point
    pub fn include(&mut self, p: Point) {
        self.left = self.left.min(p.x);
        self.bottom = self.bottom.min(p.y);
        self.right = self.right.max(p.x);
        self.top = self.top.max(p.y);
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Output of the builder for one glyph
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescription {
    pub contours: Vec<Contour>,
    /// Text handed to the renderer
    pub description: String,
    pub bbox: BoundingBox,
}

impl ShapeDescription {
    /// True when the glyph has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

/// Converts font-unit outline commands into pixel-space shape descriptions
#[derive(Debug, Clone, Copy)]
pub struct ShapeBuilder {
    /// Font units to pixels (font size / units per em)
    scale: f32,
    round_decimal: Option<u32>,
}

impl ShapeBuilder {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            round_decimal: None,
        }
    }

    /// Round every emitted coordinate to a number of decimals
    pub fn with_round_decimal(mut self, decimals: Option<u32>) -> Self {
        self.round_decimal = decimals;
        self
    }

    fn point(&self, x: f32, y: f32) -> Point {
        // Flip Y axis
        let (x, y) = (x * self.scale, -y * self.scale);
        match self.round_decimal {
            Some(d) => Point::new(round_to(x, d), round_to(y, d)),
            None => Point::new(x, y),
        }
    }

    /// Split commands into contours. A move flushes the current contour.
    pub fn contours(&self, commands: &[OutlineCommand]) -> Vec<Contour> {
        let mut contours = Vec::new();
        let mut current = Contour::default();

        for command in commands {
            match *command {
                OutlineCommand::MoveTo(x, y) => {
                    if !current.segments.is_empty() {
                        contours.push(std::mem::take(&mut current));
                    }
                    current.segments.push(Segment::Line(self.point(x, y)));
                }
                OutlineCommand::LineTo(x, y) => {
                    current.segments.push(Segment::Line(self.point(x, y)));
                }
                OutlineCommand::QuadTo(x1, y1, x, y) => {
                    current.segments.push(Segment::Quad {
                        control: self.point(x1, y1),
                        to: self.point(x, y),
                    });
                }
                OutlineCommand::CurveTo(x1, y1, x2, y2, x, y) => {
                    current.segments.push(Segment::Cubic {
                        c1: self.point(x1, y1),
                        c2: self.point(x2, y2),
                        to: self.point(x, y),
                    });
                }
                OutlineCommand::Close => current.closed = true,
            }
        }

        if !current.segments.is_empty() {
            contours.push(current);
        }
        contours
    }

    /// Build the shape description and bounding box for one glyph
    pub fn build(&self, commands: &[OutlineCommand]) -> ShapeDescription {
        let contours = self.contours(commands);

        let mut bbox: Option<BoundingBox> = None;
        for (i, contour) in contours.iter().enumerate() {
            if contour.is_degenerate() {
                tracing::warn!("Contour {} is a single point", i);
            } else if !contour.closed {
                tracing::warn!("Contour {} is open, the renderer will close it", i);
            }
            for segment in &contour.segments {
                let end = segment.end();
                match bbox.as_mut() {
                    Some(b) => b.include(end),
                    None => bbox = Some(BoundingBox::at(end)),
                }
            }
        }

        ShapeDescription {
            description: describe(&contours),
            bbox: bbox.unwrap_or_default(),
            contours,
        }
    }
}

/// Render contours in the renderer's shape grammar. No contours gives `{}`.
pub fn describe(contours: &[Contour]) -> String {
    let mut out = String::new();
    if contours.is_empty() {
        out.push_str("{}");
    }
    for contour in contours {
        contour.write_to(&mut out);
    }
    out
}

fn coord(v: f32) -> f32 {
    // Never print "-0"
    if v == 0.0 { 0.0 } else { v }
}

use crate::render::LineSurface;
use svg::{
    node::{element::Line, Comment},
    Document,
};

/// A [LineSurface] that records lines into an SVG document. Handy for dumping
/// a wireframe to disk and eyeballing what the projector thinks is on screen.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    stroke: String,
    lines: Vec<Line>,
}

impl SvgSurface {
    /// Create a blank surface that covers a `width`x`height` screen
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stroke: "#00ff00".into(),
            lines: Vec::new(),
        }
    }

    /// Set the stroke color for all lines drawn **after** this call. Any
    /// valid SVG color works, e.g. `#ff0000` or `red`.
    pub fn set_stroke(&mut self, stroke: impl Into<String>) {
        self.stroke = stroke.into();
    }

    /// Number of lines drawn so far
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Finish drawing and build the SVG document
    pub fn into_document(self) -> Document {
        let line_count = self.lines.len();
        self.lines.into_iter().fold(
            Document::new()
                .set("viewBox", (0, 0, self.width, self.height))
                .set("shape-rendering", "crispEdges")
                .add(Comment::new(format!("{} lines", line_count))),
            |document, line| document.add(line),
        )
    }
}

impl LineSurface for SvgSurface {
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.lines.push(
            Line::new()
                .set("x1", x1)
                .set("y1", y1)
                .set("x2", x2)
                .set("y2", y2)
                .set("stroke", self.stroke.as_str())
                .set("stroke-width", 1),
        );
    }
}

/// An axis-aligned rectangle in bottom-up (PDF) coordinates.
///
/// `(x, y)` is the lower-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Builds a rectangle from its left, bottom, right and top edges.
    pub fn from_edges(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            x: left,
            y: bottom,
            width: right - left,
            height: top - bottom,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// `[left, bottom, right, top]`, the order PDF annotation rectangles use.
    pub fn edges(&self) -> [f32; 4] {
        [self.x, self.y, self.right(), self.top()]
    }

    pub fn is_finite(&self) -> bool {
        self.edges().iter().all(|v| v.is_finite())
    }
}

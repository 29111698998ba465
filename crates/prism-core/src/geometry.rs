//! Pixel-space coordinates for drawing commands.
//!
//! Coordinates follow SVG: the origin is the top-left corner of the canvas,
//! columns advance along +x and channels (then rows) advance along +y.

/// A position on the canvas.
///
/// # Examples
///
/// ```
/// # use prism_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!((p.x(), p.y()), (10.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }
}

/// Canvas or glyph extent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// Axis-aligned rectangle used for boxed glyphs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates the smallest bounds containing both corner points.
    ///
    /// The corners may be given in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::new_from_corners(Point::new(40.0, 10.0), Point::new(0.0, 30.0));
    /// assert_eq!(bounds.min_x(), 0.0);
    /// assert_eq!(bounds.min_y(), 10.0);
    /// assert_eq!(bounds.width(), 40.0);
    /// assert_eq!(bounds.height(), 20.0);
    /// ```
    pub fn new_from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Pixel position on the drawing surface.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Straight line between two pixel positions, both endpoints inclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    #[inline]
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    #[inline]
    pub const fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }
}

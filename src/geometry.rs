// src/geometry.rs
//
// Host-coordinate primitives.
//
// Units are whatever the host view uses (points on iOS, CSS pixels on web).
// The y axis grows downward, so positive angles turn clockwise on screen.

/// A location in the control's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    /// The point the dial rotates around.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
    }
}

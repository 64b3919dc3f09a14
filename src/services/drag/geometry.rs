// Geometry primitives for the drag engine
// Plain f32 types, independent of any rendering toolkit

use serde::{Deserialize, Serialize};

/// An absolute pointer position in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A positional delta applied to a dragged element
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Transform) -> Transform {
        Transform::new(self.x + other.x, self.y + other.y)
    }
}

/// An axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// The rectangle displaced by a transform
    pub fn translated(&self, transform: Transform) -> Rect {
        Rect::new(self.x + transform.x, self.y + transform.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_edge_inclusive() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(110.0, 60.0)));
        assert!(!rect.contains(Point::new(110.1, 30.0)));
        assert!(!rect.contains(Point::new(50.0, 9.9)));
    }

    #[test]
    fn test_translated() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0).translated(Transform::new(5.0, -2.0));
        assert_eq!(rect, Rect::new(5.0, -2.0, 10.0, 10.0));
    }
}

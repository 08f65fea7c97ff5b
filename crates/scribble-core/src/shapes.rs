//! Shapes committed by the line, rectangle and circle tools.

use kurbo::{BezPath, Circle, Line, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// Flattening tolerance used when converting shapes to paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// A shape drawn from a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Straight segment from start to end.
    Line { start: Point, end: Point },
    /// Rectangle anchored at `origin` spanning `extent`; extents may be negative.
    Rectangle { origin: Point, extent: Vec2 },
    /// Circle around `center`.
    Circle { center: Point, radius: f64 },
}

impl Shape {
    /// Line from the drag start to the release point.
    pub fn line(start: Point, end: Point) -> Self {
        Shape::Line { start, end }
    }

    /// Rectangle using the drag start as origin and `end - start` as extent.
    pub fn rectangle(start: Point, end: Point) -> Self {
        Shape::Rectangle {
            origin: start,
            extent: end - start,
        }
    }

    /// Circle centered at the drag start through the release point.
    pub fn circle(start: Point, end: Point) -> Self {
        Shape::Circle {
            center: start,
            radius: start.distance(end),
        }
    }

    /// Axis-aligned bounds of the shape's geometry (ignoring stroke width).
    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::Line { start, end } => Rect::from_points(start, end),
            Shape::Rectangle { origin, extent } => normalized_rect(origin, extent),
            Shape::Circle { center, radius } => Circle::new(center, radius).bounding_box(),
        }
    }

    /// Outline path to stroke.
    pub fn to_path(&self) -> BezPath {
        match *self {
            Shape::Line { start, end } => Line::new(start, end).to_path(PATH_TOLERANCE),
            Shape::Rectangle { origin, extent } => {
                normalized_rect(origin, extent).to_path(PATH_TOLERANCE)
            }
            Shape::Circle { center, radius } => {
                Circle::new(center, radius).to_path(PATH_TOLERANCE)
            }
        }
    }
}

/// Rectangle covering `origin` to `origin + extent`, flipped so width and
/// height are non-negative.
pub fn normalized_rect(origin: Point, extent: Vec2) -> Rect {
    Rect::from_points(origin, origin + extent).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_from_drag() {
        let shape = Shape::rectangle(Point::new(10.0, 10.0), Point::new(50.0, 40.0));
        let bounds = shape.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 40.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rectangle_negative_extent() {
        let shape = Shape::rectangle(Point::new(10.0, 10.0), Point::new(5.0, 5.0));
        match shape {
            Shape::Rectangle { extent, .. } => {
                assert!((extent.x + 5.0).abs() < f64::EPSILON);
                assert!((extent.y + 5.0).abs() < f64::EPSILON);
            }
            _ => panic!("expected rectangle"),
        }
        let bounds = shape.bounds();
        assert!((bounds.x0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_radius_is_drag_distance() {
        let shape = Shape::circle(Point::new(100.0, 100.0), Point::new(100.0, 150.0));
        assert_eq!(
            shape,
            Shape::Circle {
                center: Point::new(100.0, 100.0),
                radius: 50.0
            }
        );

        let diagonal = Shape::circle(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        let Shape::Circle { radius, .. } = diagonal else {
            panic!("expected circle");
        };
        assert!((radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_path_endpoints() {
        let path = Shape::line(Point::new(1.0, 2.0), Point::new(3.0, 4.0)).to_path();
        let bounds = path.bounding_box();
        assert!((bounds.x0 - 1.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 4.0).abs() < f64::EPSILON);
    }
}

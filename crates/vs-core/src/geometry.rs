//! Per-kind geometry and the positional capability shared by all shapes.
//!
//! Every shape kind knows how to report and restore its positional
//! attributes, how to follow a drag, and its bounding box. The controller
//! and the history manager only ever talk to shapes through [`Geometry`],
//! so neither branches on the shape kind.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// The positional attributes of a shape, as captured before and after a drag.
///
/// The variant depends on the shape kind: rectangles and squares are placed
/// by their origin, ellipses and circles by their center, lines by both
/// endpoints. Paths have no positional set and are not draggable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Positions {
    Origin { x: f64, y: f64 },
    Center { cx: f64, cy: f64 },
    Endpoints { x1: f64, y1: f64, x2: f64, y2: f64 },
    Fixed,
}

/// Positional capability implemented by every shape kind.
pub trait Geometry {
    /// Current positional attributes.
    fn positions(&self) -> Positions;

    /// Restore positional attributes. A mismatched variant is ignored.
    fn set_positions(&mut self, positions: &Positions);

    /// The point a drag tracks from: origin, center, or first endpoint.
    /// The first drag move brings it onto the pointer.
    fn anchor(&self) -> Point;

    /// Follow the pointer from `last` to `pointer` during a drag.
    fn drag(&mut self, last: Point, pointer: Point);

    /// Geometric bounding box (stroke not included).
    fn bounding_box(&self) -> Rect;
}

// ─── Line ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

impl Geometry for Line {
    fn positions(&self) -> Positions {
        Positions::Endpoints {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
        }
    }

    fn set_positions(&mut self, positions: &Positions) {
        if let Positions::Endpoints { x1, y1, x2, y2 } = *positions {
            self.x1 = x1;
            self.y1 = y1;
            self.x2 = x2;
            self.y2 = y2;
        }
    }

    fn anchor(&self) -> Point {
        self.start()
    }

    /// Translate both endpoints by the pointer delta, keeping length and
    /// orientation.
    fn drag(&mut self, last: Point, pointer: Point) {
        let Vec2 { x: dx, y: dy } = pointer - last;
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }

    fn bounding_box(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }
}

// ─── Rectangle (rect and square) ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry for Rectangle {
    fn positions(&self) -> Positions {
        Positions::Origin {
            x: self.x,
            y: self.y,
        }
    }

    fn set_positions(&mut self, positions: &Positions) {
        if let Positions::Origin { x, y } = *positions {
            self.x = x;
            self.y = y;
        }
    }

    fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn drag(&mut self, _last: Point, pointer: Point) {
        self.x = pointer.x;
        self.y = pointer.y;
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

// ─── Ellipse ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl Geometry for Ellipse {
    fn positions(&self) -> Positions {
        Positions::Center {
            cx: self.cx,
            cy: self.cy,
        }
    }

    fn set_positions(&mut self, positions: &Positions) {
        if let Positions::Center { cx, cy } = *positions {
            self.cx = cx;
            self.cy = cy;
        }
    }

    fn anchor(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    fn drag(&mut self, _last: Point, pointer: Point) {
        self.cx = pointer.x;
        self.cy = pointer.y;
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(
            self.cx - self.rx,
            self.cy - self.ry,
            self.cx + self.rx,
            self.cy + self.ry,
        )
    }
}

// ─── Circle ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Geometry for Circle {
    fn positions(&self) -> Positions {
        Positions::Center {
            cx: self.cx,
            cy: self.cy,
        }
    }

    fn set_positions(&mut self, positions: &Positions) {
        if let Positions::Center { cx, cy } = *positions {
            self.cx = cx;
            self.cy = cy;
        }
    }

    fn anchor(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    fn drag(&mut self, _last: Point, pointer: Point) {
        self.cx = pointer.x;
        self.cy = pointer.y;
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(
            self.cx - self.r,
            self.cy - self.r,
            self.cx + self.r,
            self.cy + self.r,
        )
    }
}

// ─── Polyline (freehand path) ────────────────────────────────────────────

/// Freehand stroke: points joined by straight segments, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn starting_at(point: Point) -> Self {
        Self {
            points: vec![point],
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

impl Geometry for Polyline {
    fn positions(&self) -> Positions {
        Positions::Fixed
    }

    fn set_positions(&mut self, _positions: &Positions) {}

    fn anchor(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    fn drag(&mut self, _last: Point, _pointer: Point) {}

    fn bounding_box(&self) -> Rect {
        let mut points = self.points.iter();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(*first, *first), |acc, p| {
            acc.union_pt(*p)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_drag_preserves_length_and_orientation() {
        let mut line = Line {
            x1: 10.0,
            y1: 10.0,
            x2: 110.0,
            y2: 10.0,
        };
        line.drag(Point::new(50.0, 10.0), Point::new(60.0, 30.0));
        assert_eq!(
            line.positions(),
            Positions::Endpoints {
                x1: 20.0,
                y1: 30.0,
                x2: 120.0,
                y2: 30.0
            }
        );
    }

    #[test]
    fn line_first_move_lands_start_on_pointer() {
        let mut line = Line {
            x1: 100.0,
            y1: 100.0,
            x2: 200.0,
            y2: 100.0,
        };
        let start = line.anchor();
        line.drag(start, Point::new(300.0, 300.0));
        line.drag(Point::new(300.0, 300.0), Point::new(310.0, 290.0));
        assert_eq!(
            line.positions(),
            Positions::Endpoints {
                x1: 310.0,
                y1: 290.0,
                x2: 410.0,
                y2: 290.0
            }
        );
    }

    #[test]
    fn rect_drag_sets_origin_to_pointer() {
        let mut rect = Rectangle {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 50.0,
        };
        rect.drag(Point::new(15.0, 15.0), Point::new(50.0, 70.0));
        assert_eq!(rect.positions(), Positions::Origin { x: 50.0, y: 70.0 });
        assert_eq!(rect.width, 100.0);
    }

    #[test]
    fn mismatched_positions_are_ignored() {
        let mut circle = Circle {
            cx: 5.0,
            cy: 5.0,
            r: 2.0,
        };
        circle.set_positions(&Positions::Origin { x: 1.0, y: 1.0 });
        assert_eq!(circle.positions(), Positions::Center { cx: 5.0, cy: 5.0 });
    }

    #[test]
    fn polyline_bbox_and_fixed_position() {
        let mut path = Polyline::starting_at(Point::new(10.0, 20.0));
        path.push(Point::new(30.0, 5.0));
        path.push(Point::new(0.0, 12.0));
        assert_eq!(path.bounding_box(), Rect::new(0.0, 5.0, 30.0, 20.0));

        path.drag(Point::ZERO, Point::new(100.0, 100.0));
        assert_eq!(path.points[0], Point::new(10.0, 20.0));
        assert_eq!(path.positions(), Positions::Fixed);
    }

    #[test]
    fn ellipse_bbox() {
        let e = Ellipse {
            cx: 100.0,
            cy: 100.0,
            rx: 50.0,
            ry: 30.0,
        };
        assert_eq!(e.bounding_box(), Rect::new(50.0, 70.0, 150.0, 130.0));
    }
}

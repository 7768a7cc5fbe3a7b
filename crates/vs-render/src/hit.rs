//! Hit testing: point → node lookup.
//!
//! Reverse-walks the paint order (front-to-back) to find which shape is
//! under a given drawing-space position.

use kurbo::{Line, ParamCurveNearest, Point};
use vs_core::NodeId;
use vs_core::model::*;

/// Thin shapes (lines, paths) are hit within at least this distance, so a
/// 1px stroke is still clickable.
const MIN_PICK_DISTANCE: f64 = 3.0;

/// Find the topmost shape at `point`.
/// Returns `None` if no shape is hit (background).
pub fn hit_test(graph: &SceneGraph, point: Point) -> Option<NodeId> {
    graph
        .nodes()
        .rev()
        .find(|node| node_contains(node, point))
        .map(|node| node.id)
}

fn node_contains(node: &SceneNode, p: Point) -> bool {
    let half = node.style.stroke_width.unwrap_or(1.0) / 2.0;
    let reach = half.max(MIN_PICK_DISTANCE);
    // An unfilled closed shape is only picked on its stroke.
    let hollow = node.style.fill == Some(Paint::None);

    match &node.kind {
        NodeKind::Root => false,
        NodeKind::Rect(r) | NodeKind::Square(r) => {
            let rect = kurbo::Rect::new(r.x, r.y, r.x + r.width, r.y + r.height);
            if hollow {
                rect.inflate(reach, reach).contains(p) && !rect.inflate(-reach, -reach).contains(p)
            } else {
                rect.inflate(half, half).contains(p)
            }
        }
        NodeKind::Ellipse(e) => {
            if hollow {
                in_ellipse(e, p, reach) && !in_ellipse(e, p, -reach)
            } else {
                in_ellipse(e, p, half)
            }
        }
        NodeKind::Circle(c) => {
            let d = Point::new(c.cx, c.cy).distance(p);
            if hollow {
                (d - c.r).abs() <= reach
            } else {
                d <= c.r + half
            }
        }
        NodeKind::Line(l) => segment_distance(l.start(), l.end(), p) <= reach,
        NodeKind::Path(path) => match path.points.as_slice() {
            [] => false,
            [only] => only.distance(p) <= reach,
            points => points
                .windows(2)
                .any(|w| segment_distance(w[0], w[1], p) <= reach),
        },
    }
}

/// Whether `p` lies inside `e` with both radii grown by `grow`.
fn in_ellipse(e: &vs_core::geometry::Ellipse, p: Point, grow: f64) -> bool {
    let rx = e.rx + grow;
    let ry = e.ry + grow;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let dx = (p.x - e.cx) / rx;
    let dy = (p.y - e.cy) / ry;
    dx * dx + dy * dy <= 1.0
}

fn segment_distance(a: Point, b: Point, p: Point) -> f64 {
    if a == b {
        return a.distance(p);
    }
    Line::new(a, b).nearest(p, 1e-9).distance_sq.sqrt()
}

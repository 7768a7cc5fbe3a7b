//! Tool state and shape placement.
//!
//! Exactly one mode is active at a time: nothing (select/drag/delete),
//! one of the placement tools, or freehand drawing.

use crate::config::PlacementDefaults;
use crate::style::StyleInputs;
use kurbo::Point;
use vs_core::geometry::{Circle, Ellipse, Line, Rectangle};
use vs_core::model::{NodeKind, SceneNode};

/// Shapes placed by a single click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Rect,
    Square,
    Ellipse,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Line,
        ShapeKind::Rect,
        ShapeKind::Square,
        ShapeKind::Ellipse,
        ShapeKind::Circle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rect => "rect",
            ShapeKind::Square => "square",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Circle => "circle",
        }
    }

    /// Build a new node anchored at `at` with default geometry and the
    /// current input style. Lines start at `at`, rectangles and squares
    /// have their origin there, ellipses and circles their center.
    pub fn instantiate(
        self,
        at: Point,
        placement: &PlacementDefaults,
        inputs: &StyleInputs,
    ) -> SceneNode {
        let Point { x, y } = at;
        let kind = match self {
            ShapeKind::Line => NodeKind::Line(Line {
                x1: x,
                y1: y,
                x2: x + placement.line_length,
                y2: y,
            }),
            ShapeKind::Rect => {
                let (width, height) = placement.rect_size;
                NodeKind::Rect(Rectangle {
                    x,
                    y,
                    width,
                    height,
                })
            }
            ShapeKind::Square => NodeKind::Square(Rectangle {
                x,
                y,
                width: placement.square_size,
                height: placement.square_size,
            }),
            ShapeKind::Ellipse => {
                let (rx, ry) = placement.ellipse_radii;
                NodeKind::Ellipse(Ellipse {
                    cx: x,
                    cy: y,
                    rx,
                    ry,
                })
            }
            ShapeKind::Circle => NodeKind::Circle(Circle {
                cx: x,
                cy: y,
                r: placement.circle_radius,
            }),
        };
        SceneNode::fresh(kind).with_style(inputs.to_style())
    }
}

/// The active interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Select, drag and delete existing shapes.
    #[default]
    None,
    /// Each click places a shape of this kind.
    Create(ShapeKind),
    /// Pointer down/move/up draws a path.
    Freehand,
}

impl ToolState {
    /// Parse a toolbar button name. `reset` maps to [`ToolState::None`].
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(kind) = ShapeKind::ALL.into_iter().find(|k| k.name() == name) {
            return Some(ToolState::Create(kind));
        }
        match name {
            "path" | "freehand" => Some(ToolState::Freehand),
            "reset" | "none" | "select" => Some(ToolState::None),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolState::None => "none",
            ToolState::Create(kind) => kind.name(),
            ToolState::Freehand => "path",
        }
    }

    pub fn is_none(self) -> bool {
        self == ToolState::None
    }
}

/// Pointer cursor shown over the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
        }
    }
}

//! Core scene-graph data model for VS drawings.
//!
//! A drawing is a flat, ordered collection of shape nodes hanging off a
//! single root. Paint order is insertion order: the last appended node is
//! front-most. There is no reordering API.

use crate::geometry::{Circle, Ellipse, Geometry, Line, Polyline, Positions, Rectangle};
use crate::id::NodeId;
use kurbo::{Point, Rect};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ─── Colors & Paint ──────────────────────────────────────────────────────

/// RGBA color with integer channels, so a value written and read back
/// compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, or `black`/`white`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            other => Self::from_hex(other.strip_prefix('#')?),
        }
    }

    /// Parse hex digits (no leading `#`).
    fn from_hex(hex: &str) -> Option<Self> {
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when translucent.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fill or stroke paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paint {
    None,
    Solid(Color),
}

impl Paint {
    /// Parse an attribute value: `none` or a color.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "none" => Some(Paint::None),
            other => Color::parse(other).map(Paint::Solid),
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Paint::None => None,
            Paint::Solid(c) => Some(*c),
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::None => f.write_str("none"),
            Paint::Solid(c) => write!(f, "{c}"),
        }
    }
}

// ─── Styling ─────────────────────────────────────────────────────────────

/// One editable style attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleAttr {
    Stroke,
    StrokeWidth,
    Fill,
}

impl StyleAttr {
    pub const ALL: [StyleAttr; 3] = [StyleAttr::Stroke, StyleAttr::StrokeWidth, StyleAttr::Fill];

    /// The markup attribute name.
    pub fn name(self) -> &'static str {
        match self {
            StyleAttr::Stroke => "stroke",
            StyleAttr::StrokeWidth => "stroke-width",
            StyleAttr::Fill => "fill",
        }
    }

    /// Accepts markup names and the camelCase names used by the input fields.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stroke" | "strokeColor" => Some(StyleAttr::Stroke),
            "stroke-width" | "strokeWidth" => Some(StyleAttr::StrokeWidth),
            "fill" | "fillColor" => Some(StyleAttr::Fill),
            _ => None,
        }
    }

    /// Whether `value` has the right type for this attribute.
    pub fn accepts(self, value: StyleValue) -> bool {
        matches!(
            (self, value),
            (StyleAttr::StrokeWidth, StyleValue::Width(_))
                | (StyleAttr::Stroke | StyleAttr::Fill, StyleValue::Paint(_))
        )
    }

    /// Parse a raw value for this attribute.
    pub fn parse_value(self, raw: &str) -> Option<StyleValue> {
        match self {
            StyleAttr::Stroke | StyleAttr::Fill => Paint::parse(raw).map(StyleValue::Paint),
            StyleAttr::StrokeWidth => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w >= 0.0)
                .map(StyleValue::Width),
        }
    }
}

/// The value of a single style attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    Paint(Paint),
    Width(f64),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Paint(p) => write!(f, "{p}"),
            StyleValue::Width(w) => write!(f, "{w}"),
        }
    }
}

/// Style attributes carried by every node. Attributes are absent only on
/// nodes restored from markup that omitted them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<Paint>,
    pub stroke_width: Option<f64>,
    pub fill: Option<Paint>,
}

impl Style {
    pub fn get(&self, attr: StyleAttr) -> Option<StyleValue> {
        match attr {
            StyleAttr::Stroke => self.stroke.map(StyleValue::Paint),
            StyleAttr::StrokeWidth => self.stroke_width.map(StyleValue::Width),
            StyleAttr::Fill => self.fill.map(StyleValue::Paint),
        }
    }

    /// Set an attribute. A value of the wrong type for `attr` is ignored.
    pub fn set(&mut self, attr: StyleAttr, value: StyleValue) {
        match (attr, value) {
            (StyleAttr::Stroke, StyleValue::Paint(p)) => self.stroke = Some(p),
            (StyleAttr::Fill, StyleValue::Paint(p)) => self.fill = Some(p),
            (StyleAttr::StrokeWidth, StyleValue::Width(w)) => self.stroke_width = Some(w),
            (attr, value) => {
                log::warn!("ignoring {value:?} for style attribute {}", attr.name());
            }
        }
    }

    /// Drop an attribute so the node falls back to the markup default.
    pub fn unset(&mut self, attr: StyleAttr) {
        match attr {
            StyleAttr::Stroke => self.stroke = None,
            StyleAttr::StrokeWidth => self.stroke_width = None,
            StyleAttr::Fill => self.fill = None,
        }
    }
}

// ─── Viewport ────────────────────────────────────────────────────────────

/// Drawing surface dimensions, used for export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The kind of a scene node together with its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The implicit root; never painted, never selectable.
    Root,
    Line(Line),
    Rect(Rectangle),
    /// A rectangle placed with equal sides; geometry is a plain rectangle.
    Square(Rectangle),
    Ellipse(Ellipse),
    Circle(Circle),
    Path(Polyline),
}

impl NodeKind {
    /// Short lowercase name, also used as the ID prefix.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Line(_) => "line",
            NodeKind::Rect(_) => "rect",
            NodeKind::Square(_) => "square",
            NodeKind::Ellipse(_) => "ellipse",
            NodeKind::Circle(_) => "circle",
            NodeKind::Path(_) => "path",
        }
    }

    fn geometry(&self) -> Option<&dyn Geometry> {
        match self {
            NodeKind::Root => None,
            NodeKind::Line(g) => Some(g),
            NodeKind::Rect(g) | NodeKind::Square(g) => Some(g),
            NodeKind::Ellipse(g) => Some(g),
            NodeKind::Circle(g) => Some(g),
            NodeKind::Path(g) => Some(g),
        }
    }

    fn geometry_mut(&mut self) -> Option<&mut dyn Geometry> {
        match self {
            NodeKind::Root => None,
            NodeKind::Line(g) => Some(g),
            NodeKind::Rect(g) | NodeKind::Square(g) => Some(g),
            NodeKind::Ellipse(g) => Some(g),
            NodeKind::Circle(g) => Some(g),
            NodeKind::Path(g) => Some(g),
        }
    }
}

impl Geometry for NodeKind {
    fn positions(&self) -> Positions {
        self.geometry().map_or(Positions::Fixed, |g| g.positions())
    }

    fn set_positions(&mut self, positions: &Positions) {
        if let Some(g) = self.geometry_mut() {
            g.set_positions(positions);
        }
    }

    fn anchor(&self) -> Point {
        self.geometry().map_or(Point::ZERO, |g| g.anchor())
    }

    fn drag(&mut self, last: Point, pointer: Point) {
        if let Some(g) = self.geometry_mut() {
            g.drag(last, pointer);
        }
    }

    fn bounding_box(&self) -> Rect {
        self.geometry().map_or(Rect::ZERO, |g| g.bounding_box())
    }
}

/// A single drawable node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub style: Style,
}

impl SceneNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            style: Style::default(),
        }
    }

    /// Create a node with a fresh ID derived from its kind.
    pub fn fresh(kind: NodeKind) -> Self {
        let id = NodeId::generate(kind.name());
        Self::new(id, kind)
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

// ─── Scene Graph ─────────────────────────────────────────────────────────

/// The drawing: shape nodes under a single root, in paint order.
///
/// This is the only owner of nodes. Everything else holds `NodeId`s and
/// goes through `append`/`remove` for structural changes.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// The underlying directed graph (root → child edges).
    pub graph: StableDiGraph<SceneNode, ()>,

    /// The root node index.
    pub root: NodeIndex,

    /// Index from NodeId → NodeIndex for fast lookup.
    pub id_index: HashMap<NodeId, NodeIndex>,

    /// Children of the root in paint order (back to front).
    /// `StableDiGraph` reuses vacated indices, so index order is not
    /// insertion order.
    order: Vec<NodeIndex>,
}

impl SceneGraph {
    /// Create a new empty scene graph with a root node.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = NodeId::intern("root");
        let root = graph.add_node(SceneNode::new(root_id, NodeKind::Root));

        let mut id_index = HashMap::new();
        id_index.insert(root_id, root);

        Self {
            graph,
            root,
            id_index,
            order: Vec::new(),
        }
    }

    /// Append a node as the front-most child. Returns the new node's index.
    pub fn append(&mut self, node: SceneNode) -> NodeIndex {
        let id = node.id;
        if let Some(stale) = self.index_of(id) {
            log::warn!("replacing existing node {id}");
            self.remove_index(stale);
        }
        let idx = self.graph.add_node(node);
        self.graph.add_edge(self.root, idx, ());
        self.id_index.insert(id, idx);
        self.order.push(idx);
        idx
    }

    /// Detach a node, returning it with all of its attributes intact.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let idx = self.index_of(id)?;
        if idx == self.root {
            return None;
        }
        self.remove_index(idx)
    }

    fn remove_index(&mut self, idx: NodeIndex) -> Option<SceneNode> {
        let removed = self.graph.remove_node(idx)?;
        self.id_index.remove(&removed.id);
        self.order.retain(|i| *i != idx);
        Some(removed)
    }

    /// Look up a shape node by ID. The root is not returned.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.index_of(id).map(|idx| &mut self.graph[idx])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Get the index for a shape node's ID.
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index
            .get(&id)
            .copied()
            .filter(|idx| *idx != self.root)
    }

    /// Shape nodes in paint order (back to front).
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &SceneNode> + '_ {
        self.order.iter().map(|idx| &self.graph[*idx])
    }

    /// Shape node IDs in paint order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes().map(|n| n.id).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

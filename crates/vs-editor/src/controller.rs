//! Interaction controller.
//!
//! Owns the drawing and all interaction state: active tool, selection,
//! in-progress drag or freehand stroke, and the style input fields. Input
//! is turned into scene mutations here, and every committed mutation is
//! recorded in [`History`] so it can be undone.
//!
//! Ordering rule for every mutation: old values are captured before the
//! live node changes, and the record is pushed after.

use crate::config::EditorConfig;
use crate::history::{History, HistoryRecord, Undone};
use crate::input::InputEvent;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::style::StyleInputs;
use crate::tools::{Cursor, ToolState};
use kurbo::{Point, Rect};
use vs_core::geometry::{Geometry, Polyline, Positions};
use vs_core::model::{NodeKind, Paint, SceneGraph, SceneNode, Style, StyleAttr, StyleValue};
use vs_core::NodeId;

/// An in-progress drag of the selected node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub id: NodeId,
    /// Tracked point at the previous move. Starts at the node's anchor.
    pub last: Point,
    /// Positions before the drag started.
    pub old: Positions,
}

pub struct Controller {
    graph: SceneGraph,
    history: History,
    tool: ToolState,
    selected: Option<NodeId>,
    /// Dashed box around the selection, in drawing coordinates.
    decoration: Option<Rect>,
    drag: Option<Drag>,
    drawing_path: Option<NodeId>,
    inputs: StyleInputs,
    /// Selected node's style as of the last commit. Absent attributes stay
    /// absent here so undo can remove them again.
    committed: Style,
    cursor: Cursor,
    config: EditorConfig,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Controller {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            graph: SceneGraph::new(),
            history: History::new(),
            tool: ToolState::None,
            selected: None,
            decoration: None,
            drag: None,
            drawing_path: None,
            inputs: StyleInputs::default(),
            committed: Style::default(),
            cursor: Cursor::Default,
            config,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tool(&self) -> ToolState {
        self.tool
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn decoration(&self) -> Option<Rect> {
        self.decoration
    }

    pub fn inputs(&self) -> &StyleInputs {
        &self.inputs
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drawing_path(&self) -> Option<NodeId> {
        self.drawing_path
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Switch to a placement or freehand tool. Clears the selection and
    /// resets the style inputs. `ToolState::None` is the same as
    /// [`Controller::deactivate_tool`].
    pub fn activate_tool(&mut self, tool: ToolState) {
        if tool.is_none() {
            self.deactivate_tool();
            return;
        }
        self.leave_mode();
        self.tool = tool;
        self.cursor = Cursor::Crosshair;
        log::debug!("tool: {}", tool.name());
    }

    pub fn deactivate_tool(&mut self) {
        self.leave_mode();
        self.tool = ToolState::None;
        self.cursor = Cursor::Default;
        log::debug!("tool: none");
    }

    fn leave_mode(&mut self) {
        self.end_drag();
        self.end_freehand_path();
        self.deselect();
        self.inputs = StyleInputs::default();
        self.committed = Style::default();
    }

    // ─── Clicks & selection ──────────────────────────────────────────────

    /// Primary click at `point` over `target` (the topmost shape there, if any).
    ///
    /// With a placement tool this always places a new shape, even over an
    /// existing one. Returns whether anything changed.
    pub fn handle_primary_click(&mut self, point: Point, target: Option<NodeId>) -> bool {
        match self.tool {
            ToolState::Create(kind) => {
                let node = kind.instantiate(point, &self.config.placement, &self.inputs);
                let id = node.id;
                self.graph.append(node);
                self.history.push(HistoryRecord::Add { id });
                self.deselect();
                true
            }
            ToolState::None => match target {
                Some(id) => self.select_node(id),
                None => self.deselect(),
            },
            ToolState::Freehand => false,
        }
    }

    /// Make `id` the single selected node. Only allowed with no tool active.
    pub fn select_node(&mut self, id: NodeId) -> bool {
        if !self.tool.is_none() {
            return false;
        }
        let Some(node) = self.graph.get(id) else {
            return false;
        };
        self.inputs = StyleInputs::from_style(&node.style);
        self.committed = node.style.clone();
        self.selected = Some(id);
        self.refresh_decoration();
        log::debug!("selected {id}");
        true
    }

    /// Clear the selection. Returns whether something was selected.
    pub fn deselect(&mut self) -> bool {
        self.decoration = None;
        match self.selected.take() {
            Some(id) => {
                log::debug!("deselected {id}");
                true
            }
            None => false,
        }
    }

    fn refresh_decoration(&mut self) {
        let margin = self.config.selection_margin;
        self.decoration = self
            .selected
            .and_then(|id| self.graph.get(id))
            .map(|node| node.kind.bounding_box().inflate(margin, margin));
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    /// Start dragging the selected node. Tracking starts from the node's
    /// anchor, not from `point`, so the first move snaps the anchor onto the
    /// pointer. Paths cannot be dragged.
    pub fn begin_drag(&mut self, id: NodeId, point: Point) -> bool {
        if !self.tool.is_none() || self.selected != Some(id) {
            return false;
        }
        let Some(node) = self.graph.get(id) else {
            return false;
        };
        let old = node.kind.positions();
        if old == Positions::Fixed {
            return false;
        }
        self.drag = Some(Drag {
            id,
            last: node.kind.anchor(),
            old,
        });
        log::debug!("drag start {id} at ({}, {})", point.x, point.y);
        true
    }

    /// Follow the pointer. Applies live; nothing is recorded until `end_drag`.
    pub fn drag_to(&mut self, point: Point) -> bool {
        let Some(Drag { id, last, .. }) = self.drag else {
            return false;
        };
        let Some(node) = self.graph.get_mut(id) else {
            self.drag = None;
            return false;
        };
        node.kind.drag(last, point);
        if let Some(drag) = self.drag.as_mut() {
            drag.last = point;
        }
        log::trace!("drag {id} to ({}, {})", point.x, point.y);
        self.refresh_decoration();
        true
    }

    /// Finish the drag. Records a move only if the positions changed.
    /// The drag state is always released.
    pub fn end_drag(&mut self) -> bool {
        let Some(Drag { id, old, .. }) = self.drag.take() else {
            return false;
        };
        let Some(node) = self.graph.get(id) else {
            return false;
        };
        let new = node.kind.positions();
        if new == old {
            return false;
        }
        self.history.push(HistoryRecord::Move { id, old, new });
        true
    }

    // ─── Delete ──────────────────────────────────────────────────────────

    /// Remove a node, recording it whole so undo can put it back. Returns
    /// whether a node was removed (and the context menu should be suppressed).
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.graph.remove(id) else {
            return false;
        };
        if self.drag.is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        if self.drawing_path == Some(id) {
            self.drawing_path = None;
        }
        self.history.push(HistoryRecord::Delete { node });
        if self.selected == Some(id) {
            self.deselect();
        }
        true
    }

    // ─── Freehand ────────────────────────────────────────────────────────

    /// Start a new path at `point`. The whole stroke is a single history entry.
    pub fn begin_freehand_path(&mut self, point: Point) -> bool {
        if self.tool != ToolState::Freehand {
            return false;
        }
        self.end_freehand_path();
        let style = Style {
            stroke: Some(self.inputs.stroke),
            stroke_width: Some(self.inputs.stroke_width),
            fill: Some(Paint::None),
        };
        let node = SceneNode::fresh(NodeKind::Path(Polyline::starting_at(point))).with_style(style);
        let id = node.id;
        self.graph.append(node);
        self.history.push(HistoryRecord::Add { id });
        self.drawing_path = Some(id);
        true
    }

    pub fn extend_freehand_path(&mut self, point: Point) -> bool {
        let Some(id) = self.drawing_path else {
            return false;
        };
        match self.graph.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Path(path)) => {
                path.push(point);
                log::trace!("path {id}: {} points", path.points.len());
                true
            }
            _ => {
                self.drawing_path = None;
                false
            }
        }
    }

    pub fn end_freehand_path(&mut self) -> bool {
        self.drawing_path.take().is_some()
    }

    // ─── Style ───────────────────────────────────────────────────────────

    /// Live preview of an input field. Updates the selected node without
    /// recording anything.
    pub fn apply_style_input(&mut self, attr: StyleAttr, value: StyleValue) -> bool {
        if !attr.accepts(value) {
            log::warn!("ignoring {value:?} for {}", attr.name());
            return false;
        }
        self.inputs.set(attr, value);
        let Some(node) = self.selected.and_then(|id| self.graph.get_mut(id)) else {
            return false;
        };
        node.style.set(attr, value);
        self.refresh_decoration();
        true
    }

    /// Confirmed input field value. Records a style change on the selected
    /// node unless the value equals the last committed one.
    pub fn commit_style_input(&mut self, attr: StyleAttr, value: StyleValue) -> bool {
        if !attr.accepts(value) {
            log::warn!("ignoring {value:?} for {}", attr.name());
            return false;
        }
        self.inputs.set(attr, value);
        let Some(id) = self.selected else {
            return false;
        };
        let Some(node) = self.graph.get_mut(id) else {
            return false;
        };
        node.style.set(attr, value);
        self.refresh_decoration();

        let old = self.committed.get(attr);
        if old == Some(value) {
            return false;
        }
        self.history.push(HistoryRecord::Style { id, attr, old });
        self.committed.set(attr, value);
        true
    }

    // ─── Undo ────────────────────────────────────────────────────────────

    /// Revert the most recent record and bring the selection, inputs and
    /// transient state back in line with the scene.
    pub fn undo(&mut self) -> bool {
        let Some(undone) = self.history.undo(&mut self.graph) else {
            return false;
        };
        match undone {
            Undone::Added { id } => {
                if self.selected == Some(id) {
                    self.deselect();
                }
                if self.drawing_path == Some(id) {
                    self.drawing_path = None;
                }
                if self.drag.is_some_and(|d| d.id == id) {
                    self.drag = None;
                }
            }
            Undone::Deleted { .. } => {}
            Undone::Styled { id, attr, value } => {
                if self.selected == Some(id) {
                    match value {
                        Some(value) => {
                            self.inputs.set(attr, value);
                            self.committed.set(attr, value);
                        }
                        None => {
                            let shown = StyleInputs::selection_fallback().get(attr);
                            self.inputs.set(attr, shown);
                            self.committed.unset(attr);
                        }
                    }
                    self.refresh_decoration();
                }
            }
            Undone::Moved { id } => {
                if self.selected == Some(id) {
                    self.refresh_decoration();
                }
            }
        }
        true
    }

    // ─── Event routing ───────────────────────────────────────────────────

    /// Route a normalized input event. Returns whether the scene or the
    /// selection overlay changed and the surface should repaint.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Click { x, y, target } => {
                self.handle_primary_click(Point::new(x, y), target)
            }
            InputEvent::PointerDown { x, y, target } => {
                let point = Point::new(x, y);
                match self.tool {
                    ToolState::Freehand => self.begin_freehand_path(point),
                    ToolState::None => target.is_some_and(|id| self.begin_drag(id, point)),
                    ToolState::Create(_) => false,
                }
            }
            InputEvent::PointerMove { x, y } => {
                let point = Point::new(x, y);
                if self.drawing_path.is_some() {
                    self.extend_freehand_path(point)
                } else {
                    self.drag_to(point)
                }
            }
            InputEvent::PointerUp { .. } => {
                let active = self.drag.is_some() || self.drawing_path.is_some();
                self.end_drag();
                self.end_freehand_path();
                active
            }
            InputEvent::ContextMenu { target, .. } => {
                target.is_some_and(|id| self.delete_node(id))
            }
            InputEvent::Key { key, modifiers } => match ShortcutMap::resolve(&key, modifiers) {
                Some(ShortcutAction::Undo) => self.undo(),
                Some(ShortcutAction::Reset) => {
                    self.deactivate_tool();
                    true
                }
                Some(ShortcutAction::DeleteSelection) => {
                    self.selected.is_some_and(|id| self.delete_node(id))
                }
                None => false,
            },
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Replace the drawing with a loaded one. History does not survive a
    /// reload; every restored node is selectable right away.
    pub fn restore(&mut self, graph: SceneGraph) {
        log::debug!("restored drawing with {} nodes", graph.len());
        self.graph = graph;
        self.history.clear();
        self.drag = None;
        self.drawing_path = None;
        self.deselect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ShapeKind;
    use pretty_assertions::assert_eq;
    use vs_core::geometry::Rectangle;
    use vs_core::model::Color;

    fn place(ctl: &mut Controller, kind: ShapeKind, x: f64, y: f64) -> NodeId {
        ctl.activate_tool(ToolState::Create(kind));
        assert!(ctl.handle_primary_click(Point::new(x, y), None));
        ctl.deactivate_tool();
        *ctl.graph().ids().last().unwrap()
    }

    fn rect_of(ctl: &Controller, id: NodeId) -> Rectangle {
        match ctl.graph().get(id).unwrap().kind {
            NodeKind::Rect(r) | NodeKind::Square(r) => r,
            ref other => panic!("expected rect, got {other:?}"),
        }
    }

    fn red() -> StyleValue {
        StyleValue::Paint(Paint::Solid(Color::rgb(255, 0, 0)))
    }

    fn black() -> StyleValue {
        StyleValue::Paint(Paint::Solid(Color::BLACK))
    }

    #[test]
    fn activate_tool_sets_crosshair_and_defaults() {
        let mut ctl = Controller::default();
        ctl.activate_tool(ToolState::Create(ShapeKind::Circle));
        assert_eq!(ctl.cursor(), Cursor::Crosshair);
        assert_eq!(*ctl.inputs(), StyleInputs::default());

        ctl.activate_tool(ToolState::None);
        assert_eq!(ctl.tool(), ToolState::None);
        assert_eq!(ctl.cursor(), Cursor::Default);
    }

    #[test]
    fn placement_is_repeatable_and_recorded() {
        let mut ctl = Controller::default();
        ctl.activate_tool(ToolState::Create(ShapeKind::Square));
        ctl.handle_primary_click(Point::new(0.0, 0.0), None);
        ctl.handle_primary_click(Point::new(50.0, 50.0), None);
        assert_eq!(ctl.graph().len(), 2);
        assert_eq!(ctl.history().len(), 2);
        assert_eq!(ctl.tool(), ToolState::Create(ShapeKind::Square));
    }

    #[test]
    fn click_over_shape_still_places_with_tool() {
        let mut ctl = Controller::default();
        let a = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        ctl.activate_tool(ToolState::Create(ShapeKind::Rect));
        ctl.handle_primary_click(Point::new(10.0, 10.0), Some(a));
        assert_eq!(ctl.graph().len(), 2);
        assert_eq!(ctl.selected(), None);
    }

    #[test]
    fn select_populates_inputs_and_decoration() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 10.0, 20.0);
        assert!(ctl.handle_primary_click(Point::new(15.0, 25.0), Some(id)));
        assert_eq!(ctl.selected(), Some(id));
        assert_eq!(ctl.decoration(), Some(Rect::new(8.0, 18.0, 112.0, 72.0)));
        assert_eq!(ctl.inputs().stroke_width, 2.0);

        // Empty canvas clears it.
        assert!(ctl.handle_primary_click(Point::new(500.0, 500.0), None));
        assert_eq!(ctl.selected(), None);
        assert_eq!(ctl.decoration(), None);
    }

    #[test]
    fn select_ignored_while_tool_active() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Circle, 100.0, 100.0);
        ctl.activate_tool(ToolState::Freehand);
        assert!(!ctl.select_node(id));
        assert_eq!(ctl.selected(), None);
    }

    #[test]
    fn single_selection() {
        let mut ctl = Controller::default();
        let a = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        let b = place(&mut ctl, ShapeKind::Circle, 300.0, 300.0);
        ctl.select_node(a);
        ctl.select_node(b);
        assert_eq!(ctl.selected(), Some(b));
        assert_eq!(ctl.decoration(), Some(Rect::new(248.0, 248.0, 352.0, 352.0)));
    }

    #[test]
    fn mode_switch_deselects_before_placing() {
        let mut ctl = Controller::default();
        let circle = place(&mut ctl, ShapeKind::Circle, 100.0, 100.0);
        ctl.select_node(circle);
        ctl.activate_tool(ToolState::Create(ShapeKind::Line));
        assert_eq!(ctl.selected(), None);
        assert_eq!(ctl.decoration(), None);
        ctl.handle_primary_click(Point::new(0.0, 0.0), None);
        assert_eq!(ctl.selected(), None);
    }

    #[test]
    fn undo_move_restores_exactly() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 10.0, 10.0);
        ctl.select_node(id);
        assert!(ctl.begin_drag(id, Point::new(12.0, 12.0)));
        ctl.drag_to(Point::new(30.0, 40.0));
        ctl.drag_to(Point::new(50.0, 70.0));
        assert!(ctl.end_drag());
        assert_eq!((rect_of(&ctl, id).x, rect_of(&ctl, id).y), (50.0, 70.0));
        assert_eq!(ctl.decoration(), Some(Rect::new(48.0, 68.0, 152.0, 122.0)));

        assert!(ctl.undo());
        assert_eq!((rect_of(&ctl, id).x, rect_of(&ctl, id).y), (10.0, 10.0));
        assert_eq!(ctl.decoration(), Some(Rect::new(8.0, 8.0, 112.0, 62.0)));
    }

    #[test]
    fn line_drag_snaps_start_then_translates() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Line, 100.0, 100.0);
        ctl.select_node(id);
        // Grabbed at the midpoint; the start point still lands on the pointer.
        ctl.begin_drag(id, Point::new(150.0, 100.0));
        ctl.drag_to(Point::new(300.0, 300.0));
        assert_eq!(
            ctl.graph().get(id).unwrap().kind.positions(),
            Positions::Endpoints {
                x1: 300.0,
                y1: 300.0,
                x2: 400.0,
                y2: 300.0
            }
        );

        ctl.drag_to(Point::new(310.0, 305.0));
        ctl.end_drag();
        assert_eq!(
            ctl.graph().get(id).unwrap().kind.positions(),
            Positions::Endpoints {
                x1: 310.0,
                y1: 305.0,
                x2: 410.0,
                y2: 305.0
            }
        );

        ctl.undo();
        assert_eq!(
            ctl.graph().get(id).unwrap().kind.positions(),
            Positions::Endpoints {
                x1: 100.0,
                y1: 100.0,
                x2: 200.0,
                y2: 100.0
            }
        );
    }

    #[test]
    fn undo_style_on_unstyled_node_removes_attribute() {
        let mut ctl = Controller::default();
        let loaded =
            vs_core::parse_markup(r#"<rect x="0" y="0" width="10" height="10"/>"#).unwrap();
        ctl.restore(loaded);
        let id = ctl.graph().ids()[0];
        assert!(ctl.select_node(id));
        // The fields show fallbacks; the node itself stays unstyled.
        assert_eq!(ctl.inputs().get(StyleAttr::Stroke), black());

        // Committing the shown fallback still changes the node, so it records.
        assert!(ctl.commit_style_input(StyleAttr::Stroke, black()));
        assert!(ctl.commit_style_input(StyleAttr::Stroke, red()));

        assert!(ctl.undo());
        assert_eq!(ctl.graph().get(id).unwrap().style.stroke, Some(Paint::Solid(Color::BLACK)));
        assert!(ctl.undo());
        assert_eq!(ctl.graph().get(id).unwrap().style, Style::default());
        assert_eq!(ctl.inputs().get(StyleAttr::Stroke), black());
        assert!(!ctl.undo());
    }

    #[test]
    fn drag_without_movement_records_nothing() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Circle, 100.0, 100.0);
        let before = ctl.history().len();
        ctl.select_node(id);
        ctl.begin_drag(id, Point::new(100.0, 100.0));
        ctl.drag_to(Point::new(100.0, 100.0));
        assert!(!ctl.end_drag());
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.history().len(), before);
    }

    #[test]
    fn drag_requires_selection() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        assert!(!ctl.begin_drag(id, Point::ZERO));
        assert!(!ctl.drag_to(Point::new(5.0, 5.0)));
        assert_eq!(rect_of(&ctl, id).x, 0.0);
    }

    #[test]
    fn paths_are_not_draggable() {
        let mut ctl = Controller::default();
        ctl.activate_tool(ToolState::Freehand);
        ctl.begin_freehand_path(Point::new(1.0, 1.0));
        ctl.extend_freehand_path(Point::new(2.0, 2.0));
        ctl.end_freehand_path();
        let id = ctl.graph().ids()[0];
        ctl.deactivate_tool();

        ctl.select_node(id);
        assert!(!ctl.begin_drag(id, Point::new(1.0, 1.0)));
    }

    #[test]
    fn delete_and_undo_restores_identity() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Ellipse, 100.0, 100.0);
        ctl.select_node(id);
        let snapshot = ctl.graph().get(id).unwrap().clone();

        assert!(ctl.delete_node(id));
        assert!(!ctl.graph().contains(id));
        assert_eq!(ctl.selected(), None);

        assert!(ctl.undo());
        assert_eq!(ctl.graph().get(id), Some(&snapshot));
    }

    #[test]
    fn delete_missing_node_is_noop() {
        let mut ctl = Controller::default();
        assert!(!ctl.delete_node(NodeId::intern("rect_gone")));
        assert!(ctl.history().is_empty());
    }

    #[test]
    fn undo_add_clears_selection() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        ctl.select_node(id);
        assert!(ctl.undo());
        assert!(ctl.graph().is_empty());
        assert_eq!(ctl.selected(), None);
        assert_eq!(ctl.decoration(), None);
    }

    #[test]
    fn undo_style_reflects_into_inputs() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        ctl.select_node(id);
        assert_eq!(ctl.inputs().get(StyleAttr::Stroke), black());

        assert!(ctl.commit_style_input(StyleAttr::Stroke, red()));
        assert_eq!(ctl.graph().get(id).unwrap().style.get(StyleAttr::Stroke), Some(red()));

        assert!(ctl.undo());
        assert_eq!(ctl.graph().get(id).unwrap().style.get(StyleAttr::Stroke), Some(black()));
        assert_eq!(ctl.inputs().get(StyleAttr::Stroke), black());
    }

    #[test]
    fn unchanged_commit_is_not_recorded() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        ctl.select_node(id);
        let before = ctl.history().len();

        assert!(!ctl.commit_style_input(StyleAttr::Stroke, black()));
        assert_eq!(ctl.history().len(), before);

        // Undo now reverts the placement, not the no-op commit.
        ctl.undo();
        assert!(ctl.graph().is_empty());
    }

    #[test]
    fn live_preview_then_commit_records_once() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        ctl.select_node(id);
        let before = ctl.history().len();

        for w in [3.0, 4.0, 5.0] {
            ctl.apply_style_input(StyleAttr::StrokeWidth, StyleValue::Width(w));
        }
        assert_eq!(ctl.history().len(), before);
        ctl.commit_style_input(StyleAttr::StrokeWidth, StyleValue::Width(5.0));
        assert_eq!(ctl.history().len(), before + 1);

        ctl.undo();
        assert_eq!(
            ctl.graph().get(id).unwrap().style.stroke_width,
            Some(2.0)
        );
        assert_eq!(ctl.inputs().stroke_width, 2.0);
    }

    #[test]
    fn commit_without_selection_only_updates_input() {
        let mut ctl = Controller::default();
        ctl.activate_tool(ToolState::Create(ShapeKind::Rect));
        assert!(!ctl.commit_style_input(StyleAttr::Fill, red()));
        assert_eq!(ctl.inputs().get(StyleAttr::Fill), red());
        assert!(ctl.history().is_empty());

        ctl.handle_primary_click(Point::ZERO, None);
        let id = ctl.graph().ids()[0];
        assert_eq!(ctl.graph().get(id).unwrap().style.get(StyleAttr::Fill), Some(red()));
    }

    #[test]
    fn mismatched_style_value_is_rejected() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        ctl.select_node(id);
        let before = ctl.history().len();
        assert!(!ctl.commit_style_input(StyleAttr::Fill, StyleValue::Width(3.0)));
        assert_eq!(ctl.history().len(), before);
    }

    #[test]
    fn freehand_stroke_is_one_record() {
        let mut ctl = Controller::default();
        ctl.activate_tool(ToolState::Freehand);
        assert!(ctl.begin_freehand_path(Point::new(0.0, 0.0)));
        for i in 1..10 {
            ctl.extend_freehand_path(Point::new(f64::from(i), f64::from(i)));
        }
        assert!(ctl.end_freehand_path());
        assert!(!ctl.extend_freehand_path(Point::new(99.0, 99.0)));

        assert_eq!(ctl.history().len(), 1);
        let node = ctl.graph().nodes().next().unwrap();
        match &node.kind {
            NodeKind::Path(p) => assert_eq!(p.points.len(), 10),
            other => panic!("expected path, got {other:?}"),
        }
        assert_eq!(node.style.fill, Some(Paint::None));
        assert_eq!(node.style.stroke_width, Some(2.0));

        ctl.undo();
        assert!(ctl.graph().is_empty());
    }

    #[test]
    fn freehand_needs_freehand_tool() {
        let mut ctl = Controller::default();
        assert!(!ctl.begin_freehand_path(Point::ZERO));
        assert!(!ctl.extend_freehand_path(Point::ZERO));
        assert!(ctl.graph().is_empty());
    }

    #[test]
    fn undo_during_stroke_ends_it() {
        let mut ctl = Controller::default();
        ctl.activate_tool(ToolState::Freehand);
        ctl.begin_freehand_path(Point::ZERO);
        ctl.undo();
        assert_eq!(ctl.drawing_path(), None);
        assert!(!ctl.extend_freehand_path(Point::new(1.0, 1.0)));
    }

    #[test]
    fn undo_empty_history() {
        let mut ctl = Controller::default();
        assert!(!ctl.undo());
    }

    #[test]
    fn restore_clears_history_and_selection() {
        let mut ctl = Controller::default();
        let id = place(&mut ctl, ShapeKind::Rect, 0.0, 0.0);
        ctl.select_node(id);

        let mut loaded = SceneGraph::new();
        let node = ShapeKind::Circle.instantiate(
            Point::new(5.0, 5.0),
            &ctl.config().placement,
            &StyleInputs::default(),
        );
        let loaded_id = node.id;
        loaded.append(node);
        ctl.restore(loaded);

        assert!(ctl.history().is_empty());
        assert_eq!(ctl.selected(), None);
        assert!(ctl.select_node(loaded_id));
        assert!(ctl.delete_node(loaded_id));
    }
}

//! Undo history.
//!
//! Every committed mutation pushes one reversible `HistoryRecord`. Undo
//! pops the most recent record and applies its inverse to the scene graph.
//! There is no redo stack and no depth limit; history lives only as long
//! as the editor session.

use vs_core::geometry::{Geometry, Positions};
use vs_core::model::{SceneGraph, SceneNode, StyleAttr, StyleValue};
use vs_core::NodeId;

/// One reversible mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryRecord {
    /// A node was inserted.
    Add { id: NodeId },
    /// A node was removed. Holds the node exactly as it was.
    Delete { node: SceneNode },
    /// One style attribute changed away from `old`. `None` means the
    /// attribute was absent before.
    Style {
        id: NodeId,
        attr: StyleAttr,
        old: Option<StyleValue>,
    },
    /// Positional attributes changed from `old` to `new`.
    Move {
        id: NodeId,
        old: Positions,
        new: Positions,
    },
}

impl HistoryRecord {
    /// The node this record refers to.
    pub fn id(&self) -> NodeId {
        match self {
            HistoryRecord::Add { id }
            | HistoryRecord::Style { id, .. }
            | HistoryRecord::Move { id, .. } => *id,
            HistoryRecord::Delete { node } => node.id,
        }
    }

    /// Short description, e.g. `add rect_3` or `style fill on circle_1`.
    pub fn label(&self) -> String {
        match self {
            HistoryRecord::Add { id } => format!("add {id}"),
            HistoryRecord::Delete { node } => format!("delete {}", node.id),
            HistoryRecord::Style { id, attr, .. } => format!("style {} on {id}", attr.name()),
            HistoryRecord::Move { id, .. } => format!("move {id}"),
        }
    }

    /// Apply the inverse of this record. Returns `None` when the node the
    /// record refers to is gone.
    fn revert(self, graph: &mut SceneGraph) -> Option<Undone> {
        match self {
            HistoryRecord::Add { id } => {
                graph.remove(id)?;
                Some(Undone::Added { id })
            }
            HistoryRecord::Delete { node } => {
                let id = node.id;
                graph.append(node);
                Some(Undone::Deleted { id })
            }
            HistoryRecord::Style { id, attr, old } => {
                let style = &mut graph.get_mut(id)?.style;
                match old {
                    Some(value) => style.set(attr, value),
                    None => style.unset(attr),
                }
                Some(Undone::Styled {
                    id,
                    attr,
                    value: old,
                })
            }
            HistoryRecord::Move { id, old, .. } => {
                graph.get_mut(id)?.kind.set_positions(&old);
                Some(Undone::Moved { id })
            }
        }
    }
}

/// What an undo reverted, so the caller can reconcile selection and inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Undone {
    /// The node was removed again.
    Added { id: NodeId },
    /// The node was reinserted front-most.
    Deleted { id: NodeId },
    /// `attr` was set back to `value`, or removed when `None`.
    Styled {
        id: NodeId,
        attr: StyleAttr,
        value: Option<StyleValue>,
    },
    /// Positions were restored.
    Moved { id: NodeId },
}

impl Undone {
    pub fn id(&self) -> NodeId {
        match self {
            Undone::Added { id }
            | Undone::Deleted { id }
            | Undone::Styled { id, .. }
            | Undone::Moved { id } => *id,
        }
    }
}

/// LIFO stack of history records.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: HistoryRecord) {
        log::debug!("history: {}", record.label());
        self.records.push(record);
    }

    /// Pop the most recent record and revert it. `None` if history is empty
    /// or the record no longer applies.
    pub fn undo(&mut self, graph: &mut SceneGraph) -> Option<Undone> {
        let record = self.records.pop()?;
        let label = record.label();
        let undone = record.revert(graph);
        match undone {
            Some(_) => log::debug!("undo: {label}"),
            None => log::warn!("undo: dropped `{label}`, node no longer exists"),
        }
        undone
    }

    pub fn can_undo(&self) -> bool {
        !self.records.is_empty()
    }

    /// The record the next undo would revert.
    pub fn peek(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

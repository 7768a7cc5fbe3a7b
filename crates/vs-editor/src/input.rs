//! Input abstraction layer.
//!
//! The host translates raw DOM events into surface-local coordinates and
//! hit-tests them before building an `InputEvent`, so the controller only
//! ever sees drawing coordinates and the node under the pointer.

use kurbo::Point;
use vs_core::NodeId;

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux, ⌘ on macOS.
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed. `target` is the topmost shape under the pointer.
    PointerDown {
        x: f64,
        y: f64,
        target: Option<NodeId>,
    },

    /// Pointer moved anywhere over the surface.
    PointerMove { x: f64, y: f64 },

    /// Primary button released.
    PointerUp { x: f64, y: f64 },

    /// Completed primary click.
    Click {
        x: f64,
        y: f64,
        target: Option<NodeId>,
    },

    /// Secondary click (context menu request).
    ContextMenu {
        x: f64,
        y: f64,
        target: Option<NodeId>,
    },

    /// Key press. `key` is the `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Click { x, y, .. }
            | Self::ContextMenu { x, y, .. } => Some(Point::new(*x, *y)),
            Self::Key { .. } => None,
        }
    }

    /// The hit-tested shape, for events that carry one.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::PointerDown { target, .. }
            | Self::Click { target, .. }
            | Self::ContextMenu { target, .. } => *target,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_and_target() {
        let id = NodeId::intern("circle_input_test");
        let down = InputEvent::PointerDown {
            x: 3.0,
            y: 4.0,
            target: Some(id),
        };
        assert_eq!(down.position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(down.target(), Some(id));

        let key = InputEvent::Key {
            key: "z".into(),
            modifiers: Modifiers::default(),
        };
        assert_eq!(key.position(), None);
        assert_eq!(InputEvent::PointerMove { x: 1.0, y: 1.0 }.target(), None);
    }

    #[test]
    fn command_modifier() {
        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert!(meta.command());
        assert!(!Modifiers::default().command());
    }
}

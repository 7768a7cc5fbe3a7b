//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser bridge and native tests resolve keys the same way.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    /// Same as the toolbar's reset button.
    Reset,
    DeleteSelection,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "z" | "Z" if !modifiers.shift => Some(ShortcutAction::Undo),
                _ => None,
            };
        }

        match key {
            "Escape" => Some(ShortcutAction::Reset),
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteSelection),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn undo_needs_command_modifier() {
        assert_eq!(ShortcutMap::resolve("z", cmd()), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutMap::resolve("Z", cmd()), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutMap::resolve("z", Modifiers::default()), None);
    }

    #[test]
    fn redo_combo_is_unbound() {
        let shift_cmd = Modifiers {
            shift: true,
            ..cmd()
        };
        assert_eq!(ShortcutMap::resolve("z", shift_cmd), None);
    }

    #[test]
    fn plain_keys() {
        let none = Modifiers::default();
        assert_eq!(ShortcutMap::resolve("Escape", none), Some(ShortcutAction::Reset));
        assert_eq!(ShortcutMap::resolve("Delete", none), Some(ShortcutAction::DeleteSelection));
        assert_eq!(ShortcutMap::resolve("Backspace", none), Some(ShortcutAction::DeleteSelection));
        assert_eq!(ShortcutMap::resolve("q", none), None);
    }
}

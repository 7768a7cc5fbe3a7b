//! Editor configuration.
//!
//! Every field has a default, so the host page can pass partial JSON and
//! only override what it cares about.

use serde::{Deserialize, Serialize};
use vs_core::Viewport;

/// Default geometry for shapes placed with a creation tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementDefaults {
    /// Length of a placed line, drawn horizontally to the right.
    pub line_length: f64,
    /// `(width, height)` of a placed rectangle.
    pub rect_size: (f64, f64),
    pub square_size: f64,
    /// `(rx, ry)` of a placed ellipse.
    pub ellipse_radii: (f64, f64),
    pub circle_radius: f64,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            line_length: 100.0,
            rect_size: (100.0, 50.0),
            square_size: 100.0,
            ellipse_radii: (50.0, 30.0),
            circle_radius: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Drawing surface size, used for SVG/PNG export.
    pub viewport: Viewport,
    pub placement: PlacementDefaults,
    /// Gap between a selected shape's bounding box and its decoration.
    pub selection_margin: f64,
    /// Key under which the drawing is persisted.
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            placement: PlacementDefaults::default(),
            selection_margin: 2.0,
            storage_key: "vs-drawing".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "storage_key": "mine", "placement": { "circle_radius": 20 } }"#)
                .unwrap();
        assert_eq!(config.storage_key, "mine");
        assert_eq!(config.placement.circle_radius, 20.0);
        assert_eq!(config.placement.rect_size, (100.0, 50.0));
        assert_eq!(config.selection_margin, 2.0);
        assert_eq!(config.viewport, Viewport::default());
    }

    #[test]
    fn empty_json_is_default() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}

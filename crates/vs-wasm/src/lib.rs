//! WASM bridge for VS: exposes the drawing editor to the web page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM: it
//! forwards pointer, key and style-input events here with surface-local
//! coordinates, and repaints the `<canvas>` through [`VsCanvas::render`]
//! whenever a handler returns `true`.

mod render2d;
mod storage;

use storage::LocalStore;
use vs_core::kurbo::Point;
use vs_core::model::{StyleAttr, StyleValue, Viewport};
use vs_core::{NodeId, emit_svg_document};
use vs_editor::{
    Controller, EditorConfig, InputEvent, Modifiers, StyleInputs, ToolState, load_drawing,
    save_drawing,
};
use vs_render::{hit_test, rasterize};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller.
///
/// Wraps the editor [`Controller`]; every event from the page is hit-tested
/// here and then routed through it.
#[wasm_bindgen]
pub struct VsCanvas {
    controller: Controller,
}

#[wasm_bindgen]
impl VsCanvas {
    /// Create an editor for a drawing surface of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        init_runtime();
        let config = EditorConfig {
            viewport: Viewport { width, height },
            ..EditorConfig::default()
        };
        Self {
            controller: Controller::new(config),
        }
    }

    /// Create an editor from a JSON `EditorConfig`. Missing fields take
    /// their defaults.
    pub fn with_config(config_json: &str) -> Result<VsCanvas, JsValue> {
        init_runtime();
        let config: EditorConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("invalid editor config: {e}")))?;
        Ok(Self {
            controller: Controller::new(config),
        })
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Activate a toolbar tool: `line`, `rect`, `square`, `ellipse`,
    /// `circle`, `path`, or `reset`. Returns `false` for unknown names.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match ToolState::from_name(name) {
            Some(tool) => {
                self.controller.activate_tool(tool);
                true
            }
            None => {
                log::warn!("unknown tool {name:?}");
                false
            }
        }
    }

    pub fn tool_name(&self) -> String {
        self.controller.tool().name().to_string()
    }

    /// CSS cursor for the drawing surface.
    pub fn cursor(&self) -> String {
        self.controller.cursor().css().to_string()
    }

    // ─── Pointer & keys ──────────────────────────────────────────────────

    /// Primary click. Returns true if the canvas needs a repaint.
    pub fn handle_click(&mut self, x: f64, y: f64) -> bool {
        let target = self.hit(x, y);
        self.controller.handle(InputEvent::Click { x, y, target })
    }

    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        let target = self.hit(x, y);
        self.controller
            .handle(InputEvent::PointerDown { x, y, target })
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(InputEvent::PointerMove { x, y })
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(InputEvent::PointerUp { x, y })
    }

    /// Secondary click. Deletes the shape under the pointer; returns true
    /// when the page should call `preventDefault()`.
    pub fn handle_context_menu(&mut self, x: f64, y: f64) -> bool {
        let target = self.hit(x, y);
        self.controller
            .handle(InputEvent::ContextMenu { x, y, target })
    }

    /// Key press (`KeyboardEvent.key`). Returns true if handled.
    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.controller.handle(InputEvent::Key {
            key: key.to_string(),
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    // ─── Style inputs ────────────────────────────────────────────────────

    /// Live `input` event from a style field (`strokeColor`, `strokeWidth`,
    /// `fillColor`).
    pub fn set_style_live(&mut self, attr: &str, value: &str) -> bool {
        match parse_style_input(attr, value) {
            Some((attr, value)) => self.controller.apply_style_input(attr, value),
            None => false,
        }
    }

    /// `change` event from a style field. Records an undoable edit when the
    /// value differs from the last committed one.
    pub fn commit_style(&mut self, attr: &str, value: &str) -> bool {
        match parse_style_input(attr, value) {
            Some((attr, value)) => self.controller.commit_style_input(attr, value),
            None => false,
        }
    }

    /// Current style field values, for the page to write back into the form.
    pub fn style_inputs_json(&self) -> String {
        inputs_to_json(self.controller.inputs())
    }

    pub fn selected_id(&self) -> Option<String> {
        self.controller.selected().map(|id| id.as_str().to_string())
    }

    // ─── Undo ────────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.controller.undo()
    }

    pub fn can_undo(&self) -> bool {
        self.controller.history().can_undo()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Paint the drawing and the selection decoration.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let Viewport { width, height } = self.controller.config().viewport;
        render2d::render_scene(
            ctx,
            self.controller.graph(),
            width,
            height,
            self.controller.decoration(),
        );
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Save the drawing to `localStorage`. Returns false if storage failed.
    pub fn save(&self) -> bool {
        let key = &self.controller.config().storage_key;
        match save_drawing(&mut LocalStore, key, self.controller.graph()) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("save failed: {e}");
                false
            }
        }
    }

    /// Replace the drawing with the one in `localStorage`, if any. History
    /// starts empty. Returns whether any shapes were loaded.
    pub fn load(&mut self) -> bool {
        let graph = load_drawing(&LocalStore, &self.controller.config().storage_key);
        let loaded = !graph.is_empty();
        self.controller.restore(graph);
        loaded
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Standalone SVG document of the drawing.
    pub fn export_svg(&self) -> String {
        emit_svg_document(self.controller.graph(), self.controller.config().viewport)
    }

    /// PNG bytes of the drawing at the viewport size.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        let Viewport { width, height } = self.controller.config().viewport;
        rasterize(&self.export_svg(), width as u32, height as u32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl VsCanvas {
    fn hit(&self, x: f64, y: f64) -> Option<NodeId> {
        hit_test(self.controller.graph(), Point::new(x, y))
    }
}

// ─── Style input helpers ─────────────────────────────────────────────────

/// Parse a style field name and raw value. Unknown fields and unparsable
/// values yield `None`.
fn parse_style_input(attr: &str, raw: &str) -> Option<(StyleAttr, StyleValue)> {
    let attr = StyleAttr::from_name(attr)?;
    match attr.parse_value(raw) {
        Some(value) => Some((attr, value)),
        None => {
            log::debug!("ignoring {raw:?} for {}", attr.name());
            None
        }
    }
}

fn inputs_to_json(inputs: &StyleInputs) -> String {
    serde_json::json!({
        "strokeColor": inputs.stroke.to_string(),
        "strokeWidth": inputs.stroke_width,
        "fillColor": inputs.fill.to_string(),
    })
    .to_string()
}

// ─── Runtime setup ───────────────────────────────────────────────────────

fn init_runtime() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("VS WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            if let Err(e) = console_log::init_with_level(log::Level::Debug) {
                web_sys::console::warn_1(&format!("logger already set: {e}").into());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vs_core::model::{Color, Paint};

    #[test]
    fn style_input_parsing() {
        assert_eq!(
            parse_style_input("strokeColor", "#FF0000"),
            Some((
                StyleAttr::Stroke,
                StyleValue::Paint(Paint::Solid(Color::rgb(255, 0, 0)))
            ))
        );
        assert_eq!(
            parse_style_input("strokeWidth", "3.5"),
            Some((StyleAttr::StrokeWidth, StyleValue::Width(3.5)))
        );
        assert_eq!(parse_style_input("strokeWidth", "wide"), None);
        assert_eq!(parse_style_input("opacity", "1"), None);
    }

    #[test]
    fn inputs_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&inputs_to_json(&StyleInputs::default())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "strokeColor": "#000000",
                "strokeWidth": 2.0,
                "fillColor": "#ffffff",
            })
        );
    }

    #[test]
    fn click_place_select_and_undo() {
        let mut canvas = VsCanvas::new(800.0, 600.0);
        assert!(canvas.set_tool("rect"));
        assert_eq!(canvas.cursor(), "crosshair");
        assert!(canvas.handle_click(100.0, 100.0));

        assert!(canvas.set_tool("reset"));
        assert!(canvas.handle_click(150.0, 120.0));
        let selected = canvas.selected_id().expect("rect should be selected");
        assert!(selected.starts_with("rect_"));

        assert!(canvas.commit_style("strokeWidth", "6"));
        let inputs: serde_json::Value = serde_json::from_str(&canvas.style_inputs_json()).unwrap();
        assert_eq!(inputs["strokeWidth"], 6.0);

        assert!(canvas.undo());
        assert!(canvas.undo());
        assert!(!canvas.can_undo());
        assert_eq!(canvas.selected_id(), None);
    }

    #[test]
    fn context_menu_deletes_hit_shape() {
        let mut canvas = VsCanvas::new(800.0, 600.0);
        canvas.set_tool("circle");
        canvas.handle_click(200.0, 200.0);
        canvas.set_tool("reset");

        assert!(!canvas.handle_context_menu(400.0, 400.0));
        assert!(canvas.handle_context_menu(210.0, 190.0));
        assert!(!canvas.export_svg().contains("<circle"));
    }

    #[test]
    fn export_contains_shapes_but_not_decoration() {
        let mut canvas = VsCanvas::new(320.0, 240.0);
        canvas.set_tool("square");
        canvas.handle_click(10.0, 10.0);
        canvas.set_tool("reset");
        canvas.handle_click(20.0, 20.0);
        assert!(canvas.selected_id().is_some());

        let svg = canvas.export_svg();
        assert!(svg.contains("width=\"320\" height=\"240\""));
        assert_eq!(svg.matches("<rect").count(), 1);

        let png = canvas.export_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let mut canvas = VsCanvas::new(100.0, 100.0);
        assert!(!canvas.set_tool("triangle"));
        assert_eq!(canvas.tool_name(), "none");
    }
}

//! Canvas2D renderer for the drawing surface.
//!
//! Paints shapes in paint order and the dashed selection decoration on
//! top. The decoration is overlay state only and never enters the scene.

use vs_core::kurbo::Rect;
use vs_core::model::*;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

const DECORATION_COLOR: &str = "#000000";
const DECORATION_DASH: f64 = 4.0;

pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    graph: &SceneGraph,
    width: f64,
    height: f64,
    decoration: Option<Rect>,
) {
    ctx.clear_rect(0.0, 0.0, width, height);

    for node in graph.nodes() {
        render_node(ctx, node);
    }

    if let Some(rect) = decoration {
        draw_decoration(ctx, rect);
    }
}

fn render_node(ctx: &CanvasRenderingContext2d, node: &SceneNode) {
    ctx.save();
    ctx.begin_path();
    let closed = match &node.kind {
        NodeKind::Root => {
            ctx.restore();
            return;
        }
        NodeKind::Rect(r) | NodeKind::Square(r) => {
            ctx.rect(r.x, r.y, r.width, r.height);
            true
        }
        NodeKind::Ellipse(e) => {
            let _ = ctx.ellipse(e.cx, e.cy, e.rx, e.ry, 0.0, 0.0, std::f64::consts::TAU);
            true
        }
        NodeKind::Circle(c) => {
            let _ = ctx.arc(c.cx, c.cy, c.r, 0.0, std::f64::consts::TAU);
            true
        }
        NodeKind::Line(l) => {
            ctx.move_to(l.x1, l.y1);
            ctx.line_to(l.x2, l.y2);
            false
        }
        NodeKind::Path(p) => {
            let mut points = p.points.iter();
            if let Some(first) = points.next() {
                ctx.move_to(first.x, first.y);
            }
            for pt in points {
                ctx.line_to(pt.x, pt.y);
            }
            false
        }
    };

    if closed && let Some(fill) = css_paint(node.style.fill.unwrap_or(Paint::Solid(Color::BLACK))) {
        ctx.set_fill_style_str(&fill);
        ctx.fill();
    }

    let width = node.style.stroke_width.unwrap_or(1.0);
    if let Some(stroke) = node.style.stroke.and_then(css_paint)
        && width > 0.0
    {
        ctx.set_stroke_style_str(&stroke);
        ctx.set_line_width(width);
        ctx.stroke();
    }
    ctx.restore();
}

fn draw_decoration(ctx: &CanvasRenderingContext2d, rect: Rect) {
    ctx.save();
    ctx.set_stroke_style_str(DECORATION_COLOR);
    ctx.set_line_width(1.0);
    let _ = ctx.set_line_dash(&js_sys::Array::of2(
        &JsValue::from_f64(DECORATION_DASH),
        &JsValue::from_f64(DECORATION_DASH),
    ));
    ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
    ctx.restore();
}

/// CSS color for a paint, or `None` for `none`.
fn css_paint(paint: Paint) -> Option<String> {
    paint.color().map(|c| c.to_hex())
}

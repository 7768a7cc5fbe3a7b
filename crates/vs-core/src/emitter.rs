//! Emitter: SceneGraph → SVG element markup.
//!
//! `emit_markup` writes the bare element list used for persistence;
//! `emit_svg_document` wraps it in a standalone `<svg>` for export. Both
//! round-trip through `parse_markup`.

use crate::model::*;
use std::fmt::Write;

/// Emit every shape node as one SVG element per line, in paint order.
#[must_use]
pub fn emit_markup(graph: &SceneGraph) -> String {
    let mut out = String::with_capacity(64 * graph.len());
    for node in graph.nodes() {
        emit_node(&mut out, node);
        out.push('\n');
    }
    out
}

/// Emit a standalone SVG document sized to the viewport.
#[must_use]
pub fn emit_svg_document(graph: &SceneGraph, viewport: Viewport) -> String {
    let Viewport { width, height } = viewport;
    let mut out = String::with_capacity(128 + 64 * graph.len());
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    for node in graph.nodes() {
        out.push_str("  ");
        emit_node(&mut out, node);
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

fn emit_node(out: &mut String, node: &SceneNode) {
    match &node.kind {
        NodeKind::Root => return,
        NodeKind::Line(l) => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
                l.x1, l.y1, l.x2, l.y2
            );
        }
        NodeKind::Rect(r) => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                r.x, r.y, r.width, r.height
            );
        }
        NodeKind::Square(r) => {
            let _ = write!(
                out,
                "<rect data-shape=\"square\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                r.x, r.y, r.width, r.height
            );
        }
        NodeKind::Ellipse(e) => {
            let _ = write!(
                out,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"",
                e.cx, e.cy, e.rx, e.ry
            );
        }
        NodeKind::Circle(c) => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                c.cx, c.cy, c.r
            );
        }
        NodeKind::Path(p) => {
            out.push_str("<path d=\"");
            for (i, pt) in p.points.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{cmd} {} {}", pt.x, pt.y);
            }
            out.push('"');
        }
    }
    emit_style(out, &node.style);
    out.push_str("/>");
}

fn emit_style(out: &mut String, style: &Style) {
    for attr in StyleAttr::ALL {
        if let Some(value) = style.get(attr) {
            let _ = write!(out, " {}=\"{value}\"", attr.name());
        }
    }
}

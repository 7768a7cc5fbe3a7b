//! Rasterization: drawing markup → PNG via tiny-skia.
//!
//! Shapes are painted in paint order, fill first and stroke on top, onto
//! a transparent pixmap. Drawing coordinates map 1:1 to pixels.

use thiserror::Error;
use tiny_skia::{
    Color as SkColor, FillRule, LineCap, LineJoin, Paint as SkPaint, Path, PathBuilder, Pixmap,
    Rect as SkRect, Stroke, Transform,
};
use vs_core::model::*;
use vs_core::{ParseError, parse_markup};

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cannot rasterize markup: {0}")]
    Parse(#[from] ParseError),

    #[error("cannot allocate a {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Parse `markup` (bare elements or a full `<svg>` document) and encode it
/// as a `width`×`height` PNG.
pub fn rasterize(markup: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterError> {
    let graph = parse_markup(markup)?;
    let pixmap = render_pixmap(&graph, width, height)?;
    pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))
}

/// Paint `graph` into a new pixmap.
pub fn render_pixmap(graph: &SceneGraph, width: u32, height: u32) -> Result<Pixmap, RasterError> {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Err(RasterError::EmptyCanvas { width, height });
    };
    for node in graph.nodes() {
        paint_node(&mut pixmap, node);
    }
    log::debug!("rasterized {} nodes at {width}x{height}", graph.len());
    Ok(pixmap)
}

fn paint_node(pixmap: &mut Pixmap, node: &SceneNode) {
    let Some(path) = build_path(&node.kind) else {
        return;
    };
    let closed = !matches!(node.kind, NodeKind::Line(_) | NodeKind::Path(_));

    // Unset fill paints black and unset stroke paints nothing, as in SVG.
    let fill = node.style.fill.unwrap_or(Paint::Solid(Color::BLACK));
    if closed && let Some(paint) = sk_paint(fill) {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    let width = node.style.stroke_width.unwrap_or(1.0) as f32;
    if let Some(paint) = node.style.stroke.and_then(sk_paint)
        && width > 0.0
    {
        let stroke = Stroke {
            width,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn sk_paint(paint: Paint) -> Option<SkPaint<'static>> {
    let c = paint.color()?;
    let mut sk = SkPaint::default();
    sk.set_color(SkColor::from_rgba8(c.r, c.g, c.b, c.a));
    sk.anti_alias = true;
    Some(sk)
}

fn build_path(kind: &NodeKind) -> Option<Path> {
    match kind {
        NodeKind::Root => None,
        NodeKind::Rect(r) | NodeKind::Square(r) => {
            let rect =
                SkRect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32)?;
            Some(PathBuilder::from_rect(rect))
        }
        NodeKind::Ellipse(e) => {
            let oval = SkRect::from_ltrb(
                (e.cx - e.rx) as f32,
                (e.cy - e.ry) as f32,
                (e.cx + e.rx) as f32,
                (e.cy + e.ry) as f32,
            )?;
            PathBuilder::from_oval(oval)
        }
        NodeKind::Circle(c) => PathBuilder::from_circle(c.cx as f32, c.cy as f32, c.r as f32),
        NodeKind::Line(l) => {
            let mut pb = PathBuilder::new();
            pb.move_to(l.x1 as f32, l.y1 as f32);
            pb.line_to(l.x2 as f32, l.y2 as f32);
            pb.finish()
        }
        NodeKind::Path(p) => {
            let (first, rest) = p.points.split_first()?;
            let mut pb = PathBuilder::new();
            pb.move_to(first.x as f32, first.y as f32);
            for pt in rest {
                pb.line_to(pt.x as f32, pt.y as f32);
            }
            pb.finish()
        }
    }
}

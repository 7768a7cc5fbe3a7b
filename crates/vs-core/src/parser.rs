//! Parser for drawing markup → SceneGraph.
//!
//! Built on `winnow` 0.7. Reads the SVG elements written by the emitter:
//! `line`, `rect` (with `data-shape="square"` for squares), `ellipse`,
//! `circle`, and `path` with `M`/`L` polyline data. Wrapper and metadata
//! elements (`svg`, `g`, `title`, …), XML declarations, comments and
//! unknown elements are skipped. Every parsed node gets a fresh `NodeId`.

use crate::error::ParseError;
use crate::geometry::{Circle, Ellipse, Line, Polyline, Rectangle};
use crate::model::*;
use kurbo::Point;
use smallvec::SmallVec;
use winnow::ascii::{float, multispace0};
use winnow::combinator::{alt, delimited};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_till, take_while};

/// Parse drawing markup (a bare element list or a full SVG document).
pub fn parse_markup(input: &str) -> Result<SceneGraph, ParseError> {
    let mut graph = SceneGraph::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let offset = input.len() - rest.len();

        if rest.starts_with("<?") {
            skip_past(&mut rest, "?>")?;
        } else if rest.starts_with("<!--") {
            skip_past(&mut rest, "-->")?;
        } else if rest.starts_with("</") {
            parse_close_tag
                .parse_next(&mut rest)
                .map_err(|_| syntax_error(offset, "malformed closing tag"))?;
        } else if rest.starts_with('<') {
            if !rest.contains('>') {
                return Err(ParseError::UnexpectedEnd);
            }
            let element = parse_element
                .parse_next(&mut rest)
                .map_err(|_| syntax_error(offset, "malformed element"))?;
            if let Some(node) = node_from_element(&element)? {
                graph.append(node);
            }
        } else {
            // Character data between tags (e.g. inside <title>).
            let _ = take_till::<_, _, ContextError>(0.., '<').parse_next(&mut rest);
        }
    }

    log::debug!("parsed {} nodes from markup", graph.len());
    Ok(graph)
}

fn syntax_error(offset: usize, message: &str) -> ParseError {
    ParseError::Syntax {
        offset,
        message: message.to_string(),
    }
}

fn skip_past(input: &mut &str, terminator: &str) -> Result<(), ParseError> {
    let pos = input.find(terminator).ok_or(ParseError::UnexpectedEnd)?;
    *input = &input[pos + terminator.len()..];
    Ok(())
}

// ─── Elements ───────────────────────────────────────────────────────────

/// One start tag with its attributes, in source order.
#[derive(Debug)]
struct Element<'a> {
    name: &'a str,
    attrs: SmallVec<[(&'a str, &'a str); 8]>,
}

impl<'a> Element<'a> {
    fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Numeric geometry attribute. Missing attributes read as 0.
    fn number(&self, name: &str) -> Result<f64, ParseError> {
        let Some(raw) = self.attr(name) else {
            return Ok(0.0);
        };
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber {
                attr: name.to_string(),
                value: raw.to_string(),
            })
    }
}

fn parse_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
    })
    .parse_next(input)
}

fn parse_quoted<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
    ))
    .parse_next(input)
}

fn parse_attribute<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    let name = parse_name.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let _ = '='.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let value = parse_quoted.parse_next(input)?;
    Ok((name, value))
}

fn parse_element<'a>(input: &mut &'a str) -> ModalResult<Element<'a>> {
    let _ = '<'.parse_next(input)?;
    let name = parse_name.parse_next(input)?;
    let mut attrs = SmallVec::new();

    loop {
        let _ = multispace0.parse_next(input)?;
        if input.starts_with("/>") {
            *input = &input[2..];
            break;
        }
        if input.starts_with('>') {
            *input = &input[1..];
            break;
        }
        attrs.push(parse_attribute.parse_next(input)?);
    }

    Ok(Element { name, attrs })
}

fn parse_close_tag<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    let _ = "</".parse_next(input)?;
    let name = parse_name.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let _ = '>'.parse_next(input)?;
    Ok(name)
}

// ─── Nodes ──────────────────────────────────────────────────────────────

fn node_from_element(el: &Element<'_>) -> Result<Option<SceneNode>, ParseError> {
    let kind = match el.name {
        "line" => NodeKind::Line(Line {
            x1: el.number("x1")?,
            y1: el.number("y1")?,
            x2: el.number("x2")?,
            y2: el.number("y2")?,
        }),
        "rect" => {
            let rect = Rectangle {
                x: el.number("x")?,
                y: el.number("y")?,
                width: el.number("width")?,
                height: el.number("height")?,
            };
            if el.attr("data-shape") == Some("square") {
                NodeKind::Square(rect)
            } else {
                NodeKind::Rect(rect)
            }
        }
        "ellipse" => NodeKind::Ellipse(Ellipse {
            cx: el.number("cx")?,
            cy: el.number("cy")?,
            rx: el.number("rx")?,
            ry: el.number("ry")?,
        }),
        "circle" => NodeKind::Circle(Circle {
            cx: el.number("cx")?,
            cy: el.number("cy")?,
            r: el.number("r")?,
        }),
        "path" => NodeKind::Path(parse_path_data(el.attr("d").unwrap_or_default())?),
        "svg" | "g" | "title" | "desc" | "defs" | "style" => return Ok(None),
        other => {
            log::debug!("skipping unsupported element <{other}>");
            return Ok(None);
        }
    };

    Ok(Some(SceneNode::fresh(kind).with_style(parse_style(el)?)))
}

fn parse_style(el: &Element<'_>) -> Result<Style, ParseError> {
    let mut style = Style::default();
    for attr in StyleAttr::ALL {
        let Some(raw) = el.attr(attr.name()) else {
            continue;
        };
        let value = attr.parse_value(raw).ok_or_else(|| match attr {
            StyleAttr::StrokeWidth => ParseError::InvalidNumber {
                attr: attr.name().to_string(),
                value: raw.to_string(),
            },
            StyleAttr::Stroke | StyleAttr::Fill => ParseError::InvalidPaint {
                attr: attr.name().to_string(),
                value: raw.to_string(),
            },
        })?;
        style.set(attr, value);
    }
    Ok(style)
}

// ─── Path data ──────────────────────────────────────────────────────────

/// Parse absolute `M`/`L` polyline data. Coordinate pairs following a
/// command without a new letter repeat as `L`.
fn parse_path_data(d: &str) -> Result<Polyline, ParseError> {
    let mut rest = d;
    let mut path = Polyline::default();
    let mut have_command = false;

    loop {
        skip_separators(&mut rest);
        if rest.is_empty() {
            break;
        }
        if let Ok(cmd) = one_of::<_, _, ContextError>(['M', 'L']).parse_next(&mut rest) {
            match (cmd, path.points.is_empty()) {
                ('M', false) => {
                    return Err(ParseError::InvalidPathData(
                        "only a single subpath is supported".to_string(),
                    ));
                }
                ('L', true) => {
                    return Err(ParseError::InvalidPathData(
                        "path data must start with `M`".to_string(),
                    ));
                }
                _ => {}
            }
            have_command = true;
            skip_separators(&mut rest);
        } else if !have_command {
            return Err(ParseError::InvalidPathData(format!(
                "expected `M` at {rest:?}"
            )));
        }

        let point = parse_coordinate_pair
            .parse_next(&mut rest)
            .map_err(|_: ErrMode<ContextError>| {
                ParseError::InvalidPathData(format!("expected coordinates at {rest:?}"))
            })?;
        path.push(point);
    }

    Ok(path)
}

fn parse_coordinate_pair(input: &mut &str) -> ModalResult<Point> {
    let x: f64 = float::<_, f64, ErrMode<ContextError>>.parse_next(input)?;
    skip_separators(input);
    let y: f64 = float::<_, f64, ErrMode<ContextError>>.parse_next(input)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(Point::new(x, y))
}

fn skip_separators(input: &mut &str) {
    *input = input.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
}

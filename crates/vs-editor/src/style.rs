//! The three style input fields: stroke color, stroke width, fill color.

use vs_core::model::{Color, Paint, Style, StyleAttr, StyleValue};

/// Current values of the style input fields.
///
/// New shapes take their style from here; selecting a shape loads its
/// style back into the fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleInputs {
    pub stroke: Paint,
    pub stroke_width: f64,
    pub fill: Paint,
}

impl Default for StyleInputs {
    /// Values the fields reset to whenever a tool is switched.
    fn default() -> Self {
        Self {
            stroke: Paint::Solid(Color::BLACK),
            stroke_width: 2.0,
            fill: Paint::Solid(Color::WHITE),
        }
    }
}

impl StyleInputs {
    /// Values shown for attributes a selected shape does not carry.
    pub fn selection_fallback() -> Self {
        Self {
            stroke_width: 1.0,
            ..Self::default()
        }
    }

    /// Load the fields from a node's style, falling back per attribute.
    pub fn from_style(style: &Style) -> Self {
        let fallback = Self::selection_fallback();
        Self {
            stroke: style.stroke.unwrap_or(fallback.stroke),
            stroke_width: style.stroke_width.unwrap_or(fallback.stroke_width),
            fill: style.fill.unwrap_or(fallback.fill),
        }
    }

    pub fn get(&self, attr: StyleAttr) -> StyleValue {
        match attr {
            StyleAttr::Stroke => StyleValue::Paint(self.stroke),
            StyleAttr::StrokeWidth => StyleValue::Width(self.stroke_width),
            StyleAttr::Fill => StyleValue::Paint(self.fill),
        }
    }

    /// Update one field. A value of the wrong type for `attr` is ignored.
    pub fn set(&mut self, attr: StyleAttr, value: StyleValue) {
        match (attr, value) {
            (StyleAttr::Stroke, StyleValue::Paint(p)) => self.stroke = p,
            (StyleAttr::Fill, StyleValue::Paint(p)) => self.fill = p,
            (StyleAttr::StrokeWidth, StyleValue::Width(w)) => self.stroke_width = w,
            (attr, value) => {
                log::warn!("ignoring {value:?} for input {}", attr.name());
            }
        }
    }

    /// Full node style for a newly placed shape.
    pub fn to_style(&self) -> Style {
        Style {
            stroke: Some(self.stroke),
            stroke_width: Some(self.stroke_width),
            fill: Some(self.fill),
        }
    }
}

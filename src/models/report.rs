//! Report data model
//!
//! A [`Background`] is the uploaded SVG template together with the canvas
//! size it is declared to have. A [`PositionedVariable`] is one text field
//! placed on that canvas, in the template's own coordinate space.

use serde::{Deserialize, Serialize};

use crate::models::defaults::{
    A4_HEIGHT, A4_WIDTH, DEFAULT_FILL, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
};

/// SVG template used as the report canvas
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Background {
    /// Raw SVG markup
    pub svg: String,

    /// Declared canvas width; overrides whatever the markup says
    pub width: f64,

    /// Declared canvas height; overrides whatever the markup says
    pub height: f64,
}

impl Background {
    pub fn new(svg: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            svg: svg.into(),
            width,
            height,
        }
    }

    /// Background with the A4 (300 dpi) canvas size
    pub fn a4(svg: impl Into<String>) -> Self {
        Self::new(svg, A4_WIDTH, A4_HEIGHT)
    }
}

/// One text field placed on the background
///
/// Optional styling is kept as supplied; use the `effective_*` accessors to
/// read the value the merger will actually render.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PositionedVariable {
    /// Form field identifier (e.g. `titulo`)
    #[serde(default)]
    pub id: String,

    /// Display label shown in place of empty text on the preview
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub text: String,

    /// Document-space coordinates
    pub x: f64,
    pub y: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Maximum line width; enables word wrapping when set
    #[serde(
        default,
        rename = "width",
        alias = "maxWidth",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_width: Option<f64>,
}

impl PositionedVariable {
    /// Create a variable with text at a position, all styling defaulted
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.id = id.into();
        self.label = label.into();
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = Some(font_family.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Font size to render; zero and NaN count as unset
    pub fn effective_font_size(&self) -> f64 {
        self.font_size.filter(|s| is_set(*s)).unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn effective_font_family(&self) -> &str {
        self.font_family
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn effective_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_FILL)
    }

    /// Wrap width, if wrapping applies (zero and NaN disable it)
    pub fn wrap_width(&self) -> Option<f64> {
        self.max_width.filter(|w| is_set(*w))
    }
}

fn is_set(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

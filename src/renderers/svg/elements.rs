//! SVG text elements for overlaid report variables
//!
//! Builds the `<text>` node for a [`PositionedVariable`], wrapping it into
//! `<tspan>` sub-lines when a maximum width is set.

use crate::models::defaults::GLYPH_WIDTH_FACTOR;
use crate::models::PositionedVariable;

/// Estimated rendered width of a line: characters × average glyph width
///
/// Characters are counted in UTF-16 code units, the unit browsers report
/// for string length.
pub fn estimate_line_width(line: &str, font_size: f64) -> f64 {
    line.encode_utf16().count() as f64 * (font_size * GLYPH_WIDTH_FACTOR)
}

/// Greedy word wrap against [`estimate_line_width`]
///
/// Words are separated by single spaces and every line keeps the space that
/// follows its last word; the measured candidate includes that space. The
/// first word always stays on the first line, and a word that does not fit
/// on its own still gets a line to itself.
pub fn wrap_text(text: &str, font_size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for (index, word) in text.split(' ').enumerate() {
        let candidate = format!("{}{} ", line, word);
        if estimate_line_width(&candidate, font_size) > max_width && index > 0 {
            lines.push(std::mem::replace(&mut line, format!("{} ", word)));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

/// Render a coordinate or size the way JavaScript's `Number#toString` does:
/// plain decimals for exponents in `-7 < e < 21`, exponent form otherwise
/// (`1e+21`, `1.5e-7`). Negative zero becomes `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let name = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return name.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    match exponent.parse::<i32>() {
        Ok(exp) if exp <= -7 || exp >= 21 => {
            let sign = if exp >= 0 { "+" } else { "" };
            format!("{}e{}{}", mantissa, sign, exp)
        }
        _ => value.to_string(),
    }
}

/// One wrapped line of a text element
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    pub x: f64,
    /// Vertical offset from the previous line, or from `y` on the first
    pub dy: f64,
    pub text: String,
}

/// Content of a `<text>` element: plain text or wrapped lines
#[derive(Clone, Debug, PartialEq)]
pub enum TextContent {
    Plain(String),
    Lines(Vec<TextSpan>),
}

/// A `<text>` element ready to be appended to a document
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub font_family: String,
    pub fill: String,
    pub content: TextContent,
}

impl TextElement {
    pub fn from_variable(variable: &PositionedVariable) -> Self {
        let font_size = variable.effective_font_size();

        let content = match variable.wrap_width() {
            None => TextContent::Plain(variable.text.clone()),
            Some(max_width) => {
                let spans = wrap_text(&variable.text, font_size, max_width)
                    .into_iter()
                    .map(|text| TextSpan {
                        x: variable.x,
                        dy: font_size,
                        text,
                    })
                    .collect();
                TextContent::Lines(spans)
            }
        };

        Self {
            x: variable.x,
            y: variable.y,
            font_size,
            font_family: variable.effective_font_family().to_string(),
            fill: variable.effective_color().to_string(),
            content,
        }
    }

    /// Attributes in output order
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("x", format_number(self.x)),
            ("y", format_number(self.y)),
            ("font-size", format_number(self.font_size)),
            ("font-family", self.font_family.clone()),
            ("fill", self.fill.clone()),
        ]
    }

    pub fn line_count(&self) -> usize {
        match &self.content {
            TextContent::Plain(_) => 1,
            TextContent::Lines(spans) => spans.len(),
        }
    }
}

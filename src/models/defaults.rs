//! Default values for report generation
//!
//! Canvas size, text styling and export constants shared by the merger,
//! the layout session and the WASM API.

/// Default font size for overlaid text (SVG user units)
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Default font family for overlaid text
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Default fill colour for overlaid text
pub const DEFAULT_FILL: &str = "#000000";

/// Average glyph width as a fraction of the font size.
/// Not tied to any font's metrics; wrap decisions depend on this exact value.
pub const GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// A4 at 300 dpi, the canvas declared for every uploaded template
pub const A4_WIDTH: f64 = 2480.0;
pub const A4_HEIGHT: f64 = 3508.0;

/// Upper bound for the preview scale (20% of the original size)
pub const MAX_PREVIEW_SCALE: f64 = 0.2;

/// SVG namespace for appended text elements
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Header written in front of every exported document
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Suggested file name for the exported report
pub const EXPORT_FILE_NAME: &str = "relatorio.svg";

/// MIME type of the exported report
pub const EXPORT_MIME_TYPE: &str = "image/svg+xml";

//! Renderers for report output
//!
//! Currently a single SVG backend that overlays text on a template.

pub mod svg;

pub use svg::{merge, ReportError, ReportGenerator};

//! Report Merger WASM Module
//!
//! Overlays positioned text fields (title, date, responsible person,
//! description, location) on an uploaded SVG template and exports the
//! merged document.

pub mod models;
pub mod renderers;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use models::{Background, PositionedVariable, ReportField, ReportForm, ReportLayout};
pub use renderers::svg::{merge, ReportError, ReportGenerator};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        crate::wasm_warn!("Logger already initialized");
    }

    log::info!("Report merger WASM module initialized");
}

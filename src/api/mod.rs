//! Report Merger WASM API
//!
//! This module provides the JavaScript-facing API for the report merger.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling, and logging
//! - `report`: Report generation, layout session, and preview mapping

pub mod helpers;
pub mod report;

pub use report::{
    document_to_screen, export_file_name, export_mime_type, merge_report, preview_scale, report_fields,
    screen_to_document, WasmReportGenerator, WasmReportLayout,
};

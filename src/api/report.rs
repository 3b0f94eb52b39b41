//! Report operations for the WASM API
//!
//! - `ReportGenerator`: background + variables → merged SVG
//! - `ReportLayout`: the editing session (form values, placed fields)
//! - Free functions for one-shot merges and preview coordinate mapping

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, js_error, parse_field, serialize};
use crate::models::defaults::{A4_HEIGHT, A4_WIDTH, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use crate::models::{self, Background, PositionedVariable, ReportField};
use crate::renderers::svg;
use crate::utils::viewport::{self, Point};
use crate::{wasm_info, wasm_log};

// ============================================================================
// ReportGenerator
// ============================================================================

/// Collects a background and positioned variables, then exports the report
#[wasm_bindgen(js_name = ReportGenerator)]
#[derive(Default)]
pub struct WasmReportGenerator {
    inner: svg::ReportGenerator,
}

#[wasm_bindgen(js_class = ReportGenerator)]
impl WasmReportGenerator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template: `{ svg, width, height }`
    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, background: JsValue) -> Result<(), JsValue> {
        let background: Background = deserialize(background, "Invalid background")?;
        wasm_log!(
            "setBackground: {} bytes, {}x{}",
            background.svg.len(),
            background.width,
            background.height
        );
        self.inner.set_background(background);
        Ok(())
    }

    /// Add a positioned variable: `{ text, x, y, fontSize?, fontFamily?, color?, width? }`
    #[wasm_bindgen(js_name = addVariable)]
    pub fn add_variable(&mut self, variable: JsValue) -> Result<(), JsValue> {
        let variable: PositionedVariable = deserialize(variable, "Invalid variable")?;
        self.inner.add_variable(variable);
        Ok(())
    }

    /// Merge everything into an SVG string; throws if no background is set
    #[wasm_bindgen(js_name = generateReport)]
    pub fn generate_report(&self) -> Result<String, JsValue> {
        wasm_info!(
            "generateReport called ({} variables)",
            self.inner.variables().len()
        );
        self.inner
            .generate()
            .map_err(|e| js_error("Report generation failed", e))
    }
}

// ============================================================================
// ReportLayout
// ============================================================================

/// Editing session: template, form values and placed fields
#[wasm_bindgen(js_name = ReportLayout)]
#[derive(Default)]
pub struct WasmReportLayout {
    inner: models::ReportLayout,
}

#[wasm_bindgen(js_class = ReportLayout)]
impl WasmReportLayout {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template markup; the canvas defaults to A4 at 300 dpi
    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, svg: String, width: Option<f64>, height: Option<f64>) {
        let background = Background::new(
            svg,
            width.unwrap_or(A4_WIDTH),
            height.unwrap_or(A4_HEIGHT),
        );
        self.inner.set_background(background);
    }

    #[wasm_bindgen(js_name = hasBackground)]
    pub fn has_background(&self) -> bool {
        self.inner.has_background()
    }

    /// Canvas width of the current template, if any
    #[wasm_bindgen(js_name = canvasWidth)]
    pub fn canvas_width(&self) -> Option<f64> {
        self.inner.background.as_ref().map(|b| b.width)
    }

    #[wasm_bindgen(js_name = setFieldText)]
    pub fn set_field_text(&mut self, id: &str, value: String) -> Result<(), JsValue> {
        let field = parse_field(id)?;
        self.inner.set_field_text(field, value);
        Ok(())
    }

    /// Place (or move) a field at document coordinates
    #[wasm_bindgen(js_name = placeField)]
    pub fn place_field(&mut self, id: &str, x: f64, y: f64) -> Result<(), JsValue> {
        let field = parse_field(id)?;
        self.inner.place_field(field, x, y);
        Ok(())
    }

    #[wasm_bindgen(js_name = setFontSize)]
    pub fn set_font_size(&mut self, id: &str, font_size: f64) -> Result<(), JsValue> {
        let field = parse_field(id)?;
        self.inner
            .set_font_size(field, font_size)
            .map_err(|e| js_error("setFontSize failed", e))
    }

    #[wasm_bindgen(js_name = removeField)]
    pub fn remove_field(&mut self, id: &str) -> Result<bool, JsValue> {
        let field = parse_field(id)?;
        Ok(self.inner.remove_field(field))
    }

    /// Placed fields in placement order
    pub fn variables(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.placed, "Failed to serialize variables")
    }

    #[wasm_bindgen(js_name = generateReport)]
    pub fn generate_report(&self) -> Result<String, JsValue> {
        wasm_info!(
            "generateReport called ({} placed fields)",
            self.inner.placed.len()
        );
        self.inner
            .generate()
            .map_err(|e| js_error("Report generation failed", e))
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// One-shot merge of a background and an array of variables
#[wasm_bindgen(js_name = mergeReport)]
pub fn merge_report(background: JsValue, variables: JsValue) -> Result<String, JsValue> {
    let background: Background = deserialize(background, "Invalid background")?;
    let variables: Vec<PositionedVariable> = deserialize(variables, "Invalid variables")?;
    svg::merge(&background, &variables).map_err(|e| js_error("Report generation failed", e))
}

/// Preview scale for a container width, capped at 20%
#[wasm_bindgen(js_name = previewScale)]
pub fn preview_scale(container_width: f64, canvas_width: f64) -> f64 {
    viewport::preview_scale(container_width, canvas_width)
}

/// Map a drop position on the preview to document coordinates: `{ x, y }`
#[wasm_bindgen(js_name = screenToDocument)]
pub fn screen_to_document(
    client_x: f64,
    client_y: f64,
    origin_x: f64,
    origin_y: f64,
    scale: f64,
) -> Result<JsValue, JsValue> {
    let point = viewport::screen_to_document(
        Point::new(client_x, client_y),
        Point::new(origin_x, origin_y),
        scale,
    )
    .map_err(|e| js_error("screenToDocument failed", e))?;
    serialize(&point, "Failed to serialize point")
}

/// Map a document position back onto the preview: `{ x, y }`
#[wasm_bindgen(js_name = documentToScreen)]
pub fn document_to_screen(
    doc_x: f64,
    doc_y: f64,
    origin_x: f64,
    origin_y: f64,
    scale: f64,
) -> Result<JsValue, JsValue> {
    let point = viewport::document_to_screen(
        Point::new(doc_x, doc_y),
        Point::new(origin_x, origin_y),
        scale,
    )
    .map_err(|e| js_error("documentToScreen failed", e))?;
    serialize(&point, "Failed to serialize point")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldInfo {
    id: &'static str,
    label: String,
    multiline: bool,
}

/// Report fields in form order: `[{ id, label, multiline }]`
#[wasm_bindgen(js_name = reportFields)]
pub fn report_fields() -> Result<JsValue, JsValue> {
    let fields: Vec<FieldInfo> = ReportField::ALL
        .into_iter()
        .map(|field| FieldInfo {
            id: field.id(),
            label: field.label(),
            multiline: field.is_multiline(),
        })
        .collect();
    serialize(&fields, "Failed to serialize fields")
}

#[wasm_bindgen(js_name = exportFileName)]
pub fn export_file_name() -> String {
    EXPORT_FILE_NAME.to_string()
}

#[wasm_bindgen(js_name = exportMimeType)]
pub fn export_mime_type() -> String {
    EXPORT_MIME_TYPE.to_string()
}

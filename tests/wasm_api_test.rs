//! WASM API test
//!
//! Exercises the JavaScript-facing classes in a browser.

#![cfg(target_arch = "wasm32")]

use report_merger_wasm::api::{
    document_to_screen, export_mime_type, merge_report, preview_scale, screen_to_document,
    WasmReportGenerator, WasmReportLayout,
};
use report_merger_wasm::utils::viewport::Point;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;

fn background_value() -> JsValue {
    let background = report_merger_wasm::Background::new(TEMPLATE, 2480.0, 3508.0);
    serde_wasm_bindgen::to_value(&background).unwrap()
}

#[wasm_bindgen_test]
fn test_generator_requires_background() {
    let generator = WasmReportGenerator::new();
    assert!(generator.generate_report().is_err());
}

#[wasm_bindgen_test]
fn test_generator_merges_variables() {
    let mut generator = WasmReportGenerator::new();
    generator.set_background(background_value()).unwrap();

    let variable = report_merger_wasm::PositionedVariable::new("Relatório Mensal", 100.0, 200.0);
    generator
        .add_variable(serde_wasm_bindgen::to_value(&variable).unwrap())
        .unwrap();

    let svg = generator.generate_report().unwrap();
    assert!(svg.contains(">Relatório Mensal</text>"));
}

#[wasm_bindgen_test]
fn test_layout_rejects_unknown_field() {
    let mut layout = WasmReportLayout::new();
    assert!(layout.place_field("assinatura", 0.0, 0.0).is_err());
}

#[wasm_bindgen_test]
fn test_layout_defaults_to_a4_canvas() {
    let mut layout = WasmReportLayout::new();
    layout.set_background(TEMPLATE.to_string(), None, None);
    assert!(layout.has_background());
    assert_eq!(layout.canvas_width(), Some(2480.0));

    layout.set_field_text("titulo", "Título".to_string()).unwrap();
    layout.place_field("titulo", 10.0, 20.0).unwrap();
    let svg = layout.generate_report().unwrap();
    assert!(svg.contains(r#"viewBox="0 0 2480 3508""#));
    assert!(svg.contains(">Título</text>"));
}

#[wasm_bindgen_test]
fn test_free_functions() {
    let variables = serde_wasm_bindgen::to_value(&Vec::<report_merger_wasm::PositionedVariable>::new()).unwrap();
    let svg = merge_report(background_value(), variables).unwrap();
    assert!(svg.contains(r#"width="2480""#));
    assert_eq!(preview_scale(248.0, 2480.0), 0.1);
    assert_eq!(export_mime_type(), "image/svg+xml");
}

#[wasm_bindgen_test]
fn test_coordinate_mapping_round_trips() {
    let on_screen = document_to_screen(1000.0, 500.0, 40.0, 60.0, 0.1).unwrap();
    let on_screen: Point = serde_wasm_bindgen::from_value(on_screen).unwrap();
    assert_eq!(on_screen, Point::new(140.0, 110.0));

    let back = screen_to_document(on_screen.x, on_screen.y, 40.0, 60.0, 0.1).unwrap();
    let back: Point = serde_wasm_bindgen::from_value(back).unwrap();
    assert!((back.x - 1000.0).abs() < 1e-9 && (back.y - 500.0).abs() < 1e-9);

    assert!(document_to_screen(0.0, 0.0, 0.0, 0.0, 0.0).is_err());
}

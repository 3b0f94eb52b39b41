//! Preview viewport mapping
//!
//! The preview shows the template scaled down to fit its container. Field
//! positions are always stored in document space, so pointer positions on
//! the preview have to be mapped back through the scale.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::defaults::MAX_PREVIEW_SCALE;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("Invalid preview scale: {0} (must be a positive finite number)")]
    InvalidScale(f64),
}

/// A point in either screen or document space
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scale that fits the canvas width into the container, capped at 20%
pub fn preview_scale(container_width: f64, canvas_width: f64) -> f64 {
    if canvas_width <= 0.0 || canvas_width.is_nan() {
        return MAX_PREVIEW_SCALE;
    }
    (container_width / canvas_width).min(MAX_PREVIEW_SCALE)
}

/// Map a pointer position on the preview to document coordinates
///
/// `origin` is the preview's top-left corner in the same screen space as
/// `client`.
pub fn screen_to_document(client: Point, origin: Point, scale: f64) -> Result<Point, ViewportError> {
    validate_scale(scale)?;
    Ok(Point {
        x: (client.x - origin.x) / scale,
        y: (client.y - origin.y) / scale,
    })
}

/// Map document coordinates to a position on the preview
pub fn document_to_screen(point: Point, origin: Point, scale: f64) -> Result<Point, ViewportError> {
    validate_scale(scale)?;
    Ok(Point {
        x: origin.x + point.x * scale,
        y: origin.y + point.y * scale,
    })
}

fn validate_scale(scale: f64) -> Result<(), ViewportError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(ViewportError::InvalidScale(scale))
    }
}

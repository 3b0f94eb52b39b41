//! Report layout session
//!
//! Holds what the front end edits between exports: the current template,
//! the form values, and the fields placed on the canvas. Export builds a
//! fresh [`ReportGenerator`] from this state each time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::defaults::{DEFAULT_FILL, DEFAULT_FONT_SIZE};
use crate::models::{Background, PositionedVariable, ReportField, ReportForm};
use crate::renderers::svg::{ReportError, ReportGenerator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Field '{0}' has not been placed on the template")]
    NotPlaced(ReportField),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ReportLayout {
    pub background: Option<Background>,
    pub form: ReportForm,
    /// Placed fields, in placement order
    pub placed: Vec<PositionedVariable>,
}

impl ReportLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the template; placements are kept
    pub fn set_background(&mut self, background: Background) {
        log::info!(
            "Template set: {} bytes, canvas {}x{}",
            background.svg.len(),
            background.width,
            background.height
        );
        self.background = Some(background);
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Update a form value and the text of its placed variable, if any
    pub fn set_field_text(&mut self, field: ReportField, value: impl Into<String>) {
        let value = value.into();
        if let Some(variable) = self.placed_mut(field) {
            variable.text = value.clone();
        }
        self.form.set(field, value);
    }

    /// Place a field at document coordinates, or move it if already placed
    pub fn place_field(&mut self, field: ReportField, x: f64, y: f64) {
        if let Some(variable) = self.placed_mut(field) {
            variable.x = x;
            variable.y = y;
            log::debug!("Moved '{}' to ({}, {})", field, x, y);
            return;
        }

        let variable = PositionedVariable::new(self.form.get(field), x, y)
            .with_id(field.id(), field.label())
            .with_font_size(DEFAULT_FONT_SIZE)
            .with_color(DEFAULT_FILL);
        log::debug!("Placed '{}' at ({}, {})", field, x, y);
        self.placed.push(variable);
    }

    pub fn set_font_size(&mut self, field: ReportField, font_size: f64) -> Result<(), LayoutError> {
        let variable = self
            .placed_mut(field)
            .ok_or(LayoutError::NotPlaced(field))?;
        variable.font_size = Some(font_size);
        Ok(())
    }

    /// Returns whether the field was placed
    pub fn remove_field(&mut self, field: ReportField) -> bool {
        let before = self.placed.len();
        self.placed.retain(|v| v.id != field.id());
        self.placed.len() != before
    }

    pub fn placed(&self, field: ReportField) -> Option<&PositionedVariable> {
        self.placed.iter().find(|v| v.id == field.id())
    }

    fn placed_mut(&mut self, field: ReportField) -> Option<&mut PositionedVariable> {
        self.placed.iter_mut().find(|v| v.id == field.id())
    }

    pub fn generator(&self) -> ReportGenerator {
        let mut generator = ReportGenerator::new();
        if let Some(background) = &self.background {
            generator.set_background(background.clone());
        }
        for variable in &self.placed {
            generator.add_variable(variable.clone());
        }
        generator
    }

    pub fn generate(&self) -> Result<String, ReportError> {
        self.generator().generate()
    }
}

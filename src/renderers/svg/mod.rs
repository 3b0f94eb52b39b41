//! SVG report rendering
//!
//! Merges positioned text variables into an uploaded SVG template.

pub mod elements;
pub mod document;

pub use elements::*;
pub use document::*;

use std::string::FromUtf8Error;

use thiserror::Error;

use crate::models::{Background, PositionedVariable};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Background has not been set")]
    MissingBackground,

    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    Markup(#[from] quick_xml::Error),

    #[error("serialized document is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// Merge variables into the background and serialize the result
///
/// The root element's width, height and viewBox are forced to the
/// background's declared size. Variables are appended in order, after all
/// template content, so later ones paint over earlier ones.
pub fn merge(
    background: &Background,
    variables: &[PositionedVariable],
) -> Result<String, ReportError> {
    let mut document = SvgDocument::parse(&background.svg)?;
    document.set_canvas_size(background.width, background.height);

    for variable in variables {
        let element = TextElement::from_variable(variable);
        log::debug!(
            "Appending '{}' at ({}, {}), {} line(s)",
            variable.id,
            variable.x,
            variable.y,
            element.line_count()
        );
        document.append_text(element);
    }

    let output = document.serialize()?;
    log::info!(
        "Report merged: {} variable(s), {} bytes",
        document.overlay_count(),
        output.len()
    );
    Ok(output)
}

/// Collects a background and variables, then merges them on demand
#[derive(Clone, Debug, Default)]
pub struct ReportGenerator {
    background: Option<Background>,
    variables: Vec<PositionedVariable>,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }

    pub fn add_variable(&mut self, variable: PositionedVariable) {
        self.variables.push(variable);
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn variables(&self) -> &[PositionedVariable] {
        &self.variables
    }

    /// Fails with [`ReportError::MissingBackground`] if no background is set
    pub fn generate(&self) -> Result<String, ReportError> {
        let background = self
            .background
            .as_ref()
            .ok_or(ReportError::MissingBackground)?;
        merge(background, &self.variables)
    }
}

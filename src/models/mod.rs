//! Models module for the report merger
//!
//! This module contains the data models for templates, positioned
//! variables, the report form, and the layout session.

pub mod defaults;
pub mod fields;
pub mod layout;
pub mod report;

// Re-export commonly used types
pub use fields::{FieldError, ReportField, ReportForm};
pub use layout::{LayoutError, ReportLayout};
pub use report::{Background, PositionedVariable};

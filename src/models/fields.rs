//! Report form fields
//!
//! The fixed set of text fields a report template can carry. Identifiers are
//! the form names used by the front end and double as variable ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Unknown report field: '{0}'")]
    UnknownField(String),
}

/// One of the report's text fields
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportField {
    #[serde(rename = "titulo")]
    Title,
    #[serde(rename = "data")]
    Date,
    #[serde(rename = "responsavel")]
    Responsible,
    #[serde(rename = "descricao")]
    Description,
    #[serde(rename = "local")]
    Location,
}

impl ReportField {
    /// All fields, in form order
    pub const ALL: [ReportField; 5] = [
        ReportField::Title,
        ReportField::Date,
        ReportField::Responsible,
        ReportField::Description,
        ReportField::Location,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ReportField::Title => "titulo",
            ReportField::Date => "data",
            ReportField::Responsible => "responsavel",
            ReportField::Description => "descricao",
            ReportField::Location => "local",
        }
    }

    /// Identifier with its first character upper-cased
    pub fn label(self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Multi-line fields are edited in a text area rather than a single line
    pub fn is_multiline(self) -> bool {
        matches!(self, ReportField::Description)
    }
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ReportField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportField::ALL
            .into_iter()
            .find(|field| field.id() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// Current value of every report field
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ReportForm {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub responsavel: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub local: String,
}

impl ReportForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ReportField) -> &str {
        match field {
            ReportField::Title => &self.titulo,
            ReportField::Date => &self.data,
            ReportField::Responsible => &self.responsavel,
            ReportField::Description => &self.descricao,
            ReportField::Location => &self.local,
        }
    }

    pub fn set(&mut self, field: ReportField, value: impl Into<String>) {
        let slot = match field {
            ReportField::Title => &mut self.titulo,
            ReportField::Date => &mut self.data,
            ReportField::Responsible => &mut self.responsavel,
            ReportField::Description => &mut self.descricao,
            ReportField::Location => &mut self.local,
        };
        *slot = value.into();
    }
}

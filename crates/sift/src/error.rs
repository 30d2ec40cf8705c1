//! Error types for the sift crate.

use std::num::ParseIntError;

use thiserror::Error;

use crate::op::Op;

/// Errors that can occur while compiling a search criterion.
#[derive(Debug, Error)]
pub enum SiftError {
    /// A path segment or terminal field has no matching attribute.
    #[error("field '{field}' not found on {schema}")]
    FieldNotFound { field: String, schema: String },

    /// The raw value could not be converted to the field's type.
    ///
    /// The underlying conversion error is kept as the source for logging
    /// but is not part of the display message.
    #[error("could not parse input for the field {field} as a {expected}")]
    BadInput {
        field: String,
        expected: String,
        #[source]
        source: ConversionError,
    },

    /// The field's declared type has no registered strategy.
    #[error("field '{field}' has type {type_name}, which has no search strategy")]
    UnsupportedType { field: String, type_name: String },

    /// The criterion key is empty or contains an empty path segment.
    #[error("invalid search key: '{0}'")]
    InvalidKey(String),

    /// The operator token is not recognized.
    #[error("unknown operator: '{0}'")]
    UnknownOperator(String),

    /// Operator is not valid for the field's value kind.
    #[error("operator '{op}' is not valid for {kind} values")]
    InvalidOperator { op: Op, kind: &'static str },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Search configuration could not be loaded.
    #[error("invalid search configuration: {0}")]
    Config(String),
}

impl SiftError {
    pub(crate) fn field_not_found(field: impl Into<String>, schema: impl Into<String>) -> Self {
        SiftError::FieldNotFound {
            field: field.into(),
            schema: schema.into(),
        }
    }

    /// Returns the HTTP-equivalent classification of this error.
    pub fn status(&self) -> Status {
        match self {
            SiftError::FieldNotFound { .. } => Status::UnprocessableEntity,
            SiftError::UnsupportedType { .. } | SiftError::Config(_) => Status::Internal,
            SiftError::BadInput { .. }
            | SiftError::InvalidKey(_)
            | SiftError::UnknownOperator(_)
            | SiftError::InvalidOperator { .. }
            | SiftError::InvalidRegex(_) => Status::BadRequest,
        }
    }

    /// Returns the offending field name, when the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            SiftError::FieldNotFound { field, .. }
            | SiftError::BadInput { field, .. }
            | SiftError::UnsupportedType { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Request-rejection classification for caller-facing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The request carried a value or operator that cannot be used.
    BadRequest,
    /// The request referenced a field the schema does not have.
    UnprocessableEntity,
    /// The schema or configuration is defective.
    Internal,
}

impl Status {
    /// Returns the HTTP status code for this classification.
    pub fn code(self) -> u16 {
        match self {
            Status::BadRequest => 400,
            Status::UnprocessableEntity => 422,
            Status::Internal => 500,
        }
    }
}

/// Low-level failure raised by a strategy while converting a raw value.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Integer(#[from] ParseIntError),

    #[error(transparent)]
    Decimal(#[from] rust_decimal::Error),

    #[error("'{0}' is not a boolean literal")]
    Boolean(String),

    #[error("'{0}' is not a recognized date or date-time")]
    Temporal(String),

    #[error("'{literal}' is not a variant of {type_name}")]
    UnknownVariant { literal: String, type_name: String },
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

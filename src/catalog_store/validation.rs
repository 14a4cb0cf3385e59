//! Validation for catalog input.
//!
//! Runs before any store mutation so that malformed entries never reach the
//! database.

use super::models::{CompoundKey, NewCatalogEntry};
use crate::error::LibraryError;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    NonPositiveValue { field: &'static str, value: i64 },
    NegativeValue { field: &'static str, value: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::NonPositiveValue { field, value } => {
                write!(f, "Field '{}' must be positive, got {}", field, value)
            }
            ValidationError::NegativeValue { field, value } => {
                write!(f, "Field '{}' must be non-negative, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for LibraryError {
    fn from(err: ValidationError) -> Self {
        LibraryError::InvalidInput(err.to_string())
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn validate_non_empty(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

pub fn validate_positive(field: &'static str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveValue { field, value });
    }
    Ok(())
}

pub fn validate_compound_key(key: &CompoundKey) -> ValidationResult<()> {
    validate_non_empty("artist", &key.artist)?;
    validate_non_empty("title", &key.title)?;
    validate_positive("year", key.year)
}

pub fn validate_new_entry(entry: &NewCatalogEntry) -> ValidationResult<()> {
    validate_non_empty("artist", &entry.artist)?;
    validate_non_empty("title", &entry.title)?;
    validate_positive("year", entry.year)?;
    validate_non_empty("genre", &entry.genre)?;
    if entry.duration < 0 {
        return Err(ValidationError::NegativeValue {
            field: "duration",
            value: entry.duration,
        });
    }
    Ok(())
}

//! Structural checks on a parsed character

use serde::Serialize;

use crate::model::Character;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Check every rule and collect all violations
pub fn validate_character(character: &Character) -> ValidationResult {
    let mut errors = Vec::new();

    if character.id <= 0 {
        errors.push(ValidationError::new("id", "ID must be positive"));
    }

    if character.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Name cannot be empty"));
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

//! Error types for the ReadSphere platform
//!
//! Domain-level failures shared by every ReadSphere service. Storage and
//! transport layers wrap their own errors before crossing a crate boundary.

use thiserror::Error;

/// Platform-wide error type
#[derive(Debug, Error)]
pub enum ReadSphereError {
    /// A domain value failed validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested resource does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Configuration is missing or malformed
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ReadSphereError {
    /// Shorthand for a validation failure with a formatted message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_message() {
        let err = ReadSphereError::validation("rating must be between 1 and 5");
        assert_eq!(
            err.to_string(),
            "validation failed: rating must be between 1 and 5"
        );
    }

    #[test]
    fn not_found_names_resource_and_id() {
        let err = ReadSphereError::NotFound {
            resource: "book",
            id: "42".to_string(),
        };
        assert!(err.to_string().contains("book not found"));
    }
}

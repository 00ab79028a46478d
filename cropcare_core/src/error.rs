//! Error types for the cropcare_core library.

use std::io;
use std::time::Duration;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cropcare_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP transport error from an upstream collaborator
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// The disease identifier matched nothing in the catalog
    #[error("Disease not found: {identifier}.{}", suggestion_hint(.suggestions))]
    NotFound {
        identifier: String,
        suggestions: Vec<String>,
    },

    /// The geocoder had no coordinates for a location
    #[error("Could not find coordinates for location: {0}")]
    LocationNotFound(String),

    /// A request field was malformed
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// A collaborator call exceeded its time bound
    #[error("{collaborator} did not answer within {after:?}")]
    UpstreamTimeout {
        collaborator: String,
        after: Duration,
    },

    /// A collaborator call failed for any other reason
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl Error {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Suggestions carried by a `NotFound`, empty for every other variant.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Error::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" Did you mean: {}?", suggestions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_lists_suggestions() {
        let err = Error::NotFound {
            identifier: "rust_leaf".into(),
            suggestions: vec!["red_rust".into(), "leaf_miner".into()],
        };
        assert_eq!(
            err.to_string(),
            "Disease not found: rust_leaf. Did you mean: red_rust, leaf_miner?"
        );
        assert_eq!(err.suggestions().len(), 2);
    }

    #[test]
    fn test_not_found_without_suggestions() {
        let err = Error::NotFound {
            identifier: "xyz".into(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "Disease not found: xyz.");
    }

    #[test]
    fn test_invalid_input_names_field() {
        let err = Error::invalid_input("severity", "unknown level 'extreme'");
        assert!(err.to_string().contains("severity"));
        assert!(err.suggestions().is_empty());
    }
}

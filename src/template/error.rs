//! Errors for resolving and writing key templates

use thiserror::Error;

use crate::schema::SchemaError;
use crate::ParseError;

/// Errors that end a create-key-template invocation
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Type URL is empty or cannot appear in a template
    #[error("invalid type URL '{type_url}': {reason}")]
    InvalidIdentifier { type_url: String, reason: String },

    /// Key format given for a type URL with no known schema
    #[error("no key format is registered for type URL '{type_url}'")]
    UnknownIdentifier {
        type_url: String,
        #[source]
        source: SchemaError,
    },

    /// Key format text does not parse against the schema
    #[error("malformed key format \"{text}\": {}", format_parse_errors(.errors))]
    MalformedParameters {
        text: String,
        errors: Vec<ParseError>,
    },

    /// The output sink rejected a write
    #[error("failed to write key template: {0}")]
    WriteFailure(#[from] std::io::Error),
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

//! Template resolution - turns a type URL and optional key format text into a template

use crate::schema::SchemaLookup;

use super::binder::parse_text;
use super::error::TemplateError;
use super::key_template::KeyTemplate;

/// Resolve a type URL and optional key format into a [`KeyTemplate`]
///
/// Without a key format no schema lookup happens and the template has no
/// value. With one, the schema registered for `type_url` is looked up and
/// the text is parsed against it.
pub fn resolve<L>(
    type_url: &str,
    key_format: Option<&str>,
    lookup: &L,
) -> Result<KeyTemplate, TemplateError>
where
    L: SchemaLookup + ?Sized,
{
    validate_type_url(type_url)?;

    let Some(text) = key_format else {
        tracing::debug!(type_url, "resolved key template without key format");
        return Ok(KeyTemplate::new(type_url));
    };

    let schema = lookup
        .lookup_schema(type_url)
        .map_err(|source| TemplateError::UnknownIdentifier {
            type_url: type_url.to_string(),
            source,
        })?;

    let value = parse_text(&schema, text).map_err(|errors| {
        tracing::debug!(type_url, errors = errors.len(), "key format failed to parse");
        TemplateError::MalformedParameters {
            text: text.to_string(),
            errors,
        }
    })?;

    tracing::debug!(type_url, key_format = %schema.name, "resolved key template");
    Ok(KeyTemplate::new(type_url).with_value(value))
}

/// Reject type URLs that cannot be written into a template
///
/// Whitespace and control characters would break the single-line comment
/// and the quoted `type_url` value.
pub fn validate_type_url(type_url: &str) -> Result<(), TemplateError> {
    let invalid = |reason: &str| TemplateError::InvalidIdentifier {
        type_url: type_url.to_string(),
        reason: reason.to_string(),
    };

    if type_url.is_empty() {
        return Err(invalid("type URL must not be empty"));
    }
    if type_url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("type URL must not contain whitespace or control characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::sync::Arc;

    use crate::schema::{FieldKind, FieldSchema, MessageSchema, SchemaError};
    use crate::value::{Message, Value};
    use crate::ParseError;

    const URL: &str = "type.example.com/ExamplePrimitiveKey";

    /// Lookup that knows one type URL and counts how often it is asked
    struct FakeLookup {
        calls: Cell<usize>,
    }

    impl FakeLookup {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl SchemaLookup for FakeLookup {
        fn lookup_schema(&self, type_url: &str) -> Result<Arc<MessageSchema>, SchemaError> {
            self.calls.set(self.calls.get() + 1);
            if type_url != URL {
                return Err(SchemaError::UnknownTypeUrl {
                    type_url: type_url.to_string(),
                });
            }
            Ok(Arc::new(MessageSchema::new(
                "ExampleKeyFormat",
                vec![FieldSchema {
                    name: "key_size".to_string(),
                    number: 1,
                    kind: FieldKind::Uint32,
                    repeated: false,
                }],
            )))
        }
    }

    #[test]
    fn test_without_key_format_skips_lookup() {
        let lookup = FakeLookup::new();
        let template = resolve(URL, None, &lookup).expect("Should resolve");
        assert_eq!(template, KeyTemplate::new(URL));
        assert!(template.value.is_none());
        assert_eq!(lookup.calls.get(), 0);
    }

    #[test]
    fn test_with_key_format() {
        let lookup = FakeLookup::new();
        let template = resolve(URL, Some("key_size: 32"), &lookup).expect("Should resolve");
        assert_eq!(
            template.value,
            Some(Message::new("ExampleKeyFormat").with_field(1, "key_size", Value::UInt(32)))
        );
        assert_eq!(lookup.calls.get(), 1);
    }

    #[test]
    fn test_empty_key_format_is_still_present() {
        let lookup = FakeLookup::new();
        let template = resolve(URL, Some(""), &lookup).expect("Should resolve");
        assert_eq!(template.value, Some(Message::new("ExampleKeyFormat")));
    }

    #[test]
    fn test_empty_type_url() {
        let lookup = FakeLookup::new();
        let err = resolve("", Some("key_size: 32"), &lookup).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidIdentifier { .. }));
        assert_eq!(lookup.calls.get(), 0);
    }

    #[test]
    fn test_type_url_with_whitespace() {
        assert!(matches!(
            validate_type_url("type.example.com/A Key"),
            Err(TemplateError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            validate_type_url("type.example.com/A\nKey"),
            Err(TemplateError::InvalidIdentifier { .. })
        ));
        assert!(validate_type_url(URL).is_ok());
    }

    #[test]
    fn test_unknown_type_url_with_key_format() {
        let lookup = FakeLookup::new();
        let err = resolve("type.example.com/Other", Some("key_size: 32"), &lookup).unwrap_err();
        match err {
            TemplateError::UnknownIdentifier { type_url, source } => {
                assert_eq!(type_url, "type.example.com/Other");
                assert!(matches!(source, SchemaError::UnknownTypeUrl { .. }));
            }
            other => panic!("Expected unknown identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_url_without_key_format_is_fine() {
        let lookup = FakeLookup::new();
        assert!(resolve("type.example.com/Other", None, &lookup).is_ok());
    }

    #[test]
    fn test_malformed_key_format() {
        let lookup = FakeLookup::new();
        let err = resolve(URL, Some("key_size: not_a_number"), &lookup).unwrap_err();
        match err {
            TemplateError::MalformedParameters { text, errors } => {
                assert_eq!(text, "key_size: not_a_number");
                assert!(matches!(errors[0], ParseError::TypeMismatch { .. }));
            }
            other => panic!("Expected malformed parameters, got {:?}", other),
        }
    }
}

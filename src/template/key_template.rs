//! The key template value and reading it back from text

use crate::parser::{self, Literal, TextValue};
use crate::schema::SchemaLookup;
use crate::value::Message;
use crate::ParseError;

use super::binder::{bind_message, decode_pieces};
use super::error::TemplateError;
use super::resolver::validate_type_url;

/// A primitive's type URL plus optional key format parameters
///
/// `value` is `None` when no key format was requested, which is different
/// from a key format with no fields set.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTemplate {
    pub type_url: String,
    pub value: Option<Message>,
}

impl KeyTemplate {
    /// Template carrying only a type URL
    pub fn new(type_url: impl Into<String>) -> Self {
        Self {
            type_url: type_url.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: Message) -> Self {
        self.value = Some(value);
        self
    }

    /// Canonical text serialization (without a provenance header)
    pub fn to_text(&self) -> String {
        crate::renderer::render_key_template(self)
    }

    /// Read a template from its text serialization
    ///
    /// `#` comment lines are ignored, so the complete output of
    /// [`crate::create_key_template`] can be read back.
    pub fn from_text<L>(text: &str, lookup: &L) -> Result<Self, TemplateError>
    where
        L: SchemaLookup + ?Sized,
    {
        let malformed = |errors: Vec<ParseError>| TemplateError::MalformedParameters {
            text: text.to_string(),
            errors,
        };

        let doc = parser::parse(text).map_err(malformed)?;
        let mut errors = Vec::new();
        let mut type_url = None;
        let mut value_entries = Vec::new();

        for entry in &doc.fields {
            let value = &entry.node.value;
            match entry.node.name.node.as_str() {
                "type_url" => match &value.node {
                    TextValue::Scalar(Literal::String(pieces)) => match decode_type_url(pieces) {
                        Ok(url) => type_url = Some(url),
                        Err(reason) => errors.push(ParseError::InvalidLiteral {
                            span: value.span.clone(),
                            field: "type_url".to_string(),
                            reason,
                        }),
                    },
                    other => errors.push(ParseError::TypeMismatch {
                        span: value.span.clone(),
                        field: "type_url".to_string(),
                        expected: "string".to_string(),
                        found: other.describe(),
                    }),
                },
                "value" => match &value.node {
                    TextValue::Message(entries) => value_entries.push(entries),
                    other => errors.push(ParseError::TypeMismatch {
                        span: value.span.clone(),
                        field: "value".to_string(),
                        expected: "message".to_string(),
                        found: other.describe(),
                    }),
                },
                other => errors.push(ParseError::UnknownField {
                    span: entry.node.name.span.clone(),
                    field: other.to_string(),
                    message_type: "KeyTemplate".to_string(),
                }),
            }
        }

        if !errors.is_empty() {
            return Err(malformed(errors));
        }

        let type_url = type_url.unwrap_or_default();
        validate_type_url(&type_url)?;

        if value_entries.is_empty() {
            return Ok(Self::new(type_url));
        }

        let schema =
            lookup
                .lookup_schema(&type_url)
                .map_err(|source| TemplateError::UnknownIdentifier {
                    type_url: type_url.clone(),
                    source,
                })?;

        let mut value = Message::new(&schema.name);
        for entries in value_entries {
            value.merge_from(bind_message(&schema, entries, &mut errors));
        }
        if !errors.is_empty() {
            return Err(malformed(errors));
        }

        Ok(Self::new(type_url).with_value(value))
    }
}

fn decode_type_url(pieces: &[String]) -> Result<String, String> {
    let bytes = decode_pieces(pieces)?;
    String::from_utf8(bytes).map_err(|_| "type URL is not valid UTF-8".to_string())
}

//! Binding of untyped text format documents to a message schema

use std::num::IntErrorKind;

use crate::parser::{self, escape, FieldEntry, Literal, Span, Spanned, TextValue};
use crate::schema::{FieldKind, FieldSchema, MessageSchema};
use crate::value::{EnumValue, FieldValue, Message, Value};
use crate::ParseError;

/// Parse text format input as a message of the given schema
///
/// All diagnostics are collected; the result is an error if there is at
/// least one of them.
pub fn parse_text(schema: &MessageSchema, text: &str) -> Result<Message, Vec<ParseError>> {
    let doc = parser::parse(text)?;
    let mut errors = Vec::new();
    let message = bind_message(schema, &doc.fields, &mut errors);
    if errors.is_empty() {
        Ok(message)
    } else {
        Err(errors)
    }
}

pub(crate) fn bind_message(
    schema: &MessageSchema,
    entries: &[Spanned<FieldEntry>],
    errors: &mut Vec<ParseError>,
) -> Message {
    let mut message = Message::new(&schema.name);

    for entry in entries {
        let name = &entry.node.name;
        let Some(field) = schema.field_by_name(name.node.as_str()) else {
            errors.push(ParseError::UnknownField {
                span: name.span.clone(),
                field: name.node.to_string(),
                message_type: schema.name.clone(),
            });
            continue;
        };

        let value = &entry.node.value;
        if field.repeated {
            let items: Vec<Value> = match &value.node {
                TextValue::List(items) => items
                    .iter()
                    .filter_map(|item| bind_single(field, item, errors))
                    .collect(),
                _ => bind_single(field, value, errors).into_iter().collect(),
            };
            let leftover = match message.get_mut(field.number) {
                Some(FieldValue {
                    value: Value::List(existing),
                    ..
                }) => {
                    existing.extend(items);
                    None
                }
                _ => Some(items),
            };
            if let Some(items) = leftover {
                message.set(field.number, &field.name, Value::List(items));
            }
            continue;
        }

        if matches!(value.node, TextValue::List(_)) {
            errors.push(ParseError::TypeMismatch {
                span: value.span.clone(),
                field: field.name.clone(),
                expected: format!("a single {}", field.kind),
                found: "list".to_string(),
            });
            continue;
        }

        let Some(bound) = bind_single(field, value, errors) else {
            continue;
        };
        // Repeated singular messages merge; repeated scalars keep the last value
        let leftover = match (message.get_mut(field.number), bound) {
            (
                Some(FieldValue {
                    value: Value::Message(existing),
                    ..
                }),
                Value::Message(next),
            ) => {
                existing.merge_from(next);
                None
            }
            (_, bound) => Some(bound),
        };
        if let Some(bound) = leftover {
            message.set(field.number, &field.name, bound);
        }
    }

    message.clear_defaults();
    message
}

fn bind_single(
    field: &FieldSchema,
    value: &Spanned<TextValue>,
    errors: &mut Vec<ParseError>,
) -> Option<Value> {
    let mismatch = |found: String| ParseError::TypeMismatch {
        span: value.span.clone(),
        field: field.name.clone(),
        expected: field.kind.to_string(),
        found,
    };

    match (&field.kind, &value.node) {
        (FieldKind::Message(schema), TextValue::Message(entries)) => {
            Some(Value::Message(bind_message(schema, entries, errors)))
        }
        (_, TextValue::Scalar(lit)) if !matches!(field.kind, FieldKind::Message(_)) => {
            match bind_scalar(field, lit, &value.span) {
                Ok(v) => Some(v),
                Err(e) => {
                    errors.push(e);
                    None
                }
            }
        }
        (_, other) => {
            errors.push(mismatch(other.describe()));
            None
        }
    }
}

fn bind_scalar(field: &FieldSchema, lit: &Literal, span: &Span) -> Result<Value, ParseError> {
    let mismatch = || ParseError::TypeMismatch {
        span: span.clone(),
        field: field.name.clone(),
        expected: field.kind.to_string(),
        found: lit.describe(),
    };
    let invalid = |reason: String| ParseError::InvalidLiteral {
        span: span.clone(),
        field: field.name.clone(),
        reason,
    };

    match (&field.kind, lit) {
        (kind, Literal::Integer { negative, digits }) if kind.is_integer() => {
            let out_of_range = || ParseError::OutOfRange {
                span: span.clone(),
                field: field.name.clone(),
                value: format!("{}{}", if *negative { "-" } else { "" }, digits),
                kind: kind.to_string(),
            };
            let magnitude = parse_magnitude(digits).map_err(|e| match e {
                MagnitudeError::Overflow => out_of_range(),
                MagnitudeError::Invalid(reason) => invalid(reason),
            })?;
            let signed = if *negative {
                -i128::from(magnitude)
            } else {
                i128::from(magnitude)
            };
            let (min, max) = match kind {
                FieldKind::Int32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
                FieldKind::Int64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
                FieldKind::Uint32 => (0, i128::from(u32::MAX)),
                _ => (0, i128::from(u64::MAX)),
            };
            if signed < min || signed > max {
                return Err(out_of_range());
            }
            Ok(match kind {
                FieldKind::Int32 | FieldKind::Int64 => Value::Int(signed as i64),
                _ => Value::UInt(signed as u64),
            })
        }

        (FieldKind::Bool, Literal::Identifier(word)) => match word.as_str() {
            "true" | "True" | "t" => Ok(Value::Bool(true)),
            "false" | "False" | "f" => Ok(Value::Bool(false)),
            _ => Err(mismatch()),
        },
        (FieldKind::Bool, Literal::Integer { negative: false, digits }) => {
            match digits.as_str() {
                "1" => Ok(Value::Bool(true)),
                "0" => Ok(Value::Bool(false)),
                _ => Err(mismatch()),
            }
        }

        (FieldKind::String, Literal::String(pieces)) => {
            let bytes = decode_pieces(pieces).map_err(invalid)?;
            String::from_utf8(bytes)
                .map(Value::String)
                .map_err(|_| invalid("string is not valid UTF-8".to_string()))
        }
        (FieldKind::Bytes, Literal::String(pieces)) => {
            decode_pieces(pieces).map(Value::Bytes).map_err(invalid)
        }

        (FieldKind::Enum(schema), Literal::Identifier(name)) => match schema.number_of(name) {
            Some(number) => Ok(Value::Enum(EnumValue {
                number,
                name: Some(name.clone()),
            })),
            None => Err(ParseError::UnknownEnumValue {
                span: span.clone(),
                field: field.name.clone(),
                value: name.clone(),
                enum_name: schema.name.clone(),
            }),
        },
        (FieldKind::Enum(schema), Literal::Integer { negative, digits }) => {
            let text = format!("{}{}", if *negative { "-" } else { "" }, digits);
            let unknown = || ParseError::UnknownEnumValue {
                span: span.clone(),
                field: field.name.clone(),
                value: text.clone(),
                enum_name: schema.name.clone(),
            };
            let magnitude = parse_magnitude(digits).map_err(|e| match e {
                MagnitudeError::Overflow => unknown(),
                MagnitudeError::Invalid(reason) => invalid(reason),
            })?;
            let signed = if *negative {
                -i128::from(magnitude)
            } else {
                i128::from(magnitude)
            };
            let number = i32::try_from(signed).map_err(|_| unknown())?;
            match schema.name_of(number) {
                Some(name) => Ok(Value::Enum(EnumValue {
                    number,
                    name: Some(name.to_string()),
                })),
                None => Err(unknown()),
            }
        }

        _ => Err(mismatch()),
    }
}

/// Decode and concatenate adjacent string literal pieces
pub(crate) fn decode_pieces(pieces: &[String]) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    for piece in pieces {
        out.extend(escape::unescape(piece)?);
    }
    Ok(out)
}

enum MagnitudeError {
    Overflow,
    Invalid(String),
}

/// Parse an unsigned integer in decimal, hex (`0x`) or octal (leading `0`)
fn parse_magnitude(digits: &str) -> Result<u64, MagnitudeError> {
    let (body, radix) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (&digits[1..], 8)
    } else {
        (digits, 10)
    };

    u64::from_str_radix(body, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => MagnitudeError::Overflow,
        _ => MagnitudeError::Invalid(format!("'{}' is not a valid integer", digits)),
    })
}

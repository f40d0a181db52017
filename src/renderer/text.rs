//! Canonical text format generation for bound messages

use crate::parser::escape::{escape_bytes, escape_str};
use crate::template::KeyTemplate;
use crate::value::{Message, Value};

/// Build text format lines incrementally
pub struct TextBuilder {
    out: String,
    indent: usize,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn line(&mut self, content: &str) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(content);
        self.out.push('\n');
    }

    /// Add every present field of a message at the current depth
    pub fn add_message_fields(&mut self, message: &Message) {
        for (_, field) in message.fields() {
            self.add_field(&field.name, &field.value);
        }
    }

    /// Add a single field; lists expand to one line or block per element
    pub fn add_field(&mut self, name: &str, value: &Value) {
        match value {
            Value::List(items) => {
                for item in items {
                    self.add_field(name, item);
                }
            }
            Value::Message(message) => self.add_message(name, message),
            scalar => self.line(&format!("{}: {}", name, format_scalar(scalar))),
        }
    }

    /// Add a `name { ... }` block
    pub fn add_message(&mut self, name: &str, message: &Message) {
        self.line(&format!("{} {{", name));
        self.indent += 1;
        self.add_message_fields(message);
        self.indent -= 1;
        self.line("}");
    }

    pub fn build(self) -> String {
        self.out
    }
}

impl Default for TextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the fields of a message in canonical text format
pub fn render_text(message: &Message) -> String {
    let mut builder = TextBuilder::new();
    builder.add_message_fields(message);
    builder.build()
}

/// Render a key template body: its type URL and, if present, its value block
pub fn render_key_template(template: &KeyTemplate) -> String {
    let mut builder = TextBuilder::new();
    builder.add_field("type_url", &Value::String(template.type_url.clone()));
    if let Some(value) = &template.value {
        builder.add_message("value", value);
    }
    builder.build()
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::String(s) => format!("\"{}\"", escape_str(s)),
        Value::Bytes(b) => format!("\"{}\"", escape_bytes(b)),
        Value::Enum(e) => match &e.name {
            Some(name) => name.clone(),
            None => e.number.to_string(),
        },
        // Handled as blocks and repeated lines by the builder
        Value::Message(_) | Value::List(_) => String::new(),
    }
}

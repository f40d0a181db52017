//! Registry mapping type URLs to key format schemas

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::builtin::BUILTIN_SCHEMAS;
use super::descriptor::{EnumSchema, FieldKind, FieldSchema, MessageSchema};

/// Errors that can occur when loading schemas or looking up a type URL
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No key format is registered for the type URL
    #[error("unknown type URL: {type_url}")]
    UnknownTypeUrl { type_url: String },

    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse schema TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A definition is inconsistent (bad type, missing reference, duplicate field)
    #[error("invalid schema for {definition}: {reason}")]
    InvalidSchema { definition: String, reason: String },

    /// Message types reference each other in a loop
    #[error("circular message reference: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}

/// Capability for finding the key format schema of a type URL
pub trait SchemaLookup {
    fn lookup_schema(&self, type_url: &str) -> Result<Arc<MessageSchema>, SchemaError>;
}

/// TOML structure for deserializing schema files
#[derive(Deserialize)]
struct TomlSchemaFile {
    #[serde(default)]
    enums: BTreeMap<String, BTreeMap<String, i32>>,
    #[serde(default)]
    messages: BTreeMap<String, TomlMessage>,
    #[serde(default)]
    key_types: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMessage {
    #[serde(default)]
    fields: Vec<TomlField>,
}

#[derive(Deserialize)]
struct TomlField {
    name: String,
    number: u32,
    #[serde(rename = "type")]
    kind: String,
    type_name: Option<String>,
    #[serde(default)]
    repeated: bool,
}

/// Immutable set of key format schemas, keyed by type URL
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    key_types: BTreeMap<String, Arc<MessageSchema>>,
}

impl SchemaRegistry {
    /// Load a registry from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a registry from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SchemaError> {
        let parsed: TomlSchemaFile = toml::from_str(content)?;
        let mut builder = SchemaBuilder::new(&parsed);

        let mut key_types = BTreeMap::new();
        for (type_url, message_name) in &parsed.key_types {
            if !parsed.messages.contains_key(message_name) {
                return Err(SchemaError::InvalidSchema {
                    definition: type_url.clone(),
                    reason: format!("key format message '{}' is not defined", message_name),
                });
            }
            key_types.insert(type_url.clone(), builder.message(message_name)?);
        }

        // Unreferenced messages still have to be well formed
        for name in parsed.messages.keys() {
            builder.message(name)?;
        }

        tracing::debug!(key_types = key_types.len(), "loaded schema registry");
        Ok(Self { key_types })
    }

    /// Type URLs with a registered key format, in sorted order
    pub fn type_urls(&self) -> impl Iterator<Item = &str> {
        self.key_types.keys().map(|s| s.as_str())
    }

    pub fn contains(&self, type_url: &str) -> bool {
        self.key_types.contains_key(type_url)
    }
}

impl SchemaLookup for SchemaRegistry {
    fn lookup_schema(&self, type_url: &str) -> Result<Arc<MessageSchema>, SchemaError> {
        self.key_types
            .get(type_url)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownTypeUrl {
                type_url: type_url.to_string(),
            })
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::from_str(BUILTIN_SCHEMAS).expect("Built-in schemas should be valid")
    }
}

/// Resolves message references into shared descriptors
struct SchemaBuilder<'a> {
    file: &'a TomlSchemaFile,
    enums: HashMap<String, Arc<EnumSchema>>,
    messages: HashMap<String, Arc<MessageSchema>>,
    /// Messages currently being built (for cycle detection)
    resolving: Vec<String>,
}

impl<'a> SchemaBuilder<'a> {
    fn new(file: &'a TomlSchemaFile) -> Self {
        Self {
            file,
            enums: HashMap::new(),
            messages: HashMap::new(),
            resolving: Vec::new(),
        }
    }

    fn enumeration(&mut self, name: &str) -> Result<Arc<EnumSchema>, SchemaError> {
        if let Some(existing) = self.enums.get(name) {
            return Ok(existing.clone());
        }
        let file = self.file;
        let values = file
            .enums
            .get(name)
            .ok_or_else(|| SchemaError::InvalidSchema {
                definition: name.to_string(),
                reason: "enum is not defined".to_string(),
            })?;

        let mut seen = HashSet::new();
        for (value_name, number) in values {
            if !seen.insert(*number) {
                return Err(SchemaError::InvalidSchema {
                    definition: name.to_string(),
                    reason: format!("value {} ({}) reuses an enum number", value_name, number),
                });
            }
        }

        let schema = Arc::new(EnumSchema::new(
            name,
            values.iter().map(|(n, v)| (n.clone(), *v)),
        ));
        self.enums.insert(name.to_string(), schema.clone());
        Ok(schema)
    }

    fn message(&mut self, name: &str) -> Result<Arc<MessageSchema>, SchemaError> {
        if let Some(existing) = self.messages.get(name) {
            return Ok(existing.clone());
        }
        if self.resolving.iter().any(|n| n == name) {
            let mut chain = self.resolving.clone();
            chain.push(name.to_string());
            return Err(SchemaError::Cycle { chain });
        }
        let file = self.file;
        let def = file
            .messages
            .get(name)
            .ok_or_else(|| SchemaError::InvalidSchema {
                definition: name.to_string(),
                reason: "message is not defined".to_string(),
            })?;

        self.resolving.push(name.to_string());
        let fields = self.fields(name, def);
        self.resolving.pop();

        let schema = Arc::new(MessageSchema::new(name, fields?));
        self.messages.insert(name.to_string(), schema.clone());
        Ok(schema)
    }

    fn fields(&mut self, message: &str, def: &TomlMessage) -> Result<Vec<FieldSchema>, SchemaError> {
        let invalid = |reason: String| SchemaError::InvalidSchema {
            definition: message.to_string(),
            reason,
        };

        let mut names = HashSet::new();
        let mut numbers = HashSet::new();
        let mut fields = Vec::with_capacity(def.fields.len());

        for field in &def.fields {
            if field.number == 0 {
                return Err(invalid(format!("field '{}' has number 0", field.name)));
            }
            if !names.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field name '{}'", field.name)));
            }
            if !numbers.insert(field.number) {
                return Err(invalid(format!("duplicate field number {}", field.number)));
            }

            let kind = match field.kind.as_str() {
                "enum" | "message" => {
                    let type_name = field.type_name.as_deref().ok_or_else(|| {
                        invalid(format!("field '{}' needs a type_name", field.name))
                    })?;
                    if field.kind == "enum" {
                        FieldKind::Enum(self.enumeration(type_name)?)
                    } else {
                        FieldKind::Message(self.message(type_name)?)
                    }
                }
                other => FieldKind::scalar_from_keyword(other).ok_or_else(|| {
                    invalid(format!("field '{}' has unknown type '{}'", field.name, other))
                })?,
            };

            fields.push(FieldSchema {
                name: field.name.clone(),
                number: field.number,
                kind,
                repeated: field.repeated,
            });
        }

        Ok(fields)
    }
}

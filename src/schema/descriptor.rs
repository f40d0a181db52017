//! Message, field and enum descriptors for key formats

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Scalar and composite field types supported in key formats
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    String,
    Bytes,
    Enum(Arc<EnumSchema>),
    Message(Arc<MessageSchema>),
}

impl FieldKind {
    /// Parse a scalar type keyword as written in schema files
    pub fn scalar_from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int32" => Some(FieldKind::Int32),
            "int64" => Some(FieldKind::Int64),
            "uint32" => Some(FieldKind::Uint32),
            "uint64" => Some(FieldKind::Uint64),
            "bool" => Some(FieldKind::Bool),
            "string" => Some(FieldKind::String),
            "bytes" => Some(FieldKind::Bytes),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            FieldKind::Int32 | FieldKind::Int64 | FieldKind::Uint32 | FieldKind::Uint64
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Int32 => write!(f, "int32"),
            FieldKind::Int64 => write!(f, "int64"),
            FieldKind::Uint32 => write!(f, "uint32"),
            FieldKind::Uint64 => write!(f, "uint64"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Bytes => write!(f, "bytes"),
            FieldKind::Enum(e) => write!(f, "enum {}", e.name),
            FieldKind::Message(m) => write!(f, "message {}", m.name),
        }
    }
}

/// A single field of a message
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub number: u32,
    pub kind: FieldKind,
    pub repeated: bool,
}

/// Descriptor for a message type
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSchema {
    pub name: String,
    /// Sorted by field number
    fields: Vec<FieldSchema>,
}

impl MessageSchema {
    /// Create a descriptor; fields are ordered by number
    pub fn new(name: impl Into<String>, mut fields: Vec<FieldSchema>) -> Self {
        fields.sort_by_key(|f| f.number);
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Descriptor for an enum type
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub name: String,
    values: BTreeMap<i32, String>,
}

impl EnumSchema {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = (String, i32)>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(|(n, v)| (v, n)).collect(),
        }
    }

    pub fn name_of(&self, number: i32) -> Option<&str> {
        self.values.get(&number).map(|s| s.as_str())
    }

    pub fn number_of(&self, name: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(v, _)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_type() -> EnumSchema {
        EnumSchema::new(
            "HashType",
            vec![
                ("UNKNOWN_HASH".to_string(), 0),
                ("SHA1".to_string(), 1),
                ("SHA256".to_string(), 3),
            ],
        )
    }

    #[test]
    fn test_enum_lookup_both_ways() {
        let e = hash_type();
        assert_eq!(e.number_of("SHA256"), Some(3));
        assert_eq!(e.name_of(1), Some("SHA1"));
        assert_eq!(e.name_of(2), None);
        assert_eq!(e.number_of("MD5"), None);
    }

    #[test]
    fn test_message_fields_sorted_by_number() {
        let msg = MessageSchema::new(
            "HmacKeyFormat",
            vec![
                FieldSchema {
                    name: "key_size".to_string(),
                    number: 2,
                    kind: FieldKind::Uint32,
                    repeated: false,
                },
                FieldSchema {
                    name: "params".to_string(),
                    number: 1,
                    kind: FieldKind::Message(Arc::new(MessageSchema::new("HmacParams", vec![]))),
                    repeated: false,
                },
            ],
        );
        assert_eq!(msg.field_names(), vec!["params", "key_size"]);
        assert!(msg.field_by_name("key_size").is_some());
        assert!(msg.field_by_name("tag_size").is_none());
    }

    #[test]
    fn test_kind_display_and_keywords() {
        assert_eq!(FieldKind::scalar_from_keyword("uint32"), Some(FieldKind::Uint32));
        assert_eq!(FieldKind::scalar_from_keyword("float"), None);
        assert_eq!(FieldKind::Enum(Arc::new(hash_type())).to_string(), "enum HashType");
        assert!(FieldKind::Int64.is_integer());
        assert!(!FieldKind::Bytes.is_integer());
    }
}

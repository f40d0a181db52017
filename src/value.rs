//! Structured values produced by binding text format input to a schema

use std::collections::BTreeMap;

/// A bound message: its type name and the fields that are present
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    pub type_name: String,
    /// Keyed by field number, which is also the canonical output order
    fields: BTreeMap<u32, FieldValue>,
}

/// A present field, carrying its name so messages render without a schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `int32` and `int64`
    Int(i64),
    /// `uint32` and `uint64`
    UInt(u64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Enum(EnumValue),
    Message(Message),
    /// Elements of a repeated field
    List(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub number: i32,
    /// Symbolic name, if the schema defines one for `number`
    pub name: Option<String>,
}

impl Value {
    /// Whether this is the implicit default of a singular field
    ///
    /// Such fields are not present on the wire and are not printed.
    /// Messages always have explicit presence.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Int(v) => *v == 0,
            Value::UInt(v) => *v == 0,
            Value::Bool(v) => !v,
            Value::String(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Enum(e) => e.number == 0,
            Value::Message(_) => false,
            Value::List(items) => items.is_empty(),
        }
    }
}

impl Message {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set a field, replacing any previous value
    pub fn with_field(mut self, number: u32, name: impl Into<String>, value: Value) -> Self {
        self.set(number, name, value);
        self
    }

    pub fn set(&mut self, number: u32, name: impl Into<String>, value: Value) {
        self.fields.insert(
            number,
            FieldValue {
                name: name.into(),
                value,
            },
        );
    }

    pub fn get(&self, number: u32) -> Option<&FieldValue> {
        self.fields.get(&number)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.fields
            .values()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    pub(crate) fn get_mut(&mut self, number: u32) -> Option<&mut FieldValue> {
        self.fields.get_mut(&number)
    }

    /// Present fields in field-number order
    pub fn fields(&self) -> impl Iterator<Item = (u32, &FieldValue)> {
        self.fields.iter().map(|(n, f)| (*n, f))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop singular fields holding their implicit default
    pub(crate) fn clear_defaults(&mut self) {
        self.fields.retain(|_, f| !f.value.is_default());
    }

    /// Merge `other` into this message
    ///
    /// Nested messages merge recursively, lists append and anything else
    /// is replaced.
    pub fn merge_from(&mut self, other: Message) {
        for (number, incoming) in other.fields {
            match self.fields.get_mut(&number) {
                Some(existing) => match (&mut existing.value, incoming.value) {
                    (Value::Message(current), Value::Message(next)) => current.merge_from(next),
                    (Value::List(current), Value::List(next)) => current.extend(next),
                    (slot, next) => *slot = next,
                },
                None => {
                    self.fields.insert(number, incoming);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_iterate_in_number_order() {
        let msg = Message::new("HmacKeyFormat")
            .with_field(3, "version", Value::UInt(1))
            .with_field(2, "key_size", Value::UInt(32));
        let names: Vec<_> = msg.fields().map(|(_, f)| f.name.as_str()).collect();
        assert_eq!(names, vec!["key_size", "version"]);
        assert_eq!(msg.get_by_name("key_size"), Some(&Value::UInt(32)));
    }

    #[test]
    fn test_defaults() {
        assert!(Value::UInt(0).is_default());
        assert!(Value::String(String::new()).is_default());
        assert!(Value::Enum(EnumValue {
            number: 0,
            name: Some("UNKNOWN_HASH".to_string())
        })
        .is_default());
        assert!(!Value::Message(Message::new("Empty")).is_default());
        assert!(!Value::Bool(true).is_default());
    }

    #[test]
    fn test_clear_defaults_keeps_messages() {
        let mut msg = Message::new("M")
            .with_field(1, "size", Value::UInt(0))
            .with_field(2, "params", Value::Message(Message::new("P")));
        msg.clear_defaults();
        assert!(msg.get(1).is_none());
        assert!(msg.get(2).is_some());
    }

    #[test]
    fn test_merge_from() {
        let mut base = Message::new("M")
            .with_field(
                1,
                "params",
                Value::Message(Message::new("P").with_field(1, "hash", Value::UInt(1))),
            )
            .with_field(2, "key_size", Value::UInt(16))
            .with_field(4, "ids", Value::List(vec![Value::UInt(1)]));
        let other = Message::new("M")
            .with_field(
                1,
                "params",
                Value::Message(Message::new("P").with_field(2, "tag_size", Value::UInt(16))),
            )
            .with_field(2, "key_size", Value::UInt(32))
            .with_field(4, "ids", Value::List(vec![Value::UInt(2)]));

        base.merge_from(other);

        match base.get_by_name("params") {
            Some(Value::Message(p)) => {
                assert_eq!(p.get_by_name("hash"), Some(&Value::UInt(1)));
                assert_eq!(p.get_by_name("tag_size"), Some(&Value::UInt(16)));
            }
            other => panic!("Expected merged params, got {:?}", other),
        }
        assert_eq!(base.get_by_name("key_size"), Some(&Value::UInt(32)));
        assert_eq!(
            base.get_by_name("ids"),
            Some(&Value::List(vec![Value::UInt(1), Value::UInt(2)]))
        );
    }
}

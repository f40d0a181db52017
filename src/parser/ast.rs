//! Untyped syntax tree for protobuf text format documents
//!
//! The tree records what was written, not what it means: integers keep their
//! source spelling and strings keep their escapes. Binding against a schema
//! happens in [`crate::template::parse_text`].

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Field or enum value name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root node: the top-level field list of a text format message
#[derive(Debug, Clone, PartialEq)]
pub struct TextDocument {
    pub fields: Vec<Spanned<FieldEntry>>,
}

/// `name: value` or `name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub name: Spanned<Identifier>,
    pub value: Spanned<TextValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextValue {
    Scalar(Literal),
    /// `{ ... }` or `< ... >`
    Message(Vec<Spanned<FieldEntry>>),
    /// `[a, b, c]`, only valid for repeated fields
    List(Vec<Spanned<TextValue>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Bare word: enum value names, `true`/`false`, or a mistake
    Identifier(String),
    Integer { negative: bool, digits: String },
    Float { negative: bool, text: String },
    /// Adjacent quoted pieces, concatenated once decoded
    String(Vec<String>),
}

impl Literal {
    /// Short description used in type mismatch diagnostics
    pub fn describe(&self) -> String {
        match self {
            Literal::Identifier(s) => format!("identifier '{}'", s),
            Literal::Integer { negative, digits } => {
                format!("integer {}{}", if *negative { "-" } else { "" }, digits)
            }
            Literal::Float { negative, text } => {
                format!("float {}{}", if *negative { "-" } else { "" }, text)
            }
            Literal::String(_) => "string literal".to_string(),
        }
    }
}

impl TextValue {
    pub fn describe(&self) -> String {
        match self {
            TextValue::Scalar(lit) => lit.describe(),
            TextValue::Message(_) => "message".to_string(),
            TextValue::List(_) => "list".to_string(),
        }
    }
}

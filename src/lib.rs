//! keytemplate - key template creation for the Tink key management tool
//!
//! This library resolves a primitive's type URL and optional key format text
//! into a key template, and writes it in canonical text format behind a
//! provenance header.
//!
//! # Example
//!
//! ```rust
//! use keytemplate::{create_key_template, SchemaRegistry};
//!
//! let registry = SchemaRegistry::default();
//! let mut out = Vec::new();
//! create_key_template(
//!     &mut out,
//!     "type.googleapis.com/google.crypto.tink.AesGcmKey",
//!     Some("key_size: 32"),
//!     &registry,
//! )
//! .unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("value {\n  key_size: 32\n}\n"));
//! ```

pub mod error;
pub mod parser;
pub mod renderer;
pub mod schema;
pub mod template;
pub mod value;

use std::io::Write;

pub use error::ParseError;
pub use renderer::{render_text, write_template, WriterConfig};
pub use schema::{SchemaError, SchemaLookup, SchemaRegistry};
pub use template::{parse_text, resolve, KeyTemplate, TemplateError};
pub use value::{Message, Value};

/// Resolve a template and write it to `sink` with default configuration
///
/// Nothing is written unless resolution succeeds.
pub fn create_key_template<W, L>(
    sink: &mut W,
    type_url: &str,
    key_format: Option<&str>,
    lookup: &L,
) -> Result<KeyTemplate, TemplateError>
where
    W: Write + ?Sized,
    L: SchemaLookup + ?Sized,
{
    create_key_template_with_config(sink, type_url, key_format, lookup, &WriterConfig::default())
}

/// Resolve a template and write it to `sink` with custom configuration
///
/// # Example
///
/// ```rust
/// use keytemplate::{create_key_template_with_config, SchemaRegistry, WriterConfig};
///
/// let config = WriterConfig::new().with_single_write(true);
/// let mut out = Vec::new();
/// let template = create_key_template_with_config(
///     &mut out,
///     "type.googleapis.com/google.crypto.tink.Ed25519PrivateKey",
///     None,
///     &SchemaRegistry::default(),
///     &config,
/// )
/// .unwrap();
///
/// assert!(template.value.is_none());
/// assert!(!String::from_utf8(out).unwrap().contains("--key-format"));
/// ```
pub fn create_key_template_with_config<W, L>(
    sink: &mut W,
    type_url: &str,
    key_format: Option<&str>,
    lookup: &L,
    config: &WriterConfig,
) -> Result<KeyTemplate, TemplateError>
where
    W: Write + ?Sized,
    L: SchemaLookup + ?Sized,
{
    let template = resolve(type_url, key_format, lookup)?;
    write_template(sink, type_url, key_format, &template, config)?;
    Ok(template)
}

//! Key templates
//!
//! A key template names a primitive by type URL and optionally carries the
//! key format used to generate keys of that type. This module resolves
//! templates from command input and reads them back from text.
//!
//! # Example
//!
//! ```rust
//! use keytemplate::template::resolve;
//! use keytemplate::SchemaRegistry;
//!
//! let registry = SchemaRegistry::default();
//! let template = resolve(
//!     "type.googleapis.com/google.crypto.tink.AesGcmKey",
//!     Some("key_size: 32"),
//!     &registry,
//! )
//! .unwrap();
//! assert!(template.value.is_some());
//! ```

mod binder;
mod error;
mod key_template;
mod resolver;

pub use binder::parse_text;
pub use error::TemplateError;
pub use key_template::KeyTemplate;
pub use resolver::{resolve, validate_type_url};

//! Key format schemas
//!
//! A key template's parameters are a message whose shape depends on the
//! template's type URL. This module describes those shapes and provides a
//! registry for looking them up. Registries are loaded from TOML:
//!
//! ```toml
//! [enums.HashType]
//! UNKNOWN_HASH = 0
//! SHA256 = 3
//!
//! [messages.HmacParams]
//! fields = [
//!     { name = "hash", number = 1, type = "enum", type_name = "HashType" },
//!     { name = "tag_size", number = 2, type = "uint32" },
//! ]
//!
//! [key_types]
//! "type.example.com/MacKey" = "HmacParams"
//! ```

mod builtin;
mod descriptor;
mod registry;

pub use descriptor::{EnumSchema, FieldKind, FieldSchema, MessageSchema};
pub use registry::{SchemaError, SchemaLookup, SchemaRegistry};

//! Canonical writer for key templates
//!
//! This module prints bound messages in canonical text format and writes
//! a template to a byte sink behind its provenance header.

pub mod config;
mod header;
mod text;
mod writer;

pub use config::WriterConfig;
pub use header::provenance_header;
pub use text::{render_key_template, render_text, TextBuilder};
pub use writer::write_template;

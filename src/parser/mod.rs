//! Parser for the protobuf text format

pub mod ast;
pub mod escape;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::parse;

//! Error types for parsing and binding text format input

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("unknown field '{field}' in {message_type}")]
    UnknownField {
        span: Span,
        field: String,
        message_type: String,
    },

    #[error("field '{field}' expects {expected}, found {found}")]
    TypeMismatch {
        span: Span,
        field: String,
        expected: String,
        found: String,
    },

    #[error("value {value} is out of range for field '{field}' ({kind})")]
    OutOfRange {
        span: Span,
        field: String,
        value: String,
        kind: String,
    },

    #[error("'{value}' is not a value of enum {enum_name} (field '{field}')")]
    UnknownEnumValue {
        span: Span,
        field: String,
        value: String,
        enum_name: String,
    },

    #[error("invalid literal for field '{field}': {reason}")]
    InvalidLiteral {
        span: Span,
        field: String,
        reason: String,
    },
}

impl ParseError {
    /// Diagnostic for input the lexer could not recognize
    pub fn unrecognized(text: &str, span: Span) -> Self {
        ParseError::Syntax {
            span,
            message: format!("Unrecognized input '{}'", text),
            expected: Vec::new(),
        }
    }

    /// Location of the offending input
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::UnknownField { span, .. }
            | ParseError::TypeMismatch { span, .. }
            | ParseError::OutOfRange { span, .. }
            | ParseError::UnknownEnumValue { span, .. }
            | ParseError::InvalidLiteral { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (message, label) = match self {
            ParseError::Syntax {
                message, expected, ..
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (message.clone(), format!("{}{}", message, expected_str))
            }
            other => (other.to_string(), other.to_string()),
        };
        let span = self.span().clone();

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            // Report output is best effort; fall back to the plain message
            Err(_) => message,
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::Int(n) => format!("integer {}", n),
        Token::Float(n) => format!("float {}", n),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::AngleOpen => "'<'".to_string(),
        Token::AngleClose => "'>'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Semicolon => "';'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Comment => "comment".to_string(),
    }
}

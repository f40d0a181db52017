//! Lexer for the protobuf text format using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("<")]
    AngleOpen,
    #[token(">")]
    AngleClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("-")]
    Minus,

    // Field names, enum value names and the bool keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Raw literal contents between the quotes; escapes are decoded during binding
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    #[regex(r#"'([^'\\\n]|\\.)*'"#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    String(String),

    /// Decimal, hex (`0x1f`) or octal (`017`) integer, kept verbatim
    #[regex(r"0[xX][0-9a-fA-F]+|[0-9]+", |lex| lex.slice().to_string())]
    Int(String),

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?[fF]?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[fF]?", |lex| lex.slice().to_string())]
    Float(String),

    // Comments (skip)
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
}

/// Lex input into tokens with spans.
///
/// Unrecognized input is reported as `Err(span)` so the caller can turn it
/// into a diagnostic instead of silently dropping it.
pub fn lex(input: &str) -> impl Iterator<Item = Result<(Token, Span), Span>> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(t) => Ok((t, span)),
            Err(()) => Err(span),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).filter_map(|r| r.ok()).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_scalar_field() {
        assert_eq!(
            tokens("key_size: 32"),
            vec![
                Token::Ident("key_size".to_string()),
                Token::Colon,
                Token::Int("32".to_string())
            ]
        );
    }

    #[test]
    fn test_nested_message_delimiters() {
        assert_eq!(
            tokens("params { } params < >"),
            vec![
                Token::Ident("params".to_string()),
                Token::BraceOpen,
                Token::BraceClose,
                Token::Ident("params".to_string()),
                Token::AngleOpen,
                Token::AngleClose,
            ]
        );
    }

    #[test]
    fn test_strings_keep_raw_escapes() {
        assert_eq!(
            tokens(r#""a\"b" 'c'"#),
            vec![
                Token::String(r#"a\"b"#.to_string()),
                Token::String("c".to_string())
            ]
        );
    }

    #[test]
    fn test_integer_forms() {
        assert_eq!(
            tokens("0x1F 017 -5"),
            vec![
                Token::Int("0x1F".to_string()),
                Token::Int("017".to_string()),
                Token::Minus,
                Token::Int("5".to_string()),
            ]
        );
    }

    #[test]
    fn test_float_is_not_an_integer() {
        assert_eq!(tokens("1.5"), vec![Token::Float("1.5".to_string())]);
    }

    #[test]
    fn test_comments_skipped() {
        let input = "# Format: KeyTemplate\n# Generated with command:\ntype_url: \"x\"";
        assert_eq!(
            tokens(input),
            vec![
                Token::Ident("type_url".to_string()),
                Token::Colon,
                Token::String("x".to_string())
            ]
        );
    }

    #[test]
    fn test_separators_and_lists() {
        assert_eq!(
            tokens("a: [1, 2]; b: 3,"),
            vec![
                Token::Ident("a".to_string()),
                Token::Colon,
                Token::BracketOpen,
                Token::Int("1".to_string()),
                Token::Comma,
                Token::Int("2".to_string()),
                Token::BracketClose,
                Token::Semicolon,
                Token::Ident("b".to_string()),
                Token::Colon,
                Token::Int("3".to_string()),
                Token::Comma,
            ]
        );
    }

    #[test]
    fn test_unrecognized_input_is_reported() {
        let results: Vec<_> = lex("key_size: $").collect();
        assert!(matches!(results.last(), Some(Err(span)) if *span == (10..11)));
    }
}

//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::{self, Token};
use crate::ParseError;

/// Parse text format source into an untyped document
pub fn parse(input: &str) -> Result<TextDocument, Vec<ParseError>> {
    let len = input.len();

    // Lex everything up front so unrecognized characters become diagnostics
    let mut tokens: Vec<(Token, SimpleSpan)> = Vec::new();
    let mut errors = Vec::new();
    for item in lexer::lex(input) {
        match item {
            Ok((tok, span)) => tokens.push((tok, span.into())),
            Err(span) => errors.push(ParseError::unrecognized(&input[span.clone()], span)),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let token_stream = Stream::from_iter(tokens.into_iter())
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, TextDocument, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    // Scalars keep their source spelling; the binder knows the target type
    let integer = just(Token::Minus)
        .or_not()
        .then(select! { Token::Int(s) => s })
        .map(|(neg, digits)| Literal::Integer {
            negative: neg.is_some(),
            digits,
        });

    let float = just(Token::Minus)
        .or_not()
        .then(select! { Token::Float(s) => s })
        .map(|(neg, text)| Literal::Float {
            negative: neg.is_some(),
            text,
        });

    // Adjacent string literals concatenate: "ab" "cd" == "abcd"
    let strings = select! { Token::String(s) => s }
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .map(Literal::String);

    let word = select! { Token::Ident(s) => Literal::Identifier(s) };

    let scalar = choice((integer, float, strings, word)).map(TextValue::Scalar);

    let field = recursive(|field| {
        // Nested message body: `{ ... }` or the older `< ... >` form
        let message = choice((
            field
                .clone()
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
            field
                .clone()
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::AngleOpen), just(Token::AngleClose)),
        ))
        .map(TextValue::Message);

        let element = choice((message.clone(), scalar.clone()))
            .map_with(|v, e| Spanned::new(v, span_range(&e.span())));

        let list = element
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
            .map(TextValue::List);

        let value = choice((list, message.clone(), scalar.clone()))
            .map_with(|v, e| Spanned::new(v, span_range(&e.span())));

        // The colon is optional before a message body
        identifier
            .clone()
            .then(choice((
                just(Token::Colon).ignore_then(value),
                message.map_with(|v, e| Spanned::new(v, span_range(&e.span()))),
            )))
            .then_ignore(just(Token::Comma).or(just(Token::Semicolon)).or_not())
            .map_with(|(name, value), e| {
                Spanned::new(FieldEntry { name, value }, span_range(&e.span()))
            })
            .boxed()
    });

    field
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|fields| TextDocument { fields })
}

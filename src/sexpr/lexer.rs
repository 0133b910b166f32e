use logos::{Logos, SpannedIter};

pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) span: logos::Span,
}

pub(super) struct TokenIter<'a> {
    iter: SpannedIter<'a, RawToken>,
}

impl<'a> TokenIter<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            iter: RawToken::lexer(input).spanned(),
        }
    }
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let (raw, span) = self.iter.next()?;
        let token = match raw {
            Ok(RawToken::LParen) => Token {
                kind: TokenKind::LParen,
                span,
            },
            Ok(RawToken::RParen) => Token {
                kind: TokenKind::RParen,
                span,
            },
            // The span of a quoted string excludes its quotes
            Ok(RawToken::Quoted) => Token {
                kind: TokenKind::String,
                span: (span.start + 1)..(span.end - 1),
            },
            Ok(RawToken::Bare) => Token {
                kind: TokenKind::String,
                span,
            },
            Err(()) => Token {
                kind: TokenKind::Error,
                span,
            },
        };
        Some(token)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TokenKind {
    LParen,
    RParen,
    String,
    Error,
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f\n]+")]
enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[regex(r#""([^"\\]|\\["\\/bnfrt]|\\u[a-fA-F0-9]{4})*""#)]
    Quoted,
    #[regex(r#"[^"() \t\r\f\n]+"#)]
    Bare,
}

use crate::error::ParseError;

use super::{
    lexer::{Token, TokenIter, TokenKind},
    SExpr,
};

type Span = logos::Span;

pub(super) struct Parser<'a> {
    input: &'a str,
    iter: TokenIter<'a>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            input,
            iter: TokenIter::new(input),
        }
    }

    fn eof(&self) -> Span {
        let end = self.input.len();
        end..end
    }

    fn get(&mut self) -> Result<Token, ParseError> {
        self.iter
            .next()
            .ok_or_else(|| ParseError::UnexpectedEof { at: self.eof() })
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let tok = self.get()?;
        if tok.kind == kind {
            Ok(tok)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("{:?}", kind),
                found: format!("{:?}", tok.kind),
                at: tok.span,
            })
        }
    }

    fn parse_list(&mut self) -> Result<SExpr<'a>, ParseError> {
        self.expect(TokenKind::LParen)?;
        self.parse_list_body()
    }

    /// Parses the label and children of a list whose `(` is already consumed
    fn parse_list_body(&mut self) -> Result<SExpr<'a>, ParseError> {
        let label = self.expect(TokenKind::String)?;

        let mut children = Vec::new();
        loop {
            let tok = self.get()?;
            match tok.kind {
                TokenKind::RParen => break,
                TokenKind::LParen => children.push(self.parse_list_body()?),
                TokenKind::String => children.push(SExpr::String(&self.input[tok.span])),
                TokenKind::Error => {
                    return Err(ParseError::UnknownToken {
                        found: self.input[tok.span.clone()].to_owned(),
                        at: tok.span,
                    })
                }
            }
        }

        Ok(SExpr::SExpr(
            &self.input[label.span],
            children.into_boxed_slice(),
        ))
    }

    pub(super) fn parse_document(mut self) -> Result<SExpr<'a>, ParseError> {
        let root = self.parse_list()?;
        match self.iter.next() {
            None => Ok(root),
            Some(tok) => Err(ParseError::TrailingInput { at: tok.span }),
        }
    }
}

impl<'a> TryFrom<&'a str> for SExpr<'a> {
    type Error = ParseError;

    fn try_from(input: &'a str) -> Result<Self, Self::Error> {
        Parser::new(input).parse_document()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::sexpr::SExpr;
    use rstest::*;

    #[rstest]
    #[case("(abc)", "(abc)")]
    #[case("(abc\n)", "(abc)")]
    #[case("(net (code \"1\") (name \"/x\"))", "(net (code \"1\") (name \"/x\"))")]
    #[case("(field (name Order) \"a,b\")", "(field (name \"Order\") \"a,b\")")]
    fn can_parse_sexpr(#[case] input: &str, #[case] expected: &str) {
        let sexpr = SExpr::try_from(input).unwrap();
        assert_eq!(&format!("{sexpr}"), expected);
    }

    #[test]
    fn missing_close_paren_is_eof() {
        let err = SExpr::try_from("(a (b \"c\")").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedEof { at: 10..10 });
    }

    #[test]
    fn list_must_start_with_label() {
        let err = SExpr::try_from("(())").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn trailing_input_is_rejected() {
        let err = SExpr::try_from("(a) (b)").unwrap_err();
        assert_eq!(err, ParseError::TrailingInput { at: 4..5 });
    }
}

use std::fmt::Display;

use crate::error::ParseError;

mod lexer;
mod parser;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SExpr<'a> {
    SExpr(&'a str, Box<[SExpr<'a>]>),
    String(&'a str),
}

impl<'a> Display for SExpr<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SExpr::SExpr(label, children) => {
                write!(f, "({}", label)?;
                for child in children.iter() {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
            SExpr::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl<'a> SExpr<'a> {
    /// The first bare string child, e.g. `"b"` in `(a "b" (c "d"))`
    pub fn text(&self) -> Option<&'a str> {
        match self {
            SExpr::String(_) => None,
            SExpr::SExpr(_, children) => children.iter().find_map(|child| match child {
                SExpr::String(s) => Some(*s),
                SExpr::SExpr(_, _) => None,
            }),
        }
    }

    /// The text of the first `(label "value")` child
    pub fn value(&self, label: &str) -> Result<&'a str, ParseError> {
        self.child(label)?
            .text()
            .ok_or_else(|| ParseError::MissingValue(label.to_owned()))
    }

    /// Like [`SExpr::value`], but an absent child or an empty list reads as `""`
    ///
    /// KiCad writes empty metadata such as `(company)` without a value.
    pub fn value_or_empty(&self, label: &str) -> &'a str {
        self.opt_value(label).unwrap_or("")
    }

    pub fn opt_value(&self, label: &str) -> Option<&'a str> {
        self.children(label).next().and_then(SExpr::text)
    }

    pub fn children<'b, 'c>(&'b self, label: &'c str) -> LabeledChildIterator<'a, 'b, 'c> {
        let iter = match self {
            SExpr::String(_) => None,
            SExpr::SExpr(_, children) => Some(children.iter()),
        };
        LabeledChildIterator { iter, label }
    }

    pub fn child<'b>(&'b self, label: &str) -> Result<&'b SExpr<'a>, ParseError> {
        self.children(label)
            .next()
            .ok_or_else(|| ParseError::MissingChild(label.to_owned()))
    }

    /// Children of the first `(outer (inner ...) (inner ...))` block
    ///
    /// Yields nothing when the outer block is absent.
    pub fn grandchildren<'b, 'c>(
        &'b self,
        outer: &str,
        inner: &'c str,
    ) -> LabeledChildIterator<'a, 'b, 'c> {
        match self.children(outer).next() {
            Some(block) => block.children(inner),
            None => LabeledChildIterator { iter: None, label: inner },
        }
    }
}

#[derive(Debug)]
pub struct LabeledChildIterator<'a, 'b, 'c> {
    iter: Option<std::slice::Iter<'b, SExpr<'a>>>,
    label: &'c str,
}

impl<'a, 'b, 'c> Iterator for LabeledChildIterator<'a, 'b, 'c> {
    type Item = &'b SExpr<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let iter = self.iter.as_mut()?;
        let label = self.label;
        iter.find(|item| matches!(item, SExpr::SExpr(l, _) if *l == label))
    }
}

impl<'a> TryFrom<&'a String> for SExpr<'a> {
    type Error = ParseError;

    fn try_from(input: &'a String) -> Result<Self, Self::Error> {
        SExpr::try_from(input.as_str())
    }
}

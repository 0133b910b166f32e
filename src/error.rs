use thiserror::Error;

type Span = logos::Span;

/// Netlist parse errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("SExpr {0} not found")]
    MissingChild(String),
    #[error("Value of {0} not found")]
    MissingValue(String),
    #[error("Unknown pin type {0}")]
    UnknownPinType(String),
    #[error("Unexpected end of input at {at:?}")]
    UnexpectedEof { at: Span },
    #[error("Expected {expected} but found {found} at {at:?}")]
    UnexpectedToken {
        expected: String,
        found: String,
        at: Span,
    },
    #[error("Unknown token {found} at {at:?}")]
    UnknownToken { found: String, at: Span },
    #[error("Unexpected input after netlist at {at:?}")]
    TrailingInput { at: Span },
    #[error("Component reference {0} is used more than once")]
    DuplicateReference(String),
    #[error("Part {0} has more than one pin {1}")]
    DuplicatePin(String, String),
}

/// Errors that abort a translation pass
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Net refers to unknown component {0}")]
    UnknownComponent(String),
    #[error("Part {part} has no pin {pin}")]
    UnresolvedPin { part: String, pin: String },
}

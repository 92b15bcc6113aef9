use thiserror::Error;

use crate::token::TokenKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unrecognized character '{character}' at position {position}")]
    UnrecognizedCharacter { character: char, position: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("Expected {expected} but found {found} at position {position}")]
    UnexpectedToken {
        expected: TokenKind,
        found: String,
        position: usize,
    },
    #[error("Expected an expression but found {found} at position {position}")]
    ExpectedExpression { found: String, position: usize },
    #[error("Constant '{name}' must be initialized")]
    UninitializedConstant { name: String },
    #[error("Dot access requires an identifier on the right-hand side, found '{found}' at position {position}")]
    InvalidDotProperty { found: String, position: usize },
    #[error("Duplicate parameter '{name}' in function '{function}'")]
    DuplicateParameter { function: String, name: String },
    #[error("Invalid number literal '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },
    #[error("Nesting deeper than {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Cannot declare '{name}', it is already declared in this scope")]
    Redeclaration { name: String },
    #[error("Cannot resolve '{name}', it is not declared")]
    UnresolvedName { name: String },
    #[error("Cannot assign to '{name}', it was declared constant")]
    ConstantAssignment { name: String },
    #[error("Invalid assignment target '{target}', expected an identifier")]
    InvalidAssignmentTarget { target: String },
    #[error("'{callee}' is a {type_name} and cannot be called")]
    NotCallable { callee: String, type_name: String },
    #[error("Cannot access property '{property}' of a {type_name}")]
    NotAnObject { property: String, type_name: String },
    #[error("A {type_name} cannot be used as a property key")]
    InvalidPropertyKey { type_name: String },
    #[error("Maximum call depth of {limit} exceeded calling '{name}'")]
    CallDepthExceeded { name: String, limit: usize },
    /// Raised by host-registered natives to report their own failures.
    #[error("Native function '{name}' failed: {message}")]
    Native { name: String, message: String },
}

/// Failure of a whole evaluation unit, from source text to value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Error::Parse(ParseError::Lex(error))
    }
}
